//! Data root detection (environment override, source checkout, platform dir).

use std::env;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable that overrides the data root.
pub const DATA_DIR_ENV: &str = "MCPDECK_DATA_DIR";

/// Source checkout this binary was built from, if it should be used.
///
/// Debug builds always run against the checkout so `scripts/` next to the
/// workspace is picked up without configuration.
#[allow(clippy::unnecessary_wraps)] // Option is needed for release builds
fn detect_local_repo() -> Option<PathBuf> {
    let repo_root = PathBuf::from(env!("MCPDECK_REPO_ROOT"));

    #[cfg(debug_assertions)]
    {
        Some(repo_root)
    }

    #[cfg(not(debug_assertions))]
    {
        let exe = env::current_exe().ok()?.canonicalize().ok()?;
        let repo = repo_root.canonicalize().ok()?;
        exe.starts_with(&repo).then_some(repo)
    }
}

/// Root directory holding `scripts/` and `scripts/settings/`.
///
/// Resolution order:
/// 1. `MCPDECK_DATA_DIR` environment variable
/// 2. Local source checkout (if running from source)
/// 3. System data directory (e.g. `~/.local/share/mcpdeck`)
///
/// Nothing is created here; the settings store creates its directory on save.
pub fn data_root() -> Result<PathBuf, PathError> {
    if let Ok(path) = env::var(DATA_DIR_ENV) {
        return normalize_user_path(&path);
    }

    if let Some(repo) = detect_local_repo() {
        return Ok(repo);
    }

    let data_dir = dirs::data_local_dir().ok_or(PathError::NoDataDir)?;
    Ok(data_dir.join("mcpdeck"))
}

/// Normalize a user-provided path, expanding `~` and making it absolute.
pub fn normalize_user_path(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let expanded = if trimmed == "~" {
        dirs::home_dir().ok_or(PathError::NoHomeDir)?
    } else if let Some(rest) = trimmed.strip_prefix("~/") {
        dirs::home_dir().ok_or(PathError::NoHomeDir)?.join(rest)
    } else {
        PathBuf::from(trimmed)
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(expanded))
            .map_err(|e| PathError::CurrentDirError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::test_utils::{ENV_LOCK, EnvVarGuard};

    #[test]
    fn test_env_override_wins() {
        let _lock = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let _env = EnvVarGuard::set(DATA_DIR_ENV, dir.path().to_str().unwrap());
        assert_eq!(data_root().unwrap(), dir.path());
    }

    #[test]
    fn test_debug_build_uses_checkout() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _env = EnvVarGuard::unset(DATA_DIR_ENV);
        let root = data_root().unwrap();
        if cfg!(debug_assertions) {
            assert_eq!(root, PathBuf::from(env!("MCPDECK_REPO_ROOT")));
        }
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(matches!(normalize_user_path("   "), Err(PathError::EmptyPath)));
    }

    #[test]
    fn test_normalize_makes_relative_absolute() {
        let path = normalize_user_path("scripts").unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("scripts"));
    }
}
