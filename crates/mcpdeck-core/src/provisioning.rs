//! Invocation profile for provisioning scripts.
//!
//! Scripts are opaque executables. They run non-interactively, without user
//! profiles, with stdin closed and their own directory as working directory.

use std::time::Duration;

use crate::domain::{ScriptKind, ScriptRef};
use crate::ports::{CommandSpec, RunOptions};

/// PowerShell switches placed before `-File <script>`.
pub const POWERSHELL_FLAGS: &[&str] = &[
    "-NoProfile",
    "-NonInteractive",
    "-NoLogo",
    "-ExecutionPolicy",
    "Bypass",
    "-OutputFormat",
    "Text",
    "-File",
];

/// bash switches placed before the script path.
pub const SHELL_FLAGS: &[&str] = &["--noprofile", "--norc"];

/// Builds the hardened command line for a provisioning script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptInvoker {
    powershell_binary: String,
    shell_binary: String,
    options: RunOptions,
}

impl ScriptInvoker {
    pub fn new(
        powershell_binary: impl Into<String>,
        shell_binary: impl Into<String>,
        max_output_bytes: usize,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            powershell_binary: powershell_binary.into(),
            shell_binary: shell_binary.into(),
            options: RunOptions::default()
                .with_max_output(max_output_bytes)
                .with_timeout(timeout),
        }
    }

    pub const fn options(&self) -> &RunOptions {
        &self.options
    }

    pub fn command_for(&self, script: &ScriptRef) -> CommandSpec {
        let (program, flags) = match script.kind {
            ScriptKind::PowerShell => (&self.powershell_binary, POWERSHELL_FLAGS),
            ScriptKind::Shell => (&self.shell_binary, SHELL_FLAGS),
        };
        let spec = CommandSpec::new(program)
            .args(flags.iter().copied())
            .arg(script.path.to_string_lossy());
        match script.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => spec.current_dir(dir),
            _ => spec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn invoker() -> ScriptInvoker {
        ScriptInvoker::new("powershell", "bash", 1024 * 1024, None)
    }

    #[test]
    fn test_powershell_profile() {
        let script = ScriptRef {
            file_name: "loadBraveMCP.ps1".to_string(),
            path: PathBuf::from("/srv/scripts/loadBraveMCP.ps1"),
            kind: ScriptKind::PowerShell,
        };
        let spec = invoker().command_for(&script);
        assert_eq!(spec.program, "powershell");
        assert_eq!(spec.args.first().map(String::as_str), Some("-NoProfile"));
        assert_eq!(&spec.args[spec.args.len() - 2..], ["-File", "/srv/scripts/loadBraveMCP.ps1"]);
        assert_eq!(spec.working_dir, Some(PathBuf::from("/srv/scripts")));
    }

    #[test]
    fn test_shell_profile() {
        let script = ScriptRef {
            file_name: "loadGithubMCP.sh".to_string(),
            path: PathBuf::from("/srv/scripts/loadGithubMCP.sh"),
            kind: ScriptKind::Shell,
        };
        let spec = invoker().command_for(&script);
        assert_eq!(spec.program, "bash");
        assert_eq!(spec.args, ["--noprofile", "--norc", "/srv/scripts/loadGithubMCP.sh"]);
    }

    #[test]
    fn test_options_carry_limits() {
        let invoker = ScriptInvoker::new("pwsh", "bash", 42, Some(Duration::from_secs(5)));
        assert_eq!(invoker.options().max_output_bytes, 42);
        assert_eq!(invoker.options().timeout, Some(Duration::from_secs(5)));
    }
}
