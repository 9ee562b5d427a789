//! Identifier validation for values that reach command lines or file paths.
//!
//! Container names, instance ids, server types and script references all end
//! up as command arguments or path components. They are checked here once,
//! before any component builds a command or a path from them.

use thiserror::Error;

/// Longest identifier accepted anywhere in the system.
pub const MAX_IDENTIFIER_LEN: usize = 128;

/// Rejection reasons for identifiers and setting keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("{kind} is required")]
    Empty { kind: &'static str },

    #[error("{kind} exceeds {max} characters")]
    TooLong { kind: &'static str, max: usize },

    #[error("{kind} '{value}' contains invalid character '{ch}'")]
    InvalidChar {
        kind: &'static str,
        value: String,
        ch: char,
    },

    #[error("{kind} '{value}' must start with a letter or digit")]
    InvalidStart { kind: &'static str, value: String },
}

/// Validate a runtime identifier (container name or id) or a server type.
///
/// Accepts `[A-Za-z0-9][A-Za-z0-9_.-]*`, which is the container runtime's own
/// naming rule and excludes path separators and shell metacharacters.
pub fn validate_identifier<'a>(kind: &'static str, value: &'a str) -> Result<&'a str, IdentifierError> {
    if value.is_empty() {
        return Err(IdentifierError::Empty { kind });
    }
    if value.len() > MAX_IDENTIFIER_LEN {
        return Err(IdentifierError::TooLong {
            kind,
            max: MAX_IDENTIFIER_LEN,
        });
    }
    let mut chars = value.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_alphanumeric()) {
        return Err(IdentifierError::InvalidStart {
            kind,
            value: value.to_string(),
        });
    }
    if let Some(ch) = chars.find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))) {
        return Err(IdentifierError::InvalidChar {
            kind,
            value: value.to_string(),
            ch,
        });
    }
    Ok(value)
}

/// Validate a script reference: a bare file name inside the catalog directory.
pub fn validate_script_ref(value: &str) -> Result<&str, IdentifierError> {
    let checked = validate_identifier("script reference", value)?;
    if checked.contains("..") {
        return Err(IdentifierError::InvalidChar {
            kind: "script reference",
            value: value.to_string(),
            ch: '.',
        });
    }
    Ok(checked)
}

/// Validate a settings key (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn validate_setting_key(key: &str) -> Result<&str, IdentifierError> {
    const KIND: &str = "setting key";
    if key.is_empty() {
        return Err(IdentifierError::Empty { kind: KIND });
    }
    if key.len() > MAX_IDENTIFIER_LEN {
        return Err(IdentifierError::TooLong {
            kind: KIND,
            max: MAX_IDENTIFIER_LEN,
        });
    }
    let mut chars = key.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_') {
        return Err(IdentifierError::InvalidStart {
            kind: KIND,
            value: key.to_string(),
        });
    }
    if let Some(ch) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(IdentifierError::InvalidChar {
            kind: KIND,
            value: key.to_string(),
            ch,
        });
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_runtime_names() {
        assert!(validate_identifier("container name", "brave-mcp-server").is_ok());
        assert!(validate_identifier("container id", "abc123").is_ok());
        assert!(validate_identifier("server type", "googleMaps").is_ok());
    }

    #[test]
    fn test_rejects_shell_metacharacters() {
        let err = validate_identifier("container name", "brave; rm -rf /").unwrap_err();
        assert!(matches!(err, IdentifierError::InvalidChar { ch: ';', .. }));
    }

    #[test]
    fn test_rejects_path_traversal() {
        assert!(validate_identifier("server type", "../etc").is_err());
        assert!(validate_script_ref("..loadBraveMCP.ps1").is_err());
        assert!(validate_script_ref("sub/loadBraveMCP.ps1").is_err());
        assert!(validate_script_ref("loadBraveMCP.ps1").is_ok());
    }

    #[test]
    fn test_rejects_empty_and_long() {
        assert!(matches!(
            validate_identifier("container id", ""),
            Err(IdentifierError::Empty { .. })
        ));
        let long = "a".repeat(MAX_IDENTIFIER_LEN + 1);
        assert!(matches!(
            validate_identifier("container id", &long),
            Err(IdentifierError::TooLong { .. })
        ));
    }

    #[test]
    fn test_setting_keys() {
        assert!(validate_setting_key("BRAVE_API_KEY").is_ok());
        assert!(validate_setting_key("_PRIVATE").is_ok());
        assert!(validate_setting_key("1KEY").is_err());
        assert!(validate_setting_key("KEY=VALUE").is_err());
        assert!(validate_setting_key("KEY NAME").is_err());
    }
}
