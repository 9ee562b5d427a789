//! Settings file formats and naming.
//!
//! Each server type owns two files in the settings directory:
//! `<serverType>Settings.env` (live values, written by this system) and
//! `<serverType>Settings.example.env` (the read-only template).

mod template;
mod values;

pub use template::{OPTIONAL_MARKER, REQUIRED_MARKER, parse_template};
pub use values::{COMMENT_MARKER, GENERATED_BY, parse_values, render_values, validate_values};

use crate::domain::{IdentifierError, validate_identifier};

/// File name of the live settings file for a server type.
pub fn settings_file_name(server_type: &str) -> Result<String, IdentifierError> {
    let server_type = validate_identifier("server type", server_type)?;
    Ok(format!("{server_type}Settings.env"))
}

/// File name of the template for a server type.
pub fn template_file_name(server_type: &str) -> Result<String, IdentifierError> {
    let server_type = validate_identifier("server type", server_type)?;
    Ok(format!("{server_type}Settings.example.env"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(settings_file_name("brave").unwrap(), "braveSettings.env");
        assert_eq!(
            template_file_name("googleMaps").unwrap(),
            "googleMapsSettings.example.env"
        );
    }

    #[test]
    fn test_file_names_reject_traversal() {
        assert!(settings_file_name("../../etc/passwd").is_err());
        assert!(template_file_name("a/b").is_err());
    }
}
