//! Line-oriented `KEY=value` settings files.

use crate::domain::{SettingsValues, validate_setting_key, without_empty};
use crate::ports::SettingsError;

/// Lines starting with this marker are comments.
pub const COMMENT_MARKER: char = '#';

/// Second header line written above every generated settings file.
pub const GENERATED_BY: &str = "Generated by MCP Deployment Manager";

/// Parse a settings file body.
///
/// Comment lines and lines without `=` are ignored. Only the first `=` splits
/// key from value, so values may themselves contain `=`.
pub fn parse_values(content: &str) -> SettingsValues {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with(COMMENT_MARKER))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Render a settings file body with its header comment.
///
/// Values are trimmed the same way [`parse_values`] trims them. Blank values
/// are omitted entirely rather than written as `KEY=`.
pub fn render_values(server_type: &str, values: &SettingsValues) -> Result<String, SettingsError> {
    validate_values(values)?;
    let mut out = format!("# {server_type} MCP Server Settings\n# {GENERATED_BY}\n\n");
    for (key, value) in without_empty(values) {
        out.push_str(&key);
        out.push('=');
        out.push_str(&value);
        out.push('\n');
    }
    Ok(out)
}

/// Check every non-blank entry can be written as a single `KEY=value` line.
pub fn validate_values(values: &SettingsValues) -> Result<(), SettingsError> {
    for (key, value) in values.iter().filter(|(_, v)| !v.trim().is_empty()) {
        validate_setting_key(key)?;
        if value.contains(['\n', '\r']) {
            return Err(SettingsError::InvalidValue { key: key.clone() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_parse_ignores_comments_and_blank_lines() {
        let content = "# Brave MCP Server Settings\n\n# OLD_KEY=stale\nBRAVE_API_KEY=abc\n  not a setting\n";
        let values = parse_values(content);
        assert_eq!(values.len(), 1);
        assert_eq!(values["BRAVE_API_KEY"], "abc");
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        let values = parse_values("CONN=host=db;port=5432\n");
        assert_eq!(values["CONN"], "host=db;port=5432");
    }

    #[test]
    fn test_parse_trims_keys_and_values() {
        let values = parse_values("  REGION =  eu-west-1  \r\n");
        assert_eq!(values["REGION"], "eu-west-1");
    }

    #[test]
    fn test_render_writes_header_and_skips_empty() {
        let values = BTreeMap::from([
            ("API_KEY".to_string(), "k".to_string()),
            ("EMPTY".to_string(), String::new()),
        ]);
        let body = render_values("brave", &values).unwrap();
        assert!(body.starts_with("# brave MCP Server Settings\n# Generated by MCP Deployment Manager\n\n"));
        assert!(body.contains("API_KEY=k\n"));
        assert!(!body.contains("EMPTY"));
    }

    #[test]
    fn test_render_rejects_line_breaks() {
        let values = BTreeMap::from([("API_KEY".to_string(), "k\nINJECTED=1".to_string())]);
        assert!(matches!(
            render_values("brave", &values),
            Err(SettingsError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_render_rejects_bad_keys() {
        let values = BTreeMap::from([("BAD KEY".to_string(), "v".to_string())]);
        assert!(matches!(
            render_values("brave", &values),
            Err(SettingsError::Invalid(_))
        ));
    }

    #[test]
    fn test_round_trip_drops_empty_values() {
        let values = BTreeMap::from([
            ("A".to_string(), "1".to_string()),
            ("B".to_string(), String::new()),
            ("C".to_string(), "x=y".to_string()),
            ("D".to_string(), " padded ".to_string()),
            ("E".to_string(), "   ".to_string()),
        ]);
        let body = render_values("t", &values).unwrap();
        assert!(body.contains("D=padded\n"));
        assert!(!body.contains("E="));

        let parsed = parse_values(&body);
        assert_eq!(parsed, without_empty(&values));
        assert!(!parsed.contains_key("E"));
    }
}
