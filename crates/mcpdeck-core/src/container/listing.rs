//! Parser for the runtime's `id|name|image|status` listing.

use thiserror::Error;
use tracing::warn;

use crate::domain::Instance;

/// Field separator of the listing format.
pub const FIELD_DELIMITER: char = '|';

/// Number of fields in one record. Extra delimiters belong to the status.
pub const FIELD_COUNT: usize = 4;

/// A listing line that does not form a record. Recoverable: the line is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingParseError {
    #[error("expected {FIELD_COUNT} '|'-separated fields, found {found}")]
    TooFewFields { found: usize },

    #[error("record has an empty {field} field")]
    EmptyField { field: &'static str },
}

/// Parse one listing record.
///
/// The status text may itself contain the delimiter; everything after the
/// third delimiter is kept as status verbatim.
pub fn parse_listing_line(line: &str) -> Result<Instance, ListingParseError> {
    let fields: Vec<&str> = line.splitn(FIELD_COUNT, FIELD_DELIMITER).collect();
    let [id, name, image, status] = fields[..] else {
        return Err(ListingParseError::TooFewFields {
            found: fields.len(),
        });
    };

    let id = id.trim();
    let name = name.trim();
    if id.is_empty() {
        return Err(ListingParseError::EmptyField { field: "id" });
    }
    if name.is_empty() {
        return Err(ListingParseError::EmptyField { field: "name" });
    }

    Ok(Instance::new(id, name, image.trim(), status.trim()))
}

/// Parse a full listing, dropping malformed lines with a warning.
pub fn parse_listing(output: &str) -> Vec<Instance> {
    output
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(idx, line)| match parse_listing_line(line) {
            Ok(instance) => Some(instance),
            Err(e) => {
                warn!(line = idx + 1, content = %line, error = %e, "Dropping malformed listing line");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_record() {
        let instance = parse_listing_line("abc123|my-server|mcp/brave-search:latest|Up 3 hours").unwrap();
        assert_eq!(instance.runtime_id, "abc123");
        assert_eq!(instance.name, "my-server");
        assert_eq!(instance.image, "mcp/brave-search:latest");
        assert_eq!(instance.status_text, "Up 3 hours");
        assert!(instance.is_running());
    }

    #[test]
    fn test_status_keeps_extra_delimiters() {
        let instance = parse_listing_line("id|n|mcp/x|Exited (0) 2 minutes ago | note").unwrap();
        assert_eq!(instance.status_text, "Exited (0) 2 minutes ago | note");
        assert!(!instance.is_running());
    }

    #[test]
    fn test_too_few_fields() {
        assert_eq!(
            parse_listing_line("abc|name|image"),
            Err(ListingParseError::TooFewFields { found: 3 })
        );
    }

    #[test]
    fn test_empty_name_is_malformed() {
        assert_eq!(
            parse_listing_line("abc||mcp/x|Up"),
            Err(ListingParseError::EmptyField { field: "name" })
        );
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let output = "\
a1|brave-mcp-server|mcp/brave:latest|Up 2 minutes
garbage line
b2|github-mcp-server|mcp/github:latest|Exited (1) 3 days ago

c3|onlytwo
";
        let instances = parse_listing(output);
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].name, "brave-mcp-server");
        assert_eq!(instances[1].runtime_id, "b2");
    }
}
