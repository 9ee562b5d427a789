//! Image lookup for instance removal.

use crate::domain::catalog::INSTANCE_SUFFIX;

/// Repository pattern for an instance's image: `<namespace><name>` with the
/// instance suffix stripped, e.g. `mcp/brave` for `brave-mcp-server`.
pub fn image_pattern(namespace: &str, instance_name: &str) -> String {
    let lower = instance_name.to_lowercase();
    let base = lower.strip_suffix(INSTANCE_SUFFIX).unwrap_or(&lower);
    format!("{}{base}", namespace.to_lowercase())
}

/// First image id in an `id repository` listing whose repository contains
/// `pattern`, case-insensitively.
pub fn find_image_id(listing: &str, pattern: &str) -> Option<String> {
    let pattern = pattern.to_lowercase();
    listing
        .lines()
        .filter_map(|line| line.trim().split_once(char::is_whitespace))
        .find(|(_, repository)| repository.trim().to_lowercase().contains(&pattern))
        .map(|(id, _)| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_strips_suffix() {
        assert_eq!(image_pattern("mcp/", "brave-mcp-server"), "mcp/brave");
        assert_eq!(image_pattern("mcp/", "Custom"), "mcp/custom");
    }

    #[test]
    fn test_finds_first_matching_repository() {
        let listing = "111 postgres\n222 mcp/brave-search\n333 mcp/brave-search-dev\n";
        assert_eq!(find_image_id(listing, "mcp/brave").as_deref(), Some("222"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(find_image_id("111 postgres\n\n", "mcp/brave"), None);
        assert_eq!(find_image_id("", "mcp/brave"), None);
    }
}
