//! Parser for read-only settings templates (`*.example.env`).
//!
//! A template is a commented settings file. Two section markers switch the
//! active section; `# NAME - description` lines declare a field in it, and
//! `# NAME=value` lines seed a default.

use crate::domain::SettingsTemplate;

pub const REQUIRED_MARKER: &str = "Required Settings:";
pub const OPTIONAL_MARKER: &str = "Optional Settings:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Required,
    Optional,
}

/// Parse a template body.
///
/// Without any section marker the required and optional sets stay empty, but
/// descriptions and defaults are still collected.
pub fn parse_template(content: &str) -> SettingsTemplate {
    let mut template = SettingsTemplate::default();
    let mut section = Section::None;

    for line in content.lines() {
        if line.contains(REQUIRED_MARKER) {
            section = Section::Required;
            continue;
        }
        if line.contains(OPTIONAL_MARKER) {
            section = Section::Optional;
            continue;
        }

        if line.trim_start().starts_with('#') && line.contains('-') {
            if let Some((name, description)) = parse_declaration(line) {
                template
                    .descriptions
                    .insert(name.to_string(), description.to_string());
                let names = match section {
                    Section::Required => Some(&mut template.required_names),
                    Section::Optional => Some(&mut template.optional_names),
                    Section::None => None,
                };
                if let Some(names) = names
                    && !names.iter().any(|n| n == name)
                {
                    names.push(name.to_string());
                }
            }
        }

        if let Some((name, value)) = parse_default(line) {
            template
                .defaults
                .entry(name.to_string())
                .or_insert_with(|| value.to_string());
        }
    }

    template
}

/// Leftmost `# NAME - description` occurrence in a line.
fn parse_declaration(line: &str) -> Option<(&str, &str)> {
    line.match_indices("# ").find_map(|(idx, marker)| {
        let rest = &line[idx + marker.len()..];
        let name_len = setting_name_len(rest);
        if name_len == 0 {
            return None;
        }
        let (name, tail) = rest.split_at(name_len);
        let description = tail.strip_prefix(" - ")?.trim_end();
        (!description.is_empty()).then_some((name, description))
    })
}

/// `# NAME=value` at the start of a line (the space after `#` is optional).
fn parse_default(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('#')?;
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    let name_len = setting_name_len(rest);
    if name_len == 0 {
        return None;
    }
    let (name, tail) = rest.split_at(name_len);
    let value = tail.strip_prefix('=')?.trim();
    (!value.is_empty()).then_some((name, value))
}

/// Length of the leading `[A-Z_][A-Z0-9_]*` run.
fn setting_name_len(s: &str) -> usize {
    let mut len = 0;
    for (i, c) in s.char_indices() {
        let ok = c.is_ascii_uppercase() || c == '_' || (i > 0 && c.is_ascii_digit());
        if !ok {
            break;
        }
        len = i + c.len_utf8();
    }
    len
}
