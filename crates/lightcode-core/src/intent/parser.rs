//! Line-level structure of intent text: comments, sections and key/value
//! pairs. Semantic meaning is assigned later by `mapper`.

use super::{Diagnostic, DiagnosticKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Section {
    Root,
    Behavior,
    Appearance,
    Timing,
    Spatial,
    /// Unknown section; its lines are dropped.
    Skipped,
}

impl Section {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "root" => Self::Root,
            "behavior" | "behaviour" => Self::Behavior,
            "appearance" => Self::Appearance,
            "timing" => Self::Timing,
            "spatial" => Self::Spatial,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    pub section: Section,
    pub key: String,
    pub value: String,
    pub line: usize,
}

#[derive(Debug, Default)]
pub(crate) struct Document {
    pub entries: Vec<Entry>,
    pub diagnostics: Vec<Diagnostic>,
}

pub(crate) fn parse_document(text: &str) -> Document {
    let mut document = Document::default();
    let mut section = Section::Root;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = strip_comment(raw);
        if content.trim().is_empty() {
            continue;
        }
        let indented = content.starts_with(|c: char| c.is_whitespace());
        let Some((key, value)) = content.trim().split_once(':') else {
            log::trace!("line {line}: no key, ignored");
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = unquote(value.trim());

        if !indented {
            if value.is_empty() {
                section = match Section::from_name(&key) {
                    Some(known) => known,
                    None => {
                        document.diagnostics.push(Diagnostic {
                            kind: DiagnosticKind::UnknownSection,
                            line,
                            message: format!("unknown section '{key}' skipped"),
                        });
                        Section::Skipped
                    }
                };
                log::trace!("line {line}: section {section:?}");
                continue;
            }
            section = Section::Root;
        }
        if section == Section::Skipped {
            continue;
        }

        log::trace!("line {line}: {section:?}.{key} = {value}");
        document.entries.push(Entry {
            section,
            key,
            value: value.to_string(),
            line,
        });
    }
    document
}

/// Drops a `#` comment. A `#` that follows whitespace starts a comment,
/// except where a value begins (after `:`, `[` or `,`), where it is a hex
/// color literal.
fn strip_comment(line: &str) -> &str {
    if line.trim_start().starts_with('#') {
        return "";
    }
    for (index, _) in line.match_indices('#') {
        let before = &line[..index];
        if !before.ends_with(char::is_whitespace) {
            continue;
        }
        if !before.trim_end().ends_with([':', '[', ',']) {
            return before;
        }
    }
    line
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Splits a color list on commas outside parentheses; brackets are optional.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    let value = value.trim();
    let value = value
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(value);

    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in value.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => items.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    items.push(current);
    items
        .into_iter()
        .map(|item| unquote(item.trim()).to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_route_indented_lines() {
        let document = parse_document(
            "effect: fire\nbehavior:\n  flame_height: tall\ntiming:\n  speed: fast\n",
        );
        let routed: Vec<(Section, &str)> = document
            .entries
            .iter()
            .map(|entry| (entry.section, entry.key.as_str()))
            .collect();
        assert_eq!(
            routed,
            vec![
                (Section::Root, "effect"),
                (Section::Behavior, "flame_height"),
                (Section::Timing, "speed"),
            ]
        );
    }

    #[test]
    fn unindented_value_closes_section() {
        let document = parse_document("behavior:\n  density: dense\nname: Glow\n");
        assert_eq!(document.entries[1].section, Section::Root);
        assert_eq!(document.entries[1].value, "Glow");
    }

    #[test]
    fn unknown_section_is_skipped_with_warning() {
        let document = parse_document("effect: solid\nmood:\n  vibe: chill\n");
        assert_eq!(document.entries.len(), 1);
        assert_eq!(document.diagnostics.len(), 1);
        assert_eq!(document.diagnostics[0].kind, DiagnosticKind::UnknownSection);
        assert_eq!(document.diagnostics[0].line, 2);
    }

    #[test]
    fn comments_keep_hex_literals() {
        assert_eq!(strip_comment("# whole line"), "");
        assert_eq!(strip_comment("  color: #FF0000"), "  color: #FF0000");
        assert_eq!(strip_comment("  color: red # warm"), "  color: red ");
        assert_eq!(strip_comment("  color: red #"), "  color: red ");
        assert_eq!(strip_comment("  colors: [red, #00F]"), "  colors: [red, #00F]");
    }

    #[test]
    fn comment_text_need_not_start_with_space() {
        assert_eq!(strip_comment("  speed: fast #x"), "  speed: fast ");
        assert_eq!(strip_comment("effect: fire #hearth"), "effect: fire ");
        let document = parse_document("timing:\n  speed: fast #quick\n");
        assert_eq!(document.entries[0].value, "fast");
    }

    #[test]
    fn values_are_unquoted() {
        let document = parse_document("effect: \"wave\"\nname: 'Sea'\n");
        assert_eq!(document.entries[0].value, "wave");
        assert_eq!(document.entries[1].value, "Sea");
    }

    #[test]
    fn split_list_respects_parentheses() {
        assert_eq!(
            split_list("[red, rgb(1, 2, 3), '#00F']"),
            vec!["red", "rgb(1, 2, 3)", "#00F"]
        );
        assert_eq!(split_list("blue"), vec!["blue"]);
        assert!(split_list("[]").is_empty());
    }
}
