//! Term/definition extraction for a single block of text.
//!
//! Rules are tried in order; the first that matches wins. The last rule always
//! matches, so extraction never fails.

use regex::Regex;
use std::sync::OnceLock;

/// Leading numbering (`1.`, `2)`) or bullet (`-`, `*`, `•`) followed by space.
fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(?:\d+[.)]|[-*•])\s+").unwrap())
}

/// `term - def`, `term — def`, `term – def`, `term: def`.
///
/// Dashes need whitespace on both sides so `well-known` stays one word; a colon
/// needs whitespace after it so `9:00` is not a separator. The lazy term makes
/// the leftmost separator win.
fn separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?P<term>.+?)(?:\s+[-–—]|\s*:)\s+(?P<def>.+)$").unwrap())
}

/// `word (tag) rest`, as in glossary entries like `abhor (v.) to hate`. The tag
/// starts with a letter, so `two (2) cells` is plain prose.
fn glossary_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<word>[^\s()]+)\s+\((?P<tag>\p{L}[^()]*)\)\s*(?P<rest>.*)$").unwrap()
    })
}

/// Extraction heuristics in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractRule {
    Separator,
    Glossary,
    FirstWord,
    WholeBlock,
}

impl ExtractRule {
    pub const ORDER: [ExtractRule; 4] = [
        ExtractRule::Separator,
        ExtractRule::Glossary,
        ExtractRule::FirstWord,
        ExtractRule::WholeBlock,
    ];

    /// Apply this rule to a collapsed, marker-free line.
    pub fn apply(self, line: &str) -> Option<(String, String)> {
        match self {
            Self::Separator => {
                let caps = separator_regex().captures(line)?;
                let term = caps["term"].trim();
                let def = caps["def"].trim();
                (!term.is_empty()).then(|| (term.to_string(), def.to_string()))
            }
            Self::Glossary => {
                let caps = glossary_regex().captures(line)?;
                let definition = format!("({}) {}", caps["tag"].trim(), caps["rest"].trim());
                Some((caps["word"].to_string(), definition.trim_end().to_string()))
            }
            Self::FirstWord => {
                let (term, rest) = line.split_once(char::is_whitespace)?;
                let rest = rest.trim();
                (!rest.is_empty()).then(|| (term.to_string(), rest.to_string()))
            }
            Self::WholeBlock => Some((line.to_string(), String::new())),
        }
    }

    /// Rules that recognise an explicit term/definition shape, as opposed to
    /// the catch-all fallbacks.
    pub fn is_explicit(self) -> bool {
        matches!(self, Self::Separator | Self::Glossary)
    }
}

/// Join a block's non-empty lines with single spaces.
pub fn collapse(block: &str) -> String {
    block
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove one leading list marker, if present.
pub fn strip_marker(line: &str) -> &str {
    match marker_regex().find(line) {
        Some(m) => line[m.end()..].trim(),
        None => line.trim(),
    }
}

/// True when the line opens with a list marker.
pub fn has_marker(line: &str) -> bool {
    marker_regex().is_match(line)
}

/// True when the line has a `term - def` or `term: def` separator.
pub fn has_separator(line: &str) -> bool {
    separator_regex().is_match(strip_marker(line))
}

/// Extract a pair and report which rule produced it.
pub fn extract_with_rule(block: &str) -> (ExtractRule, String, String) {
    let collapsed = collapse(block);
    let line = strip_marker(&collapsed);

    ExtractRule::ORDER
        .into_iter()
        .find_map(|rule| rule.apply(line).map(|(term, def)| (rule, term, def)))
        .unwrap_or_else(|| (ExtractRule::WholeBlock, line.to_string(), String::new()))
}

/// Extract `(term, definition)` from one block. Never fails.
pub fn extract(block: &str) -> (String, String) {
    let (_, term, definition) = extract_with_rule(block);
    (term, definition)
}

/// Extract only when the block has an explicit term/definition shape.
pub fn extract_explicit(block: &str) -> Option<(String, String)> {
    let collapsed = collapse(block);
    let line = strip_marker(&collapsed);

    ExtractRule::ORDER
        .into_iter()
        .filter(|r| r.is_explicit())
        .find_map(|r| r.apply(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pair(term: &str, def: &str) -> (String, String) {
        (term.to_string(), def.to_string())
    }

    #[test]
    fn numbered_hyphen_pair() {
        assert_eq!(extract("1. munch - to chew food loudly"), pair("munch", "to chew food loudly"));
    }

    #[test]
    fn each_separator_kind() {
        assert_eq!(extract("bellowed — to shout"), pair("bellowed", "to shout"));
        assert_eq!(extract("gist – the main point"), pair("gist", "the main point"));
        assert_eq!(extract("Osmosis: diffusion of water"), pair("Osmosis", "diffusion of water"));
        assert_eq!(extract("Osmosis : diffusion"), pair("Osmosis", "diffusion"));
    }

    #[test]
    fn first_separator_wins() {
        assert_eq!(
            extract("meeting - starts at 9: sharp - bring notes"),
            pair("meeting", "starts at 9: sharp - bring notes")
        );
        assert_eq!(extract("a: b - c"), pair("a", "b - c"));
    }

    #[test]
    fn unspaced_colon_and_hyphen_do_not_split() {
        assert_eq!(
            extract("breakfast 9:00 in the hall"),
            pair("breakfast", "9:00 in the hall")
        );
        assert_eq!(
            extract("well-known - familiar to many"),
            pair("well-known", "familiar to many")
        );
        assert_eq!(
            extract_with_rule("well-known widely recognised").0,
            ExtractRule::FirstWord
        );
    }

    #[test]
    fn glossary_entry() {
        assert_eq!(extract("abhor (v.) to hate, detest"), pair("abhor", "(v.) to hate, detest"));
        assert_eq!(extract("abate (v.)"), pair("abate", "(v.)"));
    }

    #[test]
    fn numeric_parenthetical_is_not_a_tag() {
        assert_eq!(extract_explicit("two (2) identical daughter cells"), None);
        assert_eq!(
            extract("two (2) identical daughter cells"),
            pair("two", "(2) identical daughter cells")
        );
    }

    #[test]
    fn first_word_fallback() {
        assert_eq!(extract("apple a red fruit"), pair("apple", "a red fruit"));
    }

    #[test]
    fn whole_block_fallback() {
        assert_eq!(extract("mysteryword"), pair("mysteryword", ""));
        assert_eq!(extract_with_rule("- mysteryword").0, ExtractRule::WholeBlock);
        assert_eq!(extract(""), pair("", ""));
    }

    #[test]
    fn multi_line_block_is_collapsed() {
        assert_eq!(
            extract("1. munch - to chew food loudly and\n   completely\n"),
            pair("munch", "to chew food loudly and completely")
        );
    }

    #[test]
    fn bullets_are_stripped() {
        assert_eq!(extract("• gist - the main point"), pair("gist", "the main point"));
        assert_eq!(extract("* gist - the main point"), pair("gist", "the main point"));
        assert_eq!(extract("12) gist - the main point"), pair("gist", "the main point"));
    }

    #[test]
    fn explicit_only() {
        assert_eq!(extract_explicit("term - part one"), Some(pair("term", "part one")));
        assert_eq!(extract_explicit("more text"), None);
    }

    #[test]
    fn separator_detection() {
        assert!(has_separator("gist - main point"));
        assert!(has_separator("2. osmosis: water movement"));
        assert!(!has_separator("Lesson 5"));
        assert!(!has_separator("breakfast 9:00 in the hall"));
    }

    #[test]
    fn marker_detection() {
        assert!(has_marker("1. one"));
        assert!(has_marker("  - two"));
        assert!(!has_marker("3.14 is pi"));
        assert!(!has_marker("-minus"));
    }
}
