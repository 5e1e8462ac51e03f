//! Footer text built from a template such as `"{subject} • {lesson}"`.
//!
//! Supported tokens: `{subject}`, `{lesson}`, `{index}` (1-based). Literal
//! runs made only of separator characters are kept only when text precedes
//! them and a non-empty field follows, so empty fields never leave dangling
//! punctuation.

const SEPARATOR_CHARS: &[char] = &['•', '·', '|', '/', ',', ';', ':', '-', '–', '—'];

enum Piece<'a> {
    Literal(&'a str),
    Field(String),
}

/// Compose the footer for the card at deck position `index` (0-based).
pub fn compose(index: usize, subject: Option<&str>, lesson: Option<&str>, template: &str) -> String {
    let pieces = tokenize(template, index, subject.unwrap_or(""), lesson.unwrap_or(""));

    let mut out = String::new();
    let mut pending: Option<&str> = None;

    for piece in pieces {
        match piece {
            Piece::Literal(text) if is_separator_run(text) => {
                if !out.trim().is_empty() {
                    pending = Some(text);
                }
            }
            Piece::Literal(text) => {
                out.push_str(pending.take().unwrap_or(""));
                out.push_str(text);
            }
            // A separator only survives if the field after it has a value.
            Piece::Field(value) if value.is_empty() => pending = None,
            Piece::Field(value) => {
                out.push_str(pending.take().unwrap_or(""));
                out.push_str(&value);
            }
        }
    }

    out.trim().to_string()
}

fn is_separator_run(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || SEPARATOR_CHARS.contains(&c))
}

fn tokenize<'a>(template: &'a str, index: usize, subject: &str, lesson: &str) -> Vec<Piece<'a>> {
    let mut pieces = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|c| open + c) else {
            break;
        };
        let value = match &rest[open + 1..close] {
            "subject" => Some(subject.trim().to_string()),
            "lesson" => Some(lesson.trim().to_string()),
            "index" => Some((index + 1).to_string()),
            _ => None,
        };
        match value {
            Some(value) => {
                if open > 0 {
                    pieces.push(Piece::Literal(&rest[..open]));
                }
                pieces.push(Piece::Field(value));
            }
            // Unknown tokens stay as literal text.
            None => pieces.push(Piece::Literal(&rest[..=close])),
        }
        rest = &rest[close + 1..];
    }

    if !rest.is_empty() {
        pieces.push(Piece::Literal(rest));
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_FOOTER_TEMPLATE;
    use pretty_assertions::assert_eq;

    #[test]
    fn fills_all_tokens() {
        assert_eq!(
            compose(4, Some("Biology"), Some("Cells"), "{subject} • {lesson} #{index}"),
            "Biology • Cells #5"
        );
    }

    #[test]
    fn empty_lesson_drops_trailing_separator() {
        assert_eq!(compose(0, Some("Biology"), Some(""), DEFAULT_FOOTER_TEMPLATE), "Biology");
        assert_eq!(compose(0, Some("Biology"), None, DEFAULT_FOOTER_TEMPLATE), "Biology");
    }

    #[test]
    fn empty_subject_drops_leading_separator() {
        assert_eq!(compose(0, None, Some("Unit 3"), DEFAULT_FOOTER_TEMPLATE), "Unit 3");
    }

    #[test]
    fn all_empty_collapses_to_nothing() {
        assert_eq!(compose(0, None, None, DEFAULT_FOOTER_TEMPLATE), "");
        assert_eq!(compose(0, Some("  "), Some(""), "{subject} | {lesson}"), "");
    }

    #[test]
    fn empty_middle_field_keeps_one_separator() {
        assert_eq!(
            compose(2, Some("Bio"), None, "{subject} • {lesson} • {index}"),
            "Bio • 3"
        );
    }

    #[test]
    fn empty_field_before_plain_literal() {
        assert_eq!(
            compose(8, Some("Biology"), None, "{subject} • {lesson} #{index}"),
            "Biology #9"
        );
    }

    #[test]
    fn plain_literals_are_kept() {
        assert_eq!(compose(9, None, None, "Card {index}"), "Card 10");
        assert_eq!(compose(0, None, None, "Vocab {unknown}"), "Vocab {unknown}");
    }

    #[test]
    fn unclosed_brace_is_literal() {
        assert_eq!(compose(0, Some("Bio"), None, "{subject} {lesson"), "Bio {lesson");
    }
}
