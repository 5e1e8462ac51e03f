//! Splitting a raw text blob into one block per card.
//!
//! Rules are tried in priority order and the first one that finds at least one
//! boundary wins:
//! 1. list markers at line start (`1.`, `2)`, `-`, `*`, `•`)
//! 2. glossary headwords (`word (tag)` or `word 2` at line start), only when
//!    the text opens with one and has at least two
//! 3. blank-line separated paragraphs
//! 4. one block per non-empty line

use regex::Regex;
use std::sync::OnceLock;

use crate::extract::has_separator;

fn list_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*(?:\d+[.)]|[-*•])[ \t]+").unwrap())
}

fn headword_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*\p{L}[\p{L}'’-]*[ \t]+(?:\(\p{L}[^()\n]{0,23}\)|\d{1,2}\b)").unwrap()
    })
}

fn blank_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n[ \t]*\n\s*").unwrap())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRule {
    ListMarkers,
    Headwords,
    BlankLines,
    Lines,
}

impl SegmentRule {
    pub const ORDER: [SegmentRule; 4] = [
        SegmentRule::ListMarkers,
        SegmentRule::Headwords,
        SegmentRule::BlankLines,
        SegmentRule::Lines,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListMarkers => "list_markers",
            Self::Headwords => "headwords",
            Self::BlankLines => "blank_lines",
            Self::Lines => "lines",
        }
    }

    /// Blocks for `text`, or `None` when the rule finds no boundary.
    pub fn apply(self, text: &str) -> Option<Vec<String>> {
        match self {
            Self::ListMarkers => {
                let starts = list_marker_regex().find_iter(text).map(|m| m.start()).collect();
                split_at_starts(text, starts)
            }
            Self::Headwords => headword_blocks(text),
            Self::BlankLines => {
                let re = blank_line_regex();
                if !re.is_match(text.trim()) {
                    return None;
                }
                Some(
                    re.split(text)
                        .map(str::trim)
                        .filter(|b| !b.is_empty())
                        .map(str::to_string)
                        .collect(),
                )
            }
            Self::Lines => {
                let lines: Vec<String> = text
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .collect();
                (!lines.is_empty()).then_some(lines)
            }
        }
    }
}

/// Blocks together with the rule that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    pub rule: SegmentRule,
    pub blocks: Vec<String>,
}

/// Normalise line endings so every rule sees `\n` only.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

pub fn segment_with_rule(text: &str) -> Segmentation {
    let text = normalize_newlines(text);

    for rule in SegmentRule::ORDER {
        if let Some(blocks) = rule.apply(&text) {
            tracing::debug!(rule = rule.as_str(), blocks = blocks.len(), "segmented text");
            return Segmentation { rule, blocks };
        }
    }

    Segmentation {
        rule: SegmentRule::Lines,
        blocks: Vec::new(),
    }
}

/// Split `text` into trimmed, order-preserving blocks.
pub fn segment(text: &str) -> Vec<String> {
    segment_with_rule(text).blocks
}

/// Glossary-style text: every headword line opens a block, and so does any
/// line with an explicit separator. Text that does not open with a headword,
/// or has only one, is left to the later rules so no line is lost.
fn headword_blocks(text: &str) -> Option<Vec<String>> {
    let re = headword_regex();
    let first_line = text.lines().find(|l| !l.trim().is_empty())?;
    if !re.is_match(first_line) || re.find_iter(text).nth(1).is_none() {
        return None;
    }

    let mut starts = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if re.is_match(line) || has_separator(line.trim()) {
            starts.push(offset);
        }
        offset += line.len();
    }
    split_at_starts(text, starts)
}

/// Each start opens a block that runs to the next start or the end.
fn split_at_starts(text: &str, starts: Vec<usize>) -> Option<Vec<String>> {
    let first = *starts.first()?;

    let preamble = text[..first].trim();
    if !preamble.is_empty() {
        tracing::debug!(preamble, "discarding text before the first item");
    }

    let ends = starts.iter().skip(1).copied().chain(std::iter::once(text.len()));
    Some(
        starts
            .iter()
            .zip(ends)
            .map(|(&start, end)| text[start..end].trim().to_string())
            .collect(),
    )
}
