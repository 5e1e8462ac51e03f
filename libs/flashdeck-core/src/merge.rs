//! Reattaching wrapped lines to the definition they continue.
//!
//! Used when the segmenter falls back to one block per line. A line that has
//! no explicit term/definition shape and no list marker continues the previous
//! pair's definition. If the input has no explicit pairs at all, there is
//! nothing to continue and every line is extracted on its own.

use crate::extract::{extract, extract_explicit, has_marker};
use crate::types::Card;

#[derive(Debug, Clone, PartialEq, Eq)]
enum LineKind {
    Item(String, String),
    Continuation(String),
}

fn classify(line: &str) -> LineKind {
    if let Some((term, definition)) = extract_explicit(line) {
        return LineKind::Item(term, definition);
    }
    if has_marker(line) {
        let (term, definition) = extract(line);
        return LineKind::Item(term, definition);
    }
    LineKind::Continuation(line.trim().to_string())
}

/// Fold accumulator: the pairs so far and the one still open for continuation.
#[derive(Debug, Default)]
struct MergeState {
    cards: Vec<Card>,
    open: Option<usize>,
}

impl MergeState {
    fn push(mut self, kind: LineKind) -> Self {
        match kind {
            LineKind::Item(term, definition) => {
                self.cards.push(Card::new(term, definition));
                self.open = Some(self.cards.len() - 1);
            }
            LineKind::Continuation(text) => match self.open {
                Some(i) => {
                    let definition = &mut self.cards[i].definition;
                    if !definition.is_empty() {
                        definition.push(' ');
                    }
                    definition.push_str(&text);
                }
                None => {
                    self.cards.push(Card::new(text, ""));
                    self.open = Some(self.cards.len() - 1);
                }
            },
        }
        self
    }
}

/// Turn raw lines into cards, merging continuation lines.
pub fn merge_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Card> {
    let lines: Vec<&str> = lines
        .iter()
        .map(|l| l.as_ref())
        .filter(|l| !l.trim().is_empty())
        .collect();
    let kinds: Vec<LineKind> = lines.iter().map(|l| classify(l)).collect();

    if !kinds.iter().any(|k| matches!(k, LineKind::Item(..))) {
        tracing::debug!(lines = lines.len(), "no explicit pairs, extracting lines independently");
        return lines
            .into_iter()
            .map(|l| {
                let (term, definition) = extract(l);
                Card::new(term, definition)
            })
            .collect();
    }

    kinds
        .into_iter()
        .fold(MergeState::default(), MergeState::push)
        .cards
}
