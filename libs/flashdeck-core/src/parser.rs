//! Deck builder: raw text in, ordered cards out.
//!
//! # Accepted input
//! ```text
//! 1. munch - to chew food loudly and
//! completely
//! 2) bellowed — to have shouted in a loud
//! deep voice
//! abhor (v.) to hate, detest
//! ```
//!
//! Parsing is total: unrecognised text degrades to a card whose definition is
//! empty, and empty input gives an empty deck.

use crate::extract::extract;
use crate::merge::merge_lines;
use crate::segment::{segment_with_rule, SegmentRule};
use crate::types::Card;

/// Parse text into cards, preserving input order.
pub fn parse(text: &str) -> Vec<Card> {
    if text.trim().is_empty() {
        return vec![];
    }

    let segmentation = segment_with_rule(text);
    let cards = match segmentation.rule {
        SegmentRule::Lines => merge_lines(&segmentation.blocks),
        _ => segmentation
            .blocks
            .iter()
            .map(|block| {
                let (term, definition) = extract(block);
                Card::new(term, definition)
            })
            .collect(),
    };

    tracing::debug!(
        rule = segmentation.rule.as_str(),
        cards = cards.len(),
        "parsed deck"
    );
    cards
}

/// Parse text into bare `(term, definition)` pairs.
pub fn parse_pairs(text: &str) -> Vec<(String, String)> {
    parse(text)
        .into_iter()
        .map(|card| (card.term, card.definition))
        .collect()
}

/// Trim tabular records and drop rows with neither a term nor a definition.
pub fn clean_records(records: &[Card]) -> Vec<Card> {
    records
        .iter()
        .filter(|record| !record.is_blank())
        .map(|record| Card {
            term: record.term.trim().to_string(),
            definition: record.definition.trim().to_string(),
            metadata: record.metadata.clone(),
        })
        .collect()
}

/// Build a deck from tabular records when any survive cleaning, otherwise
/// from text.
pub fn build_deck(records: &[Card], text: &str) -> Vec<Card> {
    let cleaned = clean_records(records);
    if !cleaned.is_empty() {
        tracing::debug!(cards = cleaned.len(), "using tabular records");
        return cleaned;
    }
    parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CardMetadata;
    use pretty_assertions::assert_eq;

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(t, d)| (t.to_string(), d.to_string()))
            .collect()
    }

    #[test]
    fn parse_numbered_item() {
        assert_eq!(
            parse_pairs("1. munch - to chew food loudly"),
            pairs(&[("munch", "to chew food loudly")])
        );
    }

    #[test]
    fn parse_glossary_entry() {
        assert_eq!(
            parse_pairs("abhor (v.) to hate, detest"),
            pairs(&[("abhor", "(v.) to hate, detest")])
        );
    }

    #[test]
    fn parse_unrecognised_block() {
        assert_eq!(parse_pairs("mysteryword"), pairs(&[("mysteryword", "")]));
    }

    #[test]
    fn parse_continuation_line() {
        assert_eq!(
            parse_pairs("term - part one\nmore text"),
            pairs(&[("term", "part one more text")])
        );
    }

    #[test]
    fn parse_mixed_markers_with_wrapped_definitions() {
        let input = "1. munch - to chew food loudly and\ncompletely\n2) bellowed — to have shouted in a loud\ndeep voice";
        assert_eq!(
            parse_pairs(input),
            pairs(&[
                ("munch", "to chew food loudly and completely"),
                ("bellowed", "to have shouted in a loud deep voice"),
            ])
        );
    }

    #[test]
    fn parse_pair_count_matches_markers() {
        let input = "- alpha - first\n- beta\n- gamma: third\n  continued\n* delta (n.) fourth\n• epsilon";
        assert_eq!(parse(input).len(), 5);
    }

    #[test]
    fn parse_glossary_without_numbering() {
        let input = "abhor (v.) to hate,\ndetest\nabate (v.) to lessen";
        assert_eq!(
            parse_pairs(input),
            pairs(&[("abhor", "(v.) to hate, detest"), ("abate", "(v.) to lessen")])
        );
    }

    #[test]
    fn parse_keeps_cards_around_parenthetical_continuation() {
        let input = "mitosis: cell division producing\ntwo (2) identical daughter cells\nmeiosis: division producing gametes";
        assert_eq!(
            parse_pairs(input),
            pairs(&[
                ("mitosis", "cell division producing two (2) identical daughter cells"),
                ("meiosis", "division producing gametes"),
            ])
        );
    }

    #[test]
    fn parse_title_line_does_not_swallow_pairs() {
        assert_eq!(
            parse_pairs("Lesson 5\nmunch - to chew\nbellow - to shout"),
            pairs(&[("Lesson 5", ""), ("munch", "to chew"), ("bellow", "to shout")])
        );
    }

    #[test]
    fn parse_glossary_with_separator_lines() {
        let input = "abhor (v.) to hate,\ndetest\nabate (v.) to lessen\ngist - main point";
        assert_eq!(
            parse_pairs(input),
            pairs(&[
                ("abhor", "(v.) to hate, detest"),
                ("abate", "(v.) to lessen"),
                ("gist", "main point"),
            ])
        );
    }

    #[test]
    fn parse_paragraphs() {
        let input = "photosynthesis: how plants\nmake food\n\nosmosis: movement of water";
        assert_eq!(
            parse_pairs(input),
            pairs(&[
                ("photosynthesis", "how plants make food"),
                ("osmosis", "movement of water"),
            ])
        );
    }

    #[test]
    fn parse_windows_line_endings() {
        assert_eq!(
            parse_pairs("a - one\r\nmore\r\nb - two\r\n"),
            pairs(&[("a", "one more"), ("b", "two")])
        );
    }

    #[test]
    fn parse_empty_content() {
        assert!(parse("").is_empty());
        assert!(parse(" \n\t\n").is_empty());
    }

    #[test]
    fn parse_preserves_order() {
        let input = (1..=20)
            .map(|i| format!("{i}. term{i} - def{i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let cards = parse(&input);
        assert_eq!(cards.len(), 20);
        for (i, card) in cards.iter().enumerate() {
            assert_eq!(card.term, format!("term{}", i + 1));
        }
    }

    #[test]
    fn records_take_priority_over_text() {
        let records = vec![
            Card::new("  munch ", " to chew "),
            Card::new("", "  "),
            Card::new("tome", "").with_metadata(CardMetadata {
                subject: Some("English".to_string()),
                lesson: None,
            }),
        ];
        let deck = build_deck(&records, "ignored - text");
        assert_eq!(deck.len(), 2);
        assert_eq!(deck[0], Card::new("munch", "to chew"));
        assert_eq!(deck[1].metadata.as_ref().and_then(|m| m.subject.as_deref()), Some("English"));
    }

    #[test]
    fn blank_records_fall_back_to_text() {
        let records = vec![Card::new(" ", "")];
        assert_eq!(build_deck(&records, "a - b"), vec![Card::new("a", "b")]);
        assert!(build_deck(&[], "").is_empty());
    }
}
