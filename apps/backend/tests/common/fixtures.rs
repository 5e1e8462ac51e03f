//! Test fixtures and factory functions for request bodies.

#![allow(dead_code)]

use serde_json::{json, Value};

/// Numbered vocabulary list with `count` entries.
pub fn numbered_list(count: usize) -> String {
    (1..=count)
        .map(|i| format!("{}. term{} - definition {}", i, i, i))
        .collect::<Vec<_>>()
        .join("\n")
}

/// JSON card objects `term1`..`termN`.
pub fn cards(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|i| json!({ "term": format!("term{}", i), "definition": format!("definition {}", i) }))
        .collect()
}

/// Create a parse request from raw text.
pub fn parse_text_request(text: &str) -> Value {
    json!({ "text": text })
}

/// Create a layout request with explicit print options.
pub fn layout_request(cards: Vec<Value>, options: Value) -> Value {
    json!({ "cards": cards, "options": options })
}

/// Print options with the given duplex label and back offset.
pub fn print_options(duplex_mode: &str, x_mm: f64, y_mm: f64) -> Value {
    json!({
        "duplex_mode": duplex_mode,
        "back_offset_x_mm": x_mm,
        "back_offset_y_mm": y_mm,
        "show_marker": false,
        "include_footer": true,
        "subject": "Biology",
        "lesson": "Cells"
    })
}
