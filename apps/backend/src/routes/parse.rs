//! Parse endpoint

use axum::{extract::rejection::JsonRejection, Json};

use crate::error::Result;
use crate::models::{ParseRequest, ParseResponse};

/// POST /api/parse
/// Turns pasted/OCR text (or tabular records) into an ordered deck
pub async fn parse(
    payload: std::result::Result<Json<ParseRequest>, JsonRejection>,
) -> Result<Json<ParseResponse>> {
    let Json(payload) = payload?;
    let text = payload.text.as_deref().unwrap_or("");
    let cards = flashdeck_core::build_deck(&payload.records, text);

    tracing::info!(
        "Parsed {} cards from {} records and {} bytes of text",
        cards.len(),
        payload.records.len(),
        text.len()
    );

    Ok(Json(ParseResponse {
        count: cards.len(),
        cards,
    }))
}
