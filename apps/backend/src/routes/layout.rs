//! Layout endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::{LayoutRequest, LayoutResponse};
use crate::AppState;
use flashdeck_core::layout::{build_pages_with, PageGeometry, CARDS_PER_SHEET};

/// POST /api/layout
/// Resolves print options and returns draw instructions for every page
pub async fn layout(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LayoutRequest>, JsonRejection>,
) -> Result<Json<LayoutResponse>> {
    let Json(payload) = payload?;
    if payload.cards.is_empty() {
        return Err(ApiError::NothingToRender);
    }

    let options = payload
        .options
        .unwrap_or_else(|| state.config.default_print_options());
    let config = options.resolve()?;

    let pages = build_pages_with(&payload.cards, &config, state.measurer.as_ref())?;
    let sheet_count = PageGeometry::sheet_count(payload.cards.len());
    let blank_slots = sheet_count * CARDS_PER_SHEET - payload.cards.len();

    tracing::info!(
        "Laid out {} cards on {} sheets ({})",
        payload.cards.len(),
        sheet_count,
        config.duplex_mode.as_str()
    );

    Ok(Json(LayoutResponse {
        sheet_count,
        blank_slots,
        pages,
    }))
}
