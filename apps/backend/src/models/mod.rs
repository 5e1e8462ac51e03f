//! API request and response types

use serde::{Deserialize, Serialize};

// Re-export shared types from flashdeck-core
pub use flashdeck_core::types::{
    Card, CardMetadata, DrawContent, DrawInstruction, DuplexMode, Face, PageFace, PageRef,
    PrintOptions,
};

// === Parse API Types ===

/// Request for POST /api/parse.
///
/// Non-empty `records` (from a spreadsheet import) bypass text parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub records: Vec<Card>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    pub cards: Vec<Card>,
    pub count: usize,
}

// === Layout API Types ===

/// Request for POST /api/layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutRequest {
    pub cards: Vec<Card>,
    #[serde(default)]
    pub options: Option<PrintOptions>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutResponse {
    pub sheet_count: usize,
    /// Unused grid cells on the last sheet.
    pub blank_slots: usize,
    pub pages: Vec<PageFace>,
}
