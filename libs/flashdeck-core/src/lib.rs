//! Core flashdeck library: loose text in, printable duplex flashcard pages out.
//!
//! Provides:
//! - Segmenter, pair extractor and continuation merger for pasted or OCR text
//! - Deck builder combining them (plus a tabular-record bypass)
//! - Layout engine placing cards on a 2 x 4 US Letter grid with duplex registration
//! - Footer annotation templates and greedy word wrap
//! - Shared types (Card, PrintConfig, DrawInstruction, etc.)

pub mod annotate;
pub mod error;
pub mod extract;
pub mod layout;
pub mod merge;
pub mod parser;
pub mod segment;
pub mod types;
pub mod wrap;

pub use annotate::compose;
pub use error::{ConfigError, LayoutError, Result};
pub use extract::{extract, ExtractRule};
pub use layout::{build_instructions, build_pages, build_pages_with, layout_deck, LayoutEngine, LayoutState};
pub use merge::merge_lines;
pub use parser::{build_deck, parse, parse_pairs};
pub use segment::{segment, SegmentRule};
pub use types::{
    BackOffset, Card, CardMetadata, DrawContent, DrawInstruction, DuplexMode, Face, PageFace,
    PageRef, Point, PrintConfig, PrintOptions,
};
pub use wrap::{wrap, HelveticaMetrics, TextMeasurer};
