//! Core types shared by the parser, the layout engine and the backend.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg};

use crate::error::ConfigError;

/// Points per millimetre in the drawing surface's length unit.
pub const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// Default footer template: subject and lesson joined by a bullet.
pub const DEFAULT_FOOTER_TEMPLATE: &str = "{subject} • {lesson}";

/// Optional context printed in a card's footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson: Option<String>,
}

/// One term/definition pair. Deck order is placement order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub term: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CardMetadata>,
}

impl Card {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: CardMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// True when both sides are blank after trimming.
    pub fn is_blank(&self) -> bool {
        self.term.trim().is_empty() && self.definition.trim().is_empty()
    }
}

/// How the back of a sheet is produced, which decides the back-face transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplexMode {
    /// Flip on the long edge; back columns are mirrored.
    LongEdgeMirrored,
    /// Flip on the long edge with a duplexer that already reverses the page.
    LongEdgeNoMirror,
    /// Flip on the short edge; the whole back page is turned 180 degrees.
    ShortEdgeRotated,
}

impl Default for DuplexMode {
    fn default() -> Self {
        Self::LongEdgeMirrored
    }
}

impl DuplexMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LongEdgeMirrored => "long_edge_mirrored",
            Self::LongEdgeNoMirror => "long_edge_no_mirror",
            Self::ShortEdgeRotated => "short_edge_rotated",
        }
    }

    /// Resolve a canonical name or a UI label such as
    /// `"Long-edge (mirrored back)"` or `"Short-edge (rotate back)"`.
    pub fn from_label(label: &str) -> std::result::Result<Self, ConfigError> {
        let key = label
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        match key.as_str() {
            "long edge mirrored" | "long edge mirrored back" | "long edge" => {
                Ok(Self::LongEdgeMirrored)
            }
            "long edge no mirror" => Ok(Self::LongEdgeNoMirror),
            "short edge rotated" | "short edge rotate back" | "short edge" => {
                Ok(Self::ShortEdgeRotated)
            }
            "" => Err(ConfigError::MissingDuplexMode),
            _ => Err(ConfigError::UnknownDuplexMode(label.to_string())),
        }
    }
}

/// Back-face calibration offset in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BackOffset {
    pub x_mm: f64,
    pub y_mm: f64,
}

impl BackOffset {
    pub fn new(x_mm: f64, y_mm: f64) -> Self {
        Self { x_mm, y_mm }
    }

    pub fn is_zero(&self) -> bool {
        self.x_mm == 0.0 && self.y_mm == 0.0
    }

    /// Offset converted to drawing units.
    pub fn to_points(self) -> Point {
        Point::new(self.x_mm * POINTS_PER_MM, self.y_mm * POINTS_PER_MM)
    }
}

/// Offsets compose in millimetres, so `o + -o` is exactly zero. Applying
/// `o` and then `-o` to a point in points agrees only to rounding error.
impl Add for BackOffset {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x_mm + other.x_mm, self.y_mm + other.y_mm)
    }
}

impl Neg for BackOffset {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x_mm, -self.y_mm)
    }
}

/// Print options as they arrive from user input, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintOptions {
    pub duplex_mode: Option<String>,
    pub back_offset_x_mm: f64,
    pub back_offset_y_mm: f64,
    pub show_marker: bool,
    pub include_footer: bool,
    pub footer_template: String,
    pub subject: String,
    pub lesson: String,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            duplex_mode: Some(DuplexMode::default().as_str().to_string()),
            back_offset_x_mm: 0.0,
            back_offset_y_mm: 0.0,
            show_marker: false,
            include_footer: true,
            footer_template: DEFAULT_FOOTER_TEMPLATE.to_string(),
            subject: String::new(),
            lesson: String::new(),
        }
    }
}

impl PrintOptions {
    /// Validate the options into a closed `PrintConfig`.
    pub fn resolve(self) -> std::result::Result<PrintConfig, ConfigError> {
        let duplex_mode = match self.duplex_mode.as_deref() {
            Some(label) => DuplexMode::from_label(label)?,
            None => return Err(ConfigError::MissingDuplexMode),
        };

        for (axis, value) in [('x', self.back_offset_x_mm), ('y', self.back_offset_y_mm)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteOffset { axis, value });
            }
        }

        Ok(PrintConfig {
            duplex_mode,
            back_offset: BackOffset::new(self.back_offset_x_mm, self.back_offset_y_mm),
            show_marker: self.show_marker,
            include_footer: self.include_footer,
            footer_template: self.footer_template,
            subject: self.subject,
            lesson: self.lesson,
        })
    }
}

/// Validated configuration for one layout call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintConfig {
    pub duplex_mode: DuplexMode,
    pub back_offset: BackOffset,
    pub show_marker: bool,
    pub include_footer: bool,
    pub footer_template: String,
    pub subject: String,
    pub lesson: String,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            duplex_mode: DuplexMode::default(),
            back_offset: BackOffset::default(),
            show_marker: false,
            include_footer: true,
            footer_template: DEFAULT_FOOTER_TEMPLATE.to_string(),
            subject: String::new(),
            lesson: String::new(),
        }
    }
}

/// A position on the page, origin bottom-left, in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// Which side of a sheet a page is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    Front,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRef {
    pub face: Face,
    pub sheet_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    /// PostScript name understood by PDF backends.
    pub fn postscript_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
    pub const GUIDE: Rgb = Rgb(0xD1, 0xD5, 0xDB);
    pub const FOOTER: Rgb = Rgb(0x6B, 0x72, 0x80);
    pub const MARKER: Rgb = Rgb(0x9C, 0xA3, 0xAF);

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: Font,
    pub size: f64,
    pub align: Align,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f64,
    /// Dash on/off lengths; `[0.0, 0.0]` for a solid line.
    pub dash: [f64; 2],
}

/// What a single draw instruction puts on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawContent {
    /// One line anchored at the instruction position.
    Text { text: String, style: TextStyle },
    /// Several lines; the first baseline sits at the position, each next one
    /// `leading` further down in the instruction's rotated frame.
    Lines {
        lines: Vec<String>,
        leading: f64,
        style: TextStyle,
    },
    /// Filled dot centred on the position.
    Marker { radius: f64 },
    /// Straight line from the position to `to`.
    Guide { to: Point, stroke: Stroke },
}

/// A resolved drawing step. Positions are final page coordinates; `rotation`
/// (degrees) turns the content about its own position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawInstruction {
    pub page: PageRef,
    /// Grid cell the instruction belongs to; `None` for page furniture.
    pub slot: Option<usize>,
    pub position: Point,
    pub rotation: f64,
    pub color: Rgb,
    pub content: DrawContent,
}

/// Every instruction for one page, in drawing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFace {
    pub page: PageRef,
    pub width: f64,
    pub height: f64,
    pub instructions: Vec<DrawInstruction>,
}

impl PageFace {
    /// Instructions that belong to a card slot.
    pub fn card_instructions(&self) -> impl Iterator<Item = &DrawInstruction> {
        self.instructions.iter().filter(|i| i.slot.is_some())
    }
}
