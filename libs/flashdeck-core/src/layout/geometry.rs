//! Page grid geometry and the front/back registration transforms.
//!
//! The sheet is a fixed 2 x 4 grid. Slot `i` sits in column `i % 2` and row
//! `i / 2`, row 0 at the top. Back faces map each slot through the duplex
//! mode first, then through the page transform (rotation, then calibration
//! offset).

use serde::{Deserialize, Serialize};

use crate::types::{BackOffset, DuplexMode, Point};

/// US Letter in points.
pub const US_LETTER_WIDTH: f64 = 612.0;
pub const US_LETTER_HEIGHT: f64 = 792.0;

pub const COLUMNS: usize = 2;
pub const ROWS: usize = 4;
pub const CARDS_PER_SHEET: usize = COLUMNS * ROWS;

/// Axis-aligned rectangle, origin at its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A grid position on one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub column: usize,
    pub row: usize,
}

impl GridCell {
    pub fn from_slot(slot: usize) -> Self {
        Self {
            column: slot % COLUMNS,
            row: slot / COLUMNS,
        }
    }

    pub fn slot(&self) -> usize {
        self.row * COLUMNS + self.column
    }

    /// Cell a card's back lands in before any page transform.
    pub fn for_back(self, mode: DuplexMode) -> Self {
        match mode {
            DuplexMode::LongEdgeMirrored => Self {
                column: COLUMNS - 1 - self.column,
                row: self.row,
            },
            DuplexMode::LongEdgeNoMirror | DuplexMode::ShortEdgeRotated => self,
        }
    }
}

/// Derived page dimensions; nothing here is stored between calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::us_letter()
    }
}

impl PageGeometry {
    pub fn us_letter() -> Self {
        Self {
            page_width: US_LETTER_WIDTH,
            page_height: US_LETTER_HEIGHT,
            margin: 0.0,
        }
    }

    pub fn card_width(&self) -> f64 {
        (self.page_width - 2.0 * self.margin) / COLUMNS as f64
    }

    pub fn card_height(&self) -> f64 {
        (self.page_height - 2.0 * self.margin) / ROWS as f64
    }

    /// Number of sheets needed for `cards` cards.
    pub fn sheet_count(cards: usize) -> usize {
        cards.div_ceil(CARDS_PER_SHEET)
    }

    /// Card rectangle for a cell in the face's own (untransformed) frame.
    pub fn cell_rect(&self, cell: GridCell) -> Rect {
        let width = self.card_width();
        let height = self.card_height();
        Rect {
            x: self.margin + cell.column as f64 * width,
            y: self.page_height - self.margin - (cell.row + 1) as f64 * height,
            width,
            height,
        }
    }

    /// Dashed cut lines between cards, as (start, end) pairs.
    pub fn guide_segments(&self) -> Vec<(Point, Point)> {
        let left = self.margin;
        let right = self.page_width - self.margin;
        let bottom = self.margin;
        let top = self.page_height - self.margin;

        let verticals = (1..COLUMNS).map(|c| {
            let x = left + c as f64 * self.card_width();
            (Point::new(x, bottom), Point::new(x, top))
        });
        let horizontals = (1..ROWS).map(|r| {
            let y = bottom + r as f64 * self.card_height();
            (Point::new(left, y), Point::new(right, y))
        });

        verticals.chain(horizontals).collect()
    }
}

/// Maps a face's own frame to final page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceTransform {
    rotate: bool,
    offset: Point,
    page_width: f64,
    page_height: f64,
}

impl FaceTransform {
    pub fn identity(geometry: &PageGeometry) -> Self {
        Self {
            rotate: false,
            offset: Point::default(),
            page_width: geometry.page_width,
            page_height: geometry.page_height,
        }
    }

    pub fn for_back(geometry: &PageGeometry, mode: DuplexMode, offset: BackOffset) -> Self {
        Self {
            rotate: mode == DuplexMode::ShortEdgeRotated,
            offset: offset.to_points(),
            page_width: geometry.page_width,
            page_height: geometry.page_height,
        }
    }

    /// Content rotation in degrees.
    pub fn rotation(&self) -> f64 {
        if self.rotate {
            180.0
        } else {
            0.0
        }
    }

    /// Rotation about the page centre, then the calibration offset.
    pub fn apply(&self, p: Point) -> Point {
        let turned = if self.rotate {
            Point::new(self.page_width - p.x, self.page_height - p.y)
        } else {
            p
        };
        turned + self.offset
    }

    pub fn apply_rect(&self, r: Rect) -> Rect {
        let corner = if self.rotate {
            Point::new(
                self.page_width - r.x - r.width,
                self.page_height - r.y - r.height,
            )
        } else {
            Point::new(r.x, r.y)
        };
        let corner = corner + self.offset;
        Rect {
            x: corner.x,
            y: corner.y,
            width: r.width,
            height: r.height,
        }
    }
}

/// Where one card lands on one face, in final page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardPlacement {
    /// Card index within its sheet (the front slot).
    pub slot: usize,
    /// Grid cell used on this face, before rotation.
    pub cell: GridCell,
    pub rect: Rect,
    /// Text anchor: the card centre.
    pub anchor: Point,
}

impl CardPlacement {
    pub fn front(geometry: &PageGeometry, slot: usize) -> Self {
        let cell = GridCell::from_slot(slot);
        let rect = geometry.cell_rect(cell);
        Self {
            slot,
            cell,
            rect,
            anchor: rect.center(),
        }
    }

    pub fn back(geometry: &PageGeometry, slot: usize, mode: DuplexMode, offset: BackOffset) -> Self {
        let cell = GridCell::from_slot(slot).for_back(mode);
        let transform = FaceTransform::for_back(geometry, mode, offset);
        let local = geometry.cell_rect(cell);
        Self {
            slot,
            cell,
            rect: transform.apply_rect(local),
            anchor: transform.apply(local.center()),
        }
    }
}

/// Card placements for both faces of one sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetPlan {
    pub index: usize,
    /// Deck index of the sheet's first card.
    pub first_card: usize,
    pub front: Vec<CardPlacement>,
    pub back: Vec<CardPlacement>,
}

impl SheetPlan {
    pub fn populated(&self) -> usize {
        self.front.len()
    }

    pub fn blank(&self) -> usize {
        CARDS_PER_SHEET - self.front.len()
    }
}

/// Chunk `cards` cards into sheets and place every card on both faces.
pub fn plan_sheets(
    geometry: &PageGeometry,
    cards: usize,
    mode: DuplexMode,
    offset: BackOffset,
) -> Vec<SheetPlan> {
    (0..PageGeometry::sheet_count(cards))
        .map(|index| {
            let first_card = index * CARDS_PER_SHEET;
            let populated = (cards - first_card).min(CARDS_PER_SHEET);
            SheetPlan {
                index,
                first_card,
                front: (0..populated)
                    .map(|slot| CardPlacement::front(geometry, slot))
                    .collect(),
                back: (0..populated)
                    .map(|slot| CardPlacement::back(geometry, slot, mode, offset))
                    .collect(),
            }
        })
        .collect()
}
