//! Layout engine: a deck and a print configuration in, page faces out.
//!
//! Pages come out in duplex order (front of sheet 0, back of sheet 0, front of
//! sheet 1, ...). Each face carries its cut guides plus, for every card on the
//! sheet, exactly one content instruction and optional footer and marker.

pub mod geometry;

pub use geometry::{
    plan_sheets, CardPlacement, FaceTransform, GridCell, PageGeometry, Rect, SheetPlan,
    CARDS_PER_SHEET, COLUMNS, ROWS,
};

use crate::annotate::compose;
use crate::error::{LayoutError, Result};
use crate::types::{
    Align, Card, DrawContent, DrawInstruction, Face, Font, PageFace, PageRef, Point,
    PrintConfig, PrintOptions, Rgb, Stroke, TextStyle,
};
use crate::wrap::{wrap, HelveticaMetrics, TextMeasurer};

pub const TERM_FONT_SIZE: f64 = 22.0;
pub const TERM_LEADING: f64 = 24.0;
/// Term baseline sits this far above the card centre.
pub const TERM_RAISE: f64 = 6.0;
pub const DEFINITION_FONT_SIZE: f64 = 14.0;
pub const DEFINITION_LEADING: f64 = 16.0;
/// First definition baseline sits this far above the card centre.
pub const DEFINITION_RAISE: f64 = 10.0;
pub const FOOTER_FONT_SIZE: f64 = 9.0;
pub const FOOTER_RIGHT_INSET: f64 = 10.0;
pub const FOOTER_BOTTOM_INSET: f64 = 8.0;
pub const MARKER_INSET: f64 = 8.0;
pub const MARKER_RADIUS: f64 = 2.0;
/// Horizontal padding on each side of a card's text column.
pub const TEXT_PADDING: f64 = 18.0;
pub const GUIDE_STROKE: Stroke = Stroke {
    width: 0.5,
    dash: [3.0, 3.0],
};

/// Engine state after the most recently emitted page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    AwaitingCards,
    EmittingFront(usize),
    EmittingBack(usize),
    Done,
}

/// Everything needed to place one card on one face.
struct CardSlot<'c> {
    card: &'c Card,
    page: PageRef,
    slot: usize,
    deck_index: usize,
    frame: Rect,
    transform: FaceTransform,
}

impl CardSlot<'_> {
    fn instruction(&self, local: Point, color: Rgb, content: DrawContent) -> DrawInstruction {
        DrawInstruction {
            page: self.page,
            slot: Some(self.slot),
            position: self.transform.apply(local),
            rotation: self.transform.rotation(),
            color,
            content,
        }
    }
}

/// Iterator over the page faces of one deck.
pub struct LayoutEngine<'a> {
    deck: &'a [Card],
    config: &'a PrintConfig,
    measurer: &'a dyn TextMeasurer,
    geometry: PageGeometry,
    sheet_count: usize,
    state: LayoutState,
}

impl<'a> LayoutEngine<'a> {
    /// Refuses an empty deck: there is nothing to render.
    pub fn new(
        deck: &'a [Card],
        config: &'a PrintConfig,
        measurer: &'a dyn TextMeasurer,
    ) -> Result<Self> {
        if deck.is_empty() {
            return Err(LayoutError::EmptyDeck);
        }
        Ok(Self {
            deck,
            config,
            measurer,
            geometry: PageGeometry::us_letter(),
            sheet_count: PageGeometry::sheet_count(deck.len()),
            state: LayoutState::AwaitingCards,
        })
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    pub fn sheet_count(&self) -> usize {
        self.sheet_count
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    fn sheet_cards(&self, sheet: usize) -> &'a [Card] {
        let start = sheet * CARDS_PER_SHEET;
        let end = (start + CARDS_PER_SHEET).min(self.deck.len());
        &self.deck[start..end]
    }

    fn text_width(&self) -> f64 {
        self.geometry.card_width() - 2.0 * TEXT_PADDING
    }

    fn face(&self, sheet: usize, face: Face) -> PageFace {
        let page = PageRef {
            face,
            sheet_index: sheet,
        };
        let transform = match face {
            Face::Front => FaceTransform::identity(&self.geometry),
            Face::Back => FaceTransform::for_back(
                &self.geometry,
                self.config.duplex_mode,
                self.config.back_offset,
            ),
        };

        let mut instructions = self.guides(page);
        for (slot, card) in self.sheet_cards(sheet).iter().enumerate() {
            let cell = match face {
                Face::Front => GridCell::from_slot(slot),
                Face::Back => GridCell::from_slot(slot).for_back(self.config.duplex_mode),
            };
            let target = CardSlot {
                card,
                page,
                slot,
                deck_index: sheet * CARDS_PER_SHEET + slot,
                frame: self.geometry.cell_rect(cell),
                transform,
            };
            instructions.push(match face {
                Face::Front => self.term(&target),
                Face::Back => self.definition(&target),
            });
            instructions.extend(self.footer(&target));
            instructions.extend(self.marker(&target));
        }

        PageFace {
            page,
            width: self.geometry.page_width,
            height: self.geometry.page_height,
            instructions,
        }
    }

    /// Guides are page furniture: drawn untransformed on both faces.
    fn guides(&self, page: PageRef) -> Vec<DrawInstruction> {
        self.geometry
            .guide_segments()
            .into_iter()
            .map(|(from, to)| DrawInstruction {
                page,
                slot: None,
                position: from,
                rotation: 0.0,
                color: Rgb::GUIDE,
                content: DrawContent::Guide {
                    to,
                    stroke: GUIDE_STROKE,
                },
            })
            .collect()
    }

    fn term(&self, target: &CardSlot<'_>) -> DrawInstruction {
        let style = TextStyle {
            font: Font::HelveticaBold,
            size: TERM_FONT_SIZE,
            align: Align::Center,
        };
        let mut lines = wrap(&target.card.term, self.text_width(), |s| {
            self.measurer.measure(s, style.font, style.size)
        });
        let center = target.frame.center();

        if lines.len() <= 1 {
            let local = Point::new(center.x, center.y + TERM_RAISE);
            let text = lines.pop().unwrap_or_default();
            return target.instruction(local, Rgb::BLACK, DrawContent::Text { text, style });
        }

        // Centre the block on the single-line baseline.
        let lift = (lines.len() - 1) as f64 * TERM_LEADING / 2.0;
        let local = Point::new(center.x, center.y + TERM_RAISE + lift);
        target.instruction(
            local,
            Rgb::BLACK,
            DrawContent::Lines {
                lines,
                leading: TERM_LEADING,
                style,
            },
        )
    }

    fn definition(&self, target: &CardSlot<'_>) -> DrawInstruction {
        let style = TextStyle {
            font: Font::Helvetica,
            size: DEFINITION_FONT_SIZE,
            align: Align::Center,
        };
        let lines = wrap(&target.card.definition, self.text_width(), |s| {
            self.measurer.measure(s, style.font, style.size)
        });
        let center = target.frame.center();
        target.instruction(
            Point::new(center.x, center.y + DEFINITION_RAISE),
            Rgb::BLACK,
            DrawContent::Lines {
                lines,
                leading: DEFINITION_LEADING,
                style,
            },
        )
    }

    fn footer(&self, target: &CardSlot<'_>) -> Option<DrawInstruction> {
        if !self.config.include_footer || self.config.footer_template.trim().is_empty() {
            return None;
        }

        let metadata = target.card.metadata.as_ref();
        let subject = metadata
            .and_then(|m| m.subject.as_deref())
            .unwrap_or(&self.config.subject);
        let lesson = metadata
            .and_then(|m| m.lesson.as_deref())
            .unwrap_or(&self.config.lesson);

        let text = compose(
            target.deck_index,
            Some(subject),
            Some(lesson),
            &self.config.footer_template,
        );
        if text.is_empty() {
            return None;
        }

        let frame = target.frame;
        let local = Point::new(
            frame.x + frame.width - FOOTER_RIGHT_INSET,
            frame.y + FOOTER_BOTTOM_INSET,
        );
        Some(target.instruction(
            local,
            Rgb::FOOTER,
            DrawContent::Text {
                text,
                style: TextStyle {
                    font: Font::Helvetica,
                    size: FOOTER_FONT_SIZE,
                    align: Align::Right,
                },
            },
        ))
    }

    fn marker(&self, target: &CardSlot<'_>) -> Option<DrawInstruction> {
        if !self.config.show_marker {
            return None;
        }
        let local = Point::new(target.frame.x + MARKER_INSET, target.frame.y + MARKER_INSET);
        Some(target.instruction(
            local,
            Rgb::MARKER,
            DrawContent::Marker {
                radius: MARKER_RADIUS,
            },
        ))
    }
}

impl Iterator for LayoutEngine<'_> {
    type Item = PageFace;

    fn next(&mut self) -> Option<PageFace> {
        let (sheet, face, next_state) = match self.state {
            LayoutState::AwaitingCards => (0, Face::Front, LayoutState::EmittingFront(0)),
            LayoutState::EmittingFront(sheet) => {
                let next = if sheet + 1 < self.sheet_count {
                    LayoutState::EmittingBack(sheet)
                } else {
                    LayoutState::Done
                };
                (sheet, Face::Back, next)
            }
            LayoutState::EmittingBack(sheet) => {
                (sheet + 1, Face::Front, LayoutState::EmittingFront(sheet + 1))
            }
            LayoutState::Done => return None,
        };

        tracing::debug!(sheet, face = ?face, cards = self.sheet_cards(sheet).len(), "laying out page");
        let page = self.face(sheet, face);
        self.state = next_state;
        Some(page)
    }
}

/// Lay out a deck with the built-in Helvetica metrics.
pub fn build_pages(deck: &[Card], config: &PrintConfig) -> Result<Vec<PageFace>> {
    build_pages_with(deck, config, &HelveticaMetrics)
}

/// Lay out a deck measuring text with the caller's font metrics.
pub fn build_pages_with(
    deck: &[Card],
    config: &PrintConfig,
    measurer: &dyn TextMeasurer,
) -> Result<Vec<PageFace>> {
    let pages: Vec<PageFace> = LayoutEngine::new(deck, config, measurer)?.collect();
    tracing::debug!(cards = deck.len(), pages = pages.len(), "layout complete");
    Ok(pages)
}

/// Validate raw print options, then lay out the deck.
pub fn layout_deck(deck: &[Card], options: PrintOptions) -> Result<Vec<PageFace>> {
    if deck.is_empty() {
        return Err(LayoutError::EmptyDeck);
    }
    let config = options.resolve()?;
    build_pages(deck, &config)
}

/// Every instruction of every page, in page order.
pub fn build_instructions(deck: &[Card], config: &PrintConfig) -> Result<Vec<DrawInstruction>> {
    Ok(build_pages(deck, config)?
        .into_iter()
        .flat_map(|page| page.instructions)
        .collect())
}
