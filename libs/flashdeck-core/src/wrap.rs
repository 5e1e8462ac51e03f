//! Greedy word wrap against a caller-supplied width measurement.

use crate::types::Font;

/// Text width measurement supplied by the drawing surface (font metrics).
pub trait TextMeasurer: Send + Sync {
    /// Width of `text` set in `font` at `size`, in points.
    fn measure(&self, text: &str, font: Font, size: f64) -> f64;
}

/// Approximate Helvetica metrics built from the standard AFM advance widths
/// (units per 1000 em). Characters outside ASCII fall back to an average glyph.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelveticaMetrics;

impl HelveticaMetrics {
    fn advance(ch: char, font: Font) -> u16 {
        let bold = font == Font::HelveticaBold;
        match ch {
            ' ' | '.' | ',' => 278,
            ':' | ';' | '!' => {
                if bold { 333 } else { 278 }
            }
            '\'' => {
                if bold { 238 } else { 191 }
            }
            '-' | '(' | ')' | '[' | ']' => 333,
            '0'..='9' => 556,
            'a'..='z' => {
                const REGULAR: [u16; 26] = [
                    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
                    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
                ];
                const BOLD: [u16; 26] = [
                    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
                    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
                ];
                let i = (ch as u8 - b'a') as usize;
                if bold { BOLD[i] } else { REGULAR[i] }
            }
            'A'..='Z' => {
                const REGULAR: [u16; 26] = [
                    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
                    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
                ];
                const BOLD: [u16; 26] = [
                    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
                    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
                ];
                let i = (ch as u8 - b'A') as usize;
                if bold { BOLD[i] } else { REGULAR[i] }
            }
            '—' => 1000,
            '–' => 556,
            '•' => 350,
            _ => {
                if bold { 611 } else { 556 }
            }
        }
    }
}

impl TextMeasurer for HelveticaMetrics {
    fn measure(&self, text: &str, font: Font, size: f64) -> f64 {
        let units: u32 = text.chars().map(|c| u32::from(Self::advance(c, font))).sum();
        f64::from(units) * size / 1000.0
    }
}

/// Wrap `text` into lines no wider than `max_width`.
///
/// Words are never broken: a single word wider than `max_width` gets a line
/// of its own. Blank input yields no lines.
pub fn wrap<F>(text: &str, max_width: f64, width_of: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if !trimmed.contains('\n') && width_of(trimmed) <= max_width {
        return vec![trimmed.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in trimmed.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if width_of(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
