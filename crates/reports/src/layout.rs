//! Page geometry, colors and text helpers shared by the PDF layouts.
//!
//! All coordinates are millimetres from the bottom-left corner of the page.

use rust_decimal::Decimal;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A4 short edge.
pub const A4_SHORT_MM: f32 = 210.0;

/// A4 long edge.
pub const A4_LONG_MM: f32 = 297.0;

/// Millimetres per typographic point.
pub const MM_PER_PT: f32 = 0.3528;

/// Page dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4_PORTRAIT: PageSize = PageSize {
        width: A4_SHORT_MM,
        height: A4_LONG_MM,
    };

    pub const A4_LANDSCAPE: PageSize = PageSize {
        width: A4_LONG_MM,
        height: A4_SHORT_MM,
    };
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
pub const GRAY: Rgb = Rgb(0.5, 0.5, 0.5);
pub const GOLD: Rgb = Rgb(0.8, 0.6, 0.2);

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Descriptions longer than this are cut before wrapping.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// A word joins the current line while the line stays under this length.
pub const WRAP_LINE_CHARS: usize = 90;

/// Estimated width of `text` set in Helvetica at `size` points.
///
/// Uses an average glyph width of half the font size, which is close enough
/// for centering and column fitting.
pub fn text_width_mm(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5 * MM_PER_PT
}

/// Cut a description at [`DESCRIPTION_MAX_CHARS`] characters, appending `...`.
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() > DESCRIPTION_MAX_CHARS {
        let mut cut: String = text.chars().take(DESCRIPTION_MAX_CHARS).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_string()
    }
}

/// Greedy word wrap.
///
/// A word is appended to the current line (followed by a space) while
/// `len(line) + len(word) < limit`; otherwise the line is emitted and the word
/// starts a new one. The last line is always emitted, even when empty.
pub fn wrap_words(text: &str, limit: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.chars().count() + word.chars().count() < limit {
            line.push_str(word);
            line.push(' ');
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line.push(' ');
        }
    }
    lines.push(line);
    lines
}

/// Shorten `text` with a trailing `...` so it fits in `max_width_mm`.
pub fn fit_text(text: &str, max_width_mm: f32, size: f32) -> String {
    if text_width_mm(text, size) <= max_width_mm {
        return text.to_string();
    }
    let per_char = size * 0.5 * MM_PER_PT;
    let keep = ((max_width_mm / per_char) as usize).saturating_sub(3);
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str("...");
    cut
}

/// Format a price with two decimals and the currency code.
pub fn format_price(price: Decimal) -> String {
    format!("{:.2} EUR", price)
}
