//! Draw lists and their rendering into a PDF buffer with printpdf.
//!
//! Layouts produce [`Page`]s of [`DrawOp`]s; [`render`] is the only place
//! that talks to printpdf. Keeping layout free of I/O lets tests inspect
//! what ends up on each page.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point,
};

use crate::layout::{text_width_mm, PageSize, Rgb, BLACK};
use crate::ReportError;

/// Built-in Helvetica variants used by the layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
    Oblique,
}

/// Horizontal anchoring of a text run relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        font: Font,
        size: f32,
        x: f32,
        y: f32,
        align: Align,
        color: Rgb,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Rgb,
        thickness: f32,
    },
    /// Rectangle outline; `(x, y)` is the bottom-left corner.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
        thickness: f32,
    },
}

/// A page and everything drawn on it.
#[derive(Debug, Clone)]
pub struct Page {
    pub size: PageSize,
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn new(size: PageSize) -> Self {
        Self {
            size,
            ops: Vec::new(),
        }
    }

    /// Left-aligned black text.
    pub fn text(&mut self, text: impl Into<String>, font: Font, size: f32, x: f32, y: f32) {
        self.text_colored(text, font, size, x, y, BLACK);
    }

    pub fn text_colored(
        &mut self,
        text: impl Into<String>,
        font: Font,
        size: f32,
        x: f32,
        y: f32,
        color: Rgb,
    ) {
        self.ops.push(DrawOp::Text {
            text: text.into(),
            font,
            size,
            x,
            y,
            align: Align::Left,
            color,
        });
    }

    /// Text centered horizontally on the page.
    pub fn centered(&mut self, text: impl Into<String>, font: Font, size: f32, y: f32, color: Rgb) {
        self.ops.push(DrawOp::Text {
            text: text.into(),
            font,
            size,
            x: self.size.width / 2.0,
            y,
            align: Align::Center,
            color,
        });
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb, thickness: f32) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color,
            thickness,
        });
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb, thickness: f32) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            color,
            thickness,
        });
    }

    /// Every text run on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self, ReportError> {
        Ok(Self {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?,
            oblique: doc
                .add_builtin_font(BuiltinFont::HelveticaOblique)
                .map_err(pdf_error)?,
        })
    }

    fn get(&self, font: Font) -> &IndirectFontRef {
        match font {
            Font::Regular => &self.regular,
            Font::Bold => &self.bold,
            Font::Oblique => &self.oblique,
        }
    }
}

/// Render `pages` into one PDF document and return its bytes.
pub fn render(title: &str, pages: &[Page]) -> Result<Vec<u8>, ReportError> {
    let Some(first) = pages.first() else {
        return Err(ReportError::EmptySelection);
    };

    let (doc, page_idx, layer_idx) = PdfDocument::new(
        title,
        Mm(first.size.width),
        Mm(first.size.height),
        "Layer 1",
    );
    let fonts = Fonts::load(&doc)?;

    let mut layer = doc.get_page(page_idx).get_layer(layer_idx);
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            let (page_idx, layer_idx) =
                doc.add_page(Mm(page.size.width), Mm(page.size.height), "Layer 1");
            layer = doc.get_page(page_idx).get_layer(layer_idx);
        }
        for op in &page.ops {
            draw(&layer, &fonts, op);
        }
    }

    let bytes = doc.save_to_bytes().map_err(pdf_error)?;
    tracing::debug!(title, pages = pages.len(), bytes = bytes.len(), "Rendered PDF");
    Ok(bytes)
}

fn draw(layer: &PdfLayerReference, fonts: &Fonts, op: &DrawOp) {
    match op {
        DrawOp::Text {
            text,
            font,
            size,
            x,
            y,
            align,
            color,
        } => {
            let x = match align {
                Align::Left => *x,
                Align::Center => x - text_width_mm(text, *size) / 2.0,
            };
            layer.set_fill_color(pdf_color(*color));
            layer.use_text(text.as_str(), *size, Mm(x), Mm(*y), fonts.get(*font));
        }
        DrawOp::Line {
            from,
            to,
            color,
            thickness,
        } => {
            layer.set_outline_color(pdf_color(*color));
            layer.set_outline_thickness(*thickness);
            layer.add_line(Line {
                points: vec![(point(*from), false), (point(*to), false)],
                is_closed: false,
            });
        }
        DrawOp::Rect {
            x,
            y,
            width,
            height,
            color,
            thickness,
        } => {
            layer.set_outline_color(pdf_color(*color));
            layer.set_outline_thickness(*thickness);
            layer.add_line(Line {
                points: vec![
                    (point((*x, *y)), false),
                    (point((x + width, *y)), false),
                    (point((x + width, y + height)), false),
                    (point((*x, y + height)), false),
                ],
                is_closed: true,
            });
        }
    }
}

fn point((x, y): (f32, f32)) -> Point {
    Point::new(Mm(x), Mm(y))
}

fn pdf_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

fn pdf_error<E: std::fmt::Debug>(err: E) -> ReportError {
    ReportError::Pdf(format!("{err:?}"))
}
