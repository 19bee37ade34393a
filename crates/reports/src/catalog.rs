//! Catalog export: one technical sheet per watch.

use horology_db::models::watch::WatchDetail;

use crate::document::{self, Font, Page};
use crate::layout::{
    format_price, truncate_description, wrap_words, PageSize, BLACK, GOLD, GRAY, WRAP_LINE_CHARS,
};
use crate::ReportError;

pub const FILENAME: &str = "catalog.pdf";

const MARGIN_X: f32 = 20.0;
const VALUE_X: f32 = 60.0;

/// Lay out the technical sheet of one watch. `page_number` is 1-based.
pub fn layout_page(watch: &WatchDetail, page_number: usize) -> Page {
    let size = PageSize::A4_PORTRAIT;
    let top = size.height;
    let mut page = Page::new(size);

    page.centered("TECHNICAL SHEET", Font::Bold, 24.0, top - 20.0, BLACK);
    page.centered(
        format!("{} - {}", watch.brand_name, watch.model_name),
        Font::Bold,
        18.0,
        top - 30.0,
        BLACK,
    );
    page.line((MARGIN_X, top - 35.0), (size.width - MARGIN_X, top - 35.0), GOLD, 1.5);

    let fields = [
        ("Reference:", watch.reference_number.clone()),
        ("Price:", format_price(watch.price)),
        ("Movement:", watch.movement_display.to_string()),
        ("Material:", watch.material_display.to_string()),
        ("Diameter:", format!("{} mm", watch.case_diameter)),
        ("Water resistance:", format!("{} m", watch.water_resistance)),
    ];

    let mut y = top - 50.0;
    for (label, value) in fields {
        page.text(label, Font::Bold, 11.0, MARGIN_X, y);
        page.text(value, Font::Regular, 11.0, VALUE_X, y);
        y -= 8.0;
    }

    page.text("Description:", Font::Bold, 11.0, MARGIN_X, y);
    y -= 6.0;
    for line in description_lines(&watch.description) {
        page.text(line, Font::Regular, 10.0, MARGIN_X, y);
        y -= 4.5;
    }

    page.centered(
        format!("Page {page_number} | Horology Catalog"),
        Font::Oblique,
        8.0,
        10.0,
        GRAY,
    );
    page
}

/// Truncated and wrapped description lines.
pub fn description_lines(description: &str) -> Vec<String> {
    wrap_words(&truncate_description(description), WRAP_LINE_CHARS)
}

/// Render the catalog of `watches` into a single PDF.
pub fn render(watches: &[WatchDetail]) -> Result<Vec<u8>, ReportError> {
    if watches.is_empty() {
        return Err(ReportError::EmptySelection);
    }
    let pages: Vec<Page> = watches
        .iter()
        .enumerate()
        .map(|(i, watch)| layout_page(watch, i + 1))
        .collect();
    document::render("Horology Catalog", &pages)
}
