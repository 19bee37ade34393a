//! Side-by-side comparison table on a landscape page.
//!
//! Column 0 holds the attribute labels; each requested watch gets one
//! column after it.

use horology_db::models::watch::WatchDetail;

use crate::document::{self, Font, Page};
use crate::layout::{fit_text, format_price, PageSize, BLACK, GOLD, GRAY};
use crate::ReportError;

pub const FILENAME: &str = "comparison.pdf";

/// Largest number of watches a comparison accepts.
pub const MAX_COMPARISON_WATCHES: usize = 6;

const TABLE_LEFT: f32 = 15.0;
const LABEL_COLUMN_WIDTH: f32 = 42.0;
const ROW_HEIGHT: f32 = 12.0;
const CELL_PADDING: f32 = 2.5;
const CELL_FONT_SIZE: f32 = 9.0;

/// Attribute labels, one per table row.
pub const ROW_LABELS: [&str; 9] = [
    "Brand",
    "Model",
    "Reference",
    "Price",
    "Movement",
    "Material",
    "Diameter",
    "Water resistance",
    "Complications",
];

/// Reject selections the table cannot hold.
pub fn check_selection(count: usize) -> Result<(), ReportError> {
    if count == 0 {
        return Err(ReportError::EmptySelection);
    }
    if count > MAX_COMPARISON_WATCHES {
        return Err(ReportError::TooManyWatches {
            max: MAX_COMPARISON_WATCHES,
            got: count,
        });
    }
    Ok(())
}

/// Cell values of one watch column, aligned with [`ROW_LABELS`].
fn column_values(watch: &WatchDetail) -> [String; 9] {
    let complications = if watch.complications.is_empty() {
        "-".to_string()
    } else {
        watch.complication_names().join(", ")
    };
    [
        watch.brand_name.clone(),
        watch.model_name.clone(),
        watch.reference_number.clone(),
        format_price(watch.price),
        watch.movement_display.to_string(),
        watch.material_display.to_string(),
        format!("{} mm", watch.case_diameter),
        format!("{} m", watch.water_resistance),
        complications,
    ]
}

/// The table as rows of cells: each row is its label followed by one cell
/// per watch, so every row has `watches.len() + 1` cells.
pub fn table(watches: &[WatchDetail]) -> Vec<Vec<String>> {
    let columns: Vec<[String; 9]> = watches.iter().map(column_values).collect();
    ROW_LABELS
        .iter()
        .enumerate()
        .map(|(row, label)| {
            std::iter::once(label.to_string())
                .chain(columns.iter().map(|col| col[row].clone()))
                .collect()
        })
        .collect()
}

/// X coordinates of the vertical grid lines for `watch_count` watches.
pub fn column_edges(watch_count: usize) -> Vec<f32> {
    let size = PageSize::A4_LANDSCAPE;
    let right = size.width - TABLE_LEFT;
    let watch_width = (right - TABLE_LEFT - LABEL_COLUMN_WIDTH) / watch_count.max(1) as f32;

    let mut edges = vec![TABLE_LEFT, TABLE_LEFT + LABEL_COLUMN_WIDTH];
    for i in 1..=watch_count {
        edges.push(TABLE_LEFT + LABEL_COLUMN_WIDTH + watch_width * i as f32);
    }
    edges
}

/// Lay out the comparison page.
pub fn layout_page(watches: &[WatchDetail]) -> Page {
    let size = PageSize::A4_LANDSCAPE;
    let mut page = Page::new(size);

    page.centered("WATCH COMPARISON", Font::Bold, 20.0, size.height - 20.0, BLACK);
    page.centered(
        format!("{} watches side by side", watches.len()),
        Font::Oblique,
        10.0,
        size.height - 27.0,
        GRAY,
    );

    let rows = table(watches);
    let edges = column_edges(watches.len());
    let table_top = size.height - 40.0;
    let table_bottom = table_top - ROW_HEIGHT * rows.len() as f32;
    let left = edges[0];
    let right = edges[edges.len() - 1];

    for i in 0..=rows.len() {
        let y = table_top - ROW_HEIGHT * i as f32;
        page.line((left, y), (right, y), GOLD, 0.8);
    }
    for &x in &edges {
        page.line((x, table_top), (x, table_bottom), GOLD, 0.8);
    }

    for (r, row) in rows.iter().enumerate() {
        let baseline = table_top - ROW_HEIGHT * (r as f32 + 1.0) + ROW_HEIGHT / 2.0 - 1.5;
        for (c, cell) in row.iter().enumerate() {
            let width = edges[c + 1] - edges[c] - 2.0 * CELL_PADDING;
            let font = if c == 0 { Font::Bold } else { Font::Regular };
            page.text(
                fit_text(cell, width, CELL_FONT_SIZE),
                font,
                CELL_FONT_SIZE,
                edges[c] + CELL_PADDING,
                baseline,
            );
        }
    }

    page.centered("Horology Catalog", Font::Oblique, 8.0, 10.0, GRAY);
    page
}

/// Render the comparison of `watches` into a single-page PDF.
pub fn render(watches: &[WatchDetail]) -> Result<Vec<u8>, ReportError> {
    check_selection(watches.len())?;
    document::render("Watch Comparison", &[layout_page(watches)])
}
