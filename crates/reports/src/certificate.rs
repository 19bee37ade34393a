//! Certificate of authenticity: one fixed-layout page per watch.

use horology_db::models::watch::WatchDetail;

use crate::document::{self, Font, Page};
use crate::layout::{format_price, PageSize, BLACK, GOLD, GRAY};
use crate::ReportError;

const LABEL_X: f32 = 40.0;
const VALUE_X: f32 = 90.0;
const ROW_STEP: f32 = 7.0;

/// Download filename for a certificate export.
///
/// Characters outside `[A-Za-z0-9._-]` in the reference become `_`.
pub fn filename(watches: &[WatchDetail]) -> String {
    match watches {
        [single] => {
            let reference: String = single
                .reference_number
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                        c
                    } else {
                        '_'
                    }
                })
                .collect();
            format!("certificate_{reference}.pdf")
        }
        _ => "certificates.pdf".to_string(),
    }
}

/// Labeled fields printed on a certificate. `None` leaves a blank row.
fn detail_rows(watch: &WatchDetail) -> Vec<Option<(&'static str, String)>> {
    vec![
        Some(("Brand:", watch.brand_name.clone())),
        Some(("Model:", watch.model_name.clone())),
        Some(("Reference:", watch.reference_number.clone())),
        Some(("Serial number:", watch.serial_number.clone())),
        None,
        Some(("Movement:", watch.movement_display.to_string())),
        Some(("Material:", watch.material_display.to_string())),
        Some(("Case diameter:", format!("{} mm", watch.case_diameter))),
        Some(("Water resistance:", format!("{} metres", watch.water_resistance))),
        None,
        Some(("List price:", format_price(watch.price))),
    ]
}

/// Lay out the certificate page of one watch.
pub fn layout_page(watch: &WatchDetail) -> Page {
    let size = PageSize::A4_PORTRAIT;
    let top = size.height;
    let mut page = Page::new(size);

    page.centered("CERTIFICATE OF AUTHENTICITY", Font::Bold, 28.0, top - 30.0, BLACK);
    page.centered("Prestige Timepiece", Font::Oblique, 12.0, top - 38.0, GRAY);
    page.line((40.0, top - 45.0), (size.width - 40.0, top - 45.0), GOLD, 2.0);

    let mut y = top - 65.0;
    page.text("TIMEPIECE DETAILS", Font::Bold, 14.0, LABEL_X, y);
    y -= 12.0;

    for row in detail_rows(watch) {
        if let Some((label, value)) = row {
            page.text(label, Font::Bold, 11.0, LABEL_X, y);
            page.text(value, Font::Regular, 11.0, VALUE_X, y);
        }
        y -= ROW_STEP;
    }

    if !watch.complications.is_empty() {
        y -= 5.0;
        page.text("Complications:", Font::Bold, 11.0, LABEL_X, y);
        y -= ROW_STEP;
        for name in watch.complication_names() {
            page.text(format!("- {name}"), Font::Regular, 11.0, LABEL_X + 10.0, y);
            y -= 6.0;
        }
    }

    page.rect(30.0, 20.0, size.width - 60.0, size.height - 50.0, GOLD, 3.0);

    page.centered(
        "This certificate attests the authenticity of the timepiece described above.",
        Font::Oblique,
        9.0,
        15.0,
        GRAY,
    );
    page.centered("Horology Catalog", Font::Oblique, 9.0, 10.0, GRAY);
    page
}

/// Render one certificate page per watch into a single PDF.
pub fn render(watches: &[WatchDetail]) -> Result<Vec<u8>, ReportError> {
    if watches.is_empty() {
        return Err(ReportError::EmptySelection);
    }
    let pages: Vec<Page> = watches.iter().map(layout_page).collect();
    document::render("Certificate of Authenticity", &pages)
}
