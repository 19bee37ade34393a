//! Wishlist export: a card per watch with a running total.
//!
//! Cards flow top to bottom; a new page starts whenever the space left
//! below the cursor cannot hold another card plus the bottom margin.

use horology_db::models::watch::WatchDetail;
use rust_decimal::Decimal;

use crate::document::{self, Font, Page};
use crate::layout::{format_price, PageSize, BLACK, GOLD, GRAY};
use crate::ReportError;

pub const FILENAME: &str = "wishlist.pdf";

const MARGIN_X: f32 = 20.0;
const TOP_MARGIN: f32 = 20.0;
const BOTTOM_MARGIN: f32 = 20.0;
const CARD_HEIGHT: f32 = 32.0;
const CARD_GAP: f32 = 6.0;
const TOTAL_BLOCK_HEIGHT: f32 = 16.0;

/// Laid-out wishlist pages plus the grand total they print.
#[derive(Debug, Clone)]
pub struct WishlistLayout {
    pub pages: Vec<Page>,
    pub total: Decimal,
}

/// Lay out the wishlist of `watches`. `generated_on` is printed in the header.
pub fn layout(watches: &[WatchDetail], generated_on: &str) -> WishlistLayout {
    let size = PageSize::A4_PORTRAIT;
    let mut pages = Vec::new();
    let mut page = Page::new(size);

    page.centered("MY WISHLIST", Font::Bold, 22.0, size.height - 25.0, BLACK);
    page.centered(
        format!("{} watches selected | {generated_on}", watches.len()),
        Font::Oblique,
        10.0,
        size.height - 32.0,
        GRAY,
    );
    page.line(
        (MARGIN_X, size.height - 36.0),
        (size.width - MARGIN_X, size.height - 36.0),
        GOLD,
        1.5,
    );

    let mut y = size.height - 45.0;
    let mut total = Decimal::ZERO;

    for watch in watches {
        if y - CARD_HEIGHT < BOTTOM_MARGIN {
            pages.push(std::mem::replace(&mut page, Page::new(size)));
            y = size.height - TOP_MARGIN;
        }
        total += watch.price;
        draw_card(&mut page, watch, y, total);
        y -= CARD_HEIGHT + CARD_GAP;
    }

    if y - TOTAL_BLOCK_HEIGHT < BOTTOM_MARGIN {
        pages.push(std::mem::replace(&mut page, Page::new(size)));
        y = size.height - TOP_MARGIN;
    }
    page.line((MARGIN_X, y), (size.width - MARGIN_X, y), GOLD, 1.0);
    page.text(
        format!("Total: {}", format_price(total)),
        Font::Bold,
        14.0,
        MARGIN_X,
        y - 10.0,
    );
    pages.push(page);

    WishlistLayout { pages, total }
}

/// Draw one card whose top edge is at `top`.
fn draw_card(page: &mut Page, watch: &WatchDetail, top: f32, running_total: Decimal) {
    let width = page.size.width - 2.0 * MARGIN_X;
    page.rect(MARGIN_X, top - CARD_HEIGHT, width, CARD_HEIGHT, GOLD, 1.0);

    let text_x = MARGIN_X + 5.0;
    let price_x = MARGIN_X + width - 55.0;

    page.text(
        format!("{} {}", watch.brand_name, watch.model_name),
        Font::Bold,
        13.0,
        text_x,
        top - 8.0,
    );
    page.text(
        format!("Ref. {}", watch.reference_number),
        Font::Regular,
        10.0,
        text_x,
        top - 15.0,
    );
    page.text(
        format!(
            "{} | {} | {} mm",
            watch.movement_display, watch.material_display, watch.case_diameter
        ),
        Font::Regular,
        10.0,
        text_x,
        top - 21.0,
    );
    page.text(format_price(watch.price), Font::Bold, 12.0, price_x, top - 8.0);
    page.text_colored(
        format!("Running total: {}", format_price(running_total)),
        Font::Oblique,
        9.0,
        price_x,
        top - 27.0,
        GRAY,
    );
}

/// Render the wishlist of `watches` into a single PDF.
pub fn render(watches: &[WatchDetail]) -> Result<Vec<u8>, ReportError> {
    if watches.is_empty() {
        return Err(ReportError::EmptySelection);
    }
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let layout = layout(watches, &today);
    document::render("Wishlist", &layout.pages)
}
