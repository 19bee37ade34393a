//! PNG charts drawn with plotters: movement distribution donut and
//! average price per brand bars.
//!
//! Chart text is rasterized with a TrueType font that must be installed
//! once per process with [`install_chart_font`]. Without it every render
//! fails with [`ReportError::Chart`] instead of drawing unlabeled charts.

use std::io::Cursor;
use std::path::Path;
use std::sync::OnceLock;

use horology_db::models::stats::{BrandAveragePrice, MovementCount};
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle};
use rust_decimal::prelude::ToPrimitive;

use crate::ReportError;

/// Movement donut size in pixels.
pub const MOVEMENT_CHART_SIZE: (u32, u32) = (500, 500);

/// Price bars size in pixels.
pub const PRICE_CHART_SIZE: (u32, u32) = (600, 400);

/// Number of brands on the price chart.
pub const MAX_PRICE_BARS: usize = 5;

/// Body of the text response returned instead of an empty chart.
pub const NO_DATA_MESSAGE: &str = "No data available to build this chart.";

const FONT_FAMILY: &str = "sans-serif";

const GOLD: RGBColor = RGBColor(0xc5, 0xa0, 0x59);
const SILVER: RGBColor = RGBColor(0xa6, 0xa6, 0xa6);
const PLATINUM: RGBColor = RGBColor(0xe5, 0xe4, 0xe2);
const BRONZE: RGBColor = RGBColor(0xcd, 0x7f, 0x32);
const BACKGROUND: RGBColor = RGBColor(0x12, 0x12, 0x12);

const PALETTE: [RGBColor; 4] = [GOLD, SILVER, PLATINUM, BRONZE];

static FONT_READY: OnceLock<()> = OnceLock::new();

// ---------------------------------------------------------------------------
// Font
// ---------------------------------------------------------------------------

/// Load the TrueType font at `path` and register it for chart text.
///
/// Later calls are no-ops once a font is registered.
pub fn install_chart_font(path: &Path) -> Result<(), ReportError> {
    if FONT_READY.get().is_some() {
        return Ok(());
    }
    let data = std::fs::read(path)
        .map_err(|e| ReportError::Chart(format!("cannot read font {}: {e}", path.display())))?;
    // plotters keeps a reference to the font for the rest of the process.
    let bytes: &'static [u8] = Box::leak(data.into_boxed_slice());
    register_font(FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| ReportError::Chart(format!("invalid font {}", path.display())))?;
    let _ = FONT_READY.set(());
    tracing::info!(path = %path.display(), "Chart font registered");
    Ok(())
}

/// Whether [`install_chart_font`] has succeeded.
pub fn chart_font_installed() -> bool {
    FONT_READY.get().is_some()
}

fn ensure_font() -> Result<(), ReportError> {
    if chart_font_installed() {
        Ok(())
    } else {
        Err(ReportError::Chart("no chart font registered".to_string()))
    }
}

// ---------------------------------------------------------------------------
// Data preparation
// ---------------------------------------------------------------------------

/// One donut wedge.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub count: i64,
    pub percent: f64,
}

/// Turn movement counts into wedges, dropping empty types.
pub fn movement_slices(counts: &[MovementCount]) -> Vec<Slice> {
    let total: i64 = counts.iter().map(|c| c.count.max(0)).sum();
    if total == 0 {
        return Vec::new();
    }
    counts
        .iter()
        .filter(|c| c.count > 0)
        .map(|c| Slice {
            label: c.movement_type.label().to_string(),
            count: c.count,
            percent: c.count as f64 * 100.0 / total as f64,
        })
        .collect()
}

/// One bar of the price chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// Turn brand averages into at most [`MAX_PRICE_BARS`] bars, keeping input order.
pub fn price_bars(rows: &[BrandAveragePrice]) -> Vec<Bar> {
    rows.iter()
        .take(MAX_PRICE_BARS)
        .map(|row| Bar {
            label: row.brand_name.clone(),
            value: row.average_price.to_f64().unwrap_or_default(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Movement distribution donut as PNG, or `None` when there are no watches.
pub fn movement_chart_png(counts: &[MovementCount]) -> Result<Option<Vec<u8>>, ReportError> {
    let slices = movement_slices(counts);
    if slices.is_empty() {
        return Ok(None);
    }
    ensure_font()?;

    let (width, height) = MOVEMENT_CHART_SIZE;
    let mut buf = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        root.fill(&BACKGROUND).map_err(chart_error)?;
        let area = root
            .titled(
                "MOVEMENT DISTRIBUTION",
                (FONT_FAMILY, 22).into_font().color(&GOLD),
            )
            .map_err(chart_error)?;

        let (area_w, area_h) = area.dim_in_pixel();
        let center = (area_w as i32 / 2, area_h as i32 / 2);
        let radius = f64::from(area_w.min(area_h)) * 0.32;

        let sizes: Vec<f64> = slices.iter().map(|s| s.count as f64).collect();
        let colors: Vec<RGBColor> = (0..slices.len())
            .map(|i| PALETTE[i % PALETTE.len()])
            .collect();
        let labels: Vec<String> = slices
            .iter()
            .map(|s| format!("{} {:.1}%", s.label, s.percent))
            .collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(90.0);
        pie.label_style((FONT_FAMILY, 15).into_font().color(&GOLD));
        area.draw(&pie).map_err(chart_error)?;

        // Donut hole.
        area.draw(&Circle::new(
            center,
            (radius * 0.6) as i32,
            BACKGROUND.filled(),
        ))
        .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
    }
    encode_png(width, height, buf).map(Some)
}

/// Average price per brand bars as PNG, or `None` when no brand has watches.
pub fn price_chart_png(rows: &[BrandAveragePrice]) -> Result<Option<Vec<u8>>, ReportError> {
    let bars = price_bars(rows);
    if bars.is_empty() {
        return Ok(None);
    }
    ensure_font()?;

    let max = bars.iter().map(|b| b.value).fold(0.0, f64::max);
    let y_max = if max > 0.0 { max * 1.15 } else { 1.0 };
    let bar_count = bars.len() as u32;

    let (width, height) = PRICE_CHART_SIZE;
    let mut buf = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        root.fill(&BACKGROUND).map_err(chart_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "AVERAGE PRICE PER BRAND",
                (FONT_FAMILY, 20).into_font().color(&GOLD),
            )
            .margin(15)
            .x_label_area_size(35)
            .y_label_area_size(70)
            .build_cartesian_2d((0u32..bar_count).into_segmented(), 0f64..y_max)
            .map_err(chart_error)?;

        let brand_label = |value: &SegmentValue<u32>| match value {
            SegmentValue::CenterOf(i) => bars
                .get(*i as usize)
                .map(|b| b.label.clone())
                .unwrap_or_default(),
            _ => String::new(),
        };
        let price_label = |value: &f64| format!("{value:.0}");

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bars.len())
            .x_label_formatter(&brand_label)
            .y_label_formatter(&price_label)
            .y_desc("EUR")
            .label_style((FONT_FAMILY, 12).into_font().color(&SILVER))
            .axis_style(SILVER)
            .draw()
            .map_err(chart_error)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(GOLD.mix(0.8).filled())
                    .margin(12)
                    .data(bars.iter().enumerate().map(|(i, b)| (i as u32, b.value))),
            )
            .map_err(chart_error)?;

        let value_style = (FONT_FAMILY, 12)
            .into_font()
            .color(&SILVER)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart
            .draw_series(bars.iter().enumerate().map(|(i, b)| {
                Text::new(
                    format!("{:.0} EUR", b.value),
                    (SegmentValue::CenterOf(i as u32), b.value),
                    value_style.clone(),
                )
            }))
            .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
    }
    encode_png(width, height, buf).map(Some)
}

/// Encode a packed RGB8 buffer as PNG.
pub fn encode_png(width: u32, height: u32, rgb: Vec<u8>) -> Result<Vec<u8>, ReportError> {
    let image = image::RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| ReportError::Chart("pixel buffer does not match chart size".to_string()))?;
    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;
    Ok(png)
}

fn chart_error<E: std::fmt::Display>(err: E) -> ReportError {
    ReportError::Chart(err.to_string())
}
