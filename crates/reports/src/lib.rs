//! Document and chart rendering for the horology catalog.
//!
//! Every generator is pure and synchronous: it takes already-loaded rows
//! and returns the bytes of one in-memory file.
//!
//! - [`certificate`], [`catalog`], [`wishlist`], [`comparison`] lay out PDF
//!   pages as [`document::Page`] draw lists, rendered by [`document::render`].
//! - [`charts`] draws PNG charts with plotters.

pub mod catalog;
pub mod certificate;
pub mod charts;
pub mod comparison;
pub mod document;
pub mod layout;
pub mod wishlist;

#[cfg(test)]
mod test_support;

/// Errors produced while building a report or chart.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("No watches selected")]
    EmptySelection,

    #[error("Too many watches to compare: at most {max}, got {got}")]
    TooManyWatches { max: usize, got: usize },

    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("Chart rendering failed: {0}")]
    Chart(String),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}
