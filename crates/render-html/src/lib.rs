//! HTML output for reports that a browser engine lays out.
//!
//! Templates are handlebars files with `dir="rtl"` and embedded CSS; the
//! browser shapes Arabic itself, so text is passed through in logical
//! order. Turning HTML into PDF is delegated to an [`HtmlToPdf`]
//! converter supplied by the caller. Without one, [`html_to_pdf`] reports
//! the adapter as unavailable and the caller moves on.

mod converter;
mod engine;

pub use converter::{HtmlToPdf, html_to_pdf};
pub use engine::{HANDOVER_TEMPLATE, HtmlReport};
