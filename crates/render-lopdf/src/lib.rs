//! The Latin fallback PDF adapter.
//!
//! Draws with the standard Type1 Helvetica faces, so it needs no font files
//! and cannot fail for lack of one. Text that Helvetica cannot show is
//! reduced to ASCII by [`sanitize_latin`] before it is measured or drawn.

mod metrics;
mod minimal;
mod renderer;
mod sanitize;
mod writer;

pub use metrics::helvetica_width_pt;
pub use minimal::minimal_error_pdf;
pub use renderer::LatinPdfRenderer;
pub use sanitize::{ascii_extract, sanitize_latin};
pub use writer::StreamingPdfWriter;
