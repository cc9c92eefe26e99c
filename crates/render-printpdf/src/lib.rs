//! The preferred PDF adapter: printpdf with the registry's Arabic face
//! embedded and subset on save.

mod links;
mod renderer;

pub use renderer::EmbeddedPdfRenderer;
