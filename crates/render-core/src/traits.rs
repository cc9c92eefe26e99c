use crate::error::RenderError;
use crate::types::{AdapterKind, DrawOp, FontRole};
use nuzum_shaper::Shaped;
use nuzum_types::PageSetup;

/// A backend that turns laid-out pages into document bytes.
///
/// Layout happens in [`crate::Document`]; an adapter only measures text and
/// paints what it is given, one `begin_page`/`draw`/`end_page` sequence per page. Adapters that cannot draw Arabic decide here what
/// becomes of it: [`DocumentRenderer::prepare_text`] is the single place a
/// logical string turns into drawable text.
pub trait DocumentRenderer {
    fn kind(&self) -> AdapterKind;

    /// The font actually used for body text, as printed in footers.
    fn font_name(&self) -> String;

    fn supports_arabic(&self) -> bool;

    /// Converts one logical line into what this adapter draws: shaped and
    /// reordered for Arabic-capable adapters, sanitized to Latin otherwise.
    fn prepare_text(&self, logical: &str) -> Shaped;

    /// Advance width of `text` in millimetres.
    fn text_width(&self, text: &Shaped, font: FontRole, size_pt: f32) -> f32;

    fn begin_page(&mut self, setup: &PageSetup) -> Result<(), RenderError>;

    fn draw(&mut self, op: &DrawOp) -> Result<(), RenderError>;

    fn end_page(&mut self) -> Result<(), RenderError>;

    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError>;
}
