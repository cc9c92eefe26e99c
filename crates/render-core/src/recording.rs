//! An adapter that keeps the display lists instead of painting them.
//!
//! Template tests use it to assert on layout (which texts were drawn, how
//! many check marks, which images) without parsing a PDF.

use crate::error::RenderError;
use crate::traits::DocumentRenderer;
use crate::types::{AdapterKind, DrawOp, FontRole, TextRun};
use nuzum_shaper::Shaped;
use nuzum_types::PageSetup;
use nuzum_types::geometry::pt_to_mm;
use std::sync::{Arc, Mutex, MutexGuard};

type Pages = Arc<Mutex<Vec<Vec<DrawOp>>>>;

fn lock(pages: &Pages) -> MutexGuard<'_, Vec<Vec<DrawOp>>> {
    pages.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug)]
pub struct RecordingRenderer {
    arabic: bool,
    pages: Pages,
}

impl RecordingRenderer {
    /// With `arabic`, text is shaped like the embedded-font adapter does;
    /// without, it is kept verbatim.
    pub fn new(arabic: bool) -> (Self, RecordedPages) {
        let pages = Pages::default();
        (Self { arabic, pages: Arc::clone(&pages) }, RecordedPages { pages })
    }
}

impl DocumentRenderer for RecordingRenderer {
    fn kind(&self) -> AdapterKind {
        if self.arabic { AdapterKind::Embedded } else { AdapterKind::Latin }
    }

    fn font_name(&self) -> String {
        "Recording".to_string()
    }

    fn supports_arabic(&self) -> bool {
        self.arabic
    }

    fn prepare_text(&self, logical: &str) -> Shaped {
        if self.arabic {
            nuzum_shaper::shape(logical)
        } else {
            Shaped::verbatim(logical)
        }
    }

    /// Half an em per character.
    fn text_width(&self, text: &Shaped, font: FontRole, size_pt: f32) -> f32 {
        let factor = if font == FontRole::Bold { 0.55 } else { 0.5 };
        pt_to_mm(text.as_str().chars().count() as f32 * size_pt * factor)
    }

    fn begin_page(&mut self, _setup: &PageSetup) -> Result<(), RenderError> {
        lock(&self.pages).push(Vec::new());
        Ok(())
    }

    fn draw(&mut self, op: &DrawOp) -> Result<(), RenderError> {
        match lock(&self.pages).last_mut() {
            Some(page) => {
                page.push(op.clone());
                Ok(())
            }
            None => Err(RenderError::Other("draw outside of a page".into())),
        }
    }

    fn end_page(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError> {
        Ok(Vec::new())
    }
}

/// Read side of a [`RecordingRenderer`], valid after the document finishes.
#[derive(Debug, Clone)]
pub struct RecordedPages {
    pages: Pages,
}

impl RecordedPages {
    pub fn pages(&self) -> Vec<Vec<DrawOp>> {
        lock(&self.pages).clone()
    }

    /// Every operation of every page, in drawing order.
    pub fn ops(&self) -> Vec<DrawOp> {
        lock(&self.pages).iter().flatten().cloned().collect()
    }

    pub fn text_runs(&self) -> Vec<TextRun> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                DrawOp::Text(run) => Some(run),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.text_runs().into_iter().map(|run| run.text.into_string()).collect()
    }

    pub fn page_texts(&self) -> Vec<Vec<String>> {
        lock(&self.pages)
            .iter()
            .map(|page| page.iter().filter_map(DrawOp::text).map(str::to_string).collect())
            .collect()
    }
}
