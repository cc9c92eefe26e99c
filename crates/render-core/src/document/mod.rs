//! Flow layout over a [`DocumentRenderer`].
//!
//! A [`Document`] keeps a cursor on the current page and appends draw
//! operations to per-page display lists. Nothing reaches the adapter until
//! [`Document::finish`], which is when the page total is known and every
//! page's footer can say "page x of y".

mod blocks;
mod footer;
mod table;
mod text;

pub use blocks::{Badge, HeaderSpec};
pub use footer::FooterInfo;
pub use table::{Cell, ColumnSpec, RowStyle, TableRow, TableSpec};
pub use text::ParagraphStyle;

use crate::error::RenderError;
use crate::traits::DocumentRenderer;
use crate::types::{AdapterKind, Align, DrawOp, FontRole, TextRun};
use crate::utils::baseline_offset_mm;
use nuzum_shaper::Shaped;
use nuzum_traits::{ResourceProvider, SharedResourceData};
use nuzum_types::{Color, PageSetup, Palette, Rect};
use std::sync::Arc;

pub struct Document {
    renderer: Box<dyn DocumentRenderer>,
    setup: PageSetup,
    palette: Palette,
    resources: Arc<dyn ResourceProvider>,
    pages: Vec<Vec<DrawOp>>,
    cursor_y: f32,
    footer: Option<FooterInfo>,
}

impl Document {
    pub fn new(
        renderer: Box<dyn DocumentRenderer>,
        setup: PageSetup,
        resources: Arc<dyn ResourceProvider>,
    ) -> Self {
        Self {
            renderer,
            cursor_y: setup.margins.top,
            setup,
            palette: Palette::NUZUM,
            resources,
            pages: vec![Vec::new()],
            footer: None,
        }
    }

    pub fn kind(&self) -> AdapterKind {
        self.renderer.kind()
    }

    pub fn font_name(&self) -> String {
        self.renderer.font_name()
    }

    pub fn supports_arabic(&self) -> bool {
        self.renderer.supports_arabic()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn content_rect(&self) -> Rect {
        self.setup.content_rect()
    }

    pub fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    /// Vertical space left on the current page.
    pub fn remaining(&self) -> f32 {
        self.content_rect().bottom() - self.cursor_y
    }

    pub fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor_y = self.setup.margins.top;
    }

    /// Starts a new page unless `height` fits. Returns whether it broke.
    /// A block taller than a whole page is placed at the top and overflows.
    pub fn ensure_space(&mut self, height: f32) -> bool {
        let at_top = self.cursor_y <= self.setup.margins.top + f32::EPSILON;
        if height > self.remaining() && !at_top {
            self.new_page();
            true
        } else {
            false
        }
    }

    pub fn spacer(&mut self, height: f32) {
        self.cursor_y += height;
    }

    /// Draws `text` once per page at the bottom margin, with the page
    /// number, document id, timestamp and font name.
    pub fn footer(&mut self, info: FooterInfo) {
        self.footer = Some(info);
    }

    /// Lays out the footers and hands every page to the adapter.
    pub fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        let pages = std::mem::take(&mut self.pages);
        let total = pages.len();
        let footer = self.footer.take();

        for (index, mut ops) in pages.into_iter().enumerate() {
            if let Some(info) = &footer {
                ops.extend(self.footer_ops(info, index + 1, total));
            }
            self.renderer.begin_page(&self.setup)?;
            for op in &ops {
                self.renderer.draw(op)?;
            }
            self.renderer.end_page()?;
        }
        log::debug!("Rendered {} page(s) with the {} adapter", total, self.renderer.kind());
        self.renderer.finish()
    }

    pub(crate) fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.push(op);
        }
    }

    pub(crate) fn prepare(&self, logical: &str) -> Shaped {
        self.renderer.prepare_text(logical)
    }

    pub(crate) fn measure(&self, logical: &str, font: FontRole, size: f32) -> f32 {
        self.renderer.text_width(&self.prepare(logical), font, size)
    }

    /// Right for Arabic text on adapters that draw Arabic, left otherwise.
    pub(crate) fn natural_align(&self, logical: &str) -> Align {
        if self.supports_arabic() && nuzum_shaper::is_rtl_dominant(logical) {
            Align::Right
        } else {
            Align::Left
        }
    }

    /// Positions one prepared line inside the box `[left, left + width]`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn place_line(
        &mut self,
        line: Shaped,
        left: f32,
        width: f32,
        top: f32,
        font: FontRole,
        size: f32,
        color: Color,
        align: Align,
    ) {
        if line.is_empty() {
            return;
        }
        let advance = self.renderer.text_width(&line, font, size);
        let x = match align {
            Align::Left => left,
            Align::Right => left + width - advance,
            Align::Center => left + (width - advance) / 2.0,
        };
        self.push(DrawOp::Text(TextRun {
            x,
            baseline: top + baseline_offset_mm(size),
            text: line,
            font,
            size,
            color,
        }));
    }

    /// Wraps logical text to `max_width`, then prepares each line once.
    pub(crate) fn wrap(&self, text: &str, font: FontRole, size: f32, max_width: f32) -> Vec<Shaped> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let mut current = String::new();
            for word in paragraph.split_whitespace() {
                let candidate = if current.is_empty() {
                    word.to_string()
                } else {
                    format!("{} {}", current, word)
                };
                if self.measure(&candidate, font, size) <= max_width {
                    current = candidate;
                    continue;
                }
                if !current.is_empty() {
                    lines.push(self.prepare(&current));
                }
                let mut pieces = self.break_word(word, font, size, max_width);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces.iter().map(|p| self.prepare(p)));
            }
            lines.push(self.prepare(&current));
        }
        lines
    }

    fn break_word(&self, word: &str, font: FontRole, size: f32, max_width: f32) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut current = String::new();
        for ch in word.chars() {
            current.push(ch);
            if current.chars().count() > 1 && self.measure(&current, font, size) > max_width {
                current.pop();
                pieces.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
        pieces.push(current);
        pieces
    }

    /// Loads an asset; a missing or unreadable one is logged and skipped.
    pub(crate) fn load_asset(&self, path: &str) -> Option<SharedResourceData> {
        match self.resources.load(path) {
            Ok(data) => Some(data),
            Err(e) => {
                log::debug!("Omitting asset '{}': {}", path, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingRenderer;
    use nuzum_traits::InMemoryResourceProvider;

    fn document(arabic: bool) -> (Document, crate::recording::RecordedPages) {
        let (renderer, pages) = RecordingRenderer::new(arabic);
        let doc = Document::new(
            Box::new(renderer),
            PageSetup::default(),
            Arc::new(InMemoryResourceProvider::new()),
        );
        (doc, pages)
    }

    #[test]
    fn wrap_respects_width_and_keeps_words() {
        let (doc, _) = document(false);
        let lines = doc.wrap("alpha beta gamma delta epsilon", FontRole::Regular, 10.0, 20.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(doc.renderer.text_width(line, FontRole::Regular, 10.0) <= 20.0 + 1e-3);
        }
        let joined: Vec<String> = lines.iter().map(|l| l.as_str().to_string()).collect();
        assert_eq!(joined.join(" "), "alpha beta gamma delta epsilon");
    }

    #[test]
    fn wrap_breaks_overlong_words() {
        let (doc, _) = document(false);
        let lines = doc.wrap("SA0380000000608010167519", FontRole::Regular, 10.0, 15.0);
        assert!(lines.len() > 1);
        let joined: String = lines.iter().map(|l| l.as_str()).collect();
        assert_eq!(joined, "SA0380000000608010167519");
    }

    #[test]
    fn wrap_keeps_explicit_line_breaks() {
        let (doc, _) = document(false);
        let lines = doc.wrap("one\n\ntwo", FontRole::Regular, 10.0, 100.0);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].is_empty());
    }

    #[test]
    fn arabic_lines_are_shaped_once() {
        let (doc, _) = document(true);
        let lines = doc.wrap("سيارة", FontRole::Regular, 10.0, 100.0);
        assert_eq!(lines[0], nuzum_shaper::shape("سيارة"));
    }

    #[test]
    fn ensure_space_breaks_only_below_the_top() {
        let (mut doc, _) = document(false);
        assert!(!doc.ensure_space(1000.0));
        assert_eq!(doc.page_count(), 1);
        doc.spacer(200.0);
        assert!(doc.ensure_space(200.0));
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn footer_is_drawn_on_every_page_with_totals() {
        let (mut doc, pages) = document(false);
        doc.footer(FooterInfo::new("HND-000001", "2025-01-20 12:00"));
        doc.paragraph("first", ParagraphStyle::Body);
        doc.new_page();
        doc.paragraph("second", ParagraphStyle::Body);
        doc.finish().unwrap();

        let texts = pages.page_texts();
        assert_eq!(texts.len(), 2);
        assert!(texts[0].iter().any(|t| t.contains("HND-000001") && t.contains("1/2")));
        assert!(texts[1].iter().any(|t| t.contains("2/2") && t.contains("Recording")));
    }
}
