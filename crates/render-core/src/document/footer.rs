use super::Document;
use crate::types::{DrawOp, FontRole, TextRun};
use crate::utils::{baseline_offset_mm, line_height_mm};
use nuzum_types::Color;

const FOOTER_SIZE: f32 = 7.5;

/// What every page's footer prints, besides the page number and font.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FooterInfo {
    pub document_id: String,
    pub timestamp: String,
    /// Line above the audit line, e.g. the issuing system's name.
    pub caption: Option<String>,
    /// Shown in the warning colour, e.g. "Net salary recomputed".
    pub notes: Vec<String>,
}

impl FooterInfo {
    pub fn new(document_id: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            timestamp: timestamp.into(),
            ..Default::default()
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl Document {
    pub(super) fn footer_ops(&self, info: &FooterInfo, page: usize, total: usize) -> Vec<DrawOp> {
        let content = self.content_rect();
        let line_height = line_height_mm(FOOTER_SIZE);
        let mut top = content.bottom() + 2.0;
        let muted = self.palette().muted.clone();

        let mut ops = vec![DrawOp::Line {
            from: (content.x, top),
            to: (content.right(), top),
            color: muted.clone(),
            width: 0.4,
        }];
        top += 1.0;

        let audit = format!(
            "{} | {} | {} | {}/{}",
            info.document_id,
            info.timestamp,
            self.font_name(),
            page,
            total
        );
        let mut lines: Vec<(String, Color)> = Vec::new();
        if let Some(caption) = &info.caption {
            lines.push((caption.clone(), muted.clone()));
        }
        lines.push((audit, muted));
        if !info.notes.is_empty() {
            lines.push((info.notes.join(" - "), self.palette().warning.clone()));
        }

        for (text, color) in lines {
            let shaped = self.prepare(&text);
            if shaped.is_empty() {
                continue;
            }
            let advance = self.renderer.text_width(&shaped, FontRole::Regular, FOOTER_SIZE);
            let x = content.x + (content.width - advance) / 2.0;
            ops.push(DrawOp::Text(TextRun {
                x,
                baseline: top + baseline_offset_mm(FOOTER_SIZE),
                text: shaped,
                font: FontRole::Regular,
                size: FOOTER_SIZE,
                color,
            }));
            top += line_height;
        }
        ops
    }
}
