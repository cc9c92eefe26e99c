use super::Document;
use crate::types::{Align, DrawOp, FontRole};
use crate::utils::line_height_mm;
use nuzum_types::{Color, Rect};

const TITLE_SIZE: f32 = 17.0;
const SUBTITLE_SIZE: f32 = 10.5;
const BADGE_SIZE: f32 = 10.0;

/// A small filled label inside the header band.
#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub text: String,
    pub fill: Color,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderSpec {
    pub title: String,
    pub subtitle: Option<String>,
    /// Asset path of the logo; omitted when it cannot be loaded.
    pub logo: Option<String>,
    pub badge: Option<Badge>,
}

impl HeaderSpec {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Default::default() }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn logo(mut self, path: impl Into<String>) -> Self {
        self.logo = Some(path.into());
        self
    }

    pub fn badge(mut self, text: impl Into<String>, fill: Color) -> Self {
        self.badge = Some(Badge { text: text.into(), fill });
        self
    }
}

impl Document {
    /// The coloured band at the top of the first page.
    pub fn header(&mut self, spec: &HeaderSpec) {
        let content = self.content_rect();
        let inset = 4.0;
        let title_lines = self.wrap(&spec.title, FontRole::Bold, TITLE_SIZE, content.width - 2.0 * inset - 40.0);
        let subtitle_lines = spec
            .subtitle
            .as_deref()
            .map(|s| self.wrap(s, FontRole::Regular, SUBTITLE_SIZE, content.width - 2.0 * inset))
            .unwrap_or_default();

        let height = 2.0 * inset
            + title_lines.len() as f32 * line_height_mm(TITLE_SIZE)
            + subtitle_lines.len() as f32 * line_height_mm(SUBTITLE_SIZE);
        let height = height.max(20.0);
        self.ensure_space(height);
        let top = self.cursor_y;
        let band = Rect::new(content.x, top, content.width, height);
        let primary = self.palette().primary.clone();
        self.push(DrawOp::FillRect { rect: band, color: primary });

        let mut left = band.x + inset;
        if let Some(path) = spec.logo.as_deref()
            && let Some(data) = self.load_asset(path)
        {
            let side = height - 2.0 * inset;
            self.push(DrawOp::Image {
                source: path.to_string(),
                data,
                rect: Rect::new(left, top + inset, side, side),
            });
            left += side + inset;
        }

        if let Some(badge) = &spec.badge {
            let label = self.prepare(&badge.text);
            let width = self.text_width(&label, FontRole::Bold, BADGE_SIZE) + 6.0;
            let box_height = line_height_mm(BADGE_SIZE) + 2.0;
            let rect = Rect::new(left, top + (height - box_height) / 2.0, width, box_height);
            self.push(DrawOp::FillRect { rect, color: badge.fill.clone() });
            self.place_line(label, rect.x, rect.width, rect.y + 1.0, FontRole::Bold, BADGE_SIZE, Color::WHITE, Align::Center);
        }

        let block = title_lines.len() as f32 * line_height_mm(TITLE_SIZE)
            + subtitle_lines.len() as f32 * line_height_mm(SUBTITLE_SIZE);
        let mut y = top + (height - block) / 2.0;
        for line in title_lines {
            self.place_line(line, band.x, band.width, y, FontRole::Bold, TITLE_SIZE, Color::WHITE, Align::Center);
            y += line_height_mm(TITLE_SIZE);
        }
        for line in subtitle_lines {
            self.place_line(line, band.x, band.width, y, FontRole::Regular, SUBTITLE_SIZE, Color::WHITE, Align::Center);
            y += line_height_mm(SUBTITLE_SIZE);
        }
        self.cursor_y = top + height + 6.0;
    }

    /// A full-width coloured notice.
    pub fn banner(&mut self, text: &str, fill: Color) {
        let content = self.content_rect();
        let size = 11.0;
        let lines = self.wrap(text, FontRole::Bold, size, content.width - 8.0);
        let height = lines.len() as f32 * line_height_mm(size) + 4.0;
        self.ensure_space(height);
        let top = self.cursor_y;
        self.push(DrawOp::FillRect { rect: Rect::new(content.x, top, content.width, height), color: fill });
        let mut y = top + 2.0;
        for line in lines {
            self.place_line(line, content.x, content.width, y, FontRole::Bold, size, Color::WHITE, Align::Center);
            y += line_height_mm(size);
        }
        self.cursor_y = top + height + 4.0;
    }

    /// A full-width band of colour, e.g. an accent under a header.
    pub fn color_strip(&mut self, height: f32, color: Color) {
        let content = self.content_rect();
        self.ensure_space(height);
        self.push(DrawOp::FillRect { rect: Rect::new(content.x, self.cursor_y, content.width, height), color });
        self.cursor_y += height + 3.0;
    }

    /// A centred button that opens `uri` when clicked.
    pub fn link_button(&mut self, label: &str, uri: &str) {
        let content = self.content_rect();
        let size = 11.0;
        let shaped = self.prepare(label);
        let width = (self.text_width(&shaped, FontRole::Bold, size) + 20.0).min(content.width);
        let height = line_height_mm(size) + 4.0;
        self.ensure_space(height);
        let rect = Rect::new(content.x + (content.width - width) / 2.0, self.cursor_y, width, height);
        let primary = self.palette().primary.clone();
        self.push(DrawOp::FillRect { rect, color: primary });
        self.place_line(shaped, rect.x, rect.width, rect.y + 2.0, FontRole::Bold, size, Color::WHITE, Align::Center);
        self.push(DrawOp::Link { rect, uri: uri.to_string() });
        self.cursor_y = rect.bottom() + 4.0;
    }

    /// Draws the image at `path` if it loads. Returns whether it was drawn.
    pub fn image(&mut self, path: &str, width: f32, height: f32, align: Align) -> bool {
        let Some(data) = self.load_asset(path) else {
            return false;
        };
        let content = self.content_rect();
        let width = width.min(content.width);
        self.ensure_space(height);
        let x = match align {
            Align::Left => content.x,
            Align::Right => content.right() - width,
            Align::Center => content.x + (content.width - width) / 2.0,
        };
        self.push(DrawOp::Image {
            source: path.to_string(),
            data,
            rect: Rect::new(x, self.cursor_y, width, height),
        });
        self.cursor_y += height + 3.0;
        true
    }

    /// Side-by-side captioned frames, first slot rightmost. A slot whose
    /// image is missing keeps its caption and an empty frame.
    pub fn captioned_images(&mut self, slots: &[(String, Option<String>)], height: f32) {
        if slots.is_empty() {
            return;
        }
        let content = self.content_rect();
        let size = 10.0;
        let caption_height = line_height_mm(size) + 1.0;
        let slot_width = content.width / slots.len() as f32;
        self.ensure_space(caption_height + height);
        let top = self.cursor_y;
        let border = self.palette().muted.clone();
        let text = self.palette().text.clone();

        for (index, (caption, path)) in slots.iter().enumerate() {
            let x = content.right() - (index + 1) as f32 * slot_width;
            let caption = self.prepare(caption);
            self.place_line(caption, x, slot_width, top, FontRole::Bold, size, text.clone(), Align::Center);

            let frame = Rect::new(x + 3.0, top + caption_height, slot_width - 6.0, height);
            self.push(DrawOp::StrokeRect { rect: frame, color: border.clone(), width: 0.5 });
            if let Some(path) = path.as_deref()
                && let Some(data) = self.load_asset(path)
            {
                let inner = Rect::new(frame.x + 1.0, frame.y + 1.0, frame.width - 2.0, frame.height - 2.0);
                self.push(DrawOp::Image { source: path.to_string(), data, rect: inner });
            }
        }
        self.cursor_y = top + caption_height + height + 4.0;
    }

    fn text_width(&self, text: &nuzum_shaper::Shaped, font: FontRole, size: f32) -> f32 {
        self.renderer.text_width(text, font, size)
    }
}
