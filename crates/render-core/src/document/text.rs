use super::Document;
use crate::types::{Align, DrawOp, FontRole};
use crate::utils::line_height_mm;
use nuzum_types::{Color, Palette};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphStyle {
    Title,
    Heading,
    Body,
    FooterSmall,
    Link,
}

impl ParagraphStyle {
    pub fn size(&self) -> f32 {
        match self {
            ParagraphStyle::Title => 18.0,
            ParagraphStyle::Heading => 13.0,
            ParagraphStyle::Body => 10.5,
            ParagraphStyle::FooterSmall => 8.0,
            ParagraphStyle::Link => 10.0,
        }
    }

    pub fn font(&self) -> FontRole {
        match self {
            ParagraphStyle::Title | ParagraphStyle::Heading => FontRole::Bold,
            _ => FontRole::Regular,
        }
    }

    pub fn color(&self, palette: &Palette) -> Color {
        match self {
            ParagraphStyle::Title | ParagraphStyle::Link => palette.primary.clone(),
            ParagraphStyle::FooterSmall => palette.muted.clone(),
            ParagraphStyle::Heading | ParagraphStyle::Body => palette.text.clone(),
        }
    }

    fn space_after(&self) -> f32 {
        match self {
            ParagraphStyle::Title => 5.0,
            ParagraphStyle::Heading => 3.5,
            ParagraphStyle::Body | ParagraphStyle::Link => 2.0,
            ParagraphStyle::FooterSmall => 1.0,
        }
    }
}

impl Document {
    /// Titles are centred; everything else follows the text's direction.
    pub fn paragraph(&mut self, text: &str, style: ParagraphStyle) {
        let align = match style {
            ParagraphStyle::Title => Align::Center,
            _ => self.natural_align(text),
        };
        self.paragraph_aligned(text, style, align);
    }

    pub fn paragraph_aligned(&mut self, text: &str, style: ParagraphStyle, align: Align) {
        let content = self.content_rect();
        let (size, font) = (style.size(), style.font());
        let color = style.color(self.palette());
        let line_height = line_height_mm(size);

        // keep a heading on the same page as the first lines under it
        if style == ParagraphStyle::Heading {
            self.ensure_space(line_height + 15.0);
        }

        for line in self.wrap(text, font, size, content.width) {
            self.ensure_space(line_height);
            let top = self.cursor_y;
            self.place_line(line, content.x, content.width, top, font, size, color.clone(), align);
            self.cursor_y += line_height;
        }

        if style == ParagraphStyle::Heading {
            let y = self.cursor_y + 0.5;
            let primary = self.palette().primary.clone();
            self.push(DrawOp::Line {
                from: (content.x, y),
                to: (content.right(), y),
                color: primary,
                width: 0.8,
            });
            self.cursor_y += 1.0;
        }
        self.cursor_y += style.space_after();
    }
}
