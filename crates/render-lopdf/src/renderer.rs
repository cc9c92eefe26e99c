use crate::metrics::helvetica_width_pt;
use crate::sanitize::sanitize_latin;
use crate::writer::StreamingPdfWriter;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, ObjectId, Stream, StringFormat, dictionary};
use nuzum_render_core::utils::flip_y;
use nuzum_render_core::{AdapterKind, DocumentRenderer, DrawOp, FontRole, RenderError, TextRun};
use nuzum_shaper::Shaped;
use nuzum_types::geometry::{mm_to_pt, pt_to_mm};
use nuzum_types::{Color, PageSetup, Rect};
use std::io::Cursor;

const REGULAR: &str = "F1";
const BOLD: &str = "F2";

struct PageState {
    width_mm: f32,
    height_mm: f32,
    content: Content,
    annotations: Vec<ObjectId>,
}

impl PageState {
    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn set_fill(&mut self, color: &Color) {
        let (r, g, b) = color.to_unit_rgb();
        self.op("rg", vec![r.into(), g.into(), b.into()]);
    }

    fn set_stroke(&mut self, color: &Color, width_pt: f32) {
        let (r, g, b) = color.to_unit_rgb();
        self.op("RG", vec![r.into(), g.into(), b.into()]);
        self.op("w", vec![width_pt.into()]);
    }

    /// `re` operands for a top-origin millimetre rectangle.
    fn rect(&self, rect: &Rect) -> Vec<Object> {
        vec![
            mm_to_pt(rect.x).into(),
            flip_y(rect.bottom(), self.height_mm).into(),
            mm_to_pt(rect.width).into(),
            mm_to_pt(rect.height).into(),
        ]
    }

    fn point(&self, (x, y): (f32, f32)) -> Vec<Object> {
        vec![mm_to_pt(x).into(), flip_y(y, self.height_mm).into()]
    }
}

/// PDF output with the standard Helvetica faces. Arabic is not drawn: every
/// string is sanitized to ASCII by [`DocumentRenderer::prepare_text`].
pub struct LatinPdfRenderer {
    writer: StreamingPdfWriter<Cursor<Vec<u8>>>,
    page: Option<PageState>,
    images: usize,
}

impl LatinPdfRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut fonts = Dictionary::new();
        for (name, base_font) in [(REGULAR, "Helvetica"), (BOLD, "Helvetica-Bold")] {
            let font = dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => base_font,
                "Encoding" => "WinAnsiEncoding",
            };
            fonts.set(name.as_bytes(), Object::Dictionary(font));
        }
        let mut writer = StreamingPdfWriter::new(Cursor::new(Vec::new()), "1.4", fonts)?;
        writer.set_info("Producer", "Nuzum");
        Ok(Self { writer, page: None, images: 0 })
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.writer.set_info("Title", &sanitize_latin(title));
        self
    }

    fn page(&mut self) -> Result<&mut PageState, RenderError> {
        self.page.as_mut().ok_or_else(|| RenderError::Other("draw outside of a page".into()))
    }

    fn draw_text(&mut self, run: &TextRun) -> Result<(), RenderError> {
        // prepare_text already sanitized; anything else is replaced, not escaped
        let bytes: Vec<u8> = run
            .text
            .as_str()
            .chars()
            .map(|c| if c.is_ascii() && !c.is_ascii_control() { c as u8 } else { b' ' })
            .collect();
        if bytes.iter().all(|b| *b == b' ') {
            return Ok(());
        }
        let font = if run.font == FontRole::Bold { BOLD } else { REGULAR };
        let page = self.page()?;
        let baseline = flip_y(run.baseline, page.height_mm);
        page.op("BT", vec![]);
        page.op("Tf", vec![Object::Name(font.as_bytes().to_vec()), run.size.into()]);
        page.set_fill(&run.color);
        page.op("Td", vec![mm_to_pt(run.x).into(), baseline.into()]);
        page.op("Tj", vec![Object::String(bytes, StringFormat::Literal)]);
        page.op("ET", vec![]);
        Ok(())
    }

    fn draw_image(&mut self, source: &str, data: &[u8], rect: &Rect) -> Result<(), RenderError> {
        let decoded = match image::load_from_memory(data) {
            Ok(decoded) => decoded.to_rgb8(),
            Err(e) => {
                log::debug!("Omitting undecodable image '{}': {}", source, e);
                return Ok(());
            }
        };
        let (width, height) = decoded.dimensions();
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            decoded.into_raw(),
        );
        self.images += 1;
        let name = format!("Im{}", self.images);
        self.writer.add_xobject(&name, stream);

        let page = self.page()?;
        let origin = page.point((rect.x, rect.bottom()));
        page.op("q", vec![]);
        let mut matrix: Vec<Object> = vec![mm_to_pt(rect.width).into(), 0.into(), 0.into(), mm_to_pt(rect.height).into()];
        matrix.extend(origin);
        page.op("cm", matrix);
        page.op("Do", vec![Object::Name(name.into_bytes())]);
        page.op("Q", vec![]);
        Ok(())
    }

    fn add_link(&mut self, rect: &Rect, uri: &str) -> Result<(), RenderError> {
        let height_mm = self.page()?.height_mm;
        let bottom = flip_y(rect.bottom(), height_mm);
        let annotation = dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => vec![
                mm_to_pt(rect.x).into(),
                bottom.into(),
                mm_to_pt(rect.right()).into(),
                (bottom + mm_to_pt(rect.height)).into(),
            ],
            "Border" => vec![0.into(), 0.into(), 0.into()],
            "A" => dictionary! {
                "S" => "URI",
                "URI" => Object::String(uri.as_bytes().to_vec(), StringFormat::Literal),
            },
        };
        let id = self.writer.buffer_object(annotation.into());
        self.page()?.annotations.push(id);
        Ok(())
    }
}

impl DocumentRenderer for LatinPdfRenderer {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Latin
    }

    fn font_name(&self) -> String {
        "Helvetica".to_string()
    }

    fn supports_arabic(&self) -> bool {
        false
    }

    fn prepare_text(&self, logical: &str) -> Shaped {
        Shaped::verbatim(sanitize_latin(logical))
    }

    fn text_width(&self, text: &Shaped, font: FontRole, size_pt: f32) -> f32 {
        pt_to_mm(helvetica_width_pt(text.as_str(), font == FontRole::Bold, size_pt))
    }

    fn begin_page(&mut self, setup: &PageSetup) -> Result<(), RenderError> {
        if self.page.is_some() {
            return Err(RenderError::Other("begin_page called twice without end_page".into()));
        }
        let size = setup.dimensions_mm();
        self.page = Some(PageState {
            width_mm: size.width,
            height_mm: size.height,
            content: Content { operations: Vec::new() },
            annotations: Vec::new(),
        });
        Ok(())
    }

    fn draw(&mut self, op: &DrawOp) -> Result<(), RenderError> {
        match op {
            DrawOp::Text(run) => self.draw_text(run)?,
            DrawOp::FillRect { rect, color } => {
                let page = self.page()?;
                page.set_fill(color);
                let operands = page.rect(rect);
                page.op("re", operands);
                page.op("f", vec![]);
            }
            DrawOp::StrokeRect { rect, color, width } => {
                let page = self.page()?;
                page.set_stroke(color, *width);
                let operands = page.rect(rect);
                page.op("re", operands);
                page.op("S", vec![]);
            }
            DrawOp::Line { from, to, color, width } => {
                let page = self.page()?;
                page.set_stroke(color, *width);
                let (start, end) = (page.point(*from), page.point(*to));
                page.op("m", start);
                page.op("l", end);
                page.op("S", vec![]);
            }
            DrawOp::Polyline { points, color, width } => {
                let Some((first, rest)) = points.split_first() else {
                    return Ok(());
                };
                let page = self.page()?;
                page.set_stroke(color, *width);
                page.op("J", vec![1.into()]);
                page.op("j", vec![1.into()]);
                let start = page.point(*first);
                page.op("m", start);
                for point in rest {
                    let operands = page.point(*point);
                    page.op("l", operands);
                }
                page.op("S", vec![]);
                page.op("J", vec![0.into()]);
                page.op("j", vec![0.into()]);
            }
            DrawOp::Image { source, data, rect } => self.draw_image(source, data, rect)?,
            DrawOp::Link { rect, uri } => self.add_link(rect, uri)?,
        }
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), RenderError> {
        let page = self
            .page
            .take()
            .ok_or_else(|| RenderError::Other("end_page without begin_page".into()))?;
        let content_id = self.writer.buffer_content_stream(page.content)?;

        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.writer.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), mm_to_pt(page.width_mm).into(), mm_to_pt(page.height_mm).into()],
            "Contents" => content_id,
            "Resources" => self.writer.resources_id,
        };
        if !page.annotations.is_empty() {
            page_dict.set(
                "Annots",
                Object::Array(page.annotations.into_iter().map(Object::Reference).collect()),
            );
        }
        let page_id = self.writer.buffer_object(page_dict.into());
        self.writer.push_page(page_id);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError> {
        let renderer = *self;
        if renderer.page.is_some() {
            return Err(RenderError::Other("finish called with an open page".into()));
        }
        log::debug!("Latin PDF finished with {} page(s)", renderer.writer.page_count());
        Ok(renderer.writer.finish()?.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nuzum_render_core::{Cell, ColumnSpec, Document, FooterInfo, ParagraphStyle, TableRow, TableSpec};
    use nuzum_traits::InMemoryResourceProvider;
    use std::sync::Arc;

    fn tiny_png() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(2, 2, image::Rgb([41, 128, 185]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle.as_bytes())
    }

    #[test]
    fn renders_searchable_sanitized_text() {
        let _ = env_logger::builder().is_test(true).try_init();
        let renderer = LatinPdfRenderer::new().unwrap();
        let mut doc = Document::new(
            Box::new(renderer),
            PageSetup::default(),
            Arc::new(InMemoryResourceProvider::new()),
        );
        doc.footer(FooterInfo::new("SAL-7-2025-01", "2025-01-20 12:00"));
        doc.paragraph("Net Salary: 6300 SAR", ParagraphStyle::Body);
        doc.paragraph("الراتب (Salary)", ParagraphStyle::Heading);
        let bytes = doc.finish().unwrap();

        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(contains(&bytes, "(Net Salary: 6300 SAR) Tj") || contains(&bytes, "(Net Salary: 6300 SAR)Tj"));
        assert!(contains(&bytes, "(Salary)"));
        assert!(contains(&bytes, "SAL-7-2025-01 | 2025-01-20 12:00 | Helvetica | 1/1"));
        assert!(!contains(&bytes, "\u{FFFD}"));

        let parsed = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 1);
    }

    #[test]
    fn images_links_and_checks_survive() {
        let resources = InMemoryResourceProvider::new();
        resources.add("images/logo.png", tiny_png()).unwrap();
        resources.add("broken.png", b"not an image".to_vec()).unwrap();

        let mut doc = Document::new(
            Box::new(LatinPdfRenderer::new().unwrap()),
            PageSetup::default(),
            Arc::new(resources),
        );
        assert!(doc.image("images/logo.png", 20.0, 20.0, nuzum_render_core::Align::Left));
        assert!(doc.image("broken.png", 20.0, 20.0, nuzum_render_core::Align::Left));
        doc.link_button("Open form", "https://forms.example/1");
        let mut table = TableSpec::new(vec![ColumnSpec::new(3.0), ColumnSpec::centered(1.0)]);
        table.push(TableRow::new(vec![Cell::text("Spare tire"), Cell::Check(true)]));
        doc.rtl_table(&table);
        let bytes = doc.finish().unwrap();

        let parsed = lopdf::Document::load_mem(&bytes).unwrap();
        let (_, page_id) = parsed.get_pages().into_iter().next().unwrap();
        let page = parsed.get_dictionary(page_id).unwrap();
        assert!(page.get(b"Annots").is_ok());
        assert!(contains(&bytes, "/Im1"));
        assert!(!contains(&bytes, "/Im2"));
        assert!(contains(&bytes, "https://forms.example/1"));
    }

    #[test]
    fn long_tables_paginate() {
        let mut doc = Document::new(
            Box::new(LatinPdfRenderer::new().unwrap()),
            PageSetup::default(),
            Arc::new(InMemoryResourceProvider::new()),
        );
        let mut table = TableSpec::new(vec![ColumnSpec::new(1.0)]).header(["Name"]);
        for i in 0..120 {
            table.push(TableRow::new(vec![Cell::text(format!("Employee {}", i))]));
        }
        doc.rtl_table(&table);
        let bytes = doc.finish().unwrap();
        let parsed = lopdf::Document::load_mem(&bytes).unwrap();
        assert!(parsed.get_pages().len() >= 3);
    }
}
