use crate::links::{PendingLink, add_link_annotations};
use nuzum_fonts::{FontRegistry, FontSet};
use nuzum_render_core::utils::flip_y;
use nuzum_render_core::{AdapterKind, DocumentRenderer, DrawOp, FontRole, RenderError, TextRun};
use nuzum_shaper::Shaped;
use nuzum_types::geometry::{mm_to_pt, pt_to_mm};
use nuzum_types::{Color, PageSetup, Rect};
use printpdf::font::ParsedFont;
use printpdf::graphics::{Line, LinePoint, PaintMode, Point, Polygon, PolygonRing, WindingOrder};
use printpdf::matrix::TextMatrix;
use printpdf::ops::Op;
use printpdf::text::TextItem;
use printpdf::xobject::{XObject, XObjectTransform};
use printpdf::{FontId, Mm, PdfDocument, PdfPage, PdfSaveOptions, Pt, Rgb, XObjectId};
use std::collections::HashMap;
use std::sync::Arc;

struct PageOps {
    width_mm: f32,
    height_mm: f32,
    ops: Vec<Op>,
}

impl PageOps {
    fn point(&self, (x, y): (f32, f32)) -> LinePoint {
        LinePoint {
            p: Point { x: Pt(mm_to_pt(x)), y: Pt(flip_y(y, self.height_mm)) },
            bezier: false,
        }
    }

    fn rect_ring(&self, rect: &Rect) -> PolygonRing {
        PolygonRing {
            points: vec![
                self.point((rect.x, rect.y)),
                self.point((rect.right(), rect.y)),
                self.point((rect.right(), rect.bottom())),
                self.point((rect.x, rect.bottom())),
            ],
        }
    }

    fn outline(&mut self, color: &Color, width_pt: f32) {
        self.ops.push(Op::SetOutlineColor { col: pdf_color(color) });
        self.ops.push(Op::SetOutlineThickness { pt: Pt(width_pt) });
    }
}

fn pdf_color(color: &Color) -> printpdf::color::Color {
    let (r, g, b) = color.to_unit_rgb();
    printpdf::color::Color::Rgb(Rgb::new(r, g, b, None))
}

/// PDF output through printpdf with the selected TrueType faces embedded.
/// Text arrives shaped and in visual order; glyphs are drawn left to right.
pub struct EmbeddedPdfRenderer {
    document: PdfDocument,
    fonts: FontSet,
    regular: FontId,
    bold: FontId,
    page: Option<PageOps>,
    images: HashMap<String, (XObjectId, (usize, usize))>,
    links: Vec<PendingLink>,
}

impl EmbeddedPdfRenderer {
    pub fn new(fonts: &FontSet, title: &str) -> Result<Self, RenderError> {
        let mut document = PdfDocument::new(title);
        let regular = add_font(&mut document, &fonts.regular.data, &fonts.regular.full_name)?;
        let bold = if Arc::ptr_eq(&fonts.regular, &fonts.bold) {
            regular.clone()
        } else {
            add_font(&mut document, &fonts.bold.data, &fonts.bold.full_name)?
        };
        Ok(Self {
            document,
            fonts: fonts.clone(),
            regular,
            bold,
            page: None,
            images: HashMap::new(),
            links: Vec::new(),
        })
    }

    /// Fails with `RendererUnavailable` when the registry is degraded.
    pub fn from_registry(registry: &FontRegistry, title: &str) -> Result<Self, RenderError> {
        let fonts = registry.selected().ok_or_else(|| {
            RenderError::unavailable(AdapterKind::Embedded, "no Arabic-capable font registered")
        })?;
        Self::new(fonts, title)
    }

    fn page(&mut self) -> Result<&mut PageOps, RenderError> {
        self.page.as_mut().ok_or_else(|| RenderError::Other("draw outside of a page".into()))
    }

    fn draw_text(&mut self, run: &TextRun) -> Result<(), RenderError> {
        if run.text.is_empty() {
            return Ok(());
        }
        let font = match run.font {
            FontRole::Regular => self.regular.clone(),
            FontRole::Bold => self.bold.clone(),
        };
        let page = self.page()?;
        let baseline = flip_y(run.baseline, page.height_mm);
        page.ops.extend([
            Op::StartTextSection,
            Op::SetFillColor { col: pdf_color(&run.color) },
            Op::SetFontSize { size: Pt(run.size), font: font.clone() },
            Op::SetTextMatrix { matrix: TextMatrix::Translate(Pt(mm_to_pt(run.x)), Pt(baseline)) },
            Op::WriteText { items: vec![TextItem::Text(run.text.as_str().to_string())], font },
            Op::EndTextSection,
        ]);
        Ok(())
    }

    fn draw_image(&mut self, source: &str, data: &[u8], rect: &Rect) -> Result<(), RenderError> {
        let cached = self.images.get(source).cloned();
        let (id, (width, height)) = match cached {
            Some(entry) => entry,
            None => {
                let mut warnings = Vec::new();
                let image = match printpdf::image::RawImage::decode_from_bytes(data, &mut warnings) {
                    Ok(image) => image,
                    Err(e) => {
                        log::debug!("Omitting undecodable image '{}': {}", source, e);
                        return Ok(());
                    }
                };
                let dims = (image.width as usize, image.height as usize);
                let id = XObjectId::new();
                self.document.resources.xobjects.map.insert(id.clone(), XObject::Image(image));
                self.images.insert(source.to_string(), (id.clone(), dims));
                (id, dims)
            }
        };
        if width == 0 || height == 0 {
            return Ok(());
        }

        let page = self.page()?;
        let transform = XObjectTransform {
            translate_x: Some(Pt(mm_to_pt(rect.x))),
            translate_y: Some(Pt(flip_y(rect.bottom(), page.height_mm))),
            scale_x: Some(mm_to_pt(rect.width) / width as f32),
            scale_y: Some(mm_to_pt(rect.height) / height as f32),
            rotate: None,
            dpi: Some(72.0),
        };
        page.ops.push(Op::UseXobject { id, transform });
        Ok(())
    }
}

fn add_font(document: &mut PdfDocument, data: &[u8], name: &str) -> Result<FontId, RenderError> {
    let mut warnings = Vec::new();
    let font = ParsedFont::from_bytes(data, 0, &mut warnings)
        .ok_or_else(|| RenderError::MissingFont(format!("'{}' could not be parsed for embedding", name)))?;
    Ok(document.add_font(&font))
}

impl DocumentRenderer for EmbeddedPdfRenderer {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Embedded
    }

    fn font_name(&self) -> String {
        self.fonts.name().to_string()
    }

    fn supports_arabic(&self) -> bool {
        true
    }

    fn prepare_text(&self, logical: &str) -> Shaped {
        nuzum_shaper::shape(logical)
    }

    fn text_width(&self, text: &Shaped, font: FontRole, size_pt: f32) -> f32 {
        let face = match font {
            FontRole::Regular => &self.fonts.regular,
            FontRole::Bold => &self.fonts.bold,
        };
        pt_to_mm(face.text_width_pt(text.as_str(), size_pt))
    }

    fn begin_page(&mut self, setup: &PageSetup) -> Result<(), RenderError> {
        if self.page.is_some() {
            return Err(RenderError::Other("begin_page called twice without end_page".into()));
        }
        let size = setup.dimensions_mm();
        self.page = Some(PageOps { width_mm: size.width, height_mm: size.height, ops: Vec::new() });
        Ok(())
    }

    fn draw(&mut self, op: &DrawOp) -> Result<(), RenderError> {
        match op {
            DrawOp::Text(run) => self.draw_text(run)?,
            DrawOp::FillRect { rect, color } => {
                let page = self.page()?;
                let polygon = Polygon {
                    rings: vec![page.rect_ring(rect)],
                    mode: PaintMode::Fill,
                    winding_order: WindingOrder::NonZero,
                };
                page.ops.push(Op::SetFillColor { col: pdf_color(color) });
                page.ops.push(Op::DrawPolygon { polygon });
            }
            DrawOp::StrokeRect { rect, color, width } => {
                let page = self.page()?;
                let polygon = Polygon {
                    rings: vec![page.rect_ring(rect)],
                    mode: PaintMode::Stroke,
                    winding_order: WindingOrder::NonZero,
                };
                page.outline(color, *width);
                page.ops.push(Op::DrawPolygon { polygon });
            }
            DrawOp::Line { from, to, color, width } => {
                let page = self.page()?;
                let line = Line { points: vec![page.point(*from), page.point(*to)], is_closed: false };
                page.outline(color, *width);
                page.ops.push(Op::DrawLine { line });
            }
            DrawOp::Polyline { points, color, width } => {
                if points.len() < 2 {
                    return Ok(());
                }
                let page = self.page()?;
                let line = Line { points: points.iter().map(|p| page.point(*p)).collect(), is_closed: false };
                page.outline(color, *width);
                page.ops.push(Op::DrawLine { line });
            }
            DrawOp::Image { source, data, rect } => self.draw_image(source, data, rect)?,
            DrawOp::Link { rect, uri } => {
                let page_index = self.document.pages.len();
                let height_mm = self.page()?.height_mm;
                let bottom = flip_y(rect.bottom(), height_mm);
                self.links.push(PendingLink {
                    page: page_index,
                    rect: [mm_to_pt(rect.x), bottom, mm_to_pt(rect.right()), bottom + mm_to_pt(rect.height)],
                    uri: uri.clone(),
                });
            }
        }
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), RenderError> {
        let page = self
            .page
            .take()
            .ok_or_else(|| RenderError::Other("end_page without begin_page".into()))?;
        self.document
            .pages
            .push(PdfPage::new(Mm(page.width_mm), Mm(page.height_mm), page.ops));
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError> {
        let renderer = *self;
        if renderer.page.is_some() {
            return Err(RenderError::Other("finish called with an open page".into()));
        }
        let mut warnings = Vec::new();
        let bytes = renderer.document.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            log::debug!("printpdf reported {} warning(s) while saving", warnings.len());
        }
        if !bytes.starts_with(b"%PDF-") {
            return Err(RenderError::Pdf("printpdf produced no PDF header".into()));
        }
        add_link_annotations(bytes, &renderer.links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nuzum_fonts::FontOptions;
    use nuzum_render_core::{Document, FooterInfo, ParagraphStyle};
    use nuzum_traits::InMemoryResourceProvider;

    fn system_registry() -> FontRegistry {
        let _ = env_logger::builder().is_test(true).try_init();
        FontRegistry::load("/no/such/dir", &FontOptions { preferred_font: None, system_fonts: true })
    }

    #[test]
    fn degraded_registry_is_unavailable() {
        let registry = FontRegistry::degraded();
        let err = EmbeddedPdfRenderer::from_registry(&registry, "x").err().unwrap();
        assert!(matches!(err, RenderError::RendererUnavailable { adapter: AdapterKind::Embedded, .. }));
    }

    #[test]
    fn renders_arabic_with_an_embedded_face() {
        let registry = system_registry();
        let Ok(renderer) = EmbeddedPdfRenderer::from_registry(&registry, "اختبار") else {
            eprintln!("no Arabic system font; skipping");
            return;
        };
        let font_name = renderer.font_name();
        let mut doc = Document::new(
            Box::new(renderer),
            PageSetup::default(),
            Arc::new(InMemoryResourceProvider::new()),
        );
        doc.footer(FooterInfo::new("HND-000001", "2025-01-20 12:00"));
        doc.paragraph("نموذج تسليم مركبة", ParagraphStyle::Title);
        doc.link_button("مشاهدة سجل التسليم »", "https://forms.example/1");
        let bytes = doc.finish().unwrap();

        assert!(bytes.starts_with(b"%PDF-"));
        let parsed = lopdf::Document::load_mem(&bytes).unwrap();
        let pages = parsed.get_pages();
        assert_eq!(pages.len(), 1);
        let page = parsed.get_dictionary(*pages.values().next().unwrap()).unwrap();
        assert!(page.get(b"Annots").is_ok());
        assert!(!font_name.is_empty());
    }
}
