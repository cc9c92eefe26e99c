use nuzum_render_core::{AdapterKind, RenderError};
use std::fmt::Debug;

/// An external HTML-to-PDF engine (a headless browser, wkhtmltopdf, ...).
pub trait HtmlToPdf: Send + Sync + Debug {
    fn name(&self) -> &str;

    fn convert(&self, html: &str) -> Result<Vec<u8>, RenderError>;
}

/// Converts `html` with `converter`, checking that a PDF came back.
pub fn html_to_pdf(html: &str, converter: Option<&dyn HtmlToPdf>) -> Result<Vec<u8>, RenderError> {
    let converter = converter
        .ok_or_else(|| RenderError::unavailable(AdapterKind::Html, "no HTML-to-PDF converter configured"))?;
    log::debug!("Converting {} bytes of HTML with {}", html.len(), converter.name());
    let bytes = converter.convert(html)?;
    if !bytes.starts_with(b"%PDF-") {
        return Err(RenderError::unavailable(
            AdapterKind::Html,
            format!("{} returned something that is not a PDF", converter.name()),
        ));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Echo(&'static [u8]);

    impl HtmlToPdf for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn convert(&self, _html: &str) -> Result<Vec<u8>, RenderError> {
            Ok(self.0.to_vec())
        }
    }

    #[test]
    fn missing_converter_is_unavailable() {
        let err = html_to_pdf("<html></html>", None).unwrap_err();
        assert!(matches!(err, RenderError::RendererUnavailable { adapter: AdapterKind::Html, .. }));
    }

    #[test]
    fn converter_output_must_be_pdf() {
        assert!(html_to_pdf("<p>x</p>", Some(&Echo(b"%PDF-1.7 ..."))).is_ok());
        let err = html_to_pdf("<p>x</p>", Some(&Echo(b"<html>"))).unwrap_err();
        assert!(matches!(err, RenderError::RendererUnavailable { .. }));
    }
}
