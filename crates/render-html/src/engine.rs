use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext as HandlebarsRenderContext,
};
use nuzum_render_core::RenderError;
use serde::Serialize;

pub const HANDOVER_TEMPLATE: &str = "handover";

/// `{{mark value}}` renders a green check for truthy values, a red cross
/// otherwise.
fn mark_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut HandlebarsRenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let checked = h.param(0).is_some_and(|v| v.value().as_bool().unwrap_or(false));
    out.write(if checked {
        r#"<span class="mark ok">&#10004;</span>"#
    } else {
        r#"<span class="mark no">&#10008;</span>"#
    })?;
    Ok(())
}

/// The registered report templates.
pub struct HtmlReport {
    engine: Handlebars<'static>,
}

impl HtmlReport {
    pub fn new() -> Result<Self, RenderError> {
        let mut engine = Handlebars::new();
        engine.set_strict_mode(true);
        engine.register_helper("mark", Box::new(mark_helper));
        engine.register_template_string(HANDOVER_TEMPLATE, include_str!("../templates/handover.hbs"))?;
        Ok(Self { engine })
    }

    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String, RenderError> {
        Ok(self.engine.render(template, data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn handover_context() -> serde_json::Value {
        json!({
            "title": "نموذج تسليم مركبة",
            "subtitle": "ABC 1234 - W000001",
            "badge": { "text": "متاحة", "color": "#2ecc71" },
            "vehicle": [{ "label": "رقم اللوحة", "value": "ABC 1234" }],
            "handover": [{ "label": "الشخص", "value": "<script>x</script>" }],
            "banner": null,
            "checklist": [
                { "name": "إطار احتياطي", "ok": true },
                { "name": "أدوات", "ok": false }
            ],
            "notes": null,
            "form_link": { "label": "مشاهدة سجل التسليم »", "uri": "https://forms.example/1" },
            "signatures": [],
            "footer": { "document_id": "HND-000001", "timestamp": "2025-01-20 12:00", "caption": "نظام نُظم" }
        })
    }

    #[test]
    fn handover_page_is_rtl_and_escaped() {
        let report = HtmlReport::new().unwrap();
        let html = report.render(HANDOVER_TEMPLATE, &handover_context()).unwrap();
        assert!(html.contains(r#"dir="rtl""#));
        assert!(html.contains("ABC 1234"));
        assert!(html.contains("https://forms.example/1"));
        assert!(html.contains("&lt;script&gt;"));
        assert_eq!(html.matches("mark ok").count(), 1);
        assert_eq!(html.matches("mark no").count(), 1);
        assert!(html.contains("HND-000001"));
    }

    #[test]
    fn strict_mode_rejects_missing_fields() {
        let report = HtmlReport::new().unwrap();
        let err = report.render(HANDOVER_TEMPLATE, &json!({ "title": "x" })).unwrap_err();
        assert!(matches!(err, RenderError::Template(_)));
    }
}
