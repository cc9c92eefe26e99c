//! Vehicle delivery and return forms.

use crate::chain::{PdfReport, render_pdf, strategy};
use crate::common::{footer_info, header_with_logo, latin_text, or_dash, vehicle_pairs};
use crate::env::RenderEnv;
use nuzum_render_core::{
    AdapterKind, Cell, ColumnSpec, Document, ParagraphStyle, RenderError, RenderOutcome, TableRow, TableSpec,
};
use nuzum_render_html::{HANDOVER_TEMPLATE, HtmlReport};
use nuzum_types::DocumentId;
use nuzum_types::model::{Handover, HandoverKind, HandoverView};
use serde_json::{Value, json};

pub const RETURN_BANNER: &str = "يتم استلام السيارة من السائق الحالي";
pub const FORM_LINK_LABEL: &str = "مشاهدة سجل التسليم »";
const SIGNATURE_HEIGHT: f32 = 30.0;

fn title(kind: HandoverKind) -> &'static str {
    match kind {
        HandoverKind::Delivery => "نموذج تسليم مركبة",
        HandoverKind::Return => "نموذج استلام مركبة",
    }
}

fn english_title(kind: HandoverKind) -> &'static str {
    match kind {
        HandoverKind::Delivery => "Vehicle Delivery Form",
        HandoverKind::Return => "Vehicle Return Form",
    }
}

fn when(handover: &Handover, env: &RenderEnv) -> String {
    let date = env.format_date(handover.date);
    match handover.time {
        Some(time) => format!("{} {}", date, time.format("%H:%M")),
        None => date,
    }
}

pub(crate) struct HandoverReport<'a> {
    view: &'a HandoverView,
}

impl<'a> HandoverReport<'a> {
    pub(crate) fn new(view: &'a HandoverView) -> Self {
        Self { view }
    }

    fn plate(&self) -> &str {
        self.view.vehicle.as_ref().map(|v| v.plate.as_str()).unwrap_or("-")
    }

    fn subtitle(&self) -> String {
        format!("{} - W{:06}", self.plate(), self.view.handover.id)
    }

    fn document_id(&self) -> DocumentId {
        DocumentId::handover(self.view.handover.id)
    }

    fn handover_pairs(&self, env: &RenderEnv) -> Vec<(String, String)> {
        let h = &self.view.handover;
        let mut pairs = vec![
            ("نوع العملية".to_string(), h.kind.arabic_label().to_string()),
            ("التاريخ".to_string(), when(h, env)),
            ("الشخص".to_string(), h.person_name.clone()),
        ];
        if let Some(supervisor) = h.supervisor.as_deref().filter(|s| !s.trim().is_empty()) {
            pairs.push(("المشرف".to_string(), supervisor.to_string()));
        }
        pairs.extend([
            ("مستوى الوقود".to_string(), h.fuel_level.arabic_label().to_string()),
            ("قراءة العداد".to_string(), format!("{} كم", h.mileage)),
            ("حالة المركبة".to_string(), or_dash(h.vehicle_condition.as_deref())),
        ]);
        pairs
    }

    fn english_pairs(&self, env: &RenderEnv) -> Vec<(String, String)> {
        let h = &self.view.handover;
        let mut pairs = vec![
            ("Operation".to_string(), h.kind.english_label().to_string()),
            ("Date".to_string(), when(h, env)),
            ("Person".to_string(), latin_text(&h.person_name)),
        ];
        if let Some(supervisor) = h.supervisor.as_deref().filter(|s| !s.trim().is_empty()) {
            pairs.push(("Supervisor".to_string(), latin_text(supervisor)));
        }
        pairs.extend([
            ("Fuel level".to_string(), h.fuel_level.english_label().to_string()),
            ("Mileage".to_string(), format!("{} km", h.mileage)),
            ("Vehicle condition".to_string(), latin_text(&or_dash(h.vehicle_condition.as_deref()))),
        ]);
        pairs
    }

    fn layout_arabic(&self, doc: &mut Document, env: &RenderEnv) -> Result<(), RenderError> {
        let h = &self.view.handover;
        let mut header = header_with_logo(title(h.kind), env).subtitle(self.subtitle());
        if let Some(vehicle) = &self.view.vehicle {
            let fill = doc.palette().get(vehicle.status.badge()).clone();
            header = header.badge(vehicle.status.arabic_label(), fill);
        }
        doc.header(&header);
        env.check_cancelled()?;

        if let Some(vehicle) = &self.view.vehicle {
            doc.paragraph("بيانات المركبة", ParagraphStyle::Heading);
            doc.kv_table(&vehicle_pairs(vehicle, true));
        }
        env.check_cancelled()?;

        doc.paragraph("بيانات العملية", ParagraphStyle::Heading);
        if self.view.is_locked_return() {
            let warning = doc.palette().warning.clone();
            doc.banner(RETURN_BANNER, warning);
        }
        doc.kv_table(&self.handover_pairs(env));
        if let Some(link) = h.form_link.as_deref().filter(|l| !l.trim().is_empty()) {
            doc.link_button(FORM_LINK_LABEL, link);
        }
        env.check_cancelled()?;

        doc.paragraph("قائمة الفحص", ParagraphStyle::Heading);
        let mut checklist = TableSpec::new(vec![ColumnSpec::new(3.0), ColumnSpec::centered(1.0)])
            .header(["البند", "متوفر"]);
        for (item, ok) in h.checklist.items() {
            checklist.push(TableRow::new(vec![Cell::text(item.arabic_label()), Cell::Check(ok)]));
        }
        doc.rtl_table(&checklist);
        env.check_cancelled()?;

        if let Some(notes) = h.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            doc.paragraph("ملاحظات", ParagraphStyle::Heading);
            doc.paragraph(notes, ParagraphStyle::Body);
        }

        if !h.signatures.is_empty() {
            doc.paragraph("التوقيعات", ParagraphStyle::Heading);
            doc.captioned_images(
                &[
                    ("توقيع المُسلم".to_string(), h.signatures.deliverer.clone()),
                    ("توقيع المُستلم".to_string(), h.signatures.receiver.clone()),
                ],
                SIGNATURE_HEIGHT,
            );
        }

        let footer = footer_info(doc, env, self.document_id().as_str()).caption("نظام نُظم لإدارة المركبات");
        doc.footer(footer);
        Ok(())
    }

    fn layout_latin(&self, doc: &mut Document, env: &RenderEnv) -> Result<(), RenderError> {
        let h = &self.view.handover;
        doc.header(&header_with_logo(english_title(h.kind), env).subtitle(self.subtitle()));
        env.check_cancelled()?;

        if let Some(vehicle) = &self.view.vehicle {
            doc.paragraph("Vehicle", ParagraphStyle::Heading);
            doc.kv_table(&vehicle_pairs(vehicle, false));
        }
        env.check_cancelled()?;

        doc.paragraph("Handover", ParagraphStyle::Heading);
        if self.view.is_locked_return() {
            let warning = doc.palette().warning.clone();
            doc.banner("Vehicle is being returned by the current driver", warning);
        }
        doc.kv_table(&self.english_pairs(env));
        if let Some(link) = h.form_link.as_deref().filter(|l| !l.trim().is_empty()) {
            doc.link_button("View handover record >>", link);
        }
        env.check_cancelled()?;

        doc.paragraph("Checklist", ParagraphStyle::Heading);
        let mut checklist =
            TableSpec::new(vec![ColumnSpec::numeric(3.0), ColumnSpec::centered(1.0), ColumnSpec::centered(1.0)])
                .header(["Item", "Status", "Present"]);
        for (item, ok) in h.checklist.items() {
            checklist.push(TableRow::new(vec![
                Cell::text(item.english_label()),
                Cell::Check(ok),
                Cell::text(if ok { "Yes" } else { "No" }),
            ]));
        }
        doc.rtl_table(&checklist);
        env.check_cancelled()?;

        if let Some(notes) = h.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            doc.paragraph("Notes", ParagraphStyle::Heading);
            doc.paragraph(&latin_text(notes), ParagraphStyle::Body);
        }

        if !h.signatures.is_empty() {
            doc.paragraph("Signatures", ParagraphStyle::Heading);
            doc.captioned_images(
                &[
                    ("Deliverer".to_string(), h.signatures.deliverer.clone()),
                    ("Receiver".to_string(), h.signatures.receiver.clone()),
                ],
                SIGNATURE_HEIGHT,
            );
        }

        let footer = footer_info(doc, env, self.document_id().as_str()).caption("Nuzum fleet management system");
        doc.footer(footer);
        Ok(())
    }

    /// Template data for the RTL HTML page.
    pub(crate) fn html_context(&self, env: &RenderEnv) -> Value {
        let h = &self.view.handover;
        let rows = |pairs: Vec<(String, String)>| -> Vec<Value> {
            pairs.into_iter().map(|(label, value)| json!({ "label": label, "value": value })).collect()
        };
        let palette = nuzum_types::Palette::NUZUM;
        let badge = self.view.vehicle.as_ref().map(|v| {
            json!({ "text": v.status.arabic_label(), "color": palette.get(v.status.badge()).to_css() })
        });
        let asset = |path: &str| match env.resources.base_path() {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), path),
            None => path.to_string(),
        };
        let signatures: Vec<Value> = [
            ("توقيع المُسلم", h.signatures.deliverer.as_deref()),
            ("توقيع المُستلم", h.signatures.receiver.as_deref()),
        ]
        .into_iter()
        .filter_map(|(caption, path)| path.map(|p| json!({ "caption": caption, "src": asset(p) })))
        .collect();

        json!({
            "title": title(h.kind),
            "subtitle": self.subtitle(),
            "badge": badge,
            "vehicle": rows(self.view.vehicle.as_ref().map(|v| vehicle_pairs(v, true)).unwrap_or_default()),
            "handover": rows(self.handover_pairs(env)),
            "banner": self.view.is_locked_return().then_some(RETURN_BANNER),
            "checklist": h.checklist.items().iter()
                .map(|(item, ok)| json!({ "name": item.arabic_label(), "ok": ok }))
                .collect::<Vec<_>>(),
            "notes": h.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()),
            "form_link": h.form_link.as_deref().map(|uri| json!({ "label": FORM_LINK_LABEL, "uri": uri })),
            "signatures": signatures,
            "footer": {
                "document_id": self.document_id().as_str(),
                "timestamp": env.timestamp(),
                "caption": "نظام نُظم لإدارة المركبات",
            },
        })
    }
}

impl PdfReport for HandoverReport<'_> {
    fn title(&self) -> String {
        format!("{} {}", english_title(self.view.handover.kind), self.document_id())
    }

    fn chain(&self, env: &RenderEnv) -> Vec<AdapterKind> {
        strategy(env, true)
    }

    fn layout(&self, doc: &mut Document, env: &RenderEnv) -> Result<(), RenderError> {
        if doc.supports_arabic() { self.layout_arabic(doc, env) } else { self.layout_latin(doc, env) }
    }

    fn html(&self, env: &RenderEnv) -> Option<Result<String, RenderError>> {
        Some(render_html(self.view, env))
    }

    fn emergency_lines(&self, _failure: &RenderError) -> Vec<String> {
        let h = &self.view.handover;
        vec![
            english_title(h.kind).to_uppercase(),
            format!("Handover ID: {}", self.document_id()),
            format!("Plate: {}", self.plate()),
            format!("Date: {}", h.date),
            format!("Person: {}", latin_text(&h.person_name)),
            format!("Mileage: {} km", h.mileage),
        ]
    }
}

/// The handover form as a PDF.
pub fn render(view: &HandoverView, env: &RenderEnv) -> Result<RenderOutcome, RenderError> {
    render_pdf(&HandoverReport::new(view), env)
}

/// The handover form as an RTL HTML page.
pub fn render_html(view: &HandoverView, env: &RenderEnv) -> Result<String, RenderError> {
    let report = HandoverReport::new(view);
    HtmlReport::new()?.render(HANDOVER_TEMPLATE, &report.html_context(env))
}
