//! Pieces shared by the PDF templates.

use crate::env::RenderEnv;
use nuzum_render_core::{Document, FooterInfo, HeaderSpec};
use nuzum_render_lopdf::ascii_extract;
use nuzum_shaper::contains_arabic;
use nuzum_types::model::Vehicle;

/// Printed under the audit line of every report produced without an Arabic font.
pub const DEGRADED_NOTICE: &str = "Arabic font unavailable: simplified Latin rendering";

/// Stand-in for a free-text Arabic value with no Latin part.
pub const ARABIC_PLACEHOLDER: &str = "(Arabic name)";

/// A free-text value as the Latin adapter should print it: verbatim when it
/// has no Arabic, else its ASCII part, else a placeholder.
pub fn latin_text(value: &str) -> String {
    if !contains_arabic(value) {
        return value.to_string();
    }
    ascii_extract(value).unwrap_or_else(|| ARABIC_PLACEHOLDER.to_string())
}

pub fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

/// Footer with the degraded notice added when the adapter cannot draw Arabic.
pub fn footer_info(doc: &Document, env: &RenderEnv, document_id: &str) -> FooterInfo {
    let info = FooterInfo::new(document_id, env.timestamp());
    if doc.supports_arabic() { info } else { info.note(DEGRADED_NOTICE) }
}

pub fn header_with_logo(title: impl Into<String>, env: &RenderEnv) -> HeaderSpec {
    let header = HeaderSpec::new(title);
    match env.logo_path.as_deref() {
        Some(logo) => header.logo(logo),
        None => header,
    }
}

/// Label/value rows describing a vehicle.
pub fn vehicle_pairs(vehicle: &Vehicle, arabic: bool) -> Vec<(String, String)> {
    let year = vehicle.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string());
    if arabic {
        vec![
            ("رقم اللوحة".into(), vehicle.plate.clone()),
            ("النوع والموديل".into(), vehicle.make_and_model()),
            ("سنة الصنع".into(), year),
            ("اللون".into(), or_dash(Some(&vehicle.color))),
            ("الحالة".into(), vehicle.status.arabic_label().into()),
        ]
    } else {
        vec![
            ("Plate".into(), vehicle.plate.clone()),
            ("Make / Model".into(), latin_text(&vehicle.make_and_model())),
            ("Year".into(), year),
            ("Color".into(), latin_text(&or_dash(Some(&vehicle.color)))),
            ("Status".into(), vehicle.status.english_label().into()),
        ]
    }
}
