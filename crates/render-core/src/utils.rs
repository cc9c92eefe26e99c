use nuzum_types::geometry::{mm_to_pt, pt_to_mm};

/// Vertical distance between consecutive baselines, in millimetres.
pub const LINE_SPACING: f32 = 1.4;

pub fn line_height_mm(size_pt: f32) -> f32 {
    pt_to_mm(size_pt * LINE_SPACING)
}

/// Offset from the top of a line box to its baseline, in millimetres.
pub fn baseline_offset_mm(size_pt: f32) -> f32 {
    pt_to_mm(size_pt * 1.05)
}

/// Convert a top-origin y coordinate in millimetres to a PDF y in points.
pub fn flip_y(y_mm: f32, page_height_mm: f32) -> f32 {
    mm_to_pt(page_height_mm - y_mm)
}
