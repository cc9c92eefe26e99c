use nuzum_shaper::Shaped;
use nuzum_traits::SharedResourceData;
use nuzum_types::{Color, Rect};
use std::fmt;

/// The backends a report can be produced by, in no particular order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterKind {
    /// printpdf with an embedded TrueType Arabic face.
    Embedded,
    /// HTML rendered by an external converter.
    Html,
    /// lopdf with the built-in Helvetica; Arabic is stripped.
    Latin,
    /// rust_xlsxwriter workbooks.
    Xlsx,
}

impl AdapterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdapterKind::Embedded => "embedded",
            AdapterKind::Html => "html",
            AdapterKind::Latin => "latin",
            AdapterKind::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontRole {
    #[default]
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Left,
    #[default]
    Right,
    Center,
}

/// One line of text positioned on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Left edge of the run, mm from the page's left edge.
    pub x: f32,
    /// Baseline, mm from the page's top edge.
    pub baseline: f32,
    pub text: Shaped,
    pub font: FontRole,
    /// Font size in points.
    pub size: f32,
    pub color: Color,
}

/// A drawing instruction in page coordinates (mm, top-left origin).
/// Stroke widths are in points.
#[derive(Debug, Clone)]
pub enum DrawOp {
    Text(TextRun),
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f32,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Color,
        width: f32,
    },
    /// Open path through `points`; check and cross marks are drawn this way.
    Polyline {
        points: Vec<(f32, f32)>,
        color: Color,
        width: f32,
    },
    Image {
        /// Asset path, for log lines.
        source: String,
        data: SharedResourceData,
        rect: Rect,
    },
    /// Clickable area opening `uri`.
    Link {
        rect: Rect,
        uri: String,
    },
}

impl DrawOp {
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text(run) => Some(run.text.as_str()),
            _ => None,
        }
    }
}
