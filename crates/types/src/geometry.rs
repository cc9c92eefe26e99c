//! Page geometry. All lengths are millimetres unless a name says otherwise.

use serde::{Deserialize, Serialize};

pub const PT_PER_MM: f32 = 72.0 / 25.4;

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

pub fn pt_to_mm(pt: f32) -> f32 {
    pt / PT_PER_MM
}

/// A rectangle with a top-left origin, y growing downwards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    /// Portrait dimensions in millimetres.
    pub fn dimensions_mm(&self) -> Size {
        match *self {
            PageSize::A4 => Size::new(210.0, 297.0),
            PageSize::Letter => Size::new(215.9, 279.4),
            PageSize::Legal => Size::new(215.9, 355.6),
            PageSize::Custom { width, height } => Size::new(width, height),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self { top: 15.0, right: 15.0, bottom: 20.0, left: 15.0 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    #[serde(default)]
    pub size: PageSize,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default)]
    pub orientation: Orientation,
}

impl PageSetup {
    pub fn new(size: PageSize) -> Self {
        Self { size, ..Default::default() }
    }

    pub fn landscape(mut self) -> Self {
        self.orientation = Orientation::Landscape;
        self
    }

    /// Page dimensions after applying orientation.
    pub fn dimensions_mm(&self) -> Size {
        let portrait = self.size.dimensions_mm();
        match self.orientation {
            Orientation::Portrait => portrait,
            Orientation::Landscape => Size::new(portrait.height, portrait.width),
        }
    }

    /// The printable area inside the margins.
    pub fn content_rect(&self) -> Rect {
        let page = self.dimensions_mm();
        Rect::new(
            self.margins.left,
            self.margins.top,
            page.width - self.margins.left - self.margins.right,
            page.height - self.margins.top - self.margins.bottom,
        )
    }
}
