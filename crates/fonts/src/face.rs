use crate::error::FontError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Code points a face must map before it counts as Arabic-capable: base
/// letters plus the presentation forms the shaper emits.
const ARABIC_SAMPLE: &[char] = &['\u{0627}', '\u{0628}', '\u{FE8D}', '\u{FE91}', '\u{FEE0}', '\u{FEFB}'];

/// A validated font face with the names it is known by.
#[derive(Clone)]
pub struct FontFace {
    pub family: String,
    pub full_name: String,
    pub postscript_name: String,
    pub bold: bool,
    pub arabic: bool,
    pub path: Option<PathBuf>,
    pub data: Arc<Vec<u8>>,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("postscript_name", &self.postscript_name)
            .field("bold", &self.bold)
            .field("arabic", &self.arabic)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl FontFace {
    /// Parses `data` and reads the face's names and coverage.
    pub fn from_bytes(data: Vec<u8>, path: Option<PathBuf>) -> Result<Self, FontError> {
        let label = path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string());
        let face = ttf_parser::Face::parse(&data, 0).map_err(|_| FontError::Parse(label.clone()))?;

        let name = |id: u16| {
            face.names()
                .into_iter()
                .find(|n| n.name_id == id && n.is_unicode())
                .and_then(|n| n.to_string())
        };

        let family = name(ttf_parser::name_id::TYPOGRAPHIC_FAMILY)
            .or_else(|| name(ttf_parser::name_id::FAMILY))
            .ok_or_else(|| FontError::Parse(label.clone()))?;
        let full_name = name(ttf_parser::name_id::FULL_NAME).unwrap_or_else(|| family.clone());
        let postscript_name = name(ttf_parser::name_id::POST_SCRIPT_NAME)
            .unwrap_or_else(|| full_name.replace(' ', ""));
        let bold = face.is_bold() || face.weight().to_number() >= 600;
        let arabic = ARABIC_SAMPLE.iter().all(|&ch| face.glyph_index(ch).is_some());

        log::debug!("Parsed font {} ({}), arabic={}, bold={}", full_name, label, arabic, bold);

        Ok(Self {
            family,
            full_name,
            postscript_name,
            bold,
            arabic,
            path,
            data: Arc::new(data),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(data, Some(path.to_path_buf()))
    }

    /// Stable logical name: the family, suffixed with " Bold" for bold faces.
    pub fn logical_name(&self) -> String {
        if self.bold {
            format!("{} Bold", self.family)
        } else {
            self.family.clone()
        }
    }

    /// Whether `name` refers to this face by family, full or PostScript name.
    pub fn answers_to(&self, name: &str) -> bool {
        let wanted = normalize(name);
        if wanted.is_empty() {
            return false;
        }
        let full = normalize(&self.full_name);
        normalize(&self.family) == wanted
            || full == wanted
            || normalize(&self.postscript_name) == wanted
            || full.starts_with(&wanted)
    }

    /// Width of `text` at `size_pt`, in points, from the horizontal advances.
    /// Unmapped characters use the `.notdef` advance.
    pub fn text_width_pt(&self, text: &str, size_pt: f32) -> f32 {
        let Ok(face) = ttf_parser::Face::parse(&self.data, 0) else {
            return text.chars().count() as f32 * size_pt * 0.5;
        };
        let units_per_em = face.units_per_em().max(1) as f32;
        let units: u32 = text
            .chars()
            .map(|ch| {
                let glyph = face.glyph_index(ch).unwrap_or(ttf_parser::GlyphId(0));
                face.glyph_hor_advance(glyph).unwrap_or(0) as u32
            })
            .sum();
        units as f32 / units_per_em * size_pt
    }

    /// True when every non-whitespace char of `text` has a glyph.
    pub fn covers(&self, text: &str) -> bool {
        match ttf_parser::Face::parse(&self.data, 0) {
            Ok(face) => text.chars().filter(|c| !c.is_whitespace()).all(|c| face.glyph_index(c).is_some()),
            Err(_) => false,
        }
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
