use crate::error::FontError;
use crate::face::FontFace;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Name printed in footers when no TrueType face is embedded.
pub const BUILTIN_FONT_NAME: &str = "Helvetica";

/// First-choice Arabic families, in order.
pub const PRIMARY_ARABIC: &[&str] = &["beIN Normal", "Amiri"];

/// Second-choice Arabic families, in order.
pub const SECONDARY_ARABIC: &[&str] =
    &["Tajawal", "Cairo", "Noto Naskh Arabic", "Noto Sans Arabic", "DejaVu Sans"];

#[derive(Debug, Clone, Default)]
pub struct FontOptions {
    /// Logical name tried before the built-in preference list.
    pub preferred_font: Option<String>,
    /// Also search the operating system's fonts when the directory has no Arabic face.
    pub system_fonts: bool,
}

/// The faces the PDF adapters embed.
#[derive(Debug, Clone)]
pub struct FontSet {
    pub regular: Arc<FontFace>,
    /// Same face as `regular` when the family ships no bold weight.
    pub bold: Arc<FontFace>,
    /// Built-in sans-serif the Latin adapter falls back to.
    pub fallback: &'static str,
}

impl FontSet {
    pub fn name(&self) -> &str {
        &self.regular.full_name
    }
}

#[derive(Debug, Clone)]
pub struct FontRegistry {
    source_dir: PathBuf,
    faces: Vec<Arc<FontFace>>,
    selected: Option<FontSet>,
    skipped: usize,
}

impl FontRegistry {
    /// Scans `fonts_dir` (non-recursively) and selects the preferred Arabic face.
    ///
    /// Never fails. A missing directory or a directory without an Arabic-capable
    /// face leaves the registry in degraded mode.
    pub fn load(fonts_dir: impl AsRef<Path>, options: &FontOptions) -> Self {
        let source_dir = fonts_dir.as_ref().to_path_buf();
        let (mut faces, skipped) = scan_dir(&source_dir);

        let mut selected = select(&faces, options.preferred_font.as_deref());

        if selected.is_none() && options.system_fonts {
            let system = system_faces();
            log::debug!("Searching {} system font faces for an Arabic family", system.len());
            faces.extend(system);
            selected = select(&faces, options.preferred_font.as_deref());
        }

        match &selected {
            Some(set) => log::info!(
                "Font registry selected '{}' (bold: '{}', fallback: '{}') from {}",
                set.regular.full_name,
                set.bold.full_name,
                set.fallback,
                source_dir.display()
            ),
            None => log::warn!(
                "{}; rendering in degraded mode with {}",
                FontError::MissingFont(source_dir.display().to_string()),
                BUILTIN_FONT_NAME
            ),
        }

        Self { source_dir, faces, selected, skipped }
    }

    /// A registry with no faces at all.
    pub fn degraded() -> Self {
        Self {
            source_dir: PathBuf::new(),
            faces: Vec::new(),
            selected: None,
            skipped: 0,
        }
    }

    /// Builds a registry from faces already in memory.
    pub fn from_faces(faces: Vec<FontFace>, preferred_font: Option<&str>) -> Self {
        let faces: Vec<_> = faces.into_iter().map(Arc::new).collect();
        let selected = select(&faces, preferred_font);
        Self { source_dir: PathBuf::new(), faces, selected, skipped: 0 }
    }

    pub fn is_degraded(&self) -> bool {
        self.selected.is_none()
    }

    pub fn selected(&self) -> Option<&FontSet> {
        self.selected.as_ref()
    }

    /// The concrete font reports print in their footer.
    pub fn selected_font_name(&self) -> &str {
        self.selected.as_ref().map(FontSet::name).unwrap_or(BUILTIN_FONT_NAME)
    }

    pub fn faces(&self) -> &[Arc<FontFace>] {
        &self.faces
    }

    /// Looks a face up by its logical name ("Amiri", "Amiri Bold").
    pub fn find(&self, logical_name: &str) -> Option<&Arc<FontFace>> {
        self.faces.iter().find(|f| f.logical_name().eq_ignore_ascii_case(logical_name))
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Files in the directory that failed to parse.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

fn scan_dir(dir: &Path) -> (Vec<Arc<FontFace>>, usize) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Fonts directory {} unavailable: {}", dir.display(), e);
            return (Vec::new(), 0);
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf"))
        })
        .collect();
    // read_dir order is platform dependent
    paths.sort();

    let mut faces = Vec::with_capacity(paths.len());
    let mut skipped = 0;
    for path in paths {
        match FontFace::from_path(&path) {
            Ok(face) => faces.push(Arc::new(face)),
            Err(e) => {
                log::warn!("Skipping font: {}", e);
                skipped += 1;
            }
        }
    }
    (faces, skipped)
}

fn select(faces: &[Arc<FontFace>], preferred: Option<&str>) -> Option<FontSet> {
    let candidates = preferred
        .into_iter()
        .chain(PRIMARY_ARABIC.iter().copied())
        .chain(SECONDARY_ARABIC.iter().copied());

    for name in candidates {
        let matching: Vec<&Arc<FontFace>> = faces.iter().filter(|f| f.answers_to(name)).collect();
        if matching.is_empty() {
            continue;
        }
        if !matching.iter().any(|f| f.arabic) {
            log::warn!("Font '{}' found but lacks Arabic glyphs; trying next preference", name);
            continue;
        }
        return family_set(faces, &matching);
    }

    // Any Arabic-capable face beats the built-in Latin font.
    let arabic: Vec<&Arc<FontFace>> = faces.iter().filter(|f| f.arabic).collect();
    family_set(faces, &arabic)
}

fn family_set(all: &[Arc<FontFace>], matching: &[&Arc<FontFace>]) -> Option<FontSet> {
    let arabic: Vec<&Arc<FontFace>> = matching.iter().copied().filter(|f| f.arabic).collect();
    let pool = if arabic.is_empty() { matching } else { arabic.as_slice() };
    let regular = Arc::clone(pool.iter().find(|f| !f.bold).or(pool.first()).copied()?);
    let bold = all
        .iter()
        .find(|f| f.bold && f.arabic && f.family == regular.family)
        .cloned()
        .unwrap_or_else(|| Arc::clone(&regular));
    Some(FontSet { regular, bold, fallback: BUILTIN_FONT_NAME })
}

#[cfg(feature = "system-fonts")]
fn system_faces() -> Vec<Arc<FontFace>> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let wanted: Vec<&str> = PRIMARY_ARABIC.iter().chain(SECONDARY_ARABIC.iter()).copied().collect();
    db.faces()
        .filter(|info| info.index == 0)
        .filter(|info| {
            info.families
                .iter()
                .any(|(family, _)| wanted.iter().any(|w| family.eq_ignore_ascii_case(w)))
        })
        .filter_map(|info| {
            let path = match &info.source {
                fontdb::Source::File(path) => Some(path.clone()),
                _ => None,
            };
            let data = db.with_face_data(info.id, |data, _| data.to_vec())?;
            match FontFace::from_bytes(data, path) {
                Ok(face) => Some(Arc::new(face)),
                Err(e) => {
                    log::warn!("Skipping system font: {}", e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(not(feature = "system-fonts"))]
fn system_faces() -> Vec<Arc<FontFace>> {
    Vec::new()
}
