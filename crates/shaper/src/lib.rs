//! Arabic text shaping for left-to-right glyph emitters.
//!
//! PDF content streams draw glyphs left to right and do no shaping of their
//! own. [`shape`] turns a logical string into what such an emitter must draw:
//! letters in their contextual presentation forms, runs reordered by the
//! Unicode bidi algorithm with a right-to-left base direction.
//!
//! The output is wrapped in [`Shaped`]. Shaping is not idempotent, so the
//! marker keeps a shaped string from being fed through the shaper twice.

mod joining;

use std::fmt;
use thiserror::Error;
use unicode_bidi::{BidiInfo, Level};

#[derive(Error, Debug)]
pub enum ShaperError {
    #[error("bidi level missing at byte {0}")]
    MissingLevel(usize),
    #[error("bidi produced no paragraph for a non-empty line")]
    NoParagraph,
}

/// Text already in visual order, ready to be drawn left to right.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Shaped(String);

impl Shaped {
    /// Marks text as drawable without shaping. For Latin-only paths.
    pub fn verbatim(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for Shaped {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Shaped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn is_arabic(ch: char) -> bool {
    matches!(ch, '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}')
}

pub fn contains_arabic(text: &str) -> bool {
    text.chars().any(is_arabic)
}

/// True when Arabic letters outnumber Latin letters. Used to pick alignment.
pub fn is_rtl_dominant(text: &str) -> bool {
    let (rtl, ltr) = text.chars().fold((0usize, 0usize), |(rtl, ltr), ch| {
        if is_arabic(ch) {
            (rtl + 1, ltr)
        } else if ch.is_alphabetic() {
            (rtl, ltr + 1)
        } else {
            (rtl, ltr)
        }
    });
    rtl > 0 && rtl >= ltr
}

/// Shapes `text` for drawing. Never fails: on error the input is returned as-is.
pub fn shape(text: &str) -> Shaped {
    if text.trim().is_empty() || text.is_ascii() || !contains_arabic(text) {
        return Shaped(text.to_string());
    }

    match try_shape(text) {
        Ok(shaped) => Shaped(shaped),
        Err(e) => {
            log::warn!("Shaping failed, drawing text unshaped: {}", e);
            Shaped(text.to_string())
        }
    }
}

/// [`shape`] for callers that only need the string.
pub fn shape_str(text: &str) -> String {
    shape(text).into_string()
}

fn try_shape(text: &str) -> Result<String, ShaperError> {
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                Ok(String::new())
            } else {
                reorder_line(&joining::apply_contextual_forms(line))
            }
        })
        .collect::<Result<_, _>>()?;
    Ok(lines.join("\n"))
}

fn reorder_line(line: &str) -> Result<String, ShaperError> {
    let bidi = BidiInfo::new(line, Some(Level::rtl()));
    let paragraph = bidi.paragraphs.first().ok_or(ShaperError::NoParagraph)?;
    let (levels, runs) = bidi.visual_runs(paragraph, paragraph.range.clone());

    let mut out = String::with_capacity(line.len());
    for run in runs {
        if run.start >= run.end {
            continue;
        }
        let level = levels.get(run.start).ok_or(ShaperError::MissingLevel(run.start))?;
        let segment = &line[run.clone()];
        if level.is_rtl() {
            push_reversed(&mut out, segment);
        } else {
            out.push_str(segment);
        }
    }
    Ok(out)
}

/// Reverses a right-to-left run cluster by cluster so combining marks stay
/// after their base letter, mirroring paired punctuation.
fn push_reversed(out: &mut String, segment: &str) {
    let mut clusters: Vec<String> = Vec::new();
    for ch in segment.chars() {
        match clusters.last_mut() {
            Some(cluster) if joining::is_transparent(ch) => cluster.push(ch),
            _ => clusters.push(mirror(ch).to_string()),
        }
    }
    for cluster in clusters.iter().rev() {
        out.push_str(cluster);
    }
}

fn mirror(ch: char) -> char {
    match ch {
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '<' => '>',
        '>' => '<',
        '«' => '»',
        '»' => '«',
        other => other,
    }
}
