//! Font discovery and selection for the report renderers.
//!
//! A [`FontRegistry`] scans a fonts directory once, validates each TrueType
//! face, and selects the Arabic-capable family the PDF adapters embed. When
//! no such face exists it reports degraded mode and templates switch to their
//! Latin variants.
//!
//! [`register_once`] keeps one registry per process.

mod error;
mod face;
mod global;
mod registry;

pub use error::FontError;
pub use face::FontFace;
pub use global::{global, register_once};
#[cfg(feature = "test-hooks")]
pub use global::reset_for_tests;
pub use registry::{FontOptions, FontRegistry, FontSet, BUILTIN_FONT_NAME, PRIMARY_ARABIC, SECONDARY_ARABIC};
