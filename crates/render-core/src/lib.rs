//! Renderer-agnostic document primitives.
//!
//! - [`DocumentRenderer`]: what an output backend (adapter) must provide.
//! - [`Document`]: flow layout of headers, RTL tables, paragraphs, images
//!   and footers on top of any adapter.
//! - [`RenderOutcome`]: how a render ended, always with usable bytes.
//! - [`RecordingRenderer`]: an adapter that records display lists for tests.

mod document;
mod error;
mod outcome;
mod recording;
mod traits;
mod types;
pub mod utils;

pub use document::{
    Badge, Cell, ColumnSpec, Document, FooterInfo, HeaderSpec, ParagraphStyle, RowStyle, TableRow,
    TableSpec,
};
pub use error::RenderError;
pub use outcome::RenderOutcome;
pub use recording::{RecordedPages, RecordingRenderer};
pub use traits::DocumentRenderer;
pub use types::{AdapterKind, Align, DrawOp, FontRole, TextRun};
