pub mod color;
pub mod geometry;
pub mod ids;
pub mod model;
pub mod money;

pub use color::{Color, Palette, PaletteColor};
pub use geometry::{Margins, Orientation, PageSetup, PageSize, Rect, Size};
pub use ids::DocumentId;
pub use money::{format_amount, format_amount_plain};
