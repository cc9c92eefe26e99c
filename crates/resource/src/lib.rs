//! Asset providers for report templates.
//!
//! - [`FilesystemResourceProvider`]: assets under an injected root directory,
//!   with a per-process cache for assets every report draws (the logo).
//! - [`InMemoryResourceProvider`]: re-exported from `nuzum-traits`.

mod filesystem;

pub use filesystem::FilesystemResourceProvider;

pub use nuzum_traits::InMemoryResourceProvider;
