//! The process-wide registry.
//!
//! PDF engines keep fonts in a table keyed by logical name, so the registry is
//! initialized once and only read afterwards.

use crate::registry::{FontOptions, FontRegistry};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

static GLOBAL: Mutex<Option<Arc<FontRegistry>>> = Mutex::new(None);

fn lock() -> MutexGuard<'static, Option<Arc<FontRegistry>>> {
    // The guarded value is only ever replaced whole, so a poisoned lock still holds a usable state.
    GLOBAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Loads the registry on first call; later calls return the same instance and
/// ignore their arguments. Concurrent first callers serialize on the guard.
pub fn register_once(fonts_dir: impl AsRef<Path>, options: &FontOptions) -> Arc<FontRegistry> {
    let mut slot = lock();
    if let Some(existing) = slot.as_ref() {
        log::debug!("Font registry already initialized; reusing it");
        return Arc::clone(existing);
    }
    let registry = Arc::new(FontRegistry::load(fonts_dir, options));
    *slot = Some(Arc::clone(&registry));
    registry
}

/// The registry, if [`register_once`] has run.
pub fn global() -> Option<Arc<FontRegistry>> {
    lock().clone()
}

/// Drops the process-wide registry so the next [`register_once`] reloads.
#[cfg(any(test, feature = "test-hooks"))]
pub fn reset_for_tests() {
    *lock() = None;
}
