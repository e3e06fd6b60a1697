//! Process-wide manager with an explicit create/destroy lifecycle.
//!
//! Optional layer over [`LogManager`] for code that cannot thread a context
//! object through. Every call takes the same lock, so concurrent callers are
//! serialized.

use parking_lot::{Mutex, const_mutex};
use tracing::info;

use crate::error::LogError;
use crate::manager::LogManager;

static GLOBAL: Mutex<Option<LogManager>> = const_mutex(None);

pub fn create() -> Result<(), LogError> {
    let mut guard = GLOBAL.lock();
    if guard.is_some() {
        return Err(LogError::AlreadyInitialized);
    }
    *guard = Some(LogManager::new());
    info!("Global log manager created");
    Ok(())
}

/// Tears the global instance down and returns it.
pub fn destroy() -> Result<LogManager, LogError> {
    let manager = GLOBAL.lock().take().ok_or(LogError::NotInitialized)?;
    info!("Global log manager destroyed");
    Ok(manager)
}

pub fn is_initialized() -> bool {
    GLOBAL.lock().is_some()
}

/// Runs `f` against the global manager while holding its lock.
///
/// `f` must not call back into this module; the lock is not reentrant.
pub fn with_manager<R>(f: impl FnOnce(&mut LogManager) -> R) -> Result<R, LogError> {
    let mut guard = GLOBAL.lock();
    let manager = guard.as_mut().ok_or(LogError::NotInitialized)?;
    Ok(f(manager))
}
