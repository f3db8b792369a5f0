//! Synchronization utilities for robust mutex handling
//!
//! Lock poisoning is mapped into the caller's error type instead of
//! unwrapping, so a panic on one thread never cascades into another.

use std::sync::{LockResult, MutexGuard};

/// Handle poisoned mutex cases with consistent error handling
///
/// # Arguments
/// * `result` - The result from a mutex lock operation
/// * `error_constructor` - Function to create the appropriate error type
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use guikit::core::sync::handle_mutex_poison;
/// use guikit::threads::api::ThreadError;
///
/// let mutex = Mutex::new(42);
/// let guard = handle_mutex_poison(mutex.lock(), |message| ThreadError::Poisoned { message })
///     .unwrap();
/// assert_eq!(*guard, 42);
/// ```
pub fn handle_mutex_poison<'a, T, E>(
    result: LockResult<MutexGuard<'a, T>>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<MutexGuard<'a, T>, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (mutex poisoned). This indicates a panic occurred while holding a lock. PoisonError: {:?}",
            poison_err
        ))
    })
}

/// Take the guard out of a poisoned lock, logging the recovery
///
/// For cleanup paths that cannot report an error, such as handlers running
/// on the UI thread or `Drop` implementations.
pub fn recover_mutex<'a, T>(result: LockResult<MutexGuard<'a, T>>, context: &str) -> MutexGuard<'a, T> {
    result.unwrap_or_else(|poison_err| {
        log::warn!("Recovering poisoned lock in {}", context);
        poison_err.into_inner()
    })
}
