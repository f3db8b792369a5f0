//! Task Bridge Module
//!
//! Runs work on background threads and delivers each outcome back to the UI
//! thread through the main window's event loop.

// Internal modules - all access should go through api module
pub(crate) mod error;
pub(crate) mod events;
pub(crate) mod pool;
pub(crate) mod worker;

// Public API module - the only public interface for the task bridge
pub mod api;

#[cfg(test)]
mod tests;
