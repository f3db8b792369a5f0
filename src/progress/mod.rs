//! Progress Module
//!
//! Throttled progress reporting with broadcast update and abort channels.

pub(crate) mod channel;
pub(crate) mod error;
pub(crate) mod tracker;

pub mod api;
