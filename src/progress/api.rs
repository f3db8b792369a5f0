//! Public API for progress reporting

pub use crate::progress::channel::{ProgressChannel, ProgressMessage};
pub use crate::progress::error::{ProgressError, ProgressResult};
pub use crate::progress::tracker::{LogSink, ProgressConfig, ProgressSink, ProgressTracker};
