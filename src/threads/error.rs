//! Thread Bridge Error Types

use std::thread::ThreadId;

#[derive(Debug, thiserror::Error)]
pub enum ThreadError {
    /// The identity was never submitted to this pool, or has been evicted
    #[error("Thread with id {ident:?} is not in the ThreadPool.")]
    NotFound { ident: ThreadId },

    #[error("Failed to spawn worker thread '{name}': {cause}")]
    SpawnFailed { name: String, cause: String },

    /// The event loop of the main window is gone
    #[error("Main window '{title}' is closed; event could not be posted")]
    WindowClosed { title: String },

    #[error("{message}")]
    Poisoned { message: String },
}

/// Result type for thread bridge operations
pub type ThreadResult<T> = Result<T, ThreadError>;
