//! Progress Error Types

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    #[error("Current step larger than the maximum: {value}>{maximum}")]
    OutOfRange { value: u64, maximum: u64 },
}

pub type ProgressResult<T> = Result<T, ProgressError>;
