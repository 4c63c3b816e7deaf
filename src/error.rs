use thiserror::Error;

/// Failure taxonomy for task operations. The display strings for
/// `ValidationFailed` and `NotFound` double as the wire error messages.
#[derive(Debug, Error, PartialEq)]
pub enum TaskError {
    /// The submitted title was empty after trimming.
    #[error("Task title is required")]
    ValidationFailed,

    /// No task with the requested id exists.
    #[error("Task not found")]
    NotFound,

    /// The persistence backend could not be read or written. Absorbed at the
    /// storage boundary; never reaches repository callers.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}
