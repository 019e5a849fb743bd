use thiserror::Error;

/// Failures of the blob store boundary
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors returned by task operations. The `Display` text is shown to the user as a notice.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("할 일을 입력해주세요!")]
    EmptyText,

    #[error("날짜 형식이 올바르지 않습니다. (YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("저장하지 못했습니다: {0}")]
    Storage(#[from] StorageError),
}

impl TaskError {
    /// Storage failures happen after the in-memory change was made; validation failures before it.
    pub fn mutation_applied(&self) -> bool {
        matches!(self, TaskError::Storage(_))
    }
}
