use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskpadError {
    #[error("task title cannot be empty")]
    EmptyTitle,

    #[error("could not parse task file '{0}'")]
    Corrupt(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TaskpadError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::Corrupt(_) => "store_corrupt",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskpadError>;
