use crate::model::TaskStatus;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Task with ID ({0}) does not exist")]
    NotFound(u64),

    #[error("Status is already {0}")]
    StatusConflict(TaskStatus),

    #[error("Unable to read tasks file: {0}")]
    Load(String),

    #[error("Unable to save tasks file: {0}")]
    Save(String),

    #[error("{0}")]
    InvalidData(String),

    #[error("Task store not initialized. Call init() first.")]
    NotInitialized,
}

impl AppError {
    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_data<M: Into<String>>(message: M) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn load<M: Into<String>>(message: M) -> Self {
        Self::Load(message.into())
    }

    pub fn save<M: Into<String>>(message: M) -> Self {
        Self::Save(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::NotFound(_) => "not_found",
            Self::StatusConflict(_) => "status_conflict",
            Self::Load(_) => "load_error",
            Self::Save(_) => "save_error",
            Self::InvalidData(_) => "invalid_data",
            Self::NotInitialized => "not_initialized",
        }
    }
}
