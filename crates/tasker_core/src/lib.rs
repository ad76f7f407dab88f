pub mod config;
pub mod error;
pub mod model;
pub mod storage;
pub mod store;

pub use store::TaskStore;

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::model::TaskStatus;

    #[test]
    fn app_error_exposes_code_and_message() {
        let err = AppError::invalid_input("Description cannot be empty");
        assert_eq!(err.code(), "invalid_input");
        assert_eq!(err.to_string(), "Description cannot be empty");

        assert_eq!(AppError::NotFound(3).code(), "not_found");
        assert_eq!(
            AppError::StatusConflict(TaskStatus::Done).code(),
            "status_conflict"
        );
        assert_eq!(
            AppError::load("boom").to_string(),
            "Unable to read tasks file: boom"
        );
        assert_eq!(
            AppError::save("boom").to_string(),
            "Unable to save tasks file: boom"
        );
        assert_eq!(AppError::NotInitialized.code(), "not_initialized");
    }
}
