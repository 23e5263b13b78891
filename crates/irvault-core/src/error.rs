//! Error types module
//!
//! All errors are unified under the `AppError` enum which can represent
//! database, storage, secret-resolution, and request-level failures.

use sqlx::Error as SqlxError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Secret resolution error: {0}")]
    Secret(String),

    #[error("Processor notification error: {0}")]
    Notify(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code this error maps to.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::InvalidInput(_) => 400,
            AppError::Unauthorized(_) => 401,
            AppError::Database(_)
            | AppError::Storage(_)
            | AppError::Secret(_)
            | AppError::Notify(_)
            | AppError::Internal(_) => 500,
        }
    }

    /// Message safe to return to the caller. Never a stack trace, only the
    /// error's display text.
    pub fn client_message(&self) -> String {
        self.to_string()
    }
}

impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidInput("no file".into()).http_status_code(),
            400
        );
        assert_eq!(
            AppError::Unauthorized("bad key".into()).http_status_code(),
            401
        );
        assert_eq!(AppError::Storage("drive down".into()).http_status_code(), 500);
        assert_eq!(AppError::Internal("boom".into()).http_status_code(), 500);
    }

    #[test]
    fn test_client_message_is_display_text() {
        let err = AppError::Storage("upload rejected".into());
        assert_eq!(err.client_message(), "Storage error: upload rejected");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let app: AppError = io_err.into();
        match app {
            AppError::Internal(msg) => assert!(msg.contains("missing")),
            _ => panic!("Expected Internal variant"),
        }
    }
}
