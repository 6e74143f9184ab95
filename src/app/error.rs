use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("could not save {path}: {source}")]
    Save {
        path: String,
        source: std::io::Error,
    },
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_open_error_display() {
        let err = AppError::Open {
            path: "/tmp/notes.txt".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "could not open /tmp/notes.txt: denied");
    }

    #[test]
    fn test_save_error_display() {
        let err = AppError::Save {
            path: "out.txt".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::WriteZero, "disk full"),
        };
        assert!(err.to_string().starts_with("could not save out.txt"));
    }
}
