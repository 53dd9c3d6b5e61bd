use std::path::PathBuf;

use thiserror::Error;

/// Failure to read the notes file. The store stays usable with whatever it held before.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed notes file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to persist the notes file. In-memory notes remain authoritative.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Index {index} out of range for {len} notes")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("empty rich-text buffer")]
    Empty,

    #[error("not an RTF document")]
    NotRtf,

    #[error("unbalanced group at byte {0}")]
    UnbalancedGroup(usize),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("malformed RTF at byte {0}")]
    Malformed(usize),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("Settings error: {0}")]
    Settings(String),
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
    fn test_error_display() {
        let err = AppError::Settings("invalid log level".to_string());
        assert_eq!(err.to_string(), "Settings error: invalid log level");

        let err: AppError = IndexError { index: 3, len: 2 }.into();
        assert_eq!(err.to_string(), "Index 3 out of range for 2 notes");

        assert_eq!(DecodeError::UnbalancedGroup(7).to_string(), "unbalanced group at byte 7");
    }

    #[test]
    fn test_load_error_names_path() {
        let err = LoadError::Io {
            path: PathBuf::from("/tmp/notes.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/notes.json"));
        assert!(msg.contains("denied"));
    }
}
