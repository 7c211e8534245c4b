//! Dataset output error types.

use derive_more::{Display, Error};

/// What went wrong while producing a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DatasetErrorKind {
    /// The destination file could not be created.
    #[display("cannot create {}: {}", path, message)]
    Create {
        /// Destination path as given.
        path: String,
        /// Underlying I/O error.
        message: String,
    },

    /// Writing or flushing a record failed.
    #[display("cannot write record: {}", _0)]
    Write(String),
}

/// Dataset error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Dataset error: {} at {}:{}", kind, file, line)]
pub struct DatasetError {
    /// Error category and detail.
    #[error(not(source))]
    pub kind: DatasetErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DatasetError {
    /// Creates a new dataset error with caller location tracking.
    #[track_caller]
    pub fn new(kind: DatasetErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for DatasetError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(DatasetErrorKind::Write(err.to_string()))
    }
}
