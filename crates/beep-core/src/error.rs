use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while reading, converting and plotting beep data.
#[derive(Error, Debug)]
pub enum BeepError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data row had fewer than the three positional fields.
    #[error("Malformed row at line {line}: expected at least 3 fields, found {fields}")]
    MalformedRow { line: usize, fields: usize },

    /// A `May` date carried none of the recognised ordinal suffixes.
    #[error("Unrecognised ordinal date: {0}")]
    UnrecognizedOrdinal(String),

    /// A canonical date string could not be read as `D/M/YY`.
    #[error("Invalid date format: {0}")]
    DateParse(String),

    /// A clock time could not be read as `HH:MM`.
    #[error("Invalid time format: {0}")]
    TimeParse(String),

    /// Two distinct date strings resolved to the same day offset.
    #[error("Dates {first} and {second} both resolve to day {day}")]
    DuplicateDay {
        first: String,
        second: String,
        day: String,
    },

    /// A figure could not be encoded or written.
    #[error("Failed to render {path}: {message}")]
    Render { path: PathBuf, message: String },

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the beep crates.
pub type Result<T> = std::result::Result<T, BeepError>;
