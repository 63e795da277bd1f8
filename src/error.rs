//! Error types shared by the record codec, the flat-file store, and the
//! catalog. Input errors double as the user-facing messages printed by the
//! menu loop, so their `Display` text is written for people, not logs.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A single line of the data file could not be turned into a [`Book`].
///
/// [`Book`]: crate::models::Book
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The line did not split into exactly five fields.
    #[error("expected 5 fields separated by '|', found {0}")]
    FieldCount(usize),
    /// The id is not a positive integer.
    #[error("invalid book id {0:?}")]
    Id(String),
    #[error("invalid publication year {0:?}")]
    Year(String),
    /// Neither `available` nor `checked-out`.
    #[error("unknown status {0:?}")]
    Status(String),
}

/// Rejected user input. Nothing is mutated when one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Title cannot be empty!")]
    EmptyTitle,
    #[error("Author cannot be empty!")]
    EmptyAuthor,
    #[error("{0} cannot contain the '|' character!")]
    Separator(&'static str),
    #[error("Year must be a number!")]
    YearNotNumeric,
    #[error("Year cannot be negative or exceed the current year ({max})!")]
    YearOutOfRange { year: i64, max: i32 },
    #[error("ID must be a number!")]
    IdNotNumeric,
    #[error("Invalid status. Use 'available' or 'checked-out'.")]
    Status(String),
    #[error("Invalid choice!")]
    Criterion(String),
}

/// Failures of the flat data file. Every variant names the file involved so
/// the message is useful without further context.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but could not be read, for example because it is not
    /// valid UTF-8 or permissions forbid it. A missing file is not an error.
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    /// Writing, syncing, or renaming the new content failed.
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    /// The directory that should hold the data file could not be created.
    #[error("failed to create data directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    /// A line did not decode while loading with [`MalformedPolicy::Fail`].
    ///
    /// [`MalformedPolicy::Fail`]: crate::store::MalformedPolicy::Fail
    #[error("malformed record on line {line} of {path}: {source}")]
    Malformed {
        path: PathBuf,
        /// 1-based line number within the file.
        line: usize,
        source: RecordError,
    },
}

/// Reasons a catalog operation did not go through. The in-memory catalog is
/// unchanged whenever one of these is returned.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No book carries the requested id.
    #[error("No book with ID {0} was found.")]
    NotFound(u32),
    /// The data file was unreadable at startup, so writing it back could
    /// destroy records that were never loaded.
    #[error("the data file could not be loaded, so changes are disabled")]
    ReadOnly,
    /// Persisting the change failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for flat-file operations.
pub type StoreResult<T> = Result<T, StoreError>;
/// Result alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
