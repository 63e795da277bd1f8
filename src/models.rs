//! Domain model for a catalog entry and its single-line text encoding.
//!
//! A book is stored as `id|title|author|year|status`. There is no escaping,
//! so input validation keeps the separator out of the free-text fields.

use std::fmt;
use std::str::FromStr;

use crate::error::RecordError;

/// Field separator used by the flat data file.
pub const SEPARATOR: char = '|';

const FIELD_COUNT: usize = 5;

/// Whether a book is on the shelf or lent out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BookStatus {
    #[default]
    Available,
    CheckedOut,
}

impl BookStatus {
    pub const ALL: [BookStatus; 2] = [BookStatus::Available, BookStatus::CheckedOut];

    /// The exact text written to the data file and accepted from the user.
    pub fn as_str(self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::CheckedOut => "checked-out",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| RecordError::Status(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One catalog entry. The `id` is assigned by the catalog and never edited.
pub struct Book {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub status: BookStatus,
}

impl Book {
    /// Build a freshly added book, which always starts out available.
    pub fn new(id: u32, title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            status: BookStatus::default(),
        }
    }

    /// Encode the book as one data-file line, without the trailing newline.
    pub fn to_line(&self) -> String {
        format!(
            "{id}{sep}{title}{sep}{author}{sep}{year}{sep}{status}",
            id = self.id,
            title = self.title,
            author = self.author,
            year = self.year,
            status = self.status,
            sep = SEPARATOR,
        )
    }

    /// Decode a data-file line. Trailing `\r`/`\n` are ignored so lines read
    /// from CRLF files decode the same as LF ones.
    pub fn from_line(line: &str) -> Result<Self, RecordError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let parts: Vec<&str> = line.split(SEPARATOR).collect();
        if parts.len() != FIELD_COUNT {
            return Err(RecordError::FieldCount(parts.len()));
        }

        let id = parts[0]
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| RecordError::Id(parts[0].to_string()))?;
        let year = parts[3]
            .trim()
            .parse::<i32>()
            .map_err(|_| RecordError::Year(parts[3].to_string()))?;
        let status = parts[4].parse::<BookStatus>()?;

        Ok(Self {
            id,
            title: parts[1].to_string(),
            author: parts[2].to_string(),
            year,
            status,
        })
    }
}

impl fmt::Display for Book {
    /// One listing row: id, title, author, year, status separated by spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.id, self.title, self.author, self.year, self.status
        )
    }
}
