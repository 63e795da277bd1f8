use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{StoreError, StoreResult};
use crate::models::{Book, SEPARATOR};

/// What to do with a data-file line that does not decode into a book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Abort the whole load, leaving the file untouched.
    #[default]
    Fail,
    /// Drop the line with a warning and keep loading.
    Skip,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No data file yet; a new one appears with the first save.
    Missing,
    Loaded {
        books: Vec<Book>,
        /// Lines dropped under [`MalformedPolicy::Skip`].
        skipped: usize,
        /// Highest id still readable on a dropped line, or 0. The line stays
        /// on disk until the next rewrite, so its id is not free yet.
        highest_skipped_id: u32,
    },
}

/// Line-per-record text file holding the whole catalog. No handle is kept
/// open between calls; every operation opens, uses, and drops its own.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    path: PathBuf,
}

impl FlatFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every non-blank line in file order.
    pub fn load(&self, policy: MalformedPolicy) -> StoreResult<LoadOutcome> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("data file {} does not exist yet", self.path.display());
                return Ok(LoadOutcome::Missing);
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let mut books = Vec::new();
        let mut skipped = 0;
        let mut highest_skipped_id = 0;
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match Book::from_line(line) {
                Ok(book) => books.push(book),
                Err(source) => match policy {
                    MalformedPolicy::Fail => {
                        return Err(StoreError::Malformed {
                            path: self.path.clone(),
                            line: index + 1,
                            source,
                        })
                    }
                    MalformedPolicy::Skip => {
                        log::warn!(
                            "skipping line {} of {}: {source}",
                            index + 1,
                            self.path.display()
                        );
                        skipped += 1;
                        if let Some(id) = leading_id(line) {
                            highest_skipped_id = highest_skipped_id.max(id);
                        }
                    }
                },
            }
        }

        log::info!(
            "loaded {} books from {}",
            books.len(),
            self.path.display()
        );
        Ok(LoadOutcome::Loaded {
            books,
            skipped,
            highest_skipped_id,
        })
    }

    /// Replace the file with `books`, one line each. The new content goes to a
    /// temporary file in the same directory that is then renamed over the
    /// target, so readers only ever see the old or the new catalog.
    pub fn save_all(&self, books: &[Book]) -> StoreResult<()> {
        let dir = self.ensure_parent_dir()?;

        let mut contents = String::new();
        for book in books {
            contents.push_str(&book.to_line());
            contents.push('\n');
        }

        let mut temp = NamedTempFile::new_in(&dir).map_err(|source| self.write_error(source))?;
        temp.write_all(contents.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|source| self.write_error(source))?;
        temp.persist(&self.path)
            .map_err(|err| self.write_error(err.error))?;

        log::info!("saved {} books to {}", books.len(), self.path.display());
        Ok(())
    }

    /// Add one line to the end of the file without touching existing lines.
    pub fn append(&self, book: &Book) -> StoreResult<()> {
        self.ensure_parent_dir()?;

        let mut line = String::new();
        if self.lacks_trailing_newline()? {
            line.push('\n');
        }
        line.push_str(&book.to_line());
        line.push('\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()))
            .map_err(|source| self.write_error(source))?;

        log::info!("appended book {} to {}", book.id, self.path.display());
        Ok(())
    }

    /// A hand-edited file may end without `\n`; appending straight after it
    /// would glue two records together.
    fn lacks_trailing_newline(&self) -> StoreResult<bool> {
        let read_error = |source| StoreError::Read {
            path: self.path.clone(),
            source,
        };

        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(source) => return Err(read_error(source)),
        };
        if file.metadata().map_err(read_error)?.len() == 0 {
            return Ok(false);
        }

        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))
            .and_then(|_| file.read_exact(&mut last))
            .map_err(read_error)?;
        Ok(last[0] != b'\n')
    }

    /// Create the directory holding the data file and return it.
    fn ensure_parent_dir(&self) -> StoreResult<PathBuf> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|source| StoreError::CreateDir {
                path: dir.clone(),
                source,
            })?;
            log::info!("created data directory {}", dir.display());
        }
        Ok(dir)
    }

    fn write_error(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

/// The id field of a line that failed to decode, if it is still a number.
fn leading_id(line: &str) -> Option<u32> {
    line.split(SEPARATOR)
        .next()
        .and_then(|field| field.trim().parse::<u32>().ok())
}
