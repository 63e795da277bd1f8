//! In-memory catalog mirrored to the flat data file. Every mutation is
//! persisted before it returns; if persisting fails the in-memory change is
//! rolled back so memory and disk never disagree. A catalog whose file could
//! not be read is read-only, since writing would clobber records it never saw.

use crate::error::{CatalogError, CatalogResult, StoreError, StoreResult};
use crate::models::{Book, BookStatus};
use crate::store::{FlatFileStore, LoadOutcome, MalformedPolicy};

/// How the catalog came up, so the caller can tell the user.
#[derive(Debug)]
pub enum LoadReport {
    /// No data file yet; the catalog starts empty.
    Missing,
    /// `count` books loaded, `skipped` malformed lines dropped.
    Loaded { count: usize, skipped: usize },
    /// The file exists but could not be read; the session starts empty and
    /// read-only.
    Degraded(StoreError),
}

/// Search criteria offered by the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Case-insensitive substring of the title.
    Title(String),
    /// Case-insensitive substring of the author.
    Author(String),
    Year(i32),
}

impl SearchQuery {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            SearchQuery::Title(needle) => contains_ignore_case(&book.title, needle),
            SearchQuery::Author(needle) => contains_ignore_case(&book.author, needle),
            SearchQuery::Year(year) => book.year == *year,
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug)]
pub struct Catalog {
    books: Vec<Book>,
    store: FlatFileStore,
    /// Ids still present on disk in lines that were skipped at load time.
    reserved_id: u32,
    read_only: bool,
}

impl Catalog {
    /// Load the catalog from `store`. A missing file or an unreadable one
    /// yields an empty catalog, the latter read-only; a malformed line is
    /// fatal unless `policy` says to skip it.
    pub fn open(store: FlatFileStore, policy: MalformedPolicy) -> StoreResult<(Self, LoadReport)> {
        let mut catalog = Self {
            books: Vec::new(),
            store,
            reserved_id: 0,
            read_only: false,
        };
        let report = match catalog.store.load(policy) {
            Ok(LoadOutcome::Missing) => LoadReport::Missing,
            Ok(LoadOutcome::Loaded {
                books,
                skipped,
                highest_skipped_id,
            }) => {
                catalog.books = books;
                catalog.reserved_id = highest_skipped_id;
                LoadReport::Loaded {
                    count: catalog.books.len(),
                    skipped,
                }
            }
            Err(err @ StoreError::Read { .. }) => {
                log::warn!("starting with an empty, read-only catalog: {err}");
                catalog.read_only = true;
                LoadReport::Degraded(err)
            }
            Err(err) => return Err(err),
        };
        Ok((catalog, report))
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn store(&self) -> &FlatFileStore {
        &self.store
    }

    /// True when the data file could not be read at startup.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// One past the highest id in use, or 1 for an empty catalog. Ids on
    /// skipped lines count as in use.
    pub fn next_id(&self) -> u32 {
        self.books
            .iter()
            .map(|book| book.id)
            .max()
            .unwrap_or(0)
            .max(self.reserved_id)
            + 1
    }

    pub fn find(&self, id: u32) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Add an already validated book. The file mirrors the in-memory list
    /// before the call, so one appended line is enough to persist it.
    pub fn add(&mut self, title: String, author: String, year: i32) -> CatalogResult<&Book> {
        self.ensure_writable()?;
        let book = Book::new(self.next_id(), title, author, year);
        self.store.append(&book)?;
        log::debug!("added book {} ({})", book.id, book.title);
        self.books.push(book);
        Ok(&self.books[self.books.len() - 1])
    }

    /// Remove the book with `id` and rewrite the file.
    pub fn delete(&mut self, id: u32) -> CatalogResult<Book> {
        self.ensure_writable()?;
        let index = self.position(id)?;
        let removed = self.books.remove(index);
        if let Err(err) = self.store.save_all(&self.books) {
            self.books.insert(index, removed);
            return Err(err.into());
        }
        log::debug!("deleted book {id}");
        Ok(removed)
    }

    /// Set the status of the book with `id` and rewrite the file.
    pub fn set_status(&mut self, id: u32, status: BookStatus) -> CatalogResult<&Book> {
        self.ensure_writable()?;
        let index = self.position(id)?;
        let previous = std::mem::replace(&mut self.books[index].status, status);
        if let Err(err) = self.store.save_all(&self.books) {
            self.books[index].status = previous;
            return Err(err.into());
        }
        log::debug!("book {id} is now {status}");
        Ok(&self.books[index])
    }

    /// Every matching book, in catalog order.
    pub fn search(&self, query: &SearchQuery) -> Vec<&Book> {
        self.books.iter().filter(|book| query.matches(book)).collect()
    }

    fn ensure_writable(&self) -> CatalogResult<()> {
        if self.read_only {
            Err(CatalogError::ReadOnly)
        } else {
            Ok(())
        }
    }

    fn position(&self, id: u32) -> CatalogResult<usize> {
        self.books
            .iter()
            .position(|book| book.id == id)
            .ok_or(CatalogError::NotFound(id))
    }
}
