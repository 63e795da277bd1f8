//! Core library surface for the book catalog application.
//!
//! The binary only wires these pieces together; tests drive the same catalog
//! and menu loop against temporary files and in-memory streams. Layers depend
//! downward only: `ui` talks to `catalog`, `catalog` to `store`, and `store`
//! to `models`.
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod ui;
pub mod validate;

/// The in-memory catalog and its operations; what `main.rs` opens at startup.
pub use catalog::{Catalog, LoadReport, SearchQuery};

/// Command-line parsing and the settings resolved from it.
pub use config::{Cli, Settings};

/// Error types surfaced by the codec, the store, and the catalog.
pub use error::{CatalogError, InputError, RecordError, StoreError};

/// The domain types every other layer passes around.
pub use models::{Book, BookStatus};

/// Flat-file persistence used to back a [`Catalog`].
pub use store::{FlatFileStore, MalformedPolicy};

/// The interactive menu loop.
pub use ui::App;
