//! Persistence module split across logical submodules.

mod flat_file;
mod location;

pub use flat_file::{FlatFileStore, LoadOutcome, MalformedPolicy};
pub use location::{default_data_path, DATA_DIR_NAME, DATA_FILE_NAME};
