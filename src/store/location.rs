use std::path::PathBuf;

use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
pub const DATA_DIR_NAME: &str = ".book-catalog";
/// Flat data file name stored inside the application data directory.
pub const DATA_FILE_NAME: &str = "library_data.txt";

/// Resolve the default location of the data file inside the user's home.
/// Without a home directory the bare file name is used, relative to the
/// working directory.
pub fn default_data_path() -> PathBuf {
    match BaseDirs::new() {
        Some(base_dirs) => base_dirs.home_dir().join(DATA_DIR_NAME).join(DATA_FILE_NAME),
        None => {
            log::warn!("could not locate home directory, using ./{DATA_FILE_NAME}");
            PathBuf::from(DATA_FILE_NAME)
        }
    }
}
