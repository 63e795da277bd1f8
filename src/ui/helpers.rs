use crossterm::style::Stylize;

use crate::error::CatalogError;
use crate::models::Book;

/// Width of the rule printed under the listing header.
const RULE_WIDTH: usize = 60;

/// Render books as the listing table: a header, a rule, then one row per book
/// with id, title, author, year, and status in that order.
pub fn render_table<'a>(books: impl IntoIterator<Item = &'a Book>) -> String {
    let mut table = String::from("ID Title Author Year Status\n");
    table.push_str(&"-".repeat(RULE_WIDTH));
    table.push('\n');
    for book in books {
        table.push_str(&book.to_string());
        table.push('\n');
    }
    table
}

/// Severity of a message printed back to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    pub(crate) fn paint(self, text: &str, color: bool) -> String {
        if !color {
            return text.to_string();
        }
        match self {
            StatusKind::Info => text.green().to_string(),
            StatusKind::Error => text.red().to_string(),
        }
    }
}

/// Message shown when an operation fails after its input was accepted.
pub(crate) fn surface_error(err: &CatalogError) -> String {
    match err {
        CatalogError::NotFound(_) => "No book with the given ID was found.".to_string(),
        CatalogError::ReadOnly => {
            "The data file could not be loaded, so the catalog cannot be changed this session."
                .to_string()
        }
        CatalogError::Store(store) => format!("Failed to save data: {store}"),
    }
}
