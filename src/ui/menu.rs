//! Menu texts and the parsing of menu selections. Choices are typed as a
//! single digit, so anything else is simply not a choice and the caller decides
//! how to complain about it.

use crate::error::InputError;

/// Main menu, printed before every "Choose an action" prompt.
pub const MENU_TEXT: &str = "\n1. Add book\n2. Delete book\n3. Search books\n4. Display all books\n5. Change book status\n6. Exit";

/// Sub-menu shown when the user picks "Search books".
pub const SEARCH_MENU_TEXT: &str = "Search by:\n1. Title\n2. Author\n3. Year";

/// Top-level menu entries, selected by their digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// `1`: prompt for title, author, and year.
    Add,
    /// `2`: list the catalog, then prompt for the id to remove.
    Delete,
    /// `3`: pick a criterion, then the value to look for.
    Search,
    /// `4`: print every book.
    List,
    /// `5`: prompt for an id, then the new status.
    ChangeStatus,
    /// `6`: say goodbye and leave the loop.
    Exit,
}

impl MenuChoice {
    /// Map the trimmed answer to a choice; `None` for anything but `1`..`6`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::Delete),
            "3" => Some(MenuChoice::Search),
            "4" => Some(MenuChoice::List),
            "5" => Some(MenuChoice::ChangeStatus),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Field a search runs against, picked from [`SEARCH_MENU_TEXT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchCriterion {
    /// Substring of the title, ignoring case.
    Title,
    /// Substring of the author, ignoring case.
    Author,
    /// Exact publication year.
    Year,
}

impl SearchCriterion {
    /// Unlike the main menu, a bad criterion aborts the search with a message.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        match raw.trim() {
            "1" => Ok(SearchCriterion::Title),
            "2" => Ok(SearchCriterion::Author),
            "3" => Ok(SearchCriterion::Year),
            other => Err(InputError::Criterion(other.to_string())),
        }
    }

    /// Prompt asking for the value to search for.
    pub fn prompt(self) -> &'static str {
        match self {
            SearchCriterion::Title => "Enter title: ",
            SearchCriterion::Author => "Enter author: ",
            SearchCriterion::Year => "Enter year: ",
        }
    }
}
