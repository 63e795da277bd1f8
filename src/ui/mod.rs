//! Line-oriented front-end: a numbered menu read from any `BufRead` and
//! written to any `Write`, so the same loop drives the terminal and the tests.

mod app;
mod helpers;
mod menu;

pub use app::App;
pub use helpers::render_table;
pub use menu::{MenuChoice, SearchCriterion, MENU_TEXT, SEARCH_MENU_TEXT};
