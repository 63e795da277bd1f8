use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::catalog::{Catalog, LoadReport, SearchQuery};
use crate::error::{CatalogError, InputError};
use crate::validate;

use super::helpers::{render_table, surface_error, StatusKind};
use super::menu::{MenuChoice, SearchCriterion, MENU_TEXT, SEARCH_MENU_TEXT};

const FAREWELL: &str = "You have exited the program.\nThank you for using the book catalog, we hope to see you again!";

/// Interactive session state: the catalog plus the streams the menu talks to.
pub struct App<R, W> {
    catalog: Catalog,
    input: R,
    output: W,
    color: bool,
    current_year: i32,
    /// Set once the input stream is exhausted; the loop stops after the
    /// current operation.
    closed: bool,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(catalog: Catalog, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
            color: false,
            current_year: validate::current_year(),
            closed: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Override the upper bound for publication years.
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// End the session, handing back the catalog and the output stream.
    pub fn into_parts(self) -> (Catalog, W) {
        (self.catalog, self.output)
    }

    /// Tell the user how loading went.
    pub fn report_load(&mut self, report: &LoadReport) -> Result<()> {
        match report {
            LoadReport::Missing => self.info(
                "Data file not found. A new file will be created when books are added.",
            ),
            LoadReport::Loaded { skipped: 0, .. } => Ok(()),
            LoadReport::Loaded { skipped, .. } => {
                self.error(&format!("Skipped {skipped} unreadable line(s) in the data file."))
            }
            LoadReport::Degraded(err) => self.error(&format!("Failed to load data: {err}")),
        }
    }

    /// Show the menu and dispatch choices until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        while !self.closed {
            self.line(MENU_TEXT)?;
            let Some(raw) = self.prompt("Choose an action: ")? else {
                break;
            };

            let Some(choice) = MenuChoice::parse(&raw) else {
                self.error("Invalid choice. Please try again.")?;
                continue;
            };
            log::debug!("menu choice {choice:?}");

            match choice {
                MenuChoice::Add => self.add_book()?,
                MenuChoice::Delete => self.delete_book()?,
                MenuChoice::Search => self.search_books()?,
                MenuChoice::List => self.display_all()?,
                MenuChoice::ChangeStatus => self.change_status()?,
                MenuChoice::Exit => {
                    self.line(FAREWELL)?;
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    fn add_book(&mut self) -> Result<()> {
        if self.catalog.is_read_only() {
            return self.fail(&CatalogError::ReadOnly);
        }
        let Some(raw) = self.prompt("Enter book title: ")? else {
            return Ok(());
        };
        let title = match validate::title(&raw) {
            Ok(title) => title,
            Err(err) => return self.reject(err),
        };

        let Some(raw) = self.prompt("Enter book author: ")? else {
            return Ok(());
        };
        let author = match validate::author(&raw) {
            Ok(author) => author,
            Err(err) => return self.reject(err),
        };

        let Some(raw) = self.prompt("Enter publication year: ")? else {
            return Ok(());
        };
        let year = match validate::year(&raw, self.current_year) {
            Ok(year) => year,
            Err(err) => return self.reject(err),
        };

        match self.catalog.add(title, author, year) {
            Ok(book) => {
                let message = format!("Book '{}' added with ID {}.", book.title, book.id);
                self.info(&message)
            }
            Err(err) => self.fail(&err),
        }
    }

    fn delete_book(&mut self) -> Result<()> {
        if self.catalog.is_read_only() {
            return self.fail(&CatalogError::ReadOnly);
        }
        self.display_all()?;
        let Some(raw) = self.prompt("Enter the ID of the book to delete: ")? else {
            return Ok(());
        };
        let id = match validate::id(&raw) {
            Ok(id) => id,
            Err(err) => return self.reject(err),
        };

        match self.catalog.delete(id) {
            Ok(book) => self.info(&format!(
                "Book with ID {} titled '{}' deleted.",
                book.id, book.title
            )),
            Err(err) => self.fail(&err),
        }
    }

    fn search_books(&mut self) -> Result<()> {
        self.line(SEARCH_MENU_TEXT)?;
        let Some(raw) = self.prompt("Choose a search criterion: ")? else {
            return Ok(());
        };
        let criterion = match SearchCriterion::parse(&raw) {
            Ok(criterion) => criterion,
            Err(err) => return self.reject(err),
        };

        let Some(raw) = self.prompt(criterion.prompt())? else {
            return Ok(());
        };
        let query = match criterion {
            SearchCriterion::Title => SearchQuery::Title(raw.trim().to_string()),
            SearchCriterion::Author => SearchQuery::Author(raw.trim().to_string()),
            SearchCriterion::Year => match validate::search_year(&raw) {
                Ok(year) => SearchQuery::Year(year),
                Err(err) => return self.reject(err),
            },
        };

        let table = {
            let hits = self.catalog.search(&query);
            if hits.is_empty() {
                None
            } else {
                Some(render_table(hits))
            }
        };
        match table {
            Some(table) => self.write(&table),
            None => self.line("No books found."),
        }
    }

    fn display_all(&mut self) -> Result<()> {
        if self.catalog.is_empty() {
            return self.line("The library is empty.");
        }
        let table = render_table(self.catalog.books());
        self.write(&table)
    }

    fn change_status(&mut self) -> Result<()> {
        if self.catalog.is_read_only() {
            return self.fail(&CatalogError::ReadOnly);
        }
        let Some(raw) = self.prompt("Enter book ID: ")? else {
            return Ok(());
        };
        let id = match validate::id(&raw) {
            Ok(id) => id,
            Err(err) => return self.reject(err),
        };
        if self.catalog.find(id).is_none() {
            return self.fail(&CatalogError::NotFound(id));
        }

        let Some(raw) = self.prompt("Enter new status ('available' or 'checked-out'): ")? else {
            return Ok(());
        };
        let status = match validate::status(&raw) {
            Ok(status) => status,
            Err(err) => return self.reject(err),
        };

        match self.catalog.set_status(id, status) {
            Ok(_) => self.info(&format!("Status of book with ID {id} updated to '{status}'.")),
            Err(err) => self.fail(&err),
        }
    }

    /// Print `label`, then read one line. `None` means the input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        self.write(label)?;
        self.output.flush().context("failed to flush output")?;

        let mut buffer = String::new();
        let read = self
            .input
            .read_line(&mut buffer)
            .context("failed to read input")?;
        if read == 0 {
            self.closed = true;
            self.line("")?;
            return Ok(None);
        }
        Ok(Some(buffer.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn reject(&mut self, err: InputError) -> Result<()> {
        log::debug!("rejected input: {err:?}");
        self.error(&err.to_string())
    }

    fn fail(&mut self, err: &CatalogError) -> Result<()> {
        if let CatalogError::Store(store) = err {
            log::error!("{store}");
        }
        self.error(&surface_error(err))
    }

    fn info(&mut self, text: &str) -> Result<()> {
        let painted = StatusKind::Info.paint(text, self.color);
        self.line(&painted)
    }

    fn error(&mut self, text: &str) -> Result<()> {
        let painted = StatusKind::Error.paint(text, self.color);
        self.line(&painted)
    }

    fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}").context("failed to write output")
    }

    fn write(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{text}").context("failed to write output")
    }
}
