//! End-to-end menu sessions: scripted stdin, captured stdout, real data file.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use book_catalog::{App, BookStatus, Catalog, FlatFileStore, LoadReport, MalformedPolicy};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const YEAR: i32 = 2026;

fn data_path(dir: &TempDir) -> PathBuf {
    dir.path().join("library_data.txt")
}

/// Run one session over `path` with `script` as the whole of stdin.
fn run_session(path: &Path, script: &str) -> (Catalog, String) {
    let (catalog, report) =
        Catalog::open(FlatFileStore::new(path), MalformedPolicy::Fail).expect("catalog opens");
    let mut app = App::new(catalog, Cursor::new(script.to_string()), Vec::new())
        .with_current_year(YEAR);
    app.report_load(&report).unwrap();
    app.run().unwrap();

    let (catalog, output) = app.into_parts();
    (catalog, String::from_utf8(output).unwrap())
}

#[test]
fn full_lifecycle_scenario() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    let script = "1\n1984\nGeorge Orwell\n1949\n\
                  1\nBrave New World\nAldous Huxley\n1932\n\
                  5\n1\nchecked-out\n\
                  2\n2\n\
                  4\n\
                  6\n";

    let (catalog, output) = run_session(&path, script);

    assert!(output.contains("Data file not found."));
    assert!(output.contains("Book '1984' added with ID 1."));
    assert!(output.contains("Book 'Brave New World' added with ID 2."));
    assert!(output.contains("Status of book with ID 1 updated to 'checked-out'."));
    assert!(output.contains("Book with ID 2 titled 'Brave New World' deleted."));
    assert!(output.contains("You have exited the program."));

    let last_listing = output
        .rsplit("ID Title Author Year Status\n")
        .next()
        .unwrap();
    let rows: Vec<&str> = last_listing
        .lines()
        .skip(1)
        .take_while(|line| !line.is_empty())
        .collect();
    assert_eq!(rows, vec!["1 1984 George Orwell 1949 checked-out"]);

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.books()[0].status, BookStatus::CheckedOut);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "1|1984|George Orwell|1949|checked-out\n"
    );
}

#[test]
fn rejected_year_consumes_no_id() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    let script = "1\nFuture Book\nSomebody\n3000\n\
                  1\nDune\nFrank Herbert\n1965\n\
                  6\n";

    let (catalog, output) = run_session(&path, script);

    assert!(output.contains("Year cannot be negative or exceed the current year (2026)!"));
    assert!(output.contains("Book 'Dune' added with ID 1."));
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.books()[0].id, 1);
}

#[test]
fn invalid_inputs_leave_catalog_untouched() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    fs::write(&path, "1|1984|George Orwell|1949|available\n").unwrap();
    let script = "9\n\
                  1\n   \n\
                  1\nTitle\n\n\
                  1\nA|B\n\
                  1\nTitle\nAuthor\nsoon\n\
                  2\nabc\n\
                  2\n42\n\
                  5\n1\nlost\n\
                  5\nx\n\
                  5\n42\n\
                  6\n";

    let (catalog, output) = run_session(&path, script);

    for expected in [
        "Invalid choice. Please try again.",
        "Title cannot be empty!",
        "Author cannot be empty!",
        "Title cannot contain the '|' character!",
        "Year must be a number!",
        "ID must be a number!",
        "No book with the given ID was found.",
        "Invalid status. Use 'available' or 'checked-out'.",
    ] {
        assert!(output.contains(expected), "missing {expected:?} in:\n{output}");
    }

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.books()[0].status, BookStatus::Available);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "1|1984|George Orwell|1949|available\n"
    );
}

#[test]
fn search_by_each_criterion() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    fs::write(
        &path,
        "1|The Catcher in the Rye|J. D. Salinger|1951|available\n\
         2|1984|George Orwell|1949|available\n\
         3|Animal Farm|George Orwell|1945|checked-out\n",
    )
    .unwrap();
    let script = "3\n1\ncat\n\
                  3\n2\norwell\n\
                  3\n3\n1949\n\
                  3\n3\n2000\n\
                  3\n3\nsoon\n\
                  3\n4\n\
                  6\n";

    let (_, output) = run_session(&path, script);

    assert!(output.contains("1 The Catcher in the Rye J. D. Salinger 1951 available"));
    assert!(output.contains("3 Animal Farm George Orwell 1945 checked-out"));
    assert_eq!(output.matches("2 1984 George Orwell 1949 available").count(), 2);
    assert!(output.contains("No books found."));
    assert!(output.contains("Year must be a number!"));
    assert!(output.contains("Invalid choice!"));
}

#[test]
fn empty_catalog_listing() {
    let dir = TempDir::new().unwrap();
    let (_, output) = run_session(&data_path(&dir), "4\n6\n");
    assert!(output.contains("The library is empty."));
    assert!(!output.contains("ID Title Author Year Status"));
}

#[test]
fn delete_shows_listing_before_prompt() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    fs::write(&path, "1|1984|George Orwell|1949|available\n").unwrap();

    let (catalog, output) = run_session(&path, "2\n1\n6\n");

    let listing = output.find("1 1984 George Orwell 1949 available").unwrap();
    let prompt = output.find("Enter the ID of the book to delete: ").unwrap();
    assert!(listing < prompt);
    assert!(catalog.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn end_of_input_ends_the_session() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);

    let (catalog, output) = run_session(&path, "1\nHalf Entered\n");

    assert!(catalog.is_empty());
    assert!(!path.exists());
    assert!(!output.contains("You have exited the program."));
}

#[test]
fn sessions_share_state_through_the_file() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);

    run_session(&path, "1\nEmma\nJane Austen\n1815\n6\n");
    let (catalog, output) = run_session(&path, "1\nPersuasion\nJane Austen\n1817\n6\n");

    assert!(!output.contains("Data file not found."));
    assert!(output.contains("Book 'Persuasion' added with ID 2."));
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "1|Emma|Jane Austen|1815|available\n2|Persuasion|Jane Austen|1817|available\n"
    );
}

#[test]
fn skipped_lines_are_reported() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    fs::write(&path, "garbage\n1|Emma|Jane Austen|1815|available\n").unwrap();

    let (catalog, report) =
        Catalog::open(FlatFileStore::new(&path), MalformedPolicy::Skip).unwrap();
    assert!(matches!(report, LoadReport::Loaded { count: 1, skipped: 1 }));

    let mut app = App::new(catalog, Cursor::new("6\n".to_string()), Vec::new());
    app.report_load(&report).unwrap();
    app.run().unwrap();
    let (_, output) = app.into_parts();
    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Skipped 1 unreadable line(s) in the data file."));
}

#[test]
fn unreadable_file_is_never_overwritten() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    let original = b"1|Caf\xE9|Someone|1990|available\n2|Dune|Frank Herbert|1965|available\n";
    fs::write(&path, original).unwrap();

    let (catalog, output) = run_session(&path, "1\n2\n5\n4\n6\n");

    assert!(output.contains("Failed to load data:"));
    assert_eq!(
        output
            .matches("the catalog cannot be changed this session")
            .count(),
        3
    );
    assert!(!output.contains("Enter book title: "));
    assert!(output.contains("The library is empty."));
    assert!(catalog.is_read_only());
    assert_eq!(fs::read(&path).unwrap(), original.to_vec());
}

#[test]
fn skipped_line_keeps_its_id() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    fs::write(&path, "1|Emma|Jane Austen|1815|available\n3|X|Y|bad|available\n").unwrap();

    let (catalog, _) = Catalog::open(FlatFileStore::new(&path), MalformedPolicy::Skip).unwrap();
    let mut app = App::new(
        catalog,
        Cursor::new("1\nDune\nFrank Herbert\n1965\n6\n".to_string()),
        Vec::new(),
    )
    .with_current_year(YEAR);
    app.run().unwrap();
    let (_, output) = app.into_parts();
    let output = String::from_utf8(output).unwrap();

    assert!(output.contains("Book 'Dune' added with ID 4."));
    let contents = fs::read_to_string(&path).unwrap();
    let ids: Vec<&str> = contents
        .lines()
        .filter_map(|line| line.split('|').next())
        .collect();
    assert_eq!(ids, vec!["1", "3", "4"]);
}
