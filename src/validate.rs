//! Turn raw prompt answers into typed values. Each helper trims its input the
//! same way, and a failure leaves nothing to undo because no state is touched.

use chrono::{Datelike, Local};

use crate::error::InputError;
use crate::models::{BookStatus, SEPARATOR};

/// Current calendar year, the upper bound for publication years.
pub fn current_year() -> i32 {
    Local::now().year()
}

pub fn title(raw: &str) -> Result<String, InputError> {
    required_text(raw, "Title", InputError::EmptyTitle)
}

pub fn author(raw: &str) -> Result<String, InputError> {
    required_text(raw, "Author", InputError::EmptyAuthor)
}

fn required_text(raw: &str, field: &'static str, empty: InputError) -> Result<String, InputError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(empty);
    }
    if value.contains(SEPARATOR) {
        return Err(InputError::Separator(field));
    }
    Ok(value.to_string())
}

/// Accept years in `0..=max_year`.
pub fn year(raw: &str, max_year: i32) -> Result<i32, InputError> {
    let year = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| InputError::YearNotNumeric)?;
    if year < 0 || year > i64::from(max_year) {
        return Err(InputError::YearOutOfRange { year, max: max_year });
    }
    // In range of 0..=i32::MAX, so the narrowing cannot fail.
    i32::try_from(year).map_err(|_| InputError::YearOutOfRange { year, max: max_year })
}

/// Parse a year used as a search key. Any integer is a valid key.
pub fn search_year(raw: &str) -> Result<i32, InputError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| InputError::YearNotNumeric)
}

pub fn id(raw: &str) -> Result<u32, InputError> {
    raw.trim().parse::<u32>().map_err(|_| InputError::IdNotNumeric)
}

/// Only the two exact status spellings are accepted.
pub fn status(raw: &str) -> Result<BookStatus, InputError> {
    let value = raw.trim();
    value
        .parse::<BookStatus>()
        .map_err(|_| InputError::Status(value.to_string()))
}
