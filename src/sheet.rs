//! Spreadsheet loading and column validation.
//!
//! Delegates format detection and parsing to calamine (`.xlsx` and `.xls`
//! both work), splits the header row from the data rows, and checks that the
//! required trade columns are present.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::config;
use crate::error::{Result, SimplytrackError};

/// A parsed worksheet: the header row plus the raw data rows beneath it.
///
/// Cells stay as calamine [`Data`] values here; typing happens in the
/// normalize step.
#[derive(Debug, Clone, Default)]
pub struct SheetData {
    headers: Vec<String>,
    rows: Vec<Vec<Data>>,
}

impl SheetData {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Data>] {
        &self.rows
    }

    /// Position of a column by exact header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Check that the required column set is a subset of the parsed headers.
    ///
    /// On failure the error lists exactly the missing names, in the canonical
    /// column order.
    pub fn validate_columns(&self) -> Result<()> {
        let missing: Vec<String> = config::REQUIRED_COLUMNS
            .iter()
            .filter(|col| self.column_index(col).is_none())
            .map(|col| col.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SimplytrackError::MissingColumns { missing })
        }
    }
}

/// Parse spreadsheet bytes into a [`SheetData`].
///
/// Reads the first worksheet; the first row is taken as the header. A
/// workbook with no worksheets (or an empty first sheet) yields an empty
/// `SheetData`, which column validation then rejects with all seven names.
pub fn load(bytes: &[u8]) -> Result<SheetData> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Ok(SheetData::default()),
    };

    let mut rows = range.rows();

    let headers = rows
        .next()
        .map(|row| {
            row.iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect()
        })
        .unwrap_or_default();

    let rows = rows.map(|row| row.to_vec()).collect();

    Ok(SheetData { headers, rows })
}
