//! Downloadable import template: an `.xlsx` workbook with only the header row.

use rust_xlsxwriter::Workbook;

use crate::config;
use crate::error::Result;

/// Suggested file name when offering the template for download.
pub const FILE_NAME: &str = "trade_import_template.xlsx";

/// Generate the empty trade-import template.
///
/// One worksheet named `Trades`, containing the seven required column headers
/// in canonical order and zero data rows. The output re-parses cleanly with
/// [`sheet::load`](crate::sheet::load) and passes column validation.
pub fn generate() -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Trades")?;

    for (col, header) in config::REQUIRED_COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    Ok(workbook.save_to_buffer()?)
}
