//! The trade-import workflow state machine.
//!
//! `Idle -> FileLoaded -> Submitted`: a file upload that parses, validates,
//! and normalizes moves the workflow to `FileLoaded`; a successful submit
//! moves it to `Submitted`; loading another file resets it to `FileLoaded`
//! with a fresh batch. A failed submit leaves the workflow in `FileLoaded`
//! so the same batch can be resubmitted as-is.

use calamine::{Data, DataType};

use crate::error::{Result, SimplytrackError};
use crate::models::{ServerAck, TradeBatch, TradeRecord};
use crate::sheet::{self, SheetData};
use crate::SimplytrackClient;

/// Where the import workflow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    FileLoaded,
    Submitted,
}

/// Drives one upload-validate-submit cycle at a time.
///
/// There is no partial-submission or resumable state: the batch is held in
/// memory and submitted as one unit.
#[derive(Debug, Default)]
pub struct ImportWorkflow {
    state: WorkflowState,
    batch: Option<TradeBatch>,
}

impl ImportWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// The currently loaded batch, if any.
    pub fn batch(&self) -> Option<&TradeBatch> {
        self.batch.as_ref()
    }

    /// Parse, validate, and normalize an uploaded spreadsheet.
    ///
    /// On success the workflow holds the new batch and is in `FileLoaded`,
    /// regardless of its prior state. On failure the prior state and batch
    /// are left untouched.
    pub fn load_file(&mut self, bytes: &[u8]) -> Result<&TradeBatch> {
        let sheet = sheet::load(bytes)?;
        sheet.validate_columns()?;
        let batch = normalize(&sheet)?;

        self.state = WorkflowState::FileLoaded;
        Ok(self.batch.insert(batch))
    }

    /// Submit the loaded batch with the client's session token.
    ///
    /// Requires a loaded batch and a logged-in client. A rejected or failed
    /// submission leaves the workflow in `FileLoaded`; only a 200 response
    /// moves it to `Submitted`.
    pub fn submit(&mut self, client: &SimplytrackClient) -> Result<ServerAck> {
        let batch = self.batch.as_ref().ok_or(SimplytrackError::NoBatch)?;
        let ack = client.submit_batch(batch)?;
        self.state = WorkflowState::Submitted;
        Ok(ack)
    }

    /// Drop the batch and return to `Idle`.
    pub fn reset(&mut self) {
        self.state = WorkflowState::Idle;
        self.batch = None;
    }
}

/// Build one [`TradeRecord`] per data row of a validated sheet.
///
/// Datetime cells in the `tradeDate` column are converted to ISO-8601
/// strings; string cells pass through unchanged. Numeric fields accept
/// numeric cells or numeric strings. Rows that are entirely blank (trailing
/// padding rows in hand-edited files) are skipped.
pub fn normalize(sheet: &SheetData) -> Result<TradeBatch> {
    let col = |name: &str| -> Result<usize> {
        sheet
            .column_index(name)
            .ok_or_else(|| SimplytrackError::MissingColumns {
                missing: vec![name.to_string()],
            })
    };

    let symbol_col = col("symbol")?;
    let quantity_col = col("quantity")?;
    let price_col = col("price")?;
    let trade_date_col = col("tradeDate")?;
    let commission_col = col("commission")?;
    let action_col = col("action")?;
    let net_amount_col = col("netAmount")?;

    let mut records = Vec::new();

    for (i, row) in sheet.rows().iter().enumerate() {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }

        // Data row number, 1-based (header row not counted).
        let row_num = i + 1;

        let cell = |idx: usize| row.get(idx).unwrap_or(&Data::Empty);

        records.push(TradeRecord {
            symbol: cell_text(cell(symbol_col))
                .ok_or_else(|| invalid(row_num, "symbol is empty"))?,
            quantity: cell_number(cell(quantity_col))
                .ok_or_else(|| invalid(row_num, "quantity is not a number"))?,
            price: cell_number(cell(price_col))
                .ok_or_else(|| invalid(row_num, "price is not a number"))?,
            trade_date: cell_date(cell(trade_date_col))
                .ok_or_else(|| invalid(row_num, "tradeDate is empty"))?,
            commission: cell_number(cell(commission_col))
                .ok_or_else(|| invalid(row_num, "commission is not a number"))?,
            action: cell_text(cell(action_col))
                .ok_or_else(|| invalid(row_num, "action is empty"))?,
            net_amount: cell_number(cell(net_amount_col))
                .ok_or_else(|| invalid(row_num, "netAmount is not a number"))?,
        });
    }

    Ok(TradeBatch::new(records))
}

fn invalid(row: usize, reason: &str) -> SimplytrackError {
    SimplytrackError::InvalidRow {
        row,
        reason: reason.to_string(),
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        Data::Empty => None,
        other => Some(other.to_string()),
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `tradeDate` cell to ISO-8601 string. Datetime cells are formatted as
/// `YYYY-MM-DDTHH:MM:SS`; everything else passes through in string form.
fn cell_date(cell: &Data) -> Option<String> {
    match cell {
        Data::DateTime(_) => cell
            .as_datetime()
            .map(|ndt| ndt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        Data::DateTimeIso(s) => Some(s.clone()),
        Data::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        Data::Empty => None,
        other => Some(other.to_string()),
    }
}
