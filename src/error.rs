#[derive(Debug, thiserror::Error)]
pub enum SimplytrackError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("invalid data in row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("login rejected (status {status}): {body}")]
    AuthRejected { status: u16, body: String },

    #[error("login response did not contain a token field")]
    MissingToken,

    #[error("import rejected (status {status}): {body}")]
    ImportRejected { status: u16, body: String },

    #[error("not logged in")]
    NotLoggedIn,

    #[error("no file loaded")]
    NoBatch,
}

pub type Result<T> = std::result::Result<T, SimplytrackError>;
