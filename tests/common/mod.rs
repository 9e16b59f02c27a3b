//! Shared test fixtures for the SimplyTrack SDK integration tests.
//!
//! Provides a single-request stub HTTP server for exercising the login and
//! batch-submit endpoints against the blocking client, plus helpers that
//! build trade spreadsheets in memory.

#![allow(dead_code)]

use std::io::Read;
use std::io::Write;
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use simplytrack_sdk::{config, Credentials, SimplytrackClient};

// ---------------------------------------------------------------------------
// Stub HTTP server
// ---------------------------------------------------------------------------

/// The request a stub server captured, for asserting on what the client sent.
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    /// Look up a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A one-shot HTTP server that answers a single request with a canned
/// status and JSON body, recording the request it received.
pub struct StubServer {
    url: String,
    rx: mpsc::Receiver<RecordedRequest>,
}

impl StubServer {
    /// Bind to an ephemeral localhost port and serve one response.
    pub fn respond_with(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub local addr");
        let body = body.to_string();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let request = read_request(&mut stream);
                let reason = match status {
                    200 => "OK",
                    400 => "Bad Request",
                    401 => "Unauthorized",
                    403 => "Forbidden",
                    500 => "Internal Server Error",
                    _ => "Error",
                };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).expect("write stub response");
                let _ = tx.send(request);
            }
        });

        Self {
            url: format!("http://{}", addr),
            rx,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The request the server handled. Call after the client call returns.
    pub fn request(&self) -> RecordedRequest {
        self.rx
            .recv_timeout(Duration::from_secs(5))
            .expect("stub server received no request")
    }
}

/// A localhost URL that nothing is listening on, for connection-failure tests.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
    let addr = listener.local_addr().expect("probe local addr");
    drop(listener);
    format!("http://{}", addr)
}

fn read_request(stream: &mut TcpStream) -> RecordedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    // Read until the end of the header block.
    let header_end = loop {
        let n = stream.read(&mut chunk).expect("read stub request");
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| {
            line.split_once(':')
                .map(|(n, v)| (n.trim().to_ascii_lowercase(), v.trim().to_string()))
        })
        .collect();

    let content_length: usize = headers
        .iter()
        .find(|(n, _)| n == "content-length")
        .and_then(|(_, v)| v.parse().ok())
        .unwrap_or(0);

    let body_start = header_end + 4;
    while buf.len() < body_start + content_length {
        let n = stream.read(&mut chunk).expect("read stub request body");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body = if buf.len() > body_start {
        String::from_utf8_lossy(&buf[body_start..]).to_string()
    } else {
        String::new()
    };

    RecordedRequest {
        method,
        path,
        headers,
        body,
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Build a client whose auth call is already satisfied by a stub returning
/// token `abc`, pointed at the given trades endpoint.
pub fn logged_in_client(trades_url: &str) -> SimplytrackClient {
    let auth = StubServer::respond_with(200, r#"{"token":"abc"}"#);
    let mut client = SimplytrackClient::builder()
        .auth_url(auth.url())
        .trades_url(trades_url)
        .build()
        .unwrap();
    client
        .login(&Credentials::new("user@example.com", "hunter2"))
        .unwrap();
    client
}

// ---------------------------------------------------------------------------
// Spreadsheet builders
// ---------------------------------------------------------------------------

/// A workbook whose first sheet has only the given headers, no data rows.
pub fn sheet_with_columns(headers: &[&str]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

/// One cell in a hand-built test sheet.
pub enum Cell<'a> {
    Str(&'a str),
    Num(f64),
    /// Written as a real datetime cell (year, month, day).
    Date(u16, u8, u8),
    Blank,
}

/// A workbook with the given headers and explicitly typed data rows.
pub fn sheet(headers: &[&str], rows: &[Vec<Cell>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }

    for (r, row) in rows.iter().enumerate() {
        let row_num = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            let col_num = c as u16;
            match cell {
                Cell::Str(s) => {
                    worksheet.write_string(row_num, col_num, *s).unwrap();
                }
                Cell::Num(n) => {
                    worksheet.write_number(row_num, col_num, *n).unwrap();
                }
                Cell::Date(y, m, d) => {
                    let date = ExcelDateTime::from_ymd(*y, *m, *d).unwrap();
                    worksheet
                        .write_datetime_with_format(row_num, col_num, date, &date_format)
                        .unwrap();
                }
                Cell::Blank => {}
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// A well-formed trade sheet with `n` data rows.
///
/// `tradeDate` is written as a real datetime cell (January 2024, one day per
/// row) so the normalize step has to convert it to an ISO-8601 string.
pub fn sample_trades_sheet(n: usize) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    for (col, header) in config::REQUIRED_COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }

    for i in 0..n {
        let row = (i + 1) as u32;
        let day = (i % 27 + 1) as u8;
        let date = ExcelDateTime::from_ymd(2024, 1, day).unwrap();

        worksheet.write_string(row, 0, format!("SYM{}", i)).unwrap();
        worksheet.write_number(row, 1, 10.0).unwrap();
        worksheet.write_number(row, 2, 187.5).unwrap();
        worksheet
            .write_datetime_with_format(row, 3, date, &date_format)
            .unwrap();
        worksheet.write_number(row, 4, 1.25).unwrap();
        worksheet.write_string(row, 5, "BUY").unwrap();
        worksheet.write_number(row, 6, 1873.75).unwrap();
    }

    workbook.save_to_buffer().unwrap()
}
