//! SimplyTrack SDK for Rust.
//!
//! Provides a synchronous client for the SimplyTrack trade-import workflow:
//! log in against the auth service, parse an uploaded trade spreadsheet
//! (`.xlsx`/`.xls`), validate and normalize its rows, and submit them as one
//! batch to the trade-ingestion service. Also generates the empty spreadsheet
//! template users fill in.
//!
//! # Quick start
//!
//! ```no_run
//! use simplytrack_sdk::{Credentials, ImportWorkflow, SimplytrackClient};
//!
//! let mut client = SimplytrackClient::builder().build().unwrap();
//! client.login(&Credentials::new("user@example.com", "hunter2")).unwrap();
//!
//! let bytes = std::fs::read("trades.xlsx").unwrap();
//! let mut workflow = ImportWorkflow::new();
//! workflow.load_file(&bytes).unwrap();
//!
//! let ack = workflow.submit(&client).unwrap();
//! println!("imported: {}", ack);
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod sheet;
pub mod template;
pub mod workflow;

pub use error::{Result, SimplytrackError};
pub use models::{ServerAck, TradeBatch, TradeRecord};
pub use session::{Credentials, Session};
pub use sheet::SheetData;
pub use workflow::{ImportWorkflow, WorkflowState};

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;

// ---------------------------------------------------------------------------
// SimplytrackClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`SimplytrackClient`].
///
/// Use [`SimplytrackClient::builder()`] to obtain a builder, chain
/// configuration methods, and call [`build()`](SimplytrackClientBuilder::build)
/// to create the client.
pub struct SimplytrackClientBuilder {
    auth_url: String,
    trades_url: String,
    timeout: Duration,
}

impl Default for SimplytrackClientBuilder {
    fn default() -> Self {
        Self {
            auth_url: config::DEFAULT_AUTH_URL.to_string(),
            trades_url: config::DEFAULT_TRADES_URL.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
        }
    }
}

impl SimplytrackClientBuilder {
    /// Set the auth service login endpoint.
    pub fn auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    /// Set the trade-ingestion batch endpoint.
    pub fn trades_url(mut self, url: impl Into<String>) -> Self {
        self.trades_url = url.into();
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client with a fresh, logged-out session.
    pub fn build(self) -> Result<SimplytrackClient> {
        let http = Client::builder().timeout(self.timeout).build()?;
        Ok(SimplytrackClient {
            http,
            auth_url: self.auth_url,
            trades_url: self.trades_url,
            session: Session::default(),
        })
    }
}

// ---------------------------------------------------------------------------
// SimplytrackClient
// ---------------------------------------------------------------------------

/// The main entry point for the SimplyTrack SDK.
///
/// Owns the HTTP client and the in-memory [`Session`]. All calls are
/// blocking; each user action runs to completion before the next.
///
/// Created via [`SimplytrackClient::builder()`].
pub struct SimplytrackClient {
    http: Client,
    auth_url: String,
    trades_url: String,
    session: Session,
}

impl SimplytrackClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> SimplytrackClientBuilder {
        SimplytrackClientBuilder::default()
    }

    /// Read access to the current session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Log in against the auth service.
    ///
    /// POSTs the credentials as JSON. On HTTP 200 the `token` field is
    /// extracted from the JSON body and the session becomes logged-in. Any
    /// other status yields [`SimplytrackError::AuthRejected`] carrying the
    /// response body, and the session is left logged-out. Transport failures
    /// surface as [`SimplytrackError::Http`].
    pub fn login(&mut self, credentials: &Credentials) -> Result<()> {
        let resp = self.http.post(&self.auth_url).json(credentials).send()?;

        let status = resp.status();
        eprintln!("Login response status: {}", status);

        if status != StatusCode::OK {
            return Err(SimplytrackError::AuthRejected {
                status: status.as_u16(),
                body: resp.text()?,
            });
        }

        let body: serde_json::Value = resp.json()?;
        let token = body
            .get("token")
            .and_then(|t| t.as_str())
            .ok_or(SimplytrackError::MissingToken)?;

        self.session.set_logged_in(token.to_string());
        Ok(())
    }

    /// Clear the session unconditionally. No server-side call is made.
    pub fn logout(&mut self) {
        self.session.clear();
    }

    /// Submit a batch of trades to the ingestion service.
    ///
    /// Serializes the batch as a JSON array and sends it with an
    /// `Authorization: Bearer <token>` header. HTTP 200 yields the parsed
    /// server acknowledgment; any other status yields
    /// [`SimplytrackError::ImportRejected`] with status code and body.
    /// Requires a logged-in session.
    pub fn submit_batch(&self, batch: &TradeBatch) -> Result<ServerAck> {
        let bearer = self
            .session
            .bearer()
            .ok_or(SimplytrackError::NotLoggedIn)?;

        let resp = self
            .http
            .post(&self.trades_url)
            .header(AUTHORIZATION, bearer)
            .json(batch)
            .send()?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(SimplytrackError::ImportRejected {
                status: status.as_u16(),
                body: resp.text()?,
            });
        }

        Ok(resp.json()?)
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for SimplytrackClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SimplytrackClient(auth_url={}, trades_url={}, logged_in={})",
            self.auth_url,
            self.trades_url,
            self.session.is_logged_in()
        )
    }
}
