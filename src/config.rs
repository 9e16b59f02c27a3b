use std::time::Duration;

pub const DEFAULT_AUTH_URL: &str = "http://localhost:8080/api/auth/login";
pub const DEFAULT_TRADES_URL: &str = "http://localhost:8081/api/trades/batch";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Columns every uploaded trade sheet must carry, in canonical order.
/// The template generator writes exactly these, and column validation
/// reports missing names in this order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "symbol",
    "quantity",
    "price",
    "tradeDate",
    "commission",
    "action",
    "netAmount",
];
