//! Log in, load a trade spreadsheet, and submit it as one batch.
//!
//! ```sh
//! cargo run --example import_trades -- trades.xlsx user@example.com hunter2
//! ```
//!
//! Endpoints default to the local auth and trade services; override with
//! `SimplytrackClient::builder()` in your own code.

use std::fs;

use simplytrack_sdk::{Credentials, ImportWorkflow, SimplytrackClient};

fn main() -> simplytrack_sdk::Result<()> {
    let mut args = std::env::args().skip(1);
    let usage = "usage: import_trades <file.xlsx> <email> <password>";
    let path = args.next().expect(usage);
    let email = args.next().expect(usage);
    let password = args.next().expect(usage);

    let mut client = SimplytrackClient::builder().build()?;
    client.login(&Credentials::new(email, password))?;
    println!("logged in: {}", client);

    let bytes = fs::read(&path)?;
    let mut workflow = ImportWorkflow::new();
    let batch = workflow.load_file(&bytes)?;
    println!("loaded {} trades from {}", batch.len(), path);

    let ack = workflow.submit(&client)?;
    println!("server acknowledgment: {}", ack);

    Ok(())
}
