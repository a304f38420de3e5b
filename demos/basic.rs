//! Basic example of using the `Ledger`.
//!
//! Run with: `cargo run --example basic`

use lending_ledger::{Ledger, LedgerConfig};
use std::io::Cursor;

fn main() {
    // Initialize logger (optional, but shows what's happening)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Sample invocations as CSV
    let invocations = r"# fund two lenders from the bank pool
cash,invoke,pbc,alice,500
cash,invoke,pbc,bob,300
# alice lends to carol, settled on the cash contract
loan,offer,L1,alice,carol,120.50,cash
loan,query,L1
# carol repays part of it with bob's help
cash,transferN2A,alice,carol,60,bob,40
cash,query,alice
# dave has no account, the offer fails
loan,offer,L2,dave,carol,10,cash
";

    // Deploy the contracts and replay the script
    let mut ledger = Ledger::with_contracts(LedgerConfig::default(), "cash", "loan")
        .expect("Failed to deploy contracts");
    let outcomes = ledger
        .process_invocations(Cursor::new(invocations))
        .expect("Failed to replay invocations");

    // Export results to stdout
    println!("\n=== Outcomes ===");
    Ledger::export_outcomes(&outcomes, std::io::stdout()).expect("Failed to export outcomes");
}
