mod commands;

use anyhow::{Context, Result};
use commands::{Args, Parser};
use lending_ledger::{Ledger, LedgerConfig};

fn main() -> Result<()> {
    let args = Args::parse();

    // Default level is info, RUST_LOG overrides it
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1. Deploy the cash and loan contracts
    let config = LedgerConfig::with_commit_policy(args.commit_policy);
    let mut ledger = Ledger::with_contracts(config, &args.cash_contract, &args.loan_contract)
        .context("Failed to deploy contracts")?;

    // 2. Open and replay the invocation script
    log::info!("Replaying invocations from {}", args.input_file.display());
    let file = std::fs::File::open(&args.input_file)
        .with_context(|| format!("Failed to open input file: {}", args.input_file.display()))?;

    let outcomes = ledger
        .process_invocations(file)
        .context("Failed to replay invocations")?;

    // 3. Export the outcomes to stdout
    Ledger::export_outcomes(&outcomes, std::io::stdout())
        .context("Failed to export outcomes to stdout")?;

    Ok(())
}
