pub(crate) use clap::Parser;
use lending_ledger::CommitPolicy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "lending-ledger",
    author,
    version,
    about = "Replays cash and loan contract invocations against an in-memory ledger",
    long_about = None,
    after_help = "INPUT:\n    One invocation per line: contract,function,arg...\n    Lines starting with '#' are ignored.\n\nOUTPUT:\n    One outcome per invocation is printed to stdout in CSV format:\n    row, contract, function, status, payload, error\n\n    lending-ledger invocations.csv > outcomes.csv"
)]
pub struct Args {
    /// Path to the invocation script
    #[arg(
        index = 1,
        value_name = "FILE",
        help = "Input CSV file with rows: contract, function, args..."
    )]
    pub input_file: PathBuf,

    /// How a failing invocation treats the writes it already made
    #[arg(long, value_enum, default_value_t = CommitPolicy::Atomic)]
    pub commit_policy: CommitPolicy,

    /// Name the cash contract is deployed under
    #[arg(long, value_name = "NAME", default_value = "cash")]
    pub cash_contract: String,

    /// Name the loan contract is deployed under
    #[arg(long, value_name = "NAME", default_value = "loan")]
    pub loan_contract: String,
}
