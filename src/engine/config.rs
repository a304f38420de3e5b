use std::fmt;

/// How the writes of a single invocation reach the state store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CommitPolicy {
    /// Stage every write and flush only once the whole invocation succeeded.
    #[default]
    Atomic,
    /// Write through as soon as each record is final. A multi-sender transfer
    /// that fails midway keeps the debits already written, and a loan offer
    /// whose settlement fails keeps its loan record.
    Immediate,
}

impl fmt::Display for CommitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitPolicy::Atomic => write!(f, "atomic"),
            CommitPolicy::Immediate => write!(f, "immediate"),
        }
    }
}

/// Settings shared by every contract deployed on a `Ledger`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerConfig {
    pub commit_policy: CommitPolicy,
}

impl LedgerConfig {
    pub fn with_commit_policy(commit_policy: CommitPolicy) -> Self {
        Self { commit_policy }
    }
}
