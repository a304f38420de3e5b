pub mod engine;

pub use engine::{
    CashLedger, CommitPolicy, ContractError, ContractKind, Decimal, Error, InMemoryState, Ledger,
    LedgerConfig, LoanBroker, Outcome, StateStore, Status,
};
