//! Lending ledger module.
//!
//! Two contracts share this engine:
//! - `CashLedger` - account balances with single and many-to-one transfers
//! - `LoanBroker` - loan records whose principal is settled on a cash ledger
//!
//! Both run over an injected `StateStore`. The `Ledger` hosts deployed
//! instances, routes loan settlements to cash instances, and replays
//! invocation scripts.

mod amount;
mod cash_ledger;
mod config;
mod error;
mod invocation;
mod ledger;
mod loan_broker;
mod outcome;
mod record;
mod settlement;
mod state;

pub use rust_decimal::Decimal;

pub use amount::Amount;
pub use cash_ledger::{CashLedger, GENESIS_ACCOUNTS, GENESIS_BALANCE};
pub use config::{CommitPolicy, LedgerConfig};
pub use error::{ContractError, Error, RecordError, StoreError};
pub use invocation::{
    function, CashCall, Debit, Invocation, LoanCall, Offer, Query, Transfer, TransferMany,
};
pub use ledger::{ContractKind, Ledger};
pub use loan_broker::LoanBroker;
pub use outcome::{Outcome, Status};
pub use record::{AccountRecord, LoanRecord, LoanSummary};
pub use settlement::{LocalSettlement, Settlement};
pub use state::{InMemoryState, StateStore, WriteSet};
