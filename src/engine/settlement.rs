//! Settlement capability handed to the loan broker.
//!
//! The broker never looks up the cash ledger by itself: it is given something
//! that can move funds on a named settlement contract. The ledger host routes
//! the call to another deployed instance; [`LocalSettlement`] runs the cash
//! ledger in-process over a single store.

use super::amount::Amount;
use super::cash_ledger::CashLedger;
use super::config::CommitPolicy;
use super::error::ContractError;
use super::state::StateStore;

pub trait Settlement {
    /// Synchronously moves `amount` from `from` to `to` on the `contract`
    /// instance. The returned error is the remote contract's own failure.
    fn transfer(
        &mut self,
        contract: &str,
        from: &str,
        to: &str,
        amount: Amount,
    ) -> Result<(), ContractError>;
}

/// Settles against one cash ledger store, whatever contract name is given.
pub struct LocalSettlement<'a> {
    ledger: CashLedger,
    state: &'a mut dyn StateStore,
}

impl<'a> LocalSettlement<'a> {
    pub fn new(state: &'a mut dyn StateStore, policy: CommitPolicy) -> Self {
        Self {
            ledger: CashLedger::new(policy),
            state,
        }
    }
}

impl Settlement for LocalSettlement<'_> {
    fn transfer(
        &mut self,
        contract: &str,
        from: &str,
        to: &str,
        amount: Amount,
    ) -> Result<(), ContractError> {
        log::debug!("[settle] local contract={contract} from={from} to={to} amount={amount}");
        self.ledger.transfer(self.state, from, to, amount)
    }
}
