use super::config::CommitPolicy;
use super::error::ContractError;
use super::invocation::{LoanCall, Offer};
use super::record::{self, LoanRecord};
use super::settlement::Settlement;
use super::state::StateStore;

/// The loan contract: records who owes whom and settles the principal on a
/// cash ledger through the injected [`Settlement`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoanBroker {
    policy: CommitPolicy,
}

impl LoanBroker {
    pub fn new(policy: CommitPolicy) -> Self {
        Self { policy }
    }

    /// Executes a validated call and returns its payload.
    pub fn handle(
        &self,
        state: &mut dyn StateStore,
        settlement: &mut dyn Settlement,
        call: LoanCall,
    ) -> Result<Vec<u8>, ContractError> {
        match call {
            LoanCall::Init => self.initialize(state).map(|()| Vec::new()),
            LoanCall::Offer(offer) => self
                .offer(state, settlement, &offer)
                .map(String::into_bytes),
            LoanCall::Query(query) => self.query(state, query.key()).map(String::into_bytes),
        }
    }

    /// The loan contract seeds nothing.
    pub fn initialize(&self, _state: &mut dyn StateStore) -> Result<(), ContractError> {
        log::debug!("[init] loan broker has no genesis state");
        Ok(())
    }

    /// Records the loan under its id and moves the principal from lender to
    /// borrower on the settlement contract.
    ///
    /// Under `CommitPolicy::Atomic` the record is written only after the
    /// settlement succeeded. Under `CommitPolicy::Immediate` it is written
    /// first and stays in place when the settlement fails.
    pub fn offer(
        &self,
        state: &mut dyn StateStore,
        settlement: &mut dyn Settlement,
        offer: &Offer,
    ) -> Result<String, ContractError> {
        let loan_id = offer.loan_id();
        log::trace!(
            "[offer] loan={loan_id} lender={} borrower={} principal={} via={}",
            offer.lender(),
            offer.borrower(),
            offer.principal(),
            offer.settlement_contract()
        );

        let loan = LoanRecord::new(offer.lender(), offer.borrower(), offer.principal());
        let bytes = record::encode(loan_id, &loan)?;

        match self.policy {
            CommitPolicy::Atomic => {
                settle(settlement, offer)?;
                state.put(loan_id, bytes)?;
            }
            CommitPolicy::Immediate => {
                state.put(loan_id, bytes)?;
                settle(settlement, offer)?;
            }
        }

        let summary = loan.summary(loan_id).to_string();
        log::debug!("[offer] {summary}");
        Ok(summary)
    }

    /// Text summary of the stored loan.
    pub fn query(&self, state: &dyn StateStore, loan_id: &str) -> Result<String, ContractError> {
        let loan = self
            .loan(state, loan_id)?
            .ok_or_else(|| ContractError::EntityNotFound {
                key: loan_id.to_string(),
            })?;
        Ok(loan.summary(loan_id).to_string())
    }

    /// Decoded loan terms, `None` if no offer was ever recorded under `loan_id`.
    pub fn loan(
        &self,
        state: &dyn StateStore,
        loan_id: &str,
    ) -> Result<Option<LoanRecord>, ContractError> {
        state
            .get(loan_id)?
            .map(|bytes| record::decode(loan_id, &bytes))
            .transpose()
    }
}

fn settle(settlement: &mut dyn Settlement, offer: &Offer) -> Result<(), ContractError> {
    let contract = offer.settlement_contract();
    settlement
        .transfer(contract, offer.lender(), offer.borrower(), offer.principal())
        .map_err(|err| {
            log::warn!("[offer] settlement on {contract} failed: {err}");
            ContractError::Invocation {
                contract: contract.to_string(),
                source: Box::new(err),
            }
        })
}
