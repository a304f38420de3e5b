use crate::engine::{amount::Amount, error::ContractError, invocation::Invocation};

/// A validated loan offer:
/// `offer(loanId, lender, borrower, principal, settlementContract)`.
///
/// The principal is moved from lender to borrower on the cash ledger
/// deployed as `settlement_contract`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    loan_id: String,
    lender: String,
    borrower: String,
    principal: Amount,
    settlement_contract: String,
}

impl Offer {
    pub fn new(
        loan_id: &str,
        lender: &str,
        borrower: &str,
        principal: Amount,
        settlement_contract: &str,
    ) -> Self {
        Self {
            loan_id: loan_id.to_string(),
            lender: lender.to_string(),
            borrower: borrower.to_string(),
            principal,
            settlement_contract: settlement_contract.to_string(),
        }
    }

    pub fn loan_id(&self) -> &str {
        &self.loan_id
    }

    pub fn lender(&self) -> &str {
        &self.lender
    }

    pub fn borrower(&self) -> &str {
        &self.borrower
    }

    pub fn principal(&self) -> Amount {
        self.principal
    }

    pub fn settlement_contract(&self) -> &str {
        &self.settlement_contract
    }
}

impl TryFrom<&Invocation> for Offer {
    type Error = ContractError;

    fn try_from(invocation: &Invocation) -> Result<Self, Self::Error> {
        let [loan_id, lender, borrower, principal, settlement_contract] =
            invocation.exact_args::<5>()?;
        Ok(Offer::new(
            loan_id,
            lender,
            borrower,
            Amount::parse(principal)?,
            settlement_contract,
        ))
    }
}
