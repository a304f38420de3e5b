//! Persisted record formats.
//!
//! Field names are written in Pascal case (`{"Balance":1000000}`); lower
//! and camel case spellings are accepted on read. Decimals are written as exact JSON numbers.

use rust_decimal::RoundingStrategy;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::Amount;
use super::error::ContractError;
use super::Decimal;

/// Stored state of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    #[serde(
        rename = "Balance",
        alias = "balance",
        with = "rust_decimal::serde::arbitrary_precision"
    )]
    balance: Decimal,
}

impl AccountRecord {
    pub fn new(balance: Decimal) -> Self {
        Self {
            balance: balance.normalize(),
        }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Debits `amount`, refusing to leave a negative balance.
    /// On refusal the record is left untouched.
    pub(crate) fn debit(&mut self, account: &str, amount: Amount) -> Result<(), ContractError> {
        let remaining = self.balance - amount.value();
        if remaining < Decimal::ZERO {
            return Err(ContractError::InsufficientFunds {
                account: account.to_string(),
                balance: self.balance,
                requested: amount.value(),
            });
        }
        self.balance = remaining.normalize();
        Ok(())
    }

    /// Credits `amount`. A balance past the largest representable decimal is
    /// refused and leaves the record untouched.
    pub(crate) fn credit(&mut self, account: &str, amount: Decimal) -> Result<(), ContractError> {
        let total = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| ContractError::Overflow {
                account: account.to_string(),
            })?;
        self.balance = total.normalize();
        Ok(())
    }
}

/// Stored terms of a loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRecord {
    #[serde(rename = "LendFrom", alias = "lendFrom")]
    lender: String,
    #[serde(rename = "LendTo", alias = "lendTo")]
    borrower: String,
    #[serde(
        rename = "Balance",
        alias = "balance",
        with = "rust_decimal::serde::arbitrary_precision"
    )]
    principal: Decimal,
    #[serde(
        rename = "Interest",
        alias = "interest",
        with = "rust_decimal::serde::arbitrary_precision"
    )]
    interest_rate: Decimal,
}

impl LoanRecord {
    /// New loan terms. Interest is recorded as zero; nothing accrues it.
    pub fn new(lender: &str, borrower: &str, principal: Amount) -> Self {
        Self {
            lender: lender.to_string(),
            borrower: borrower.to_string(),
            principal: principal.value(),
            interest_rate: Decimal::ZERO,
        }
    }

    pub fn lender(&self) -> &str {
        &self.lender
    }

    pub fn borrower(&self) -> &str {
        &self.borrower
    }

    pub fn principal(&self) -> Decimal {
        self.principal
    }

    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    /// Text summary returned by `offer` and loan `query`.
    pub fn summary<'a>(&'a self, loan_id: &'a str) -> LoanSummary<'a> {
        LoanSummary {
            loan_id,
            record: self,
        }
    }
}

/// `ccid:<id>,From:<lender>,To:<borrower>,value:<principal>`, principal
/// rounded to two decimals.
pub struct LoanSummary<'a> {
    loan_id: &'a str,
    record: &'a LoanRecord,
}

impl fmt::Display for LoanSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ccid:{},From:{},To:{},value:{:.2}",
            self.loan_id,
            self.record.lender,
            self.record.borrower,
            self.record
                .principal
                .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
        )
    }
}

pub(crate) fn encode<T: Serialize>(key: &str, record: &T) -> Result<Vec<u8>, ContractError> {
    serde_json::to_vec(record).map_err(|source| ContractError::Codec {
        key: key.to_string(),
        source,
    })
}

pub(crate) fn decode<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<T, ContractError> {
    serde_json::from_slice(bytes).map_err(|source| ContractError::Codec {
        key: key.to_string(),
        source,
    })
}
