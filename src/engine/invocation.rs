mod offer;
mod query;
mod transfer;
mod transfer_many;

pub use offer::Offer;
pub use query::Query;
pub use transfer::Transfer;
pub use transfer_many::{Debit, TransferMany};

use crate::engine::error::ContractError;

/// Function names of the invocation surface.
pub mod function {
    pub const INIT: &str = "init";
    pub const TRANSFER: &str = "invoke";
    pub const TRANSFER_MANY: &str = "transferN2A";
    pub const QUERY: &str = "query";
    pub const OFFER: &str = "offer";
}

/// Raw invocation: a contract name, a function name and string arguments.
/// This is the unvalidated form that gets converted into a typed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub contract: String,
    pub function: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(contract: &str, function: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            contract: contract.to_string(),
            function: function.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the arguments if there are exactly `N` of them.
    pub(crate) fn exact_args<const N: usize>(&self) -> Result<&[String; N], ContractError> {
        <&[String; N]>::try_from(self.args.as_slice()).map_err(|_| ContractError::ArgumentCount {
            function: self.function.clone(),
            expected: N.to_string(),
            got: self.args.len(),
        })
    }

    fn unknown_function(&self) -> ContractError {
        ContractError::UnknownFunction {
            contract: self.contract.clone(),
            function: self.function.clone(),
        }
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}({})", self.contract, self.function, self.args.join(", "))
    }
}

/// A validated call on the cash ledger.
#[derive(Debug, Clone)]
pub enum CashCall {
    Init,
    Transfer(Transfer),
    TransferMany(TransferMany),
    Query(Query),
}

impl TryFrom<&Invocation> for CashCall {
    type Error = ContractError;

    fn try_from(invocation: &Invocation) -> Result<Self, Self::Error> {
        match invocation.function.as_str() {
            function::INIT => {
                invocation.exact_args::<0>()?;
                Ok(CashCall::Init)
            }
            function::TRANSFER => Ok(CashCall::Transfer(Transfer::try_from(invocation)?)),
            function::TRANSFER_MANY => {
                Ok(CashCall::TransferMany(TransferMany::try_from(invocation)?))
            }
            function::QUERY => Ok(CashCall::Query(Query::try_from(invocation)?)),
            _ => Err(invocation.unknown_function()),
        }
    }
}

/// A validated call on the loan broker.
#[derive(Debug, Clone)]
pub enum LoanCall {
    Init,
    Offer(Offer),
    Query(Query),
}

impl TryFrom<&Invocation> for LoanCall {
    type Error = ContractError;

    fn try_from(invocation: &Invocation) -> Result<Self, Self::Error> {
        match invocation.function.as_str() {
            function::INIT => {
                invocation.exact_args::<0>()?;
                Ok(LoanCall::Init)
            }
            function::OFFER => Ok(LoanCall::Offer(Offer::try_from(invocation)?)),
            function::QUERY => Ok(LoanCall::Query(Query::try_from(invocation)?)),
            _ => Err(invocation.unknown_function()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cash_call_dispatch() {
        let call = CashCall::try_from(&Invocation::new("cash", "invoke", ["a", "b", "1"])).unwrap();
        assert!(matches!(call, CashCall::Transfer(_)));

        let call = CashCall::try_from(&Invocation::new("cash", "transferN2A", ["r"])).unwrap();
        assert!(matches!(call, CashCall::TransferMany(_)));

        let call = CashCall::try_from(&Invocation::new("cash", "query", ["a"])).unwrap();
        assert!(matches!(call, CashCall::Query(_)));

        let invocation = Invocation::new("cash", "init", Vec::<String>::new());
        let call = CashCall::try_from(&invocation).unwrap();
        assert!(matches!(call, CashCall::Init));
    }

    #[test]
    fn test_cash_rejects_loan_functions() {
        let invocation = Invocation::new("cash", "offer", ["L1", "a", "b", "1", "cash"]);
        assert!(matches!(
            CashCall::try_from(&invocation),
            Err(ContractError::UnknownFunction { function, .. }) if function == "offer"
        ));
    }

    #[test]
    fn test_loan_rejects_cash_functions() {
        let invocation = Invocation::new("loan", "invoke", ["a", "b", "1"]);
        assert!(matches!(
            LoanCall::try_from(&invocation),
            Err(ContractError::UnknownFunction { .. })
        ));
    }

    #[test]
    fn test_init_takes_no_arguments() {
        let invocation = Invocation::new("cash", "init", ["x"]);
        assert!(matches!(
            CashCall::try_from(&invocation),
            Err(ContractError::ArgumentCount { expected, got: 1, .. }) if expected == "0"
        ));
    }

    #[test]
    fn test_display() {
        let invocation = Invocation::new("cash", "invoke", ["a", "b", "1"]);
        assert_eq!(invocation.to_string(), "cash.invoke(a, b, 1)");
    }
}
