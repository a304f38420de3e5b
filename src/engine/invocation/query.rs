use crate::engine::{error::ContractError, invocation::Invocation};

/// A validated read of one key: an account on the cash ledger, a loan id on
/// the loan broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    key: String,
}

impl Query {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl TryFrom<&Invocation> for Query {
    type Error = ContractError;

    fn try_from(invocation: &Invocation) -> Result<Self, Self::Error> {
        let [key] = invocation.exact_args::<1>()?;
        Ok(Query::new(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_query() {
        let query = Query::try_from(&Invocation::new("cash", "query", ["pbc"])).unwrap();
        assert_eq!(query.key(), "pbc");
    }

    #[test]
    fn test_rejects_missing_key() {
        let invocation = Invocation::new("cash", "query", Vec::<String>::new());
        assert!(matches!(
            Query::try_from(&invocation),
            Err(ContractError::ArgumentCount { got: 0, .. })
        ));
    }
}
