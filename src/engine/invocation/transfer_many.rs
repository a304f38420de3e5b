use crate::engine::{amount::Amount, error::ContractError, invocation::Invocation};

/// One sender's share of a multi-sender transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debit {
    sender: String,
    amount: Amount,
}

impl Debit {
    pub fn new(sender: &str, amount: Amount) -> Self {
        Self {
            sender: sender.to_string(),
            amount,
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

/// A validated multi-sender transfer:
/// `transferN2A(receiver, sender1, amount1, sender2, amount2, ...)`.
///
/// Every amount is parsed up front, so a malformed amount anywhere in the
/// list fails the call before any sender is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferMany {
    receiver: String,
    debits: Vec<Debit>,
}

impl TransferMany {
    pub fn new(receiver: &str, debits: Vec<Debit>) -> Self {
        Self {
            receiver: receiver.to_string(),
            debits,
        }
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    /// Debits in invocation order.
    pub fn debits(&self) -> &[Debit] {
        &self.debits
    }
}

impl TryFrom<&Invocation> for TransferMany {
    type Error = ContractError;

    fn try_from(invocation: &Invocation) -> Result<Self, Self::Error> {
        let Some((receiver, pairs)) = invocation.args.split_first() else {
            return Err(odd_count_error(invocation));
        };
        if pairs.len() % 2 != 0 {
            return Err(odd_count_error(invocation));
        }

        let debits = pairs
            .chunks_exact(2)
            .map(|pair| -> Result<Debit, ContractError> {
                Ok(Debit::new(&pair[0], Amount::parse(&pair[1])?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TransferMany::new(receiver, debits))
    }
}

fn odd_count_error(invocation: &Invocation) -> ContractError {
    ContractError::ArgumentCount {
        function: invocation.function.clone(),
        expected: "an odd number".to_string(),
        got: invocation.args.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_transfer_many() {
        let invocation = Invocation::new("cash", "transferN2A", ["r", "s1", "5", "s2", "10"]);
        let transfer = TransferMany::try_from(&invocation).unwrap();

        assert_eq!(transfer.receiver(), "r");
        assert_eq!(transfer.debits().len(), 2);
        assert_eq!(transfer.debits()[0].sender(), "s1");
        assert_eq!(transfer.debits()[0].amount().value(), dec!(5));
        assert_eq!(transfer.debits()[1].sender(), "s2");
        assert_eq!(transfer.debits()[1].amount().value(), dec!(10));
    }

    #[test]
    fn test_receiver_only_is_valid() {
        let invocation = Invocation::new("cash", "transferN2A", ["r"]);
        let transfer = TransferMany::try_from(&invocation).unwrap();
        assert!(transfer.debits().is_empty());
    }

    #[test]
    fn test_rejects_even_argument_count() {
        for args in [vec![], vec!["r", "s1"], vec!["r", "s1", "5", "s2"]] {
            let invocation = Invocation::new("cash", "transferN2A", args);
            assert!(matches!(
                TransferMany::try_from(&invocation),
                Err(ContractError::ArgumentCount { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_malformed_amount_anywhere() {
        let invocation = Invocation::new("cash", "transferN2A", ["r", "s1", "5", "s2", "x"]);
        assert!(matches!(
            TransferMany::try_from(&invocation),
            Err(ContractError::InvalidAmount { value }) if value == "x"
        ));
    }
}
