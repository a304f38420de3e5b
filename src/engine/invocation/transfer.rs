use crate::engine::{amount::Amount, error::ContractError, invocation::Invocation};

/// A validated single transfer: `invoke(from, to, amount)`.
///
/// `from` must hold enough funds; `to` is created on first credit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    from: String,
    to: String,
    amount: Amount,
}

impl Transfer {
    pub fn new(from: &str, to: &str, amount: Amount) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            amount,
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

impl TryFrom<&Invocation> for Transfer {
    type Error = ContractError;

    fn try_from(invocation: &Invocation) -> Result<Self, Self::Error> {
        let [from, to, amount] = invocation.exact_args::<3>()?;
        Ok(Transfer::new(from, to, Amount::parse(amount)?))
    }
}
