use std::fmt;
use std::str::FromStr;

use super::error::ContractError;
use super::Decimal;

/// A non-negative monetary amount carried by an invocation.
///
/// Zero is allowed (a zero transfer is a no-op that still validates the
/// sender). Negative values are rejected: they would move funds in the
/// reverse direction without checking the other party's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, ContractError> {
        if value < Decimal::ZERO {
            return Err(ContractError::InvalidAmount {
                value: value.to_string(),
            });
        }
        Ok(Self(value.normalize()))
    }

    /// Parses an argument string. Plain and scientific notation are accepted.
    ///
    /// A well-formed number that `Decimal` cannot hold (`1e-40`) is
    /// reported as out of range rather than as malformed.
    pub fn parse(raw: &str) -> Result<Self, ContractError> {
        let trimmed = raw.trim();
        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| match trimmed.parse::<f64>() {
                Ok(float) if float.is_finite() && float >= 0.0 => ContractError::AmountOutOfRange {
                    value: raw.to_string(),
                },
                _ => ContractError::InvalidAmount {
                    value: raw.to_string(),
                },
            })?;
        Self::new(value).map_err(|_| ContractError::InvalidAmount {
            value: raw.to_string(),
        })
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = ContractError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_plain_decimal() {
        assert_eq!(Amount::parse("100.25").unwrap().value(), dec!(100.25));
        assert_eq!(Amount::parse(" 7 ").unwrap().value(), dec!(7));
    }

    #[test]
    fn test_parse_scientific_notation() {
        assert_eq!(Amount::parse("1e3").unwrap().value(), dec!(1000));
    }

    #[test]
    fn test_parse_allows_zero() {
        assert_eq!(Amount::parse("0").unwrap(), Amount::ZERO);
        assert_eq!(Amount::parse("-0").unwrap(), Amount::ZERO);
    }

    #[test]
    fn test_rejects_negative_amount() {
        assert!(matches!(
            Amount::parse("-5"),
            Err(ContractError::InvalidAmount { value }) if value == "-5"
        ));
        assert!(Amount::new(dec!(-0.01)).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        for raw in ["", "abc", "12abc", "1,000"] {
            assert!(
                matches!(Amount::parse(raw), Err(ContractError::InvalidAmount { .. })),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_unrepresentable_number_is_out_of_range() {
        for raw in ["1e-40", "2.5e-31"] {
            assert!(
                matches!(
                    Amount::parse(raw),
                    Err(ContractError::AmountOutOfRange { value }) if value == raw
                ),
                "{raw:?} should be out of range"
            );
        }
        assert!(matches!(
            Amount::parse("-1e-40"),
            Err(ContractError::InvalidAmount { .. })
        ));
        assert!(matches!(
            Amount::parse("inf"),
            Err(ContractError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_value_is_normalized() {
        assert_eq!(Amount::parse("5.000").unwrap().value().to_string(), "5");
    }
}
