use crate::error::DomainError;
use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A raw on-chain integer amount together with its declared precision.
///
/// Scaling to a [`Decimal`] is exact division by `10^decimals`; the raw
/// value goes through its decimal-string form because `U256` can exceed
/// every primitive `Decimal` conversion source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// Raw integer amount as emitted on chain.
    pub raw: U256,
    /// Declared decimal precision.
    pub decimals: u8,
}

impl Amount {
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// Scales the raw amount down by `10^decimals`.
    ///
    /// # Errors
    /// Returns [`DomainError::AmountOutOfRange`] when the raw value or
    /// the divisor exceeds the decimal type's 96-bit mantissa.
    pub fn to_decimal(&self) -> Result<Decimal, DomainError> {
        let out_of_range = || DomainError::AmountOutOfRange {
            raw: self.raw.to_string(),
            decimals: self.decimals,
        };

        let raw = Decimal::from_str(&self.raw.to_string()).map_err(|_| out_of_range())?;

        let mut divisor = Decimal::ONE;
        for _ in 0..self.decimals {
            divisor = divisor.checked_mul(Decimal::TEN).ok_or_else(out_of_range)?;
        }

        Ok(raw / divisor)
    }
}
