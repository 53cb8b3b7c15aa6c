use thiserror::Error;

/// Errors surfaced by domain-level conversions.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A raw integer amount cannot be represented by the decimal type.
    #[error("amount {raw} with {decimals} decimals exceeds decimal precision")]
    AmountOutOfRange {
        /// The raw amount, rendered as a decimal string.
        raw: String,
        /// The token's declared decimal precision.
        decimals: u8,
    },
}
