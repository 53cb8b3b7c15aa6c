pub mod exchange;
pub mod pair;
pub mod token;

// Re-export for easier access
pub use exchange::{Bundle, Exchange};
pub use pair::{ExchangePair, Pair, price_ratio};
pub use token::{ExchangeToken, Token};
