// ============================================================================
// Exchange Quote Source Interface
// Defines the contract for pricing swaps on an automated market maker
// ============================================================================

use crate::domain::{QuoteResult, TokenId};
use num_bigint::BigInt;

/// Quote primitives of a constant-product style exchange.
///
/// Fee deduction and rounding are defined by the implementation; the quoting
/// engine treats it as an opaque oracle.
pub trait ExchangeQuoteSource: Send + Sync {
    /// Amount of `token_out` received for exactly `amount_in` of `token_in`
    fn quote_amount_out(
        &self,
        amount_in: &BigInt,
        token_in: &TokenId,
        token_out: &TokenId,
    ) -> QuoteResult<BigInt>;

    /// Amount of `token_in` required to receive exactly `amount_out` of `token_out`
    fn quote_amount_in(
        &self,
        amount_out: &BigInt,
        token_in: &TokenId,
        token_out: &TokenId,
    ) -> QuoteResult<BigInt>;

    /// Get the exchange name for logging
    fn name(&self) -> &str;
}
