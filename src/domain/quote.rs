// ============================================================================
// Quote Results
// ============================================================================

use super::TokenId;
use num_bigint::BigInt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The four issuance/redemption operations a quote can be computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum QuoteKind {
    /// Spend an exact input, receive the maximum basket amount
    IssueExactInput,
    /// Receive an exact basket amount, spend the minimum input
    IssueExactOutput,
    /// Redeem an exact basket amount, receive the resulting output
    RedeemExactInput,
}

impl QuoteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteKind::IssueExactInput => "issue_exact_input",
            QuoteKind::IssueExactOutput => "issue_exact_output",
            QuoteKind::RedeemExactInput => "redeem_exact_input",
        }
    }
}

/// Result of issuing an exact basket amount paid for with an arbitrary token.
///
/// The caller supplies `amount_in` of the input token; it is converted to
/// `input_value_in_base`, `cost_in_base` is spent on components and the
/// remainder is returned to the caller as `refund` (in base currency).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExactOutputQuote {
    pub input_token: TokenId,
    pub amount_set_out: BigInt,
    pub input_value_in_base: BigInt,
    pub cost_in_base: BigInt,
    pub refund: BigInt,
}

/// Per-component detail of a quote, reported to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComponentQuote {
    pub component: TokenId,
    /// Base currency spent (issuance) or received (redemption)
    pub base_amount: BigInt,
    /// Component units bought or sold
    pub component_amount: BigInt,
}
