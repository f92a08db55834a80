// ============================================================================
// Quote Errors
// Failures surfaced by the quoting engine and its collaborators
// ============================================================================

use super::TokenId;
use crate::numeric::NumericError;
use num_bigint::BigInt;
use std::fmt;

/// Errors that can occur while computing an issuance or redemption quote.
///
/// None of these are recovered by the engine; a quote either fully succeeds
/// or fails with one of these variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// Arithmetic failure (division by zero, out-of-range conversion)
    Arithmetic(NumericError),

    /// Basket has no usable components or a component quantity is invalid
    InvalidComposition { basket: TokenId, reason: String },

    /// The exchange cannot price the requested pair
    QuoteUnavailable {
        token_in: TokenId,
        token_out: TokenId,
        reason: String,
    },

    /// Zero input, output or basket amount passed to an operation
    ZeroAmount { operation: &'static str },

    /// Input is worth less than the cost of the requested output
    InsufficientInput { available: BigInt, required: BigInt },
}

impl QuoteError {
    pub fn invalid_composition(basket: &TokenId, reason: impl Into<String>) -> Self {
        QuoteError::InvalidComposition {
            basket: basket.clone(),
            reason: reason.into(),
        }
    }

    pub fn unavailable(token_in: &TokenId, token_out: &TokenId, reason: impl Into<String>) -> Self {
        QuoteError::QuoteUnavailable {
            token_in: token_in.clone(),
            token_out: token_out.clone(),
            reason: reason.into(),
        }
    }

    /// Short machine-readable kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            QuoteError::Arithmetic(_) => "arithmetic",
            QuoteError::InvalidComposition { .. } => "invalid_composition",
            QuoteError::QuoteUnavailable { .. } => "quote_unavailable",
            QuoteError::ZeroAmount { .. } => "zero_amount",
            QuoteError::InsufficientInput { .. } => "insufficient_input",
        }
    }
}

impl fmt::Display for QuoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteError::Arithmetic(err) => write!(f, "arithmetic error: {}", err),
            QuoteError::InvalidComposition { basket, reason } => {
                write!(f, "invalid composition for basket {}: {}", basket, reason)
            },
            QuoteError::QuoteUnavailable {
                token_in,
                token_out,
                reason,
            } => write!(
                f,
                "quote unavailable for {} -> {}: {}",
                token_in, token_out, reason
            ),
            QuoteError::ZeroAmount { operation } => {
                write!(f, "{}: amount must be greater than zero", operation)
            },
            QuoteError::InsufficientInput {
                available,
                required,
            } => write!(
                f,
                "insufficient input: worth {} but {} required",
                available, required
            ),
        }
    }
}

impl std::error::Error for QuoteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuoteError::Arithmetic(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NumericError> for QuoteError {
    fn from(err: NumericError) -> Self {
        QuoteError::Arithmetic(err)
    }
}

/// Result type alias for quoting operations
pub type QuoteResult<T> = Result<T, QuoteError>;
