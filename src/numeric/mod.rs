// ============================================================================
// Numeric Module
// Fixed-point arithmetic on arbitrary-precision integers
// ============================================================================
//
// This module provides:
// - Precise (18 decimal) multiply/divide with floor and ceiling rounding
// - Sign-aware ceiling variants for signed position deltas
// - Floor division, min and integer square root
// - Conversions between human-readable amounts and raw token units
//
// Design principles:
// - No floating-point operations
// - No fixed-width overflow: every value is a num_bigint::BigInt
// - Division by zero is reported through NumericError, never a panic

mod errors;
mod precise;
mod units;

pub use errors::{NumericError, NumericResult};
pub use precise::{
    div_down, min, mul_div, precise_div, precise_div_ceil, precise_div_ceil_int, precise_mul,
    precise_mul_ceil, precise_mul_ceil_int, precise_unit, sqrt, PRECISE_DECIMALS, PRECISE_UNIT,
};
pub use units::{
    ether, format_units, from_decimal, parse_units, pow10, to_decimal, to_u128, units,
};

/// Raw on-chain amount (token base units or a precise 18-decimal value).
pub type Amount = num_bigint::BigInt;
