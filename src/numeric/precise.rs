// ============================================================================
// Precise Math
// Scale-preserving multiply/divide with explicit rounding policy
// ============================================================================
//
// All operands are raw integers scaled by PRECISE_UNIT (10^18). Plain `/` on
// BigInt truncates toward zero, which is the rounding convention the on-chain
// math library uses; only `div_down` floors.

use super::errors::{NumericError, NumericResult};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Scale factor of a precise (18 decimal) fixed-point value.
pub const PRECISE_UNIT: u64 = 1_000_000_000_000_000_000;

/// Number of decimals encoded by [`PRECISE_UNIT`].
pub const PRECISE_DECIMALS: u32 = 18;

/// `PRECISE_UNIT` as a big integer.
#[inline]
pub fn precise_unit() -> BigInt {
    BigInt::from(PRECISE_UNIT)
}

#[inline]
fn same_sign(a: &BigInt, b: &BigInt) -> bool {
    a.sign() == b.sign()
}

/// Fixed-point multiply, truncating: `a * b / UNIT`.
pub fn precise_mul(a: &BigInt, b: &BigInt) -> BigInt {
    (a * b) / precise_unit()
}

/// Fixed-point multiply rounded up: `(a * b - 1) / UNIT + 1`.
///
/// Returns zero when either operand is zero.
pub fn precise_mul_ceil(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() || b.is_zero() {
        return BigInt::zero();
    }
    (a * b - BigInt::one()) / precise_unit() + BigInt::one()
}

/// Sign-aware ceiling multiply.
///
/// Operands of the same sign use the unsigned ceiling formula; operands of
/// different signs use `(a * b + 1) / UNIT - 1`. In both cases the magnitude
/// of any inexact result is rounded up.
pub fn precise_mul_ceil_int(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() || b.is_zero() {
        return BigInt::zero();
    }
    let product = a * b;
    if same_sign(a, b) {
        (product - BigInt::one()) / precise_unit() + BigInt::one()
    } else {
        (product + BigInt::one()) / precise_unit() - BigInt::one()
    }
}

/// Fixed-point divide, truncating: `a * UNIT / b`.
///
/// # Errors
/// Returns `DivisionByZero` if `b` is zero.
pub fn precise_div(a: &BigInt, b: &BigInt) -> NumericResult<BigInt> {
    if b.is_zero() {
        return Err(NumericError::DivisionByZero);
    }
    Ok((a * precise_unit()) / b)
}

/// Fixed-point divide rounded up: `(a * UNIT - 1) / b + 1`.
///
/// Returns zero when either operand is zero, including a zero divisor.
pub fn precise_div_ceil(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() || b.is_zero() {
        return BigInt::zero();
    }
    (a * precise_unit() - BigInt::one()) / b + BigInt::one()
}

/// Sign-aware ceiling divide, mirroring [`precise_mul_ceil_int`].
///
/// Returns zero when either operand is zero, including a zero divisor.
pub fn precise_div_ceil_int(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() || b.is_zero() {
        return BigInt::zero();
    }
    let scaled = a * precise_unit();
    if same_sign(a, b) {
        (scaled - BigInt::one()) / b + BigInt::one()
    } else {
        (scaled + BigInt::one()) / b - BigInt::one()
    }
}

/// Integer division rounding toward negative infinity.
///
/// # Errors
/// Returns `DivisionByZero` if `b` is zero.
pub fn div_down(a: &BigInt, b: &BigInt) -> NumericResult<BigInt> {
    if b.is_zero() {
        return Err(NumericError::DivisionByZero);
    }
    Ok(a.div_floor(b))
}

/// Truncating `a * b / denominator` without intermediate rescaling.
///
/// # Errors
/// Returns `DivisionByZero` if `denominator` is zero.
pub fn mul_div(a: &BigInt, b: &BigInt, denominator: &BigInt) -> NumericResult<BigInt> {
    if denominator.is_zero() {
        return Err(NumericError::DivisionByZero);
    }
    Ok((a * b) / denominator)
}

/// Returns the smaller of two values.
#[inline]
pub fn min(x: &BigInt, y: &BigInt) -> BigInt {
    if x < y {
        x.clone()
    } else {
        y.clone()
    }
}

/// Integer square root by Babylonian iteration, `floor(sqrt(n))`.
///
/// # Errors
/// Returns `NegativeSquareRoot` for negative `n`.
pub fn sqrt(n: &BigInt) -> NumericResult<BigInt> {
    if n.sign() == num_bigint::Sign::Minus {
        return Err(NumericError::NegativeSquareRoot);
    }
    let two = BigInt::from(2u8);
    let mut y = n.clone();
    let mut z = (n + BigInt::one()) / &two;
    // z strictly decreases until it reaches floor(sqrt(n))
    while z < y {
        y = z.clone();
        z = (n / &z + &z) / &two;
    }
    Ok(y)
}

// ============================================================================
// Tests
// ============================================================================
