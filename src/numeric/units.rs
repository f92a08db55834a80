// ============================================================================
// Token Units
// Conversion between human-readable amounts and raw scaled integers
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::precise::{precise_unit, PRECISE_DECIMALS};
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};

/// Compute 10^decimals as a big integer.
pub fn pow10(decimals: u32) -> BigInt {
    num_traits::pow(BigInt::from(10u8), decimals as usize)
}

/// Whole units of an 18-decimal token (`ether(1) == 10^18`).
#[inline]
pub fn ether(whole: u64) -> BigInt {
    BigInt::from(whole) * precise_unit()
}

/// Whole units of a token with `decimals` decimals.
#[inline]
pub fn units(whole: u64, decimals: u32) -> BigInt {
    BigInt::from(whole) * pow10(decimals)
}

/// Parse a decimal string into a raw integer scaled by `10^decimals`.
///
/// # Examples
/// - `parse_units("1.5", 18)` -> `1_500_000_000_000_000_000`
/// - `parse_units("-0.01", 6)` -> `-10_000`
///
/// # Errors
/// - `InvalidInput` for malformed strings
/// - `PrecisionLoss` if the string has more fractional digits than `decimals`
pub fn parse_units(s: &str, decimals: u32) -> NumericResult<BigInt> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NumericError::InvalidInput);
    }

    let (is_negative, s) = if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else {
        (false, s)
    };

    let (int_str, frac_str) = match s.find('.') {
        Some(pos) => (&s[..pos], &s[pos + 1..]),
        None => (s, ""),
    };

    if int_str.is_empty() && frac_str.is_empty() {
        return Err(NumericError::InvalidInput);
    }
    if !int_str.chars().chain(frac_str.chars()).all(|c| c.is_ascii_digit()) {
        return Err(NumericError::InvalidInput);
    }
    if frac_str.len() > decimals as usize {
        return Err(NumericError::PrecisionLoss);
    }

    // Pad the fraction to exactly `decimals` digits and parse as one integer
    let digits = format!(
        "{}{:0<width$}",
        int_str,
        frac_str,
        width = decimals as usize
    );
    let magnitude = digits
        .parse::<BigInt>()
        .map_err(|_| NumericError::InvalidInput)?;

    Ok(if is_negative { -magnitude } else { magnitude })
}

/// Render a raw scaled integer as a decimal string with `decimals` places.
pub fn format_units(value: &BigInt, decimals: u32) -> String {
    let scale = pow10(decimals);
    let magnitude = value.abs();
    let int_part = &magnitude / &scale;
    let frac_part = &magnitude % &scale;
    let sign = if value.is_negative() { "-" } else { "" };

    if decimals == 0 {
        format!("{}{}", sign, int_part)
    } else {
        format!(
            "{}{}.{:0>width$}",
            sign,
            int_part,
            frac_part.to_string(),
            width = decimals as usize
        )
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

/// Convert a `rust_decimal::Decimal` into a precise (18 decimal) raw value.
///
/// # Errors
/// Returns `PrecisionLoss` if the decimal carries more than 18 significant
/// fractional digits. Trailing zeros do not count.
pub fn from_decimal(d: rust_decimal::Decimal) -> NumericResult<BigInt> {
    let d = d.normalize();
    let scale = d.scale();
    if scale > PRECISE_DECIMALS {
        return Err(NumericError::PrecisionLoss);
    }
    let mantissa = BigInt::from(d.mantissa());
    Ok(mantissa * pow10(PRECISE_DECIMALS - scale))
}

/// Convert a precise raw value into a `rust_decimal::Decimal`.
///
/// This is intended for display/reporting only.
///
/// # Errors
/// Returns `Overflow` if the value does not fit Decimal's 96-bit mantissa.
pub fn to_decimal(value: &BigInt) -> NumericResult<rust_decimal::Decimal> {
    let raw = value.to_i128().ok_or(NumericError::Overflow)?;
    rust_decimal::Decimal::try_from_i128_with_scale(raw, PRECISE_DECIMALS)
        .map(|d| d.normalize())
        .map_err(|_| NumericError::Overflow)
}

/// Narrow a raw value to `u128`, e.g. for on-chain calldata.
///
/// # Errors
/// Returns `Overflow` for negative values or values above `u128::MAX`.
pub fn to_u128(value: &BigInt) -> NumericResult<u128> {
    value.to_u128().ok_or(NumericError::Overflow)
}

// ============================================================================
// Tests
// ============================================================================
