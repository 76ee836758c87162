//! Conversion between display amounts and integer smallest units.

use crate::errors::{AppError, Result};
use bigdecimal::BigDecimal;
use ethers::types::U256;
use num_bigint::{BigInt, Sign};

/// `U256::MAX` is below `10^78`, so no non-zero value survives a larger shift.
const MAX_DECIMAL_SHIFT: i64 = 77;

/// Scale `amount` by `10^decimals` into an on-chain integer.
///
/// Fails if the amount is negative, carries more fractional digits than the
/// token supports, or does not fit in 256 bits.
pub fn to_smallest_unit(amount: &BigDecimal, decimals: u8) -> Result<U256> {
    if amount.sign() == Sign::Minus {
        return Err(AppError::Amount(format!("{amount} is negative")));
    }

    let (digits, scale) = amount.normalized().into_bigint_and_exponent();
    if digits.sign() == Sign::NoSign {
        return Ok(U256::zero());
    }

    let too_large = || AppError::Amount(format!("{amount} does not fit in 256 bits"));
    let shift = i64::from(decimals).checked_sub(scale).ok_or_else(too_large)?;
    if shift < 0 {
        return Err(AppError::Amount(format!(
            "{amount} has more than {decimals} decimal places"
        )));
    }
    if shift > MAX_DECIMAL_SHIFT {
        return Err(too_large());
    }
    let shift = u32::try_from(shift).map_err(|_| too_large())?;

    let scaled = digits * BigInt::from(10u8).pow(shift);
    bigint_to_u256(&scaled).ok_or_else(too_large)
}

/// Inverse of [`to_smallest_unit`].
pub fn from_smallest_unit(value: U256, decimals: u8) -> BigDecimal {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    let digits = BigInt::from_bytes_be(Sign::Plus, &buf);
    BigDecimal::new(digits, i64::from(decimals))
}

fn bigint_to_u256(value: &BigInt) -> Option<U256> {
    let (sign, bytes) = value.to_bytes_be();
    if sign == Sign::Minus || bytes.len() > 32 {
        return None;
    }
    Some(U256::from_big_endian(&bytes))
}
