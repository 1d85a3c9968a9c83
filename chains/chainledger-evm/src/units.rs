//! Conversion of integer smallest-unit amounts into decimals.

use alloy_primitives::U256;
use rust_decimal::Decimal;

/// Error raised when an on-chain amount cannot be represented as a decimal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// The integer exceeds the 96-bit mantissa of [`Decimal`].
    #[error("amount {raw} at scale {scale} exceeds the representable decimal range")]
    Overflow { raw: U256, scale: u32 },

    /// The requested scale exceeds what [`Decimal`] supports (28 digits).
    #[error("decimal scale {scale} is not supported")]
    UnsupportedScale { scale: u32 },
}

/// Converts `raw` smallest units into a decimal with `scale` fractional
/// digits, i.e. `raw / 10^scale`. No rounding: the value either fits exactly
/// or the conversion fails.
pub fn decimal_from_units(raw: U256, scale: u32) -> Result<Decimal, AmountError> {
    let mut value = Decimal::from_str_exact(&raw.to_string())
        .map_err(|_| AmountError::Overflow { raw, scale })?;
    // set_scale rejects scales beyond Decimal's 28-digit precision.
    value
        .set_scale(scale)
        .map_err(|_| AmountError::UnsupportedScale { scale })?;
    Ok(value)
}
