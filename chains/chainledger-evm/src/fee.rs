//! Network fee computation.

use alloy_primitives::U256;
use rust_decimal::Decimal;

use crate::units::{AmountError, decimal_from_units};

/// Computes the fee paid for a transaction, in the native currency.
///
/// `gas_used × gas_price` is taken in 256-bit arithmetic before scaling:
/// chains with high gas costs overflow 64 bits long before they overflow the
/// decimal range.
pub fn compute_fee(
    gas_used: u64,
    gas_price: u128,
    native_decimals: u32,
) -> Result<Decimal, AmountError> {
    let wei = U256::from(gas_used) * U256::from(gas_price);
    decimal_from_units(wei, native_decimals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn fee_for_a_standard_transfer() {
        // 21000 gas at 1000 gwei.
        let fee = compute_fee(21_000, 1_000_000_000_000, 18).unwrap();
        assert_eq!(fee, dec!(0.021));
    }

    #[test]
    fn product_beyond_u64_range_is_exact() {
        // u64::MAX gas at 100 wei would overflow 64-bit arithmetic.
        let fee = compute_fee(u64::MAX, 100, 18).unwrap();
        assert_eq!(fee, dec!(1844.674407370955161500));
    }

    #[test]
    fn fee_is_monotonic_in_gas_used() {
        let price = 7_000_000_000u128;
        let mut previous = Decimal::ZERO;
        for gas_used in [0u64, 1, 21_000, 500_000, 30_000_000] {
            let fee = compute_fee(gas_used, price, 18).unwrap();
            assert!(fee >= previous);
            previous = fee;
        }
    }
}
