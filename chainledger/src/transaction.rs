//! Normalized transaction records.
//!
//! A single on-chain transaction can legitimately produce zero, one or many
//! normalized records (a contract call may emit several token transfers), so
//! backends always return `Vec<NormalizedTransaction>`. Records are built once
//! and never mutated afterwards; ownership passes entirely to the caller.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Execution outcome of a transaction as reported by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    /// Not yet (or never) confirmed by the chain.
    Pending,
    /// Executed successfully.
    Success,
    /// Executed and reverted.
    Failed,
}

impl std::fmt::Display for TxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Value movement described by a record.
///
/// Modeled as a tagged variant rather than optional fields so that the
/// "addresses and amount are absent for fee-only records" contract is
/// checkable at compile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transfer {
    /// Movement of the chain's intrinsic currency.
    Native(TransferLeg),
    /// Movement of a contract-based fungible token.
    Token(TransferLeg),
    /// A reverted contract call that still debited a fee. No event evidence
    /// exists to populate counterparties or an amount.
    FeeDebit { block_number: u64 },
}

/// Counterparties and amount of a native or token transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferLeg {
    pub from_addresses: Vec<String>,
    pub to_address: String,
    pub amount: Decimal,
}

/// A single uniform transaction record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTransaction {
    /// Identifier of the transferred asset in the currency settings.
    pub currency_id: String,
    /// Identifier of the asset the fee was paid in (the native currency).
    pub fee_currency_id: String,
    /// Hash of the originating transaction, 0x-prefixed hex.
    pub tx_hash: String,
    /// Network fee debited from the sender, in the fee currency.
    pub fee: Decimal,
    pub status: TxStatus,
    pub transfer: Transfer,
}

impl NormalizedTransaction {
    /// Transferred amount; zero for fee-only records.
    pub fn amount(&self) -> Decimal {
        match &self.transfer {
            Transfer::Native(leg) | Transfer::Token(leg) => leg.amount,
            Transfer::FeeDebit { .. } => Decimal::ZERO,
        }
    }

    /// Source addresses; empty for fee-only records.
    pub fn from_addresses(&self) -> &[String] {
        match &self.transfer {
            Transfer::Native(leg) | Transfer::Token(leg) => &leg.from_addresses,
            Transfer::FeeDebit { .. } => &[],
        }
    }

    /// Destination address, if the record carries one.
    pub fn to_address(&self) -> Option<&str> {
        match &self.transfer {
            Transfer::Native(leg) | Transfer::Token(leg) => Some(&leg.to_address),
            Transfer::FeeDebit { .. } => None,
        }
    }

    /// Block number; only populated for fee-only records, where it is the
    /// sole confirmation evidence available.
    pub fn block_number(&self) -> Option<u64> {
        match &self.transfer {
            Transfer::FeeDebit { block_number } => Some(*block_number),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn token_record() -> NormalizedTransaction {
        NormalizedTransaction {
            currency_id: "usdx".to_string(),
            fee_currency_id: "eth".to_string(),
            tx_hash: "0xabc".to_string(),
            fee: dec!(0.021),
            status: TxStatus::Success,
            transfer: Transfer::Token(TransferLeg {
                from_addresses: vec!["0x1111".to_string()],
                to_address: "0x2222".to_string(),
                amount: dec!(0.001),
            }),
        }
    }

    #[test]
    fn accessors_for_transfer_record() {
        let record = token_record();
        assert_eq!(record.amount(), dec!(0.001));
        assert_eq!(record.from_addresses(), ["0x1111".to_string()]);
        assert_eq!(record.to_address(), Some("0x2222"));
        assert_eq!(record.block_number(), None);
    }

    #[test]
    fn accessors_for_fee_only_record() {
        let record = NormalizedTransaction {
            transfer: Transfer::FeeDebit { block_number: 1204 },
            ..token_record()
        };
        assert_eq!(record.amount(), Decimal::ZERO);
        assert!(record.from_addresses().is_empty());
        assert_eq!(record.to_address(), None);
        assert_eq!(record.block_number(), Some(1204));
    }

    #[test]
    fn status_display_matches_serde_rendering() {
        for status in [TxStatus::Pending, TxStatus::Success, TxStatus::Failed] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }
}
