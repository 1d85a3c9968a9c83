//! Raw node data as consumed by the normalizer.
//!
//! These are the backend's view of what the RPC collaborator returns, not a
//! wire format: an [`rpc::EvmRpc`](crate::rpc::EvmRpc) implementation maps
//! whatever its transport yields into these structs. The normalizer treats
//! them as read-only input.

use alloy_primitives::{Address, B256, Bytes, U256};
use serde::{Deserialize, Serialize};

/// A confirmed transaction as fetched from the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub hash: B256,
    pub from: Address,
    /// Absent for contract-creation transactions.
    pub to: Option<Address>,
    /// Transferred value in wei.
    pub value: U256,
    /// Legacy gas price in wei; zero for dynamic-fee transactions.
    pub gas_price: u128,
    /// EIP-1559 max fee per gas in wei; zero for legacy transactions.
    pub gas_fee_cap: u128,
    pub gas_limit: u64,
}

impl RawTransaction {
    /// Price per gas unit the sender is charged at: the fee cap for
    /// dynamic-fee transactions, the gas price for legacy ones.
    pub fn effective_gas_price(&self) -> u128 {
        if self.gas_fee_cap > 0 {
            self.gas_fee_cap
        } else {
            self.gas_price
        }
    }

    /// Total value debited from the sender: transferred value plus the
    /// worst-case gas charge.
    pub fn cost(&self) -> U256 {
        self.value + U256::from(self.effective_gas_price()) * U256::from(self.gas_limit)
    }
}

/// A single event log emitted during execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Contract that emitted the log.
    pub address: Address,
    /// 32-byte indexed fields; topic 0 identifies the event type.
    pub topics: Vec<B256>,
    /// Unindexed payload.
    pub data: Bytes,
    pub block_hash: B256,
    pub block_number: u64,
}

impl LogEntry {
    /// Whether the log carries confirmation evidence. Some RPC providers
    /// return logs with a zeroed block hash and number while their index
    /// lags; such entries must not be interpreted.
    pub fn is_confirmed(&self) -> bool {
        !(self.block_hash.is_zero() && self.block_number == 0)
    }
}

/// An execution receipt as fetched from the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReceipt {
    /// Raw status code: 1 success, 0 failure, anything else pending.
    pub status: u64,
    pub gas_used: u64,
    pub logs: Vec<LogEntry>,
    pub block_number: u64,
    pub block_hash: B256,
}

/// A block together with its raw transaction list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBlock {
    pub hash: B256,
    pub number: u64,
    pub transactions: Vec<RawTransaction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};
    use pretty_assertions::assert_eq;

    #[test]
    fn cost_uses_fee_cap_when_present() {
        let tx = RawTransaction {
            hash: B256::ZERO,
            from: address!("1111111111111111111111111111111111111111"),
            to: None,
            value: U256::from(100u64),
            gas_price: 2,
            gas_fee_cap: 5,
            gas_limit: 10,
        };
        assert_eq!(tx.effective_gas_price(), 5);
        assert_eq!(tx.cost(), U256::from(150u64));
    }

    #[test]
    fn cost_falls_back_to_gas_price_for_legacy() {
        let tx = RawTransaction {
            hash: B256::ZERO,
            from: address!("1111111111111111111111111111111111111111"),
            to: None,
            value: U256::from(100u64),
            gas_price: 2,
            gas_fee_cap: 0,
            gas_limit: 10,
        };
        assert_eq!(tx.cost(), U256::from(120u64));
    }

    #[test]
    fn unconfirmed_log_is_detected() {
        let confirmed = LogEntry {
            address: Address::ZERO,
            topics: vec![],
            data: Bytes::new(),
            block_hash: b256!("00000000000000000000000000000000000000000000000000000000000000aa"),
            block_number: 7,
        };
        assert!(confirmed.is_confirmed());

        let unconfirmed = LogEntry {
            block_hash: B256::ZERO,
            block_number: 0,
            ..confirmed
        };
        assert!(!unconfirmed.is_confirmed());
    }
}
