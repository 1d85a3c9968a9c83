//! ERC-20 Transfer event decoding.
//!
//! A log is interpreted as a Transfer when its first topic equals the
//! keccak-256 hash of `Transfer(address,address,uint256)`. The two indexed
//! parameters carry the counterparties as left-zero-padded addresses; the
//! unindexed payload carries the amount as a big-endian integer.

use alloy_primitives::{Address, B256, U256, b256};

use crate::types::LogEntry;

/// Topic 0 of `Transfer(address,address,uint256)`.
pub const TRANSFER_EVENT_TOPIC: B256 =
    b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");

/// A decoded Transfer event, amount still in the token's smallest units.
///
/// The caller matches `contract` against its registry and applies that
/// entry's decimal scale; the decoder itself knows nothing about tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferEvent {
    /// Contract that emitted the event.
    pub contract: Address,
    pub from: Address,
    pub to: Address,
    pub raw_amount: U256,
}

/// Error raised for a log that claims to be a Transfer but cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Transfer logs carry exactly two indexed parameters after topic 0.
    #[error("transfer log has {0} topics, expected 3")]
    MissingTopics(usize),

    /// The amount payload does not fit a uint256.
    #[error("transfer log data is {0} bytes, expected at most 32")]
    OversizedAmount(usize),
}

/// Encodes an address as a 32-byte, left-zero-padded topic.
pub fn address_to_topic(address: Address) -> B256 {
    B256::left_padding_from(address.as_slice())
}

/// Extracts the address from the last 20 bytes of a topic.
fn topic_to_address(topic: B256) -> Address {
    Address::from_slice(&topic[12..])
}

/// Decodes a single log entry.
///
/// Returns `Ok(None)` for logs that are simply not relevant: unconfirmed
/// entries (zeroed block hash and number, a known artifact of lagging RPC
/// indexes) and logs whose first topic is not the Transfer signature.
/// Returns an error only for Transfer-shaped logs with a malformed body.
pub fn decode_transfer_log(log: &LogEntry) -> Result<Option<TransferEvent>, DecodeError> {
    if !log.is_confirmed() {
        return Ok(None);
    }
    match log.topics.first() {
        Some(topic) if *topic == TRANSFER_EVENT_TOPIC => {}
        _ => return Ok(None),
    }
    if log.topics.len() < 3 {
        return Err(DecodeError::MissingTopics(log.topics.len()));
    }
    if log.data.len() > 32 {
        return Err(DecodeError::OversizedAmount(log.data.len()));
    }

    Ok(Some(TransferEvent {
        contract: log.address,
        from: topic_to_address(log.topics[1]),
        to: topic_to_address(log.topics[2]),
        raw_amount: U256::from_be_slice(&log.data),
    }))
}
