//! Block container returned by chain backends.

use serde::{Deserialize, Serialize};

use crate::transaction::NormalizedTransaction;

/// A confirmed block together with the normalized records of every
/// transaction it contains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block hash, 0x-prefixed hex.
    pub hash: String,
    pub number: u64,
    pub transactions: Vec<NormalizedTransaction>,
}
