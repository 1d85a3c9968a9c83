//! Abstract node RPC collaborator.
//!
//! The normalization core performs no I/O; everything it needs from a node
//! comes through this trait. Implementations own their transport, retry and
//! timeout policy; errors they return are surfaced to callers unmodified.

use alloy_primitives::{Address, B256, Bytes, U256};
use async_trait::async_trait;

use crate::types::{RawBlock, RawReceipt, RawTransaction};

/// Read-only view of an EVM node.
#[async_trait]
pub trait EvmRpc: Send + Sync {
    /// Transport-level error type, propagated to callers as-is.
    type Error: std::error::Error + Send + Sync + 'static;

    async fn latest_block_number(&self) -> Result<u64, Self::Error>;

    async fn block_by_number(&self, number: u64) -> Result<RawBlock, Self::Error>;

    async fn block_by_hash(&self, hash: B256) -> Result<RawBlock, Self::Error>;

    async fn transaction_by_hash(&self, hash: B256) -> Result<RawTransaction, Self::Error>;

    async fn transaction_receipt(&self, hash: B256) -> Result<RawReceipt, Self::Error>;

    /// Account balance in wei at the given block.
    async fn account_balance(&self, address: Address, block: u64) -> Result<U256, Self::Error>;

    /// Executes a read-only contract call at the given block and returns the
    /// raw ABI-encoded output.
    async fn call_contract(
        &self,
        contract: Address,
        data: Bytes,
        block: u64,
    ) -> Result<Bytes, Self::Error>;
}
