//! Ledger façade: composes the RPC collaborator with the normalizer.
//!
//! This is the surface callers use to read a chain: blocks and transactions
//! come back already normalized, balances come back already scaled. All
//! blocking happens inside the [`EvmRpc`] implementation; everything here is
//! plain orchestration.

use alloy_primitives::{Address, B256, Bytes};
use alloy_sol_types::{SolCall, sol};
use chainledger::block::Block;
use chainledger::transaction::NormalizedTransaction;
use rust_decimal::Decimal;
use tracing::warn;

use crate::normalizer::{NormalizeError, Normalizer};
use crate::registry::{AssetKind, CurrencyRegistry};
use crate::rpc::EvmRpc;
use crate::types::RawBlock;
use crate::units::{AmountError, decimal_from_units};

sol! {
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
    }
}

/// Error raised by ledger reads.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError<E: std::error::Error + 'static> {
    /// A node fetch failed; the transport error is passed through unmodified.
    #[error("upstream fetch failed: {0}")]
    Upstream(#[source] E),

    /// The requested currency id is not in the registry.
    #[error("currency {0:?} is not configured")]
    UnknownCurrency(String),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Amount(#[from] AmountError),

    /// A contract call returned output that does not decode as expected.
    #[error("malformed contract call output: {0}")]
    Abi(#[from] alloy_sol_types::Error),
}

/// Normalized read access to one EVM chain.
#[derive(Debug)]
pub struct EvmLedger<C> {
    client: C,
    normalizer: Normalizer,
}

impl<C: EvmRpc> EvmLedger<C> {
    pub fn new(client: C, registry: CurrencyRegistry) -> Self {
        Self {
            client,
            normalizer: Normalizer::new(registry),
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub async fn latest_block_number(&self) -> Result<u64, LedgerError<C::Error>> {
        self.client
            .latest_block_number()
            .await
            .map_err(LedgerError::Upstream)
    }

    /// Fetches a block and normalizes every transaction in it.
    pub async fn get_block_by_number(&self, number: u64) -> Result<Block, LedgerError<C::Error>> {
        let raw = self
            .client
            .block_by_number(number)
            .await
            .map_err(LedgerError::Upstream)?;
        self.assemble_block(raw).await
    }

    /// Fetches a block by hash and normalizes every transaction in it.
    pub async fn get_block_by_hash(&self, hash: B256) -> Result<Block, LedgerError<C::Error>> {
        let raw = self
            .client
            .block_by_hash(hash)
            .await
            .map_err(LedgerError::Upstream)?;
        self.assemble_block(raw).await
    }

    /// Fetches and normalizes a single transaction.
    pub async fn get_transaction(
        &self,
        hash: B256,
    ) -> Result<Vec<NormalizedTransaction>, LedgerError<C::Error>> {
        let tx = self
            .client
            .transaction_by_hash(hash)
            .await
            .map_err(LedgerError::Upstream)?;
        let receipt = self
            .client
            .transaction_receipt(hash)
            .await
            .map_err(LedgerError::Upstream)?;
        Ok(self.normalizer.normalize(&tx, &receipt)?)
    }

    /// Balance of `address` in the given currency at the latest block,
    /// scaled to a decimal. Token balances go through an ABI-encoded
    /// `balanceOf` call.
    pub async fn get_balance(
        &self,
        address: Address,
        currency_id: &str,
    ) -> Result<Decimal, LedgerError<C::Error>> {
        let entry = self
            .normalizer
            .registry()
            .by_id(currency_id)
            .ok_or_else(|| LedgerError::UnknownCurrency(currency_id.to_string()))?
            .clone();
        let block = self.latest_block_number().await?;

        let raw = match entry.kind {
            AssetKind::Native => self
                .client
                .account_balance(address, block)
                .await
                .map_err(LedgerError::Upstream)?,
            AssetKind::Token { contract } => {
                let call = IERC20::balanceOfCall { account: address };
                let output = self
                    .client
                    .call_contract(contract, Bytes::from(call.abi_encode()), block)
                    .await
                    .map_err(LedgerError::Upstream)?;
                IERC20::balanceOfCall::abi_decode_returns(&output)?
            }
        };

        Ok(decimal_from_units(raw, entry.decimals)?)
    }

    /// An invalid transaction is fatal only for itself, never for the block.
    async fn assemble_block(&self, raw: RawBlock) -> Result<Block, LedgerError<C::Error>> {
        let mut transactions = Vec::new();
        for tx in &raw.transactions {
            let receipt = self
                .client
                .transaction_receipt(tx.hash)
                .await
                .map_err(LedgerError::Upstream)?;
            match self.normalizer.normalize(tx, &receipt) {
                Ok(records) => transactions.extend(records),
                Err(err) => {
                    warn!(block = raw.number, tx = %tx.hash, error = %err,
                        "skipping unnormalizable transaction");
                }
            }
        }

        Ok(Block {
            hash: format!("{:#x}", raw.hash),
            number: raw.number,
            transactions,
        })
    }
}
