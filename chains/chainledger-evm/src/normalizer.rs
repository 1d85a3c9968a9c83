//! Transaction normalization.
//!
//! The decision procedure, given a transaction and its receipt:
//!
//! 1. A receipt with no logs at all is a native transfer: amount from the
//!    transaction value, fee = total cost minus amount, counterparties from
//!    the transaction body. A native transfer without a recipient is invalid.
//!    Exception: a failed zero-log call whose recipient is a tracked token
//!    contract is a reverted token call, recorded as a fee-only debit.
//! 2. A receipt with logs is a potential token transfer: every decodable
//!    Transfer event whose emitting contract is registered yields one record,
//!    all sharing the same fee. A failed receipt whose logs all filter out as
//!    unconfirmed yields a fee-only record instead, so the debit of a
//!    reverted call is still accounted for.
//!
//! Normalization is pure and holds no state beyond the read-only registry;
//! it can run concurrently from any number of tasks.

use alloy_primitives::{Address, B256};
use chainledger::transaction::{NormalizedTransaction, Transfer, TransferLeg, TxStatus};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::events::decode_transfer_log;
use crate::fee::compute_fee;
use crate::registry::{CurrencyEntry, CurrencyRegistry};
use crate::types::{RawReceipt, RawTransaction};
use crate::units::{AmountError, decimal_from_units};

/// Maps a receipt's raw status code to a transaction status.
///
/// Total over the input domain: `1` is success, `0` is failure, anything
/// else is treated as still pending.
pub fn classify_status(receipt: &RawReceipt) -> TxStatus {
    match receipt.status {
        1 => TxStatus::Success,
        0 => TxStatus::Failed,
        _ => TxStatus::Pending,
    }
}

/// Error raised while normalizing a single transaction.
///
/// Fatal only for that transaction; batch callers skip it and continue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    /// A native transfer must have a recipient; contract creation cannot be
    /// a plain value transfer.
    #[error("native transfer {tx_hash} has no recipient")]
    MissingRecipient { tx_hash: B256 },

    /// An amount or fee does not fit the decimal range.
    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Turns raw transactions and receipts into normalized records.
#[derive(Debug, Clone)]
pub struct Normalizer {
    registry: CurrencyRegistry,
}

impl Normalizer {
    pub fn new(registry: CurrencyRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CurrencyRegistry {
        &self.registry
    }

    /// Normalizes one confirmed transaction against its receipt.
    ///
    /// Returns zero or more records: exactly one for a native transfer, one
    /// per matching Transfer event for token transactions, and possibly none
    /// when no event touches a tracked contract.
    pub fn normalize(
        &self,
        tx: &RawTransaction,
        receipt: &RawReceipt,
    ) -> Result<Vec<NormalizedTransaction>, NormalizeError> {
        if receipt.logs.is_empty() {
            // A reverted call to a tracked contract can legitimately emit no
            // logs at all; that is still a token fee debit, not a zero-value
            // native transfer.
            if classify_status(receipt) == TxStatus::Failed {
                let native = self.registry.native();
                let fee =
                    compute_fee(receipt.gas_used, tx.effective_gas_price(), native.decimals)?;
                if let Some(record) = self.fee_debit_record(tx, receipt, fee) {
                    return Ok(vec![record]);
                }
            }
            self.native_transfer(tx, receipt).map(|record| vec![record])
        } else {
            self.token_transfers(tx, receipt)
        }
    }

    fn native_transfer(
        &self,
        tx: &RawTransaction,
        receipt: &RawReceipt,
    ) -> Result<NormalizedTransaction, NormalizeError> {
        let native = self.registry.native();
        let to = tx
            .to
            .ok_or(NormalizeError::MissingRecipient { tx_hash: tx.hash })?;

        let amount = decimal_from_units(tx.value, native.decimals)?;
        let cost = decimal_from_units(tx.cost(), native.decimals)?;

        Ok(NormalizedTransaction {
            currency_id: native.id.clone(),
            fee_currency_id: native.id.clone(),
            tx_hash: format_hash(tx.hash),
            fee: cost - amount,
            status: classify_status(receipt),
            transfer: Transfer::Native(TransferLeg {
                from_addresses: vec![format_address(tx.from)],
                to_address: format_address(to),
                amount,
            }),
        })
    }

    fn token_transfers(
        &self,
        tx: &RawTransaction,
        receipt: &RawReceipt,
    ) -> Result<Vec<NormalizedTransaction>, NormalizeError> {
        let status = classify_status(receipt);
        let native = self.registry.native();
        // The same transaction-level fee is carried by every record.
        let fee = compute_fee(receipt.gas_used, tx.effective_gas_price(), native.decimals)?;

        let confirmed: Vec<_> = receipt.logs.iter().filter(|log| log.is_confirmed()).collect();
        if status == TxStatus::Failed && confirmed.is_empty() {
            return Ok(self.fee_debit_record(tx, receipt, fee).into_iter().collect());
        }

        let mut records = Vec::new();
        for log in confirmed {
            let event = match decode_transfer_log(log) {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(err) => {
                    // One bad log must not suppress valid sibling events.
                    warn!(tx = %tx.hash, error = %err, "skipping undecodable transfer log");
                    continue;
                }
            };
            let Some(entry) = self.registry.by_contract(event.contract) else {
                continue;
            };
            let amount = match decimal_from_units(event.raw_amount, entry.decimals) {
                Ok(amount) => amount,
                Err(err) => {
                    warn!(tx = %tx.hash, currency = %entry.id, error = %err,
                        "skipping transfer log with out-of-range amount");
                    continue;
                }
            };

            records.push(NormalizedTransaction {
                currency_id: entry.id.clone(),
                fee_currency_id: native.id.clone(),
                tx_hash: format_hash(tx.hash),
                fee,
                status,
                transfer: Transfer::Token(TransferLeg {
                    from_addresses: vec![format_address(event.from)],
                    to_address: format_address(event.to),
                    amount,
                }),
            });
        }
        Ok(records)
    }

    /// Fallback for a reverted call that emitted no usable event: if the
    /// recipient is a tracked contract, record the fee debit against it so
    /// the charge is not lost. Amount and counterparties stay absent.
    fn fee_debit_record(
        &self,
        tx: &RawTransaction,
        receipt: &RawReceipt,
        fee: Decimal,
    ) -> Option<NormalizedTransaction> {
        let entry: &CurrencyEntry = self.registry.by_contract(tx.to?)?;
        debug!(tx = %tx.hash, currency = %entry.id, "recording fee-only debit for reverted call");

        Some(NormalizedTransaction {
            currency_id: entry.id.clone(),
            fee_currency_id: self.registry.native().id.clone(),
            tx_hash: format_hash(tx.hash),
            fee,
            status: TxStatus::Failed,
            transfer: Transfer::FeeDebit {
                block_number: receipt.block_number,
            },
        })
    }
}

fn format_hash(hash: B256) -> String {
    format!("{hash:#x}")
}

fn format_address(address: Address) -> String {
    address.to_checksum(None)
}
