//! EVM backend for `chainledger`.
//!
//! Turns raw transactions and execution receipts fetched from an EVM node
//! into uniform [`chainledger::NormalizedTransaction`] records: native-ether
//! transfers come from the transaction body, ERC-20 transfers from the
//! receipt's Transfer event logs, and reverted token calls still produce a
//! fee-only record so the debit is never lost.
//!
//! The normalization core ([`normalizer::Normalizer`]) is pure and
//! synchronous; all node I/O goes through the [`rpc::EvmRpc`] trait and is
//! orchestrated by [`ledger::EvmLedger`].

pub mod events;
pub mod fee;
pub mod ledger;
pub mod normalizer;
pub mod registry;
pub mod rpc;
pub mod types;
pub mod units;

pub use events::{DecodeError, TRANSFER_EVENT_TOPIC, TransferEvent, decode_transfer_log};
pub use fee::compute_fee;
pub use ledger::{EvmLedger, LedgerError};
pub use normalizer::{NormalizeError, Normalizer, classify_status};
pub use registry::{AssetKind, CurrencyEntry, CurrencyRegistry, RegistryError};
pub use rpc::EvmRpc;
pub use types::{LogEntry, RawBlock, RawReceipt, RawTransaction};
pub use units::{AmountError, decimal_from_units};
