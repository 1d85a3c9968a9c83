//! Chain-agnostic ledger types shared by every chain backend.
//!
//! A chain backend (e.g. `chainledger-evm`) turns raw node data into
//! [`NormalizedTransaction`] records that downstream accounting and wallet
//! logic can consume without knowing anything about the source chain. This
//! crate defines those records, the block container they travel in, and the
//! configuration that tells a backend which currencies to track.

pub mod block;
pub mod settings;
pub mod transaction;

pub use block::Block;
pub use settings::{ChainSettings, CurrencyConfig, SettingsError};
pub use transaction::{NormalizedTransaction, Transfer, TransferLeg, TxStatus};
