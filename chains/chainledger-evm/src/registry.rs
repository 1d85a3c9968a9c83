//! Currency registry for the EVM backend.
//!
//! Built once from [`ChainSettings`] at startup and read-only afterwards, so
//! it can be shared across worker tasks without locking. Contract addresses
//! are parsed into [`Address`] at construction time, which makes lookups
//! byte-wise and therefore independent of the hex casing a provider happens
//! to use.

use std::collections::HashMap;

use alloy_primitives::Address;
use chainledger::settings::ChainSettings;

/// What a registry entry stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// The chain's intrinsic, fee-paying currency.
    Native,
    /// A fungible token implemented by the given contract.
    Token { contract: Address },
}

/// One tracked asset with its decimal scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyEntry {
    pub id: String,
    pub decimals: u32,
    pub kind: AssetKind,
}

impl CurrencyEntry {
    /// Contract address for token entries, `None` for the native entry.
    pub fn contract(&self) -> Option<Address> {
        match self.kind {
            AssetKind::Native => None,
            AssetKind::Token { contract } => Some(contract),
        }
    }
}

/// Error raised while building a registry from settings.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No entry without a contract address was configured.
    #[error("chain settings define no native currency")]
    MissingNative,

    /// More than one entry without a contract address was configured.
    #[error("chain settings define more than one native currency ({0} and {1})")]
    DuplicateNative(String, String),

    /// A contract address could not be parsed as a 20-byte hex address.
    #[error("currency {id} has an invalid contract address {address:?}")]
    InvalidAddress { id: String, address: String },
}

/// Immutable mapping from tracked assets to their on-chain identity.
#[derive(Debug, Clone)]
pub struct CurrencyRegistry {
    native: CurrencyEntry,
    by_contract: HashMap<Address, CurrencyEntry>,
}

impl CurrencyRegistry {
    /// Builds a registry from chain settings.
    ///
    /// Enforces the one-native invariant and parses every contract address;
    /// uniqueness of ids and addresses is the configuration loader's job and
    /// is not re-validated here.
    pub fn from_settings(settings: &ChainSettings) -> Result<Self, RegistryError> {
        let mut native: Option<CurrencyEntry> = None;
        let mut by_contract = HashMap::new();

        for currency in &settings.currencies {
            match &currency.contract_address {
                None => {
                    if let Some(existing) = &native {
                        return Err(RegistryError::DuplicateNative(
                            existing.id.clone(),
                            currency.id.clone(),
                        ));
                    }
                    native = Some(CurrencyEntry {
                        id: currency.id.clone(),
                        decimals: currency.decimals,
                        kind: AssetKind::Native,
                    });
                }
                Some(raw) => {
                    let contract: Address =
                        raw.parse().map_err(|_| RegistryError::InvalidAddress {
                            id: currency.id.clone(),
                            address: raw.clone(),
                        })?;
                    by_contract.insert(
                        contract,
                        CurrencyEntry {
                            id: currency.id.clone(),
                            decimals: currency.decimals,
                            kind: AssetKind::Token { contract },
                        },
                    );
                }
            }
        }

        let native = native.ok_or(RegistryError::MissingNative)?;
        Ok(Self { native, by_contract })
    }

    /// The chain's fee-paying currency.
    pub fn native(&self) -> &CurrencyEntry {
        &self.native
    }

    /// Looks up a token entry by its contract address. Exact match only; the
    /// comparison is on parsed bytes, so input casing is irrelevant.
    pub fn by_contract(&self, contract: Address) -> Option<&CurrencyEntry> {
        self.by_contract.get(&contract)
    }

    /// Looks up any entry (native or token) by its currency id.
    pub fn by_id(&self, id: &str) -> Option<&CurrencyEntry> {
        if self.native.id == id {
            return Some(&self.native);
        }
        self.by_contract.values().find(|entry| entry.id == id)
    }

    /// Registered token entries, in arbitrary order.
    pub fn tokens(&self) -> impl Iterator<Item = &CurrencyEntry> {
        self.by_contract.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainledger::settings::CurrencyConfig;
    use pretty_assertions::assert_eq;

    fn settings(currencies: Vec<CurrencyConfig>) -> ChainSettings {
        ChainSettings {
            chain: "ethereum-mainnet".to_string(),
            currencies,
        }
    }

    fn native(id: &str) -> CurrencyConfig {
        CurrencyConfig {
            id: id.to_string(),
            decimals: 18,
            contract_address: None,
        }
    }

    fn token(id: &str, address: &str) -> CurrencyConfig {
        CurrencyConfig {
            id: id.to_string(),
            decimals: 6,
            contract_address: Some(address.to_string()),
        }
    }

    #[test]
    fn builds_registry_and_looks_up_case_insensitively() {
        let registry = CurrencyRegistry::from_settings(&settings(vec![
            native("eth"),
            token("usdx", "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
        ]))
        .unwrap();

        assert_eq!(registry.native().id, "eth");
        assert_eq!(registry.native().decimals, 18);

        // Same address, different casings.
        let lower = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
            .parse()
            .unwrap();
        let entry = registry.by_contract(lower).unwrap();
        assert_eq!(entry.id, "usdx");
        assert_eq!(entry.decimals, 6);

        assert_eq!(registry.by_id("usdx").unwrap().contract(), Some(lower));
        assert!(registry.by_id("unknown").is_none());
    }

    #[test]
    fn rejects_settings_without_native_entry() {
        let err = CurrencyRegistry::from_settings(&settings(vec![token(
            "usdx",
            "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
        )]))
        .unwrap_err();
        assert!(matches!(err, RegistryError::MissingNative));
    }

    #[test]
    fn rejects_two_native_entries() {
        let err =
            CurrencyRegistry::from_settings(&settings(vec![native("eth"), native("matic")]))
                .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateNative(_, _)));
    }

    #[test]
    fn rejects_unparseable_contract_address() {
        let err = CurrencyRegistry::from_settings(&settings(vec![
            native("eth"),
            token("bad", "not-an-address"),
        ]))
        .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidAddress { .. }));
    }
}
