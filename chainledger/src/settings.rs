//! Chain and currency configuration.
//!
//! Settings are loaded once at startup and handed to a chain backend by
//! reference; nothing here is mutated afterwards. The backend turns the
//! currency list into its own typed registry and rejects configurations that
//! violate its invariants (e.g. not exactly one native currency).

use serde::{Deserialize, Serialize};

/// One tracked asset.
///
/// An entry without a `contract_address` is the chain's native currency (the
/// asset fees are paid in); an entry with one is a contract-based token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Unique asset identifier, e.g. `"eth"` or `"usdx"`.
    pub id: String,
    /// Number of smallest-unit digits used to render on-chain integer
    /// amounts as decimals (18 for ether, 6 for USDC-like tokens).
    pub decimals: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
}

impl CurrencyConfig {
    pub fn is_native(&self) -> bool {
        self.contract_address.is_none()
    }
}

/// Static configuration of a single chain backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSettings {
    /// Human-readable chain identifier, e.g. `"ethereum-mainnet"`.
    pub chain: String,
    pub currencies: Vec<CurrencyConfig>,
}

/// Error raised while reading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings document is not valid JSON or misses required fields.
    #[error("failed to parse chain settings: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ChainSettings {
    /// Parses settings from a JSON document.
    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_settings_document() {
        let raw = r#"{
            "chain": "ethereum-mainnet",
            "currencies": [
                {"id": "eth", "decimals": 18},
                {"id": "usdx", "decimals": 6,
                 "contract_address": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"}
            ]
        }"#;

        let settings = ChainSettings::from_json(raw).unwrap();
        assert_eq!(settings.chain, "ethereum-mainnet");
        assert_eq!(settings.currencies.len(), 2);
        assert!(settings.currencies[0].is_native());
        assert!(!settings.currencies[1].is_native());
    }

    #[test]
    fn rejects_malformed_document() {
        let err = ChainSettings::from_json("{\"chain\": 12}").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
