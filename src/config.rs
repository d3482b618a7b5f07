use crate::form::ValidationRules;
use crate::submit::DEFAULT_SUBMIT_URL;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `wallet.privateKey`.
pub const PRIVATE_KEY_ENV: &str = "CLAIM_PRIVATE_KEY";

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClaimConfig {
    #[serde(default = "default_submit_url")]
    pub submit_url: String,
    pub allow_list_path: String,
    #[serde(default)]
    pub rules: ValidationRules,
    #[serde(default)]
    pub wallet: Option<WalletConfig>,
    /// Seconds to wait for the wallet before giving up. Unset waits forever.
    #[serde(default)]
    pub signing_timeout_secs: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WalletConfig {
    pub private_key: String,
}

fn default_submit_url() -> String {
    DEFAULT_SUBMIT_URL.to_string()
}

impl ClaimConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path}"))?;
        let config: ClaimConfig =
            serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// The wallet key, preferring the environment over the config file.
    pub fn private_key(&self) -> Option<String> {
        std::env::var(PRIVATE_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.wallet.as_ref().map(|w| w.private_key.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_config_from_file() {
        let config = ClaimConfig::from_file("config.sample.json");
        assert!(config.is_ok());

        let config = config.unwrap();
        assert_eq!(config.submit_url, "https://dapi.orbiter.finance/api/submit");
        assert_eq!(config.allow_list_path, "allow_list.sample.json");
        assert!(!config.rules.victim_address_check);
        assert!(!config.rules.transaction_references);
        assert!(!config.rules.verify_signature);
        assert_eq!(
            config.wallet.map(|w| w.private_key),
            Some("your-private-key-here".to_string())
        );
        assert_eq!(config.signing_timeout_secs, Some(120));
    }

    #[test]
    fn test_claim_config_defaults() {
        let json = r#"{ "allowListPath": "list.json" }"#;

        let config: ClaimConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.submit_url, DEFAULT_SUBMIT_URL);
        assert_eq!(config.rules, ValidationRules::default());
        assert!(config.wallet.is_none());
        assert!(config.signing_timeout_secs.is_none());
    }

    #[test]
    fn test_claim_config_rules() {
        let json = r#"{
            "submitUrl": "http://localhost:8080/api/submit",
            "allowListPath": "list.json",
            "rules": {
                "victimAddressCheck": true,
                "transactionReferences": true
            }
        }"#;

        let config: ClaimConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.submit_url, "http://localhost:8080/api/submit");
        assert!(config.rules.victim_address_check);
        assert!(config.rules.transaction_references);
        assert!(!config.rules.verify_signature);
    }

    #[test]
    fn test_invalid_json_handling() {
        let invalid_json = "{ invalid json }";
        let result: Result<ClaimConfig, _> = serde_json::from_str(invalid_json);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(ClaimConfig::from_file("does-not-exist.json").is_err());
    }
}
