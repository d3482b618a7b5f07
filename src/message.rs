//! The attestation text a wallet signs to claim compensation.
//!
//! The remote service rebuilds this string to check the signature, so the
//! output has to stay byte-for-byte stable.

use crate::address::normalize;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DISCLAIMER: &str = "I want to receive a compensation related to the Orbiter of between 2023-06-01 03:30:00(UTC +0) and 21:30:00(UTC +0).";

/// A transaction the user points at as evidence of the loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReference {
    pub hash: String,
    pub chain_name: String,
}

impl FromStr for TxReference {
    type Err = anyhow::Error;

    /// Parses `HASH@CHAIN`, e.g. `0xabc...@BNB Chain`.
    fn from_str(s: &str) -> Result<Self> {
        let Some((hash, chain_name)) = s.split_once('@') else {
            bail!("transaction reference must look like HASH@CHAIN, got '{s}'");
        };
        Ok(Self {
            hash: hash.trim().to_string(),
            chain_name: chain_name.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttestationMessage(String);

impl AttestationMessage {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttestationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn compose(
    victim_address: &str,
    new_address: &str,
    references: &[TxReference],
) -> AttestationMessage {
    let mut message = format!("{DISCLAIMER}\n");
    message.push_str(&format!("Victim Address: {}\n", normalize(victim_address)));
    message.push_str(&format!("New Address: {}", normalize(new_address)));
    for (index, reference) in references.iter().enumerate() {
        message.push_str(&format!(
            "\n{}. Hash: {}, Chain: {}",
            index + 1,
            reference.hash,
            reference.chain_name
        ));
    }
    AttestationMessage(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VICTIM: &str = "0x9CF7036AEF81DF2C0E48DE0BB2E32270EE3283D5";
    const NEW: &str = "0xD334DFDECB041336B1D3CF6D541F1E4143DAE3F2";

    #[test]
    fn test_compose_without_references() {
        let message = compose(VICTIM, NEW, &[]);
        assert_eq!(
            message.as_str(),
            "I want to receive a compensation related to the Orbiter of between 2023-06-01 03:30:00(UTC +0) and 21:30:00(UTC +0).\n\
             Victim Address: 0x9cf7036aef81df2c0e48de0bb2e32270ee3283d5\n\
             New Address: 0xd334dfdecb041336b1d3cf6d541f1e4143dae3f2"
        );
    }

    #[test]
    fn test_compose_with_references() {
        let references = vec![
            TxReference {
                hash: "0xaaa".to_string(),
                chain_name: "Arbitrum".to_string(),
            },
            TxReference {
                hash: "0xbbb".to_string(),
                chain_name: "BNB Chain".to_string(),
            },
        ];
        let message = compose(VICTIM, NEW, &references);
        assert!(message.as_str().ends_with(
            "New Address: 0xd334dfdecb041336b1d3cf6d541f1e4143dae3f2\n\
             1. Hash: 0xaaa, Chain: Arbitrum\n\
             2. Hash: 0xbbb, Chain: BNB Chain"
        ));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let references = vec![TxReference {
            hash: "0xaaa".to_string(),
            chain_name: "Ethereum".to_string(),
        }];
        assert_eq!(
            compose(VICTIM, NEW, &references),
            compose(VICTIM, NEW, &references)
        );
    }

    #[test]
    fn test_parse_reference() {
        let reference: TxReference = "0xabc@BNB Chain".parse().unwrap();
        assert_eq!(reference.hash, "0xabc");
        assert_eq!(reference.chain_name, "BNB Chain");
        assert!("0xabc".parse::<TxReference>().is_err());
    }
}
