use crate::error::{ClaimError, SigningError};
use alloy::hex;
use alloy::primitives::{Address, Signature};
use alloy::signers::Signer;
use alloy::signers::local::PrivateKeySigner;
use std::future::Future;
use tracing::info;

/// Anything that can produce an EIP-191 personal-message signature for the
/// connected account.
pub trait MessageSigner: Send + Sync {
    fn address(&self) -> Address;

    /// Returns the signature as `0x`-prefixed hex of the 65 `r || s || v` bytes.
    fn sign_message(
        &self,
        message: &str,
    ) -> impl Future<Output = Result<String, SigningError>> + Send;
}

/// A wallet backed by a private key held in process memory.
#[derive(Debug, Clone)]
pub struct LocalWallet {
    signer: PrivateKeySigner,
}

impl LocalWallet {
    pub fn new(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }

    pub fn from_private_key(private_key: &str) -> anyhow::Result<Self> {
        let signer: PrivateKeySigner = private_key
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid private key: {e}"))?;
        Ok(Self::new(signer))
    }
}

impl MessageSigner for LocalWallet {
    fn address(&self) -> Address {
        self.signer.address()
    }

    async fn sign_message(&self, message: &str) -> Result<String, SigningError> {
        info!("Signing attestation message with {}", self.signer.address());
        let signature = self
            .signer
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| SigningError::Rejected(e.to_string()))?;
        Ok(hex::encode_prefixed(signature.as_bytes()))
    }
}

/// Recovers the signer of `message` and checks it against `expected`.
pub fn verify_signature(message: &str, signature: &str, expected: &str) -> Result<(), ClaimError> {
    let bytes = hex::decode(signature).map_err(|_| ClaimError::SignerMismatch)?;
    let signature = Signature::from_raw(&bytes).map_err(|_| ClaimError::SignerMismatch)?;
    let recovered = signature
        .recover_address_from_msg(message)
        .map_err(|_| ClaimError::SignerMismatch)?;
    if recovered.to_string().eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(ClaimError::SignerMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_wallet_address_from_private_key() {
        let wallet = LocalWallet::from_private_key(PRIVATE_KEY).unwrap();
        assert_eq!(wallet.address().to_string(), ADDRESS);
    }

    #[test]
    fn test_rejects_garbage_private_key() {
        assert!(LocalWallet::from_private_key("not-a-key").is_err());
    }

    #[tokio::test]
    async fn test_signature_recovers_to_wallet() {
        let wallet = LocalWallet::from_private_key(PRIVATE_KEY).unwrap();
        let signature = wallet.sign_message("hello").await.unwrap();

        assert!(signature.starts_with("0x"));
        assert_eq!(signature.len(), 2 + 65 * 2);
        assert!(verify_signature("hello", &signature, &ADDRESS.to_lowercase()).is_ok());
        assert_eq!(
            verify_signature("other message", &signature, ADDRESS),
            Err(ClaimError::SignerMismatch)
        );
    }

    #[test]
    fn test_malformed_signature_is_a_mismatch() {
        assert_eq!(
            verify_signature("hello", "0xsig", ADDRESS),
            Err(ClaimError::SignerMismatch)
        );
    }
}
