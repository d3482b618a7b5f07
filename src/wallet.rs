use crate::signer::MessageSigner;
use alloy::primitives::Address;
use std::sync::{Arc, RwLock};
use tokio::sync::watch;
use tracing::info;

/// Receiver side of the connected-account feed.
pub type AccountWatch = watch::Receiver<Option<Address>>;

/// Process-wide wallet connection state, built once at startup.
///
/// The claim workflow only reads from it: it asks for the current signer and
/// follows account changes through [`WalletConnection::subscribe`].
#[derive(Debug)]
pub struct WalletConnection<S> {
    signer: RwLock<Option<Arc<S>>>,
    account: watch::Sender<Option<Address>>,
}

impl<S: MessageSigner> WalletConnection<S> {
    pub fn disconnected() -> Self {
        let (account, _) = watch::channel(None);
        Self {
            signer: RwLock::new(None),
            account,
        }
    }

    pub fn connected(signer: S) -> Self {
        let connection = Self::disconnected();
        connection.connect(signer);
        connection
    }

    pub fn connect(&self, signer: S) {
        let address = signer.address();
        info!("Wallet connected: {}", address);
        *self.signer.write().unwrap_or_else(|e| e.into_inner()) = Some(Arc::new(signer));
        self.account.send_replace(Some(address));
    }

    pub fn disconnect(&self) {
        info!("Wallet disconnected");
        *self.signer.write().unwrap_or_else(|e| e.into_inner()) = None;
        self.account.send_replace(None);
    }

    pub fn account(&self) -> Option<Address> {
        *self.account.borrow()
    }

    pub fn signer(&self) -> Option<Arc<S>> {
        self.signer
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn subscribe(&self) -> AccountWatch {
        self.account.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::LocalWallet;

    const PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_connect_and_disconnect() {
        let connection = WalletConnection::<LocalWallet>::disconnected();
        assert!(connection.account().is_none());
        assert!(connection.signer().is_none());

        connection.connect(LocalWallet::from_private_key(PRIVATE_KEY).unwrap());
        assert_eq!(
            connection.account().map(|a| a.to_string()),
            Some("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string())
        );
        assert!(connection.signer().is_some());

        connection.disconnect();
        assert!(connection.account().is_none());
        assert!(connection.signer().is_none());
    }

    #[tokio::test]
    async fn test_subscribers_see_account_changes() {
        let connection = WalletConnection::<LocalWallet>::disconnected();
        let mut watch = connection.subscribe();

        connection.connect(LocalWallet::from_private_key(PRIVATE_KEY).unwrap());
        watch.changed().await.unwrap();
        assert!(watch.borrow_and_update().is_some());
    }
}
