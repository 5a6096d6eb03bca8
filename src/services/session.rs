use std::sync::Arc;
use log::{info, warn};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::models::{VendorError, WalletIdentity};
use crate::services::{FlashnetClient, WalletClient};
use crate::traits::{AmmApi, WalletApi};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Wallet session is not connected")]
    Closed,

    #[error(transparent)]
    Vendor(#[from] VendorError),
}

/// Connected wallet plus an authenticated AMM client.
///
/// Built once in `main`, shared with handlers through `web::Data`, and closed
/// with [`Session::shutdown`] after the server stops. Every vendor access
/// goes through the session so nothing is reachable once it is closed.
pub struct Session {
    amm: Arc<dyn AmmApi>,
    wallet: Arc<dyn WalletApi>,
    identity: RwLock<Option<WalletIdentity>>,
}

impl Session {
    pub fn new(amm: Arc<dyn AmmApi>, wallet: Arc<dyn WalletApi>) -> Self {
        Self {
            amm,
            wallet,
            identity: RwLock::new(None),
        }
    }

    /// Builds the HTTP clients from configuration and opens the session.
    pub async fn connect(config: &AppConfig) -> Result<Self, SessionError> {
        let amm = FlashnetClient::new(&config.flashnet_api_url, config.request_timeout)?;
        let wallet = WalletClient::new(&config.wallet_service_url, config.network, config.request_timeout)?;

        let session = Self::new(Arc::new(amm), Arc::new(wallet));
        session.open().await?;
        Ok(session)
    }

    /// The identity lock is not held across the vendor calls.
    pub async fn open(&self) -> Result<WalletIdentity, SessionError> {
        if let Some(identity) = self.identity.read().await.clone() {
            return Ok(identity);
        }

        let identity = self.wallet.connect().await?;
        self.amm.authenticate(&identity.identity_pubkey).await?;

        let mut guard = self.identity.write().await;
        if let Some(existing) = guard.as_ref() {
            // a concurrent open won the race
            return Ok(existing.clone());
        }
        info!("Session opened for {}", identity.identity_pubkey);
        *guard = Some(identity.clone());
        Ok(identity)
    }

    pub async fn identity(&self) -> Result<WalletIdentity, SessionError> {
        self.identity.read().await.clone().ok_or(SessionError::Closed)
    }

    pub async fn is_open(&self) -> bool {
        self.identity.read().await.is_some()
    }

    pub async fn amm(&self) -> Result<&dyn AmmApi, SessionError> {
        if !self.is_open().await {
            return Err(SessionError::Closed);
        }
        Ok(self.amm.as_ref())
    }

    pub async fn wallet(&self) -> Result<&dyn WalletApi, SessionError> {
        if !self.is_open().await {
            return Err(SessionError::Closed);
        }
        Ok(self.wallet.as_ref())
    }

    /// Disconnects the wallet. Safe to call more than once.
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        let closed = self.identity.write().await.take();
        match closed {
            Some(identity) => {
                info!("Closing session for {}", identity.identity_pubkey);
                self.wallet.disconnect().await?;
                Ok(())
            }
            None => {
                warn!("Session already closed");
                Ok(())
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[actix_web::test]
    async fn test_open_authenticates_with_wallet_identity() {
        let amm = Arc::new(StubAmm::default());
        let session = Session::new(amm.clone(), Arc::new(StubWallet::default()));
        assert!(!session.is_open().await);

        let identity = session.open().await.unwrap();
        assert_eq!(identity.identity_pubkey, IDENTITY);
        assert_eq!(amm.authenticated.lock().unwrap().as_deref(), Some(IDENTITY));
        assert!(session.amm().await.is_ok());

        // reopening keeps the same identity
        assert_eq!(session.open().await.unwrap(), identity);
    }

    #[actix_web::test]
    async fn test_closed_session_rejects_vendor_access() {
        let session = Session::new(Arc::new(StubAmm::default()), Arc::new(StubWallet::default()));
        assert!(matches!(session.amm().await, Err(SessionError::Closed)));
        assert!(matches!(session.wallet().await, Err(SessionError::Closed)));
        assert!(matches!(session.identity().await, Err(SessionError::Closed)));
    }

    #[actix_web::test]
    async fn test_shutdown_disconnects_once() {
        let wallet = Arc::new(StubWallet::default());
        let session = open_session(Arc::new(StubAmm::default()), wallet.clone()).await;

        session.shutdown().await.unwrap();
        session.shutdown().await.unwrap();
        assert_eq!(*wallet.disconnects.lock().unwrap(), 1);
        assert!(matches!(session.amm().await, Err(SessionError::Closed)));
    }

    #[actix_web::test]
    async fn test_readers_not_blocked_while_opening() {
        let gate = Arc::new(tokio::sync::Notify::new());
        let amm = Arc::new(StubAmm { auth_gate: Some(gate.clone()), ..Default::default() });
        let session = Arc::new(Session::new(amm, Arc::new(StubWallet::default())));

        let opening = tokio::spawn({
            let session = session.clone();
            async move { session.open().await.map(|identity| identity.identity_pubkey) }
        });
        tokio::task::yield_now().await;

        // authentication is parked on the gate; the lock must still be free
        let open_now = tokio::time::timeout(std::time::Duration::from_secs(1), session.is_open()).await;
        assert_eq!(open_now.ok(), Some(false));

        gate.notify_one();
        assert_eq!(opening.await.unwrap().unwrap(), IDENTITY);
        assert!(session.is_open().await);
    }

    #[actix_web::test]
    async fn test_open_fails_when_amm_rejects() {
        let amm = Arc::new(StubAmm { reject_auth: true, ..Default::default() });
        let session = Session::new(amm, Arc::new(StubWallet::default()));
        assert!(matches!(session.open().await, Err(SessionError::Vendor(_))));
        assert!(!session.is_open().await);
    }
}
