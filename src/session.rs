use crate::config::NetworkConfig;
use crate::error::CreatorError;
use crate::repository::{Database, PreferenceRepository};
use crate::wallet::WalletProvider;
use alloy_primitives::Address;
use tracing::{debug, info, warn};

/// Connection state to the wallet agent. Created empty, populated by a
/// successful connect, cleared on disconnect or when the wallet stops
/// exposing the active account.
#[derive(Debug, Clone, Default)]
pub struct WalletSession {
    pub account: Option<Address>,
    pub chain_id: Option<u64>,
    pub is_active: bool,
}

/// Views the session manager can redirect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    CreateToken,
}

/// Owns the wallet handle, the durable intent flag and the live session.
/// Pages receive this explicitly instead of reaching for shared globals.
pub struct SessionManager<P> {
    provider: P,
    db: Database,
    target: NetworkConfig,
    session: WalletSession,
    pending_redirect: bool,
}

impl<P: WalletProvider> SessionManager<P> {
    pub fn new(provider: P, db: Database, target: NetworkConfig) -> Self {
        SessionManager {
            provider,
            db,
            target,
            session: WalletSession::default(),
            pending_redirect: false,
        }
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    /// Connects to the wallet. With `require_approval` the wallet may show
    /// its approval dialog and the target chain is ensured; the silent path
    /// never prompts. On success the previously-connected intent is
    /// persisted (approval path only) and a one-shot redirect to the create
    /// view is armed.
    pub async fn connect(&mut self, require_approval: bool) -> Result<WalletSession, CreatorError> {
        let accounts = self.provider.request_accounts(require_approval).await?;
        let Some(account) = accounts.first().copied() else {
            return Err(CreatorError::ProviderUnavailable(
                "wallet exposed no accounts".to_string(),
            ));
        };

        // Chain switching may prompt the user, so only the approval path
        // attempts it.
        if require_approval {
            self.provider.ensure_chain(&self.target).await?;
        }

        let chain_id = self.provider.chain_id().await?;

        let was_active = self.session.is_active;
        self.session = WalletSession {
            account: Some(account),
            chain_id: Some(chain_id),
            is_active: true,
        };
        if !was_active {
            self.pending_redirect = true;
        }

        if require_approval {
            let prefs = PreferenceRepository::new(&self.db.conn);
            if let Err(e) = prefs.set_previously_connected(true) {
                warn!("Failed to persist connection preference: {}", e);
            }
        }

        info!("Wallet connected: {} on chain {}", account, chain_id);
        Ok(self.session.clone())
    }

    /// Silently re-establishes the session on startup when the user opted
    /// to connect in an earlier run. Without the persisted flag the wallet
    /// is not contacted at all; failures are logged and swallowed.
    pub async fn auto_reconnect_on_load(&mut self) {
        let previously_connected = {
            let prefs = PreferenceRepository::new(&self.db.conn);
            match prefs.previously_connected() {
                Ok(value) => value,
                Err(e) => {
                    warn!("Failed to read connection preference: {}", e);
                    false
                }
            }
        };

        if !previously_connected {
            debug!("No prior connection recorded, skipping auto-reconnect");
            return;
        }

        if let Err(e) = self.connect(false).await {
            warn!("Error on auto-connect: {}", e);
        }
    }

    /// Yields the redirect target exactly once per transition into the
    /// active state. Polling again, or reconnecting while already active,
    /// yields nothing.
    pub fn take_redirect(&mut self) -> Option<Route> {
        if self.pending_redirect {
            self.pending_redirect = false;
            return Some(Route::CreateToken);
        }
        None
    }

    /// Re-reads the wallet's exposed accounts and clears the session when
    /// the active account is no longer among them.
    pub async fn refresh(&mut self) -> Result<(), CreatorError> {
        if !self.session.is_active {
            return Ok(());
        }

        let accounts = self.provider.request_accounts(false).await?;
        let still_exposed = self
            .session
            .account
            .map(|account| accounts.contains(&account))
            .unwrap_or(false);

        if !still_exposed {
            info!("Wallet account changed, clearing session");
            self.session = WalletSession::default();
            self.pending_redirect = false;
        }
        Ok(())
    }

    /// Clears the live session. The persisted intent flag survives so the
    /// next run still auto-reconnects.
    pub fn disconnect(&mut self) {
        self.session = WalletSession::default();
        self.pending_redirect = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::CreationReceipt;
    use alloy::rpc::types::TransactionRequest;
    use alloy_primitives::B256;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct StubState {
        accounts: Mutex<Vec<Address>>,
        reject_prompt: bool,
        account_requests: AtomicUsize,
        chain_switches: AtomicUsize,
    }

    #[derive(Clone)]
    struct StubWallet {
        state: Arc<StubState>,
    }

    #[async_trait]
    impl WalletProvider for StubWallet {
        async fn request_accounts(&self, prompt: bool) -> Result<Vec<Address>, CreatorError> {
            self.state.account_requests.fetch_add(1, Ordering::SeqCst);
            if prompt && self.state.reject_prompt {
                return Err(CreatorError::UserRejected);
            }
            Ok(self.state.accounts.lock().unwrap().clone())
        }

        async fn chain_id(&self) -> Result<u64, CreatorError> {
            Ok(56)
        }

        async fn ensure_chain(&self, _network: &NetworkConfig) -> Result<(), CreatorError> {
            self.state.chain_switches.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn submit_transaction(&self, _tx: TransactionRequest) -> Result<B256, CreatorError> {
            panic!("session manager must not submit transactions");
        }

        async fn wait_for_receipt(&self, _tx_hash: B256) -> Result<CreationReceipt, CreatorError> {
            panic!("session manager must not wait for receipts");
        }
    }

    fn manager_with(state: Arc<StubState>) -> SessionManager<StubWallet> {
        let db = Database::new(":memory:").unwrap();
        let target = NetworkConfig::bsc_mainnet(Address::repeat_byte(0xfa));
        SessionManager::new(StubWallet { state }, db, target)
    }

    fn account() -> Address {
        Address::repeat_byte(0xaa)
    }

    #[tokio::test]
    async fn auto_reconnect_without_flag_leaves_wallet_untouched() {
        let state = Arc::new(StubState {
            accounts: Mutex::new(vec![account()]),
            ..StubState::default()
        });
        let mut manager = manager_with(state.clone());

        manager.auto_reconnect_on_load().await;

        assert!(!manager.session().is_active);
        assert_eq!(state.account_requests.load(Ordering::SeqCst), 0);
        assert!(manager.take_redirect().is_none());
    }

    #[tokio::test]
    async fn connect_activates_session_and_redirects_once() {
        let state = Arc::new(StubState {
            accounts: Mutex::new(vec![account()]),
            ..StubState::default()
        });
        let mut manager = manager_with(state.clone());

        let session = manager.connect(true).await.unwrap();
        assert!(session.is_active);
        assert_eq!(session.account, Some(account()));
        assert_eq!(session.chain_id, Some(56));
        assert_eq!(state.chain_switches.load(Ordering::SeqCst), 1);

        assert_eq!(manager.take_redirect(), Some(Route::CreateToken));
        assert_eq!(manager.take_redirect(), None);

        // Reconnecting while already active must not re-arm the redirect.
        manager.connect(true).await.unwrap();
        assert_eq!(manager.take_redirect(), None);
    }

    #[tokio::test]
    async fn persisted_flag_enables_silent_reconnect() {
        let state = Arc::new(StubState {
            accounts: Mutex::new(vec![account()]),
            ..StubState::default()
        });
        let mut manager = manager_with(state.clone());

        manager.connect(true).await.unwrap();
        manager.disconnect();
        assert!(!manager.session().is_active);

        manager.auto_reconnect_on_load().await;
        assert!(manager.session().is_active);

        // The silent path never attempts a chain switch.
        assert_eq!(state.chain_switches.load(Ordering::SeqCst), 1);
        assert_eq!(manager.take_redirect(), Some(Route::CreateToken));
    }

    #[tokio::test]
    async fn rejected_connect_leaves_flag_unset() {
        let state = Arc::new(StubState {
            accounts: Mutex::new(vec![account()]),
            reject_prompt: true,
            ..StubState::default()
        });
        let mut manager = manager_with(state.clone());

        let err = manager.connect(true).await.unwrap_err();
        assert!(matches!(err, CreatorError::UserRejected));
        assert!(!manager.session().is_active);

        let requests_before = state.account_requests.load(Ordering::SeqCst);
        manager.auto_reconnect_on_load().await;
        // Flag was never set, so the reconnect attempt stops at the store.
        assert_eq!(state.account_requests.load(Ordering::SeqCst), requests_before);
    }

    #[tokio::test]
    async fn empty_account_list_is_a_provider_failure() {
        let state = Arc::new(StubState::default());
        let mut manager = manager_with(state);

        let err = manager.connect(true).await.unwrap_err();
        assert!(matches!(err, CreatorError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn refresh_clears_session_on_account_change() {
        let state = Arc::new(StubState {
            accounts: Mutex::new(vec![account()]),
            ..StubState::default()
        });
        let mut manager = manager_with(state.clone());
        manager.connect(true).await.unwrap();

        *state.accounts.lock().unwrap() = vec![Address::repeat_byte(0xbb)];
        manager.refresh().await.unwrap();

        assert!(!manager.session().is_active);
        assert_eq!(manager.session().account, None);
    }
}
