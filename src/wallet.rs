use crate::config::NetworkConfig;
use crate::error::CreatorError;
use alloy::providers::fillers::FillProvider;
use alloy::providers::{PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::rpc::types::{Log, TransactionRequest};
use alloy::transports::{RpcError, TransportErrorKind};
use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

type AlloyFullProvider = FillProvider<
    alloy::providers::fillers::JoinFill<
        alloy::providers::Identity,
        alloy::providers::fillers::JoinFill<
            alloy::providers::fillers::GasFiller,
            alloy::providers::fillers::JoinFill<
                alloy::providers::fillers::BlobGasFiller,
                alloy::providers::fillers::JoinFill<
                    alloy::providers::fillers::NonceFiller,
                    alloy::providers::fillers::ChainIdFiller,
                >,
            >,
        >,
    >,
    alloy::providers::RootProvider,
>;

// EIP-1193 provider error codes
const USER_REJECTED_REQUEST: i64 = 4001;
const UNRECOGNIZED_CHAIN: i64 = 4902;

/// The slice of a mined receipt the creation flow actually consumes.
#[derive(Debug, Clone)]
pub struct CreationReceipt {
    pub transaction_hash: B256,
    pub status: bool,
    pub logs: Vec<Log>,
}

/// Boundary to the key-holding wallet agent. The session manager and the
/// submitter only ever talk to this trait, so tests can run against a stub
/// and no key material enters the crate.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Accounts the wallet exposes. With `prompt` the wallet may show an
    /// approval dialog (`eth_requestAccounts`); without it the call is
    /// silent (`eth_accounts`).
    async fn request_accounts(&self, prompt: bool) -> Result<Vec<Address>, CreatorError>;

    async fn chain_id(&self) -> Result<u64, CreatorError>;

    /// Switches the wallet to the target network, registering it first when
    /// the wallet does not know the chain.
    async fn ensure_chain(&self, network: &NetworkConfig) -> Result<(), CreatorError>;

    /// Hands the transaction to the wallet for signing and submission.
    async fn submit_transaction(&self, tx: TransactionRequest) -> Result<B256, CreatorError>;

    /// Blocks until the transaction is mined. No timeout, no retry; the
    /// wait is delegated entirely to the provider.
    async fn wait_for_receipt(&self, tx_hash: B256) -> Result<CreationReceipt, CreatorError>;
}

#[derive(Clone)]
pub struct WalletClient {
    provider: AlloyFullProvider,
}

impl WalletClient {
    pub fn new(wallet_rpc_url: &str) -> Result<Self, CreatorError> {
        let parsed_url = wallet_rpc_url.parse().map_err(|_| {
            CreatorError::ProviderUnavailable(format!("invalid wallet RPC URL: {wallet_rpc_url}"))
        })?;
        let provider: AlloyFullProvider = ProviderBuilder::new().connect_http(parsed_url);
        Ok(WalletClient { provider })
    }

    fn map_provider_error(error: RpcError<TransportErrorKind>) -> CreatorError {
        if let Some(payload) = error.as_error_resp() {
            if payload.code == USER_REJECTED_REQUEST {
                return CreatorError::UserRejected;
            }
        }
        CreatorError::ProviderUnavailable(error.to_string())
    }
}

#[async_trait]
impl WalletProvider for WalletClient {
    async fn request_accounts(&self, prompt: bool) -> Result<Vec<Address>, CreatorError> {
        let method = if prompt { "eth_requestAccounts" } else { "eth_accounts" };
        debug!("Requesting wallet accounts via {}", method);

        let accounts: Vec<Address> = self
            .provider
            .raw_request(method.into(), ())
            .await
            .map_err(Self::map_provider_error)?;
        Ok(accounts)
    }

    async fn chain_id(&self) -> Result<u64, CreatorError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(Self::map_provider_error)
    }

    async fn ensure_chain(&self, network: &NetworkConfig) -> Result<(), CreatorError> {
        let current = self.chain_id().await?;
        if current == network.chain_id {
            return Ok(());
        }

        info!("Switching wallet from chain {} to chain {}", current, network.chain_id);
        let switch_params = json!([{ "chainId": network.chain_id_hex() }]);
        let switch_result: Result<serde_json::Value, _> = self
            .provider
            .raw_request("wallet_switchEthereumChain".into(), switch_params)
            .await;

        let error = match switch_result {
            Ok(_) => return Ok(()),
            Err(error) => error,
        };

        if error.as_error_resp().map(|payload| payload.code) != Some(UNRECOGNIZED_CHAIN) {
            return Err(Self::map_provider_error(error));
        }

        info!("Chain {} unknown to the wallet, registering it", network.chain_id);
        let add_params = json!([{
            "chainId": network.chain_id_hex(),
            "chainName": network.chain_name,
            "nativeCurrency": network.native_currency,
            "rpcUrls": network.rpc_urls,
            "blockExplorerUrls": network.block_explorer_urls,
        }]);
        let _: serde_json::Value = self
            .provider
            .raw_request("wallet_addEthereumChain".into(), add_params)
            .await
            .map_err(Self::map_provider_error)?;
        Ok(())
    }

    async fn submit_transaction(&self, tx: TransactionRequest) -> Result<B256, CreatorError> {
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| CreatorError::SubmissionFailed(e.to_string()))?;
        Ok(*pending.tx_hash())
    }

    async fn wait_for_receipt(&self, tx_hash: B256) -> Result<CreationReceipt, CreatorError> {
        let pending = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash);
        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| CreatorError::SubmissionFailed(e.to_string()))?;

        Ok(CreationReceipt {
            transaction_hash: receipt.transaction_hash,
            status: receipt.status(),
            logs: receipt.inner.logs().to_vec(),
        })
    }
}
