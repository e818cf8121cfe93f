use crate::config::NetworkConfig;
use crate::error::CreatorError;
use crate::factory;
use crate::request::TokenCreationForm;
use crate::session::WalletSession;
use crate::wallet::WalletProvider;
use alloy::network::TransactionBuilder;
use alloy::rpc::types::TransactionRequest;
use alloy_primitives::{Address, B256};
use tracing::{info, warn};

/// Explicit submission state machine. A boolean busy flag would allow a
/// second submission to slip in between flag reads; with the enum the
/// guard states are named and checked in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Confirming,
    Succeeded,
    Failed(String),
}

impl SubmissionState {
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmissionState::Submitting | SubmissionState::Confirming)
    }
}

/// Outcome of a confirmed creation. Immutable once built; held until the
/// user moves on to another view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCreationResult {
    pub token_address: Address,
    pub transaction_hash: B256,
}

pub struct TokenCreationSubmitter<P> {
    provider: P,
    network: NetworkConfig,
    state: SubmissionState,
    last_result: Option<TokenCreationResult>,
}

impl<P: WalletProvider> TokenCreationSubmitter<P> {
    pub fn new(provider: P, network: NetworkConfig) -> Self {
        TokenCreationSubmitter {
            provider,
            network,
            state: SubmissionState::Idle,
            last_result: None,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn last_result(&self) -> Option<&TokenCreationResult> {
        self.last_result.as_ref()
    }

    /// Runs the one-shot creation flow: validate, submit with the fixed
    /// fee, await the receipt, extract the new token's address. Deliberately
    /// not idempotent: every successful call mints a distinct token.
    pub async fn create_token(
        &mut self,
        form: &mut TokenCreationForm,
        session: &WalletSession,
    ) -> Result<TokenCreationResult, CreatorError> {
        if self.state.is_busy() {
            return Err(CreatorError::SubmissionInProgress);
        }

        // Precondition: no network call without an active account.
        let account = match session.account {
            Some(account) if session.is_active => account,
            _ => return Err(CreatorError::WalletNotConnected),
        };

        self.state = SubmissionState::Validating;
        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => return Err(self.fail(e)),
        };

        let calldata = factory::encode_create_call(&request);
        let tx = TransactionRequest::default()
            .with_from(account)
            .with_to(self.network.factory_address)
            .with_value(self.network.creation_fee_wei)
            .with_gas_limit(self.network.gas_limit)
            .with_input(calldata);

        info!(
            "Submitting creation of {} ({}) to factory {}",
            request.name, request.symbol, self.network.factory_address
        );

        self.state = SubmissionState::Submitting;
        let tx_hash = match self.provider.submit_transaction(tx).await {
            Ok(tx_hash) => tx_hash,
            Err(e) => return Err(self.fail(e)),
        };

        info!("Transaction {} submitted, awaiting confirmation", tx_hash);
        self.state = SubmissionState::Confirming;
        let receipt = match self.provider.wait_for_receipt(tx_hash).await {
            Ok(receipt) => receipt,
            Err(e) => return Err(self.fail(e)),
        };

        if !receipt.status {
            return Err(self.fail(CreatorError::SubmissionFailed(
                "transaction reverted on chain".to_string(),
            )));
        }

        let Some(event) = factory::find_token_created(&receipt.logs) else {
            warn!(
                "Receipt for {} carries no TokenCreated event",
                receipt.transaction_hash
            );
            return Err(self.fail(CreatorError::MalformedReceipt {
                tx_hash: receipt.transaction_hash,
            }));
        };

        form.clear();

        let result = TokenCreationResult {
            token_address: event.token,
            transaction_hash: receipt.transaction_hash,
        };
        self.last_result = Some(result.clone());
        self.state = SubmissionState::Succeeded;

        info!(
            "Token {} created in transaction {}",
            result.token_address, result.transaction_hash
        );
        Ok(result)
    }

    fn fail(&mut self, error: CreatorError) -> CreatorError {
        self.state = SubmissionState::Failed(error.to_string());
        error
    }
}
