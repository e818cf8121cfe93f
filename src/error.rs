use alloy_primitives::B256;
use thiserror::Error;

/// Failures of the wallet-session and token-creation flows. Everything here
/// is converted to a human-readable message at the CLI boundary; nothing
/// terminates the process.
#[derive(Debug, Error)]
pub enum CreatorError {
    #[error("no compatible wallet provider: {0}")]
    ProviderUnavailable(String),

    #[error("the wallet request was rejected by the user")]
    UserRejected,

    #[error("please connect your wallet first")]
    WalletNotConnected,

    #[error("invalid {field}: {reason}")]
    InvalidRequest { field: &'static str, reason: String },

    #[error("failed to create token: {0}")]
    SubmissionFailed(String),

    #[error("transaction {tx_hash} was mined but emitted no TokenCreated event")]
    MalformedReceipt { tx_hash: B256 },

    #[error("a token creation is already in progress")]
    SubmissionInProgress,
}
