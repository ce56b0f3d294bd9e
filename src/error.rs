use {
    alloy_primitives::{U256, hex::FromHexError},
    thiserror::Error,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Network not found in endpoint config: {network}")]
    NetworkNotFound { network: String },

    #[error("Missing configuration for {network}: {field}")]
    ConfigurationMissing { network: String, field: String },

    #[error("Invalid address: {address}")]
    InvalidAddress {
        address: String,
        #[source]
        source: FromHexError,
    },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Transaction failed: {0}")]
    PendingError(#[from] alloy_provider::PendingTransactionError),

    #[error("Contract call failed: {0}")]
    ContractError(#[from] alloy_contract::Error),

    #[error(
        "Peer mismatch on {network} for eid {eid}: configured {configured}, expected {expected}"
    )]
    PeerMismatch {
        network: String,
        eid: u32,
        configured: String,
        expected: String,
    },

    #[error("Insufficient balance have {0} need {1}")]
    InsufficientBalance(U256, U256),

    #[error("Insufficient allowance have {0} need {1}")]
    InsufficientAllowance(U256, U256),

    #[error("RPC error: {0}")]
    Rpc(#[from] alloy_json_rpc::RpcError<alloy_transport::TransportErrorKind>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} must be set in the environment")]
    MissingCredential(&'static str),

    #[error("{0} is not a valid private key")]
    InvalidCredential(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
