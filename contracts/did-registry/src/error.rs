use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    /// Ledger read/write or serialization failure
    #[error("ledger transport error: {0}")]
    Transport(#[from] StdError),

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("DID {did} already exists")]
    AlreadyExists { did: String },

    #[error("DID {did} does not exist")]
    NotFound { did: String },

    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("Corrupt record under key {key}: {reason}")]
    Corruption { key: String, reason: String },
}

impl ContractError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        ContractError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Reclassifies decode failures on a stored value as corruption; any other
    /// storage error stays a transport failure.
    pub fn from_load(key: &str, err: StdError) -> Self {
        match err {
            StdError::ParseErr { msg, .. }
            | StdError::InvalidUtf8 { msg, .. }
            | StdError::InvalidBase64 { msg, .. } => ContractError::Corruption {
                key: key.to_string(),
                reason: msg,
            },
            other => ContractError::Transport(other),
        }
    }
}
