//! Errors surfaced to the operator by the CLI commands.

use alloy::primitives::{Address, TxHash};
use thiserror::Error;

use crate::blockchain::BlockchainError;
use crate::config::{ConfigError, CredentialError};
use crate::metadata::{ImageFormat, MetadataError};
use crate::registry::RegistryError;
use crate::service::{ServiceError, ServiceErrorKind};

/// Any failure that ends a command run. Every variant exits with code 1.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Missing or malformed command-line arguments.
    #[error("{0}")]
    Argument(String),

    /// Missing or malformed credentials.
    #[error(transparent)]
    Environment(#[from] CredentialError),

    /// Input rejected before any network call.
    #[error("{message}")]
    Validation {
        message: String,
        hint: Option<String>,
    },

    /// The funding account cannot cover creation gas.
    #[error("Insufficient {symbol} balance for gas fees")]
    InsufficientFunds {
        balance: String,
        minimum: String,
        symbol: String,
        address: Address,
    },

    /// Upload or API call failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// RPC, signing, or receipt failure.
    #[error(transparent)]
    Chain(BlockchainError),

    /// The creation transaction was sent but its outcome is unknown.
    #[error("Transaction {tx_hash} was broadcast but not confirmed: {reason}")]
    Unconfirmed {
        tx_hash: TxHash,
        reason: String,
        explorer_url: Option<String>,
    },

    /// Local metadata preparation failed.
    #[error(transparent)]
    Metadata(MetadataError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CommandError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            hint: None,
        }
    }

    /// Classification of external service failures, if this is one.
    pub fn service_kind(&self) -> Option<ServiceErrorKind> {
        match self {
            Self::Service(e) => Some(e.kind),
            Self::Chain(e) => Some(e.kind()),
            Self::InsufficientFunds { .. } => Some(ServiceErrorKind::InsufficientFunds),
            Self::Unconfirmed { .. } => Some(ServiceErrorKind::Other),
            _ => None,
        }
    }

    /// Follow-up lines telling the operator what to do next.
    pub fn hints(&self) -> Vec<String> {
        match self {
            Self::Environment(e) => vec![e.hint().to_string()],
            Self::Validation { hint, .. } => hint.iter().cloned().collect(),
            Self::InsufficientFunds {
                balance,
                minimum,
                symbol,
                address,
            } => vec![
                format!("Current balance: {} {}", balance, symbol),
                format!("Please fund your wallet with at least {} {}", minimum, symbol),
                format!("Wallet address: {}", address),
            ],
            Self::Unconfirmed {
                tx_hash,
                explorer_url,
                ..
            } => {
                let mut hints = vec![format!("Transaction: {}", tx_hash)];
                hints.extend(explorer_url.iter().map(|url| format!("Explorer: {}", url)));
                hints.push(
                    "It may still be mined - check the explorer before running create again, or a second coin may be created"
                        .to_string(),
                );
                hints
            }
            Self::Registry(RegistryError::Parse { path, .. }) => {
                vec![format!("Fix or remove {} and try again", path.display())]
            }
            Self::Config(_) => vec!["Check the config file passed with --config".to_string()],
            _ => match self.service_kind() {
                Some(ServiceErrorKind::Nonce) => {
                    vec!["Transaction nonce error - try again".to_string()]
                }
                Some(ServiceErrorKind::Network) => vec![
                    "Network error - check your internet connection".to_string(),
                    "You can retry the command".to_string(),
                ],
                Some(ServiceErrorKind::Rejected) => {
                    vec!["The request was refused - check ZORA_API_KEY and the coin parameters".to_string()]
                }
                _ => Vec::new(),
            },
        }
    }
}

impl From<BlockchainError> for CommandError {
    fn from(err: BlockchainError) -> Self {
        match err {
            BlockchainError::Api(e) => Self::Service(e),
            BlockchainError::Unconfirmed { tx_hash, reason } => Self::Unconfirmed {
                tx_hash,
                reason,
                explorer_url: None,
            },
            other => Self::Chain(other),
        }
    }
}

impl From<MetadataError> for CommandError {
    fn from(err: MetadataError) -> Self {
        match err {
            MetadataError::UnsupportedFormat { .. } => Self::Validation {
                message: err.to_string(),
                hint: Some(format!(
                    "Supported formats: {}",
                    ImageFormat::SUPPORTED_EXTENSIONS.join(", ")
                )),
            },
            MetadataError::ImageNotFound(_) => Self::validation(err.to_string()),
            MetadataError::Upload(e) => Self::Service(e),
            other => Self::Metadata(other),
        }
    }
}
