//! Credentials read from the environment.
//!
//! # Security
//! - The private key is only ever read from `PRIVATE_KEY`
//! - It is never logged, and `Debug` output redacts it

use alloy::primitives::Address;
use std::fmt;
use thiserror::Error;

/// Environment variable holding the funding account's private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// Environment variable holding the coin API key.
pub const API_KEY_ENV_VAR: &str = "ZORA_API_KEY";

/// Optional environment variable naming the platform referrer address.
pub const REFERRER_ENV_VAR: &str = "PLATFORM_REFERRER";

/// Missing or malformed credentials.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("PRIVATE_KEY environment variable is required")]
    MissingPrivateKey,

    #[error("PRIVATE_KEY must be a 64-character hex string with 0x prefix")]
    MalformedPrivateKey,

    #[error("ZORA_API_KEY environment variable is required")]
    MissingApiKey,

    #[error("PLATFORM_REFERRER is not a valid address: {0}")]
    InvalidReferrer(String),
}

impl CredentialError {
    /// Remediation hint shown to the operator.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::MissingPrivateKey => "Export it before running: export PRIVATE_KEY=0x...",
            Self::MalformedPrivateKey => "Example: 0x1234567890abcdef...",
            Self::MissingApiKey => "Get your API key at: https://zora.co/developers",
            Self::InvalidReferrer(_) => "Unset PLATFORM_REFERRER or set it to a 0x-prefixed address",
        }
    }
}

/// Check that a private key is `0x` followed by exactly 64 hex characters.
pub fn validate_private_key(key: &str) -> Result<(), CredentialError> {
    match key.strip_prefix("0x") {
        Some(hex) if hex.len() == 64 && hex.bytes().all(|b| b.is_ascii_hexdigit()) => Ok(()),
        _ => Err(CredentialError::MalformedPrivateKey),
    }
}

/// Read the API key on its own (the upload command needs nothing else).
pub fn api_key_from_env() -> Result<String, CredentialError> {
    api_key_from(|name| std::env::var(name).ok())
}

fn api_key_from<F>(lookup: F) -> Result<String, CredentialError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(API_KEY_ENV_VAR)
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or(CredentialError::MissingApiKey)
}

/// Validated credentials for a creation run.
#[derive(Clone)]
pub struct Credentials {
    private_key: String,
    pub api_key: String,
    pub referrer: Option<Address>,
}

impl Credentials {
    /// Load credentials from the process environment.
    pub fn from_env() -> Result<Self, CredentialError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CredentialError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let private_key = lookup(PRIVATE_KEY_ENV_VAR)
            .filter(|key| !key.is_empty())
            .ok_or(CredentialError::MissingPrivateKey)?;
        validate_private_key(&private_key)?;

        let api_key = api_key_from(&lookup)?;

        let referrer = match lookup(REFERRER_ENV_VAR).filter(|r| !r.trim().is_empty()) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<Address>()
                    .map_err(|_| CredentialError::InvalidReferrer(raw))?,
            ),
            None => None,
        };

        Ok(Self {
            private_key,
            api_key,
            referrer,
        })
    }

    /// The validated private key. Never log this.
    pub fn private_key(&self) -> &str {
        &self.private_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("private_key", &"<redacted>")
            .field("api_key", &"<redacted>")
            .field("referrer", &self.referrer)
            .finish()
    }
}
