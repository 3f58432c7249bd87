//! Chain-specific types and error definitions.

use alloy::primitives::utils::format_units;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::transports::{RpcError, TransportError};
use thiserror::Error;

use crate::service::{ServiceError, ServiceErrorKind};

/// Minimum balance (0.001 of the native unit, in wei) needed to pay for
/// creation gas.
pub const MIN_BALANCE_WEI: U256 = U256::from_limbs([1_000_000_000_000_000, 0, 0, 0]);

/// Half of the last displayed decimal (0.00005 native units), added before
/// truncating so the display rounds.
const DISPLAY_ROUNDING_WEI: U256 = U256::from_limbs([50_000_000_000_000, 0, 0, 0]);

const DISPLAY_DECIMALS: usize = 4;

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {message}")]
    Rpc {
        kind: ServiceErrorKind,
        message: String,
    },

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The transaction was broadcast but its receipt never arrived.
    #[error("Transaction {tx_hash} was broadcast but not confirmed: {reason}")]
    Unconfirmed { tx_hash: TxHash, reason: String },

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(TxHash),

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// The coin API failed to prepare the creation call.
    #[error(transparent)]
    Api(#[from] ServiceError),
}

impl BlockchainError {
    /// Service-level classification of this error.
    pub fn kind(&self) -> ServiceErrorKind {
        match self {
            Self::Rpc { kind, .. } => *kind,
            Self::Timeout(_) => ServiceErrorKind::Network,
            Self::Reverted(_) | Self::ChainMismatch { .. } => ServiceErrorKind::Rejected,
            Self::Wallet(_) | Self::Unconfirmed { .. } => ServiceErrorKind::Other,
            Self::Api(e) => e.kind,
        }
    }

    /// Classify a JSON-RPC transport error.
    pub fn from_rpc(err: TransportError) -> Self {
        let kind = match &err {
            RpcError::Transport(_) => ServiceErrorKind::Network,
            RpcError::ErrorResp(payload) => ServiceErrorKind::from_message(&payload.message),
            _ => ServiceErrorKind::Other,
        };
        Self::Rpc {
            kind,
            message: err.to_string(),
        }
    }
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Parameters for a new content coin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinParams {
    pub creator: Address,
    pub name: String,
    /// Already normalized (uppercase, at most 6 characters).
    pub symbol: String,
    pub metadata_uri: String,
    pub platform_referrer: Option<Address>,
    pub chain_id: u64,
}

/// A creation call prepared by the coin API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationCall {
    /// Factory contract to call.
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
    /// Address the coin will be deployed at.
    pub predicted_address: Address,
}

/// Outcome of a submitted creation transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinDeployment {
    pub tx_hash: TxHash,
    /// `None` when the receipt did not reveal the coin address.
    pub address: Option<Address>,
}

/// Format a wei amount in native units with four decimals, rounded.
pub fn format_native(wei: U256) -> String {
    let rounded = wei.saturating_add(DISPLAY_ROUNDING_WEI);
    match format_units(rounded, "ether") {
        Ok(formatted) => match formatted.split_once('.') {
            Some((whole, frac)) => format!("{}.{:0<w$.w$}", whole, frac, w = DISPLAY_DECIMALS),
            None => format!("{}.{}", formatted, "0".repeat(DISPLAY_DECIMALS)),
        },
        Err(_) => format!("{} wei", wei),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_balance() {
        assert_eq!(MIN_BALANCE_WEI, U256::from(10u64).pow(U256::from(15)));
        assert_eq!(format_native(MIN_BALANCE_WEI), "0.0010");
    }

    #[test]
    fn test_format_native() {
        assert_eq!(format_native(U256::ZERO), "0.0000");
        assert_eq!(format_native(U256::from(10u64).pow(U256::from(18))), "1.0000");
        assert_eq!(format_native(U256::from(1_234_560_000_000_000_000u64)), "1.2346");
        assert_eq!(format_native(U256::from(49_999_999_999_999u64)), "0.0000");
        assert_eq!(format_native(U256::from(999_999_999_999_999u64)), "0.0010");
        assert_eq!(format_native(U256::from(12_999_960_000_000_000_000u64)), "13.0000");
    }

    #[test]
    fn test_error_display_and_kind() {
        let err = BlockchainError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");
        assert_eq!(err.kind(), ServiceErrorKind::Network);

        let err = BlockchainError::Rpc {
            kind: ServiceErrorKind::Nonce,
            message: "nonce too low".to_string(),
        };
        assert_eq!(err.kind(), ServiceErrorKind::Nonce);

        let err = BlockchainError::Unconfirmed {
            tx_hash: TxHash::repeat_byte(0xaa),
            reason: "no receipt after 180 seconds".to_string(),
        };
        assert_eq!(err.kind(), ServiceErrorKind::Other);
        assert!(err.to_string().contains(&format!("0x{}", "aa".repeat(32))));

        let err = BlockchainError::from(ServiceError::new(
            ServiceErrorKind::Rejected,
            "coin api",
            "bad symbol",
        ));
        assert_eq!(err.kind(), ServiceErrorKind::Rejected);
        assert_eq!(err.to_string(), "coin api: bad symbol");
    }
}
