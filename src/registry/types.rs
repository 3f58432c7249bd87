//! Registry record types.

use alloy::primitives::{Address, TxHash};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of a stored coin symbol.
pub const MAX_SYMBOL_LEN: usize = 6;

/// Uppercase a symbol and truncate it to [`MAX_SYMBOL_LEN`] characters.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.to_uppercase().chars().take(MAX_SYMBOL_LEN).collect()
}

/// One coin created by this tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinRecord {
    /// Deployed coin address, when it was observed.
    #[serde(default)]
    pub address: Option<Address>,
    pub name: String,
    pub symbol: String,
    pub tx_hash: TxHash,
    pub created_at: DateTime<Utc>,
    pub metadata_uri: String,
    pub explorer_url: String,
}

/// The full registry document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Registry {
    /// Records in creation order.
    pub coins: Vec<CoinRecord>,
}

impl Registry {
    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }
}
