//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML config
//! file. Every section has defaults, so an absent file yields a working
//! Base mainnet setup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration for the coin tool.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CoinsConfig {
    /// Chain connection settings.
    pub chain: ChainConfig,

    /// Coin API and metadata storage settings.
    pub api: ApiConfig,

    /// Local registry file settings.
    pub registry: RegistryConfig,

    /// Human-facing link formats.
    pub links: LinkConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Chain connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs, tried in order for reads.
    pub failover_urls: Vec<String>,

    /// Chain ID (8453 for Base mainnet).
    pub chain_id: u64,

    /// Symbol of the native unit, used in operator output.
    pub native_symbol: String,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Maximum time to wait for the creation receipt, in seconds.
    pub receipt_timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://mainnet.base.org".to_string(),
            failover_urls: Vec::new(),
            chain_id: 8453,
            native_symbol: "ETH".to_string(),
            rpc_timeout_secs: 15,
            receipt_timeout_secs: 180,
        }
    }
}

/// Coin API and storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the coin API that builds creation calls.
    pub base_url: String,

    /// Upload endpoint of the content-addressed storage backend.
    pub upload_url: String,

    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,

    /// Backing currency for new content coins.
    pub currency: String,

    /// Starting market cap preset.
    pub starting_market_cap: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-sdk.zora.engineering".to_string(),
            upload_url: "https://ipfs-uploader.zora.co/api/v0/add".to_string(),
            timeout_secs: 60,
            currency: "ZORA".to_string(),
            starting_market_cap: "LOW".to_string(),
        }
    }
}

/// Registry file configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registry path. Relative paths resolve against the install root.
    pub path: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("coins-registry.json"),
        }
    }
}

impl RegistryConfig {
    /// Resolve the registry path against `root` when it is relative.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            root.join(&self.path)
        }
    }
}

/// Link formats used when printing and recording coins.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Block explorer base URL.
    pub explorer_url: String,

    /// Marketplace coin page base URL.
    pub marketplace_url: String,

    /// Chain prefix in marketplace links (`base:0x...`).
    pub chain_slug: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            explorer_url: "https://basescan.org".to_string(),
            marketplace_url: "https://zora.co/coin".to_string(),
            chain_slug: "base".to_string(),
        }
    }
}

impl LinkConfig {
    /// Explorer page for a transaction.
    pub fn transaction_url(&self, tx_hash: impl std::fmt::Display) -> String {
        format!("{}/tx/{}", self.explorer_url.trim_end_matches('/'), tx_hash)
    }

    /// Marketplace page for a coin.
    pub fn coin_url(&self, address: impl std::fmt::Display) -> String {
        format!(
            "{}/{}:{}",
            self.marketplace_url.trim_end_matches('/'),
            self.chain_slug,
            address
        )
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides it.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}
