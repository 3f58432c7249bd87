//! Blockchain RPC client with timeout and failover.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint (primary + failovers)
//! - Query chain state needed before creation (chain id, balances)
//! - Turn timeouts and transport failures into classified errors

use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::config::ChainConfig;
use crate::service::ServiceErrorKind;

/// Read-only blockchain RPC client with failover support.
#[derive(Clone)]
pub struct BlockchainClient {
    /// List of providers (primary + failovers).
    providers: Vec<Arc<dyn Provider + Send + Sync>>,
    config: ChainConfig,
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a new blockchain client.
    ///
    /// Only the primary URL must parse; invalid failover URLs are skipped.
    /// A chain id mismatch is logged but does not fail construction.
    pub async fn new(config: ChainConfig) -> BlockchainResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let mut providers = Vec::new();

        let primary_url: url::Url = config.rpc_url.parse().map_err(|e| BlockchainError::Rpc {
            kind: ServiceErrorKind::Other,
            message: format!("Invalid RPC URL '{}': {}", config.rpc_url, e),
        })?;
        providers.push(
            Arc::new(ProviderBuilder::new().connect_http(primary_url)) as Arc<dyn Provider + Send + Sync>,
        );

        for url_str in &config.failover_urls {
            if let Ok(url) = url_str.parse() {
                providers.push(
                    Arc::new(ProviderBuilder::new().connect_http(url)) as Arc<dyn Provider + Send + Sync>,
                );
            } else {
                tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL");
            }
        }

        let client = Self {
            providers,
            config: config.clone(),
            timeout_duration,
        };

        match client.verify_chain_id().await {
            Ok(()) => {
                tracing::info!(
                    rpc_url = %config.rpc_url,
                    chain_id = config.chain_id,
                    "Blockchain client initialized"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Blockchain client initialized but chain verification failed"
                );
            }
        }

        Ok(client)
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id != self.config.chain_id {
            return Err(BlockchainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<u64> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_chain_id();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, "RPC error, trying next provider");
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, "RPC timeout, trying next provider");
                }
            }
        }
        Err(all_failed("All RPC providers failed"))
    }

    /// Get the balance of an address.
    pub async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_balance(address);
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        Err(all_failed("All providers failed to get balance"))
    }

    /// Get the configuration.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Per-request RPC timeout.
    pub fn timeout_duration(&self) -> Duration {
        self.timeout_duration
    }
}

fn all_failed(message: &str) -> BlockchainError {
    BlockchainError::Rpc {
        kind: ServiceErrorKind::Network,
        message: message.to_string(),
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ChainConfig {
        ChainConfig {
            // Nothing listens here; every call fails fast.
            rpc_url: "http://127.0.0.1:9".to_string(),
            failover_urls: Vec::new(),
            chain_id: 31337,
            native_symbol: "ETH".to_string(),
            rpc_timeout_secs: 2,
            receipt_timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_client_creation_tolerates_unreachable_rpc() {
        let result = BlockchainClient::new(test_config()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_primary_url() {
        let mut config = test_config();
        config.rpc_url = "not a url".to_string();
        let result = BlockchainClient::new(config).await;
        assert!(matches!(result, Err(BlockchainError::Rpc { .. })));
    }

    #[tokio::test]
    async fn test_rpc_failover_exhausted() {
        let mut config = test_config();
        config.failover_urls.push("http://127.0.0.1:10".to_string());
        config.failover_urls.push("::bad::".to_string());

        let client = BlockchainClient::new(config).await.unwrap();
        assert_eq!(client.providers.len(), 2);

        let err = client.get_balance(Address::ZERO).await.unwrap_err();
        assert_eq!(err.kind(), ServiceErrorKind::Network);
        assert!(err.to_string().contains("All providers failed"));
    }
}
