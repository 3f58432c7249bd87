//! Coin creation on-chain.
//!
//! # Responsibilities
//! - Report the creator's balance
//! - Prepare the creation call (delegated to the coin API)
//! - Sign, broadcast, and wait for the creation receipt
//! - Recover the deployed coin address from the receipt

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{Log, TransactionRequest};
use alloy::sol;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::api::CoinApiClient;
use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{
    BlockchainError, BlockchainResult, CoinDeployment, CoinParams, CreationCall,
};
use crate::blockchain::wallet::Wallet;
use crate::service::ServiceErrorKind;

sol! {
    /// Pool identifier emitted alongside a new coin.
    #[derive(Debug)]
    struct PoolKey {
        address currency0;
        address currency1;
        uint24 fee;
        int24 tickSpacing;
        address hooks;
    }

    /// Emitted by the coin factory when a coin is deployed.
    #[derive(Debug)]
    event CoinCreatedV4(
        address indexed caller,
        address indexed payoutRecipient,
        address indexed platformReferrer,
        address currency,
        string uri,
        string name,
        string symbol,
        address coin,
        PoolKey poolKey,
        bytes32 poolKeyHash,
        string version
    );
}

/// External boundary for creating coins.
#[allow(async_fn_in_trait)]
pub trait CoinFactory {
    /// Account that pays for and owns new coins.
    fn creator(&self) -> Address;

    /// Current native balance of the creator.
    async fn balance(&self) -> BlockchainResult<U256>;

    /// Build the creation call without submitting anything.
    async fn prepare(&self, params: &CoinParams) -> BlockchainResult<CreationCall>;

    /// Submit a prepared call and wait for it to be mined.
    async fn submit(&self, call: &CreationCall) -> BlockchainResult<CoinDeployment>;
}

/// Coin factory backed by the coin API and a signing RPC provider.
pub struct ZoraCoinFactory {
    client: BlockchainClient,
    api: CoinApiClient,
    wallet: Wallet,
    signer: Arc<dyn Provider + Send + Sync>,
    receipt_timeout: Duration,
}

impl ZoraCoinFactory {
    /// Create a factory that signs with `wallet` through the client's
    /// primary RPC endpoint.
    pub fn new(client: BlockchainClient, api: CoinApiClient, wallet: Wallet) -> BlockchainResult<Self> {
        let config = client.config();
        let url: url::Url = config.rpc_url.parse().map_err(|e| BlockchainError::Rpc {
            kind: ServiceErrorKind::Other,
            message: format!("Invalid RPC URL '{}': {}", config.rpc_url, e),
        })?;
        let signer = Arc::new(
            ProviderBuilder::new()
                .wallet(wallet.ethereum_wallet())
                .connect_http(url),
        ) as Arc<dyn Provider + Send + Sync>;
        let receipt_timeout = Duration::from_secs(config.receipt_timeout_secs);

        Ok(Self {
            client,
            api,
            wallet,
            signer,
            receipt_timeout,
        })
    }
}

impl CoinFactory for ZoraCoinFactory {
    fn creator(&self) -> Address {
        self.wallet.address()
    }

    async fn balance(&self) -> BlockchainResult<U256> {
        self.client.get_balance(self.wallet.address()).await
    }

    async fn prepare(&self, params: &CoinParams) -> BlockchainResult<CreationCall> {
        let call = self.api.prepare_creation(params).await?;
        tracing::info!(
            factory = %call.to,
            predicted_address = %call.predicted_address,
            "Creation call prepared"
        );
        Ok(call)
    }

    async fn submit(&self, call: &CreationCall) -> BlockchainResult<CoinDeployment> {
        let tx = TransactionRequest::default()
            .with_from(self.wallet.address())
            .with_to(call.to)
            .with_input(call.data.clone())
            .with_value(call.value)
            .with_chain_id(self.wallet.chain_id());

        let rpc_timeout = self.client.timeout_duration();
        let pending = timeout(rpc_timeout, self.signer.send_transaction(tx))
            .await
            .map_err(|_| BlockchainError::Timeout(rpc_timeout.as_secs()))?
            .map_err(BlockchainError::from_rpc)?;

        let tx_hash = *pending.tx_hash();
        tracing::info!(tx_hash = %tx_hash, "Creation transaction broadcast");

        // From here on the transaction may be mined; failures must keep the hash.
        let receipt = timeout(self.receipt_timeout, pending.get_receipt())
            .await
            .map_err(|_| BlockchainError::Unconfirmed {
                tx_hash,
                reason: format!("no receipt after {} seconds", self.receipt_timeout.as_secs()),
            })?
            .map_err(|e| BlockchainError::Unconfirmed {
                tx_hash,
                reason: e.to_string(),
            })?;

        if !receipt.status() {
            return Err(BlockchainError::Reverted(tx_hash));
        }

        let address = coin_address_from_logs(receipt.inner.logs(), call.predicted_address);
        if address.is_none() {
            tracing::warn!(tx_hash = %tx_hash, "Receipt did not reveal the coin address");
        }

        Ok(CoinDeployment { tx_hash, address })
    }
}

/// Find the deployed coin address in receipt logs.
///
/// The factory's creation event wins; otherwise the predicted address is
/// accepted only if that contract emitted logs in the same transaction.
pub fn coin_address_from_logs(logs: &[Log], predicted: Address) -> Option<Address> {
    logs.iter()
        .find_map(|log| log.log_decode::<CoinCreatedV4>().ok())
        .map(|decoded| decoded.inner.data.coin)
        .or_else(|| {
            logs.iter()
                .any(|log| log.address() == predicted)
                .then_some(predicted)
        })
}
