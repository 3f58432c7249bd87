//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Credentials (PRIVATE_KEY)
//!     → wallet.rs (key loading)
//!     → client.rs (read-only RPC with timeouts and failover)
//!     → api.rs (coin API builds the creation call)
//!     → factory.rs (sign, broadcast, wait for receipt)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod api;
pub mod client;
pub mod factory;
pub mod types;
pub mod wallet;

pub use api::CoinApiClient;
pub use client::BlockchainClient;
pub use factory::{CoinFactory, ZoraCoinFactory};
pub use types::{
    BlockchainError, BlockchainResult, CoinDeployment, CoinParams, CreationCall,
    MIN_BALANCE_WEI,
};
pub use wallet::Wallet;
