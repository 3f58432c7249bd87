//! Zora content coin creation library.

pub mod blockchain;
pub mod commands;
pub mod config;
pub mod metadata;
pub mod observability;
pub mod registry;
pub mod service;

pub use config::schema::CoinsConfig;
pub use registry::{CoinRecord, Registry, RegistryStore};
pub use service::{ServiceError, ServiceErrorKind};
