//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! zora-coins.toml (optional) / --config <path>
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CoinsConfig (validated, immutable)
//!
//! environment (PRIVATE_KEY, ZORA_API_KEY, PLATFORM_REFERRER)
//!     → credentials.rs (format checks, redacted Debug)
//! ```
//!
//! # Design Decisions
//! - Secrets never live in the config file
//! - All fields have defaults so no file is needed for Base mainnet
//! - Validation separates syntactic (serde) from semantic checks

pub mod credentials;
pub mod loader;
pub mod schema;
pub mod validation;

use std::path::{Path, PathBuf};

pub use credentials::{CredentialError, Credentials};
pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{ApiConfig, ChainConfig, CoinsConfig, LinkConfig, ObservabilityConfig, RegistryConfig};

/// Root that relative registry and config paths resolve against.
///
/// Under `cargo run` this is the checkout (`CARGO_MANIFEST_DIR` as set at
/// run time). An installed binary uses the directory holding the executable.
pub fn install_root() -> PathBuf {
    resolve_install_root(
        std::env::var_os("CARGO_MANIFEST_DIR").map(PathBuf::from),
        std::env::current_exe().ok(),
    )
}

fn resolve_install_root(manifest_dir: Option<PathBuf>, exe: Option<PathBuf>) -> PathBuf {
    manifest_dir
        .filter(|dir| dir.is_dir())
        .or_else(|| exe.and_then(|exe| exe.parent().map(Path::to_path_buf)))
        .unwrap_or_else(|| PathBuf::from("."))
}
