//! Local coin registry.
//!
//! # Data Flow
//! ```text
//! coins-registry.json
//!     → store.rs load (missing file = empty registry)
//!     → store.rs append (pure, one record per created coin)
//!     → store.rs save (full rewrite, pretty JSON)
//!     → render.rs (listing)
//! ```
//!
//! # Design Decisions
//! - Records are typed; a file that does not match the schema fails to load
//! - Insertion order is creation order; nothing is deduplicated or reordered
//! - No locking: single operator, sequential runs

pub mod render;
pub mod store;
pub mod types;

use std::path::PathBuf;
use thiserror::Error;

pub use render::render;
pub use store::{append, RegistryStore};
pub use types::{normalize_symbol, CoinRecord, Registry, MAX_SYMBOL_LEN};

/// Errors reading or writing the registry file.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("registry file {} is malformed: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode registry: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
