//! Observability subsystem.
//!
//! # Design Decisions
//! - `tracing` for structured diagnostics, filtered by config or `RUST_LOG`
//! - Secrets are never recorded as span or event fields

pub mod logging;
