//! # gq-core
//!
//! Shared kernel for the GQ OEMS client, providing:
//!
//! - **Types** (`types`) — order sides, algorithm tags, the order-request
//!   model and its validation rules
//! - **Configuration** (`config`) — JSON gateway config deserialization
//! - **Error types** (`error`) — validation/encoding/transport taxonomy via thiserror
//! - **Logging** (`logging`) — tracing-based structured logging

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export types at crate root for convenience.
pub use types::*;
