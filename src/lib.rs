//! # binprot
//!
//! A blocking client for the memcached binary protocol with:
//! - Fixed 24-byte big-endian request and response headers
//! - Per-verb extras (flags, expiration)
//! - Pipelined quiet gets terminated by a no-op
//! - Opaque-checked responses that report desync instead of aborting
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Operation Client                        │
//! │     set / add / replace / get / batch_get / gat / ...        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ write frame, flush once
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Frame Codec                             │
//! │            (header + extras + key + value)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  ReadWriter │          │  Response   │
//!   │  (buffered) │─────────▶│  Consumer   │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │   Status    │
//!                           │   Mapper    │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod response;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BinProtError, Result, ServerError};
pub use config::{ClientConfig, ExpirationPolicy};
pub use client::{Client, ExpirationSource, FixedExpiration, RandomExpiration};
pub use network::ReadWriter;
pub use protocol::ServerErrorKind;
pub use response::BatchResponse;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of binprot
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
