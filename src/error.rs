//! Error types for binprot
//!
//! Provides a unified error type for all client operations.

use bytes::Bytes;
use thiserror::Error;

use crate::protocol::ServerErrorKind;

/// Result type alias using BinProtError
pub type Result<T> = std::result::Result<T, BinProtError>;

/// Unified error type for binprot operations
#[derive(Debug, Error)]
pub enum BinProtError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("protocol desync: expected opaque {expected:#010x}, got {actual:#010x}")]
    ProtocolDesync { expected: u32, actual: u32 },

    // -------------------------------------------------------------------------
    // Server Errors
    // -------------------------------------------------------------------------
    #[error(transparent)]
    Server(#[from] ServerError),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("configuration error: {0}")]
    Config(String),
}

impl BinProtError {
    /// Whether the connection must be discarded after this error.
    ///
    /// Server errors leave the stream correctly framed; everything else
    /// means the next read can no longer be trusted.
    pub fn is_connection_fatal(&self) -> bool {
        match self {
            BinProtError::Transport(_)
            | BinProtError::Protocol(_)
            | BinProtError::ProtocolDesync { .. } => true,
            BinProtError::Server(_) | BinProtError::Config(_) => false,
        }
    }

    /// The server error kind, if this is a status-mapped error.
    pub fn server_kind(&self) -> Option<ServerErrorKind> {
        match self {
            BinProtError::Server(e) => Some(e.kind),
            _ => None,
        }
    }
}

/// A status-mapped, application-level error reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("server error: {kind}")]
pub struct ServerError {
    /// Classification of the response status
    pub kind: ServerErrorKind,

    /// Response value bytes, kept only for surface-worthy kinds
    pub payload: Option<Bytes>,
}

impl ServerError {
    /// Build a server error, keeping the payload only if the kind is
    /// surface-worthy.
    pub fn new(kind: ServerErrorKind, value: Bytes) -> Self {
        let payload = crate::protocol::is_surface_worthy(kind).then_some(value);
        Self { kind, payload }
    }
}
