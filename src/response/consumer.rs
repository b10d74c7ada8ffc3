//! Response Consumer
//!
//! Reads framed responses off a stream.
//!
//! ## Framing Rule
//! The declared body is always drained in full before anything else is
//! decided, error status or not. Skipping it would leave the next read in
//! the middle of a body.

use std::io::Read;

use bytes::{Bytes, BytesMut};

use crate::error::{BinProtError, Result, ServerError};
use crate::protocol::{read_response_header, status_to_error, Opcode};
use super::{HeaderPool, ResponseFrame};

/// Largest response body accepted by default (64 MB)
pub const DEFAULT_MAX_BODY_LENGTH: usize = 64 * 1024 * 1024;

/// Outcome of a pipelined batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResponse {
    /// Values of successful frames, in arrival order
    pub values: Vec<Bytes>,

    /// The last server error seen in the batch
    pub error: Option<ServerError>,
}

impl BatchResponse {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Collapse into the values, or the last server error.
    pub fn into_result(self) -> Result<Vec<Bytes>> {
        match self.error {
            None => Ok(self.values),
            Some(e) => Err(e.into()),
        }
    }
}

/// Reads responses for one connection
pub struct ResponseConsumer {
    /// Scratch headers, one per parse
    pool: HeaderPool,

    /// Bodies declared larger than this are refused
    max_body_length: usize,
}

impl ResponseConsumer {
    pub fn new() -> Self {
        Self::with_pool(HeaderPool::new())
    }

    pub fn with_pool(pool: HeaderPool) -> Self {
        Self {
            pool,
            max_body_length: DEFAULT_MAX_BODY_LENGTH,
        }
    }

    pub fn max_body_length(mut self, max: usize) -> Self {
        self.max_body_length = max;
        self
    }

    pub fn pool(&self) -> &HeaderPool {
        &self.pool
    }

    /// Read one complete frame: header plus the full declared body.
    pub fn read_frame<R: Read>(&self, reader: &mut R) -> Result<ResponseFrame> {
        let mut header = self.pool.acquire();
        read_response_header(reader, &mut header)?;

        let body_length = header.total_body_length as usize;
        if body_length > self.max_body_length {
            return Err(BinProtError::Protocol(format!(
                "response body too large: {} bytes (max {})",
                body_length, self.max_body_length
            )));
        }

        let mut body = BytesMut::zeroed(body_length);
        if body_length > 0 {
            reader.read_exact(&mut body)?;
        }

        if header.extra_length as usize > body_length {
            return Err(BinProtError::Protocol(format!(
                "extras length {} exceeds body length {}",
                header.extra_length, body_length
            )));
        }

        tracing::trace!(
            "Read {} response: status=0x{:04x} body={} extras={} opaque={}",
            header.opcode.name(),
            header.status,
            body_length,
            header.extra_length,
            header.opaque
        );

        Ok(ResponseFrame {
            opcode: header.opcode,
            status: header.status,
            key_length: header.key_length,
            extra_length: header.extra_length,
            opaque: header.opaque,
            cas: header.cas,
            body: body.freeze(),
        })
    }

    /// Consume a single response and return its value.
    pub fn consume_response<R: Read>(&self, reader: &mut R) -> Result<Bytes> {
        self.read_frame(reader)?.into_result()
    }

    /// Consume a single response whose opaque must equal `opaque`.
    ///
    /// A mismatch means responses are no longer paired with requests on this
    /// connection and is reported as [`BinProtError::ProtocolDesync`].
    pub fn consume_response_check_opaque<R: Read>(
        &self,
        reader: &mut R,
        opaque: u32,
    ) -> Result<Bytes> {
        let frame = self.read_frame(reader)?;

        if frame.opaque != opaque {
            tracing::warn!(
                "Opaque mismatch on {} response: expected {}, got {}",
                frame.opcode.name(),
                opaque,
                frame.opaque
            );
            return Err(BinProtError::ProtocolDesync {
                expected: opaque,
                actual: frame.opaque,
            });
        }

        frame.into_result()
    }

    /// Consume frames up to and including the no-op terminator.
    ///
    /// Any transport or framing error discards everything read so far.
    pub fn consume_batch_response<R: Read>(&self, reader: &mut R) -> Result<BatchResponse> {
        let mut batch = BatchResponse::default();

        loop {
            let frame = self.read_frame(reader)?;
            let terminator = frame.opcode == Opcode::Noop;

            match status_to_error(frame.status) {
                Some(kind) => batch.error = Some(ServerError::new(kind, frame.value())),
                None if !terminator => batch.values.push(frame.value()),
                None => {}
            }

            if terminator {
                break;
            }
        }

        tracing::trace!(
            "Batch complete: {} values, error={:?}",
            batch.values.len(),
            batch.error.as_ref().map(|e| e.kind)
        );

        Ok(batch)
    }
}

impl Default for ResponseConsumer {
    fn default() -> Self {
        Self::new()
    }
}
