//! Request frames
//!
//! A [`Request`] is one header + extras + key + value unit. Lengths in the
//! header are always derived from the parts, so the body length invariant
//! cannot be broken by a caller.

use std::io::Write;

use crate::error::{BinProtError, Result};
use super::codec::write_request;
use super::{Extras, Opcode, RequestHeader};

/// A request frame borrowing its key and value
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    pub opcode: Opcode,
    pub opaque: u32,
    pub extras: Extras,
    pub key: &'a [u8],
    pub value: &'a [u8],
}

impl<'a> Request<'a> {
    /// A request with no extras, key or value.
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            opaque: 0,
            extras: Extras::None,
            key: &[],
            value: &[],
        }
    }

    pub fn key(mut self, key: &'a [u8]) -> Self {
        self.key = key;
        self
    }

    pub fn value(mut self, value: &'a [u8]) -> Self {
        self.value = value;
        self
    }

    pub fn extras(mut self, extras: Extras) -> Self {
        self.extras = extras;
        self
    }

    pub fn opaque(mut self, opaque: u32) -> Self {
        self.opaque = opaque;
        self
    }

    /// Compute the header for this frame.
    ///
    /// Fails if the key does not fit in 16 bits or the body in 32 bits.
    pub fn header(&self) -> Result<RequestHeader> {
        let key_length = u16::try_from(self.key.len()).map_err(|_| {
            BinProtError::Protocol(format!(
                "key too long: {} bytes (max {})",
                self.key.len(),
                u16::MAX
            ))
        })?;

        let body = self.extras.len() as usize + self.key.len() + self.value.len();
        let total_body_length = u32::try_from(body).map_err(|_| {
            BinProtError::Protocol(format!("body too long: {} bytes", body))
        })?;

        Ok(RequestHeader {
            opcode: self.opcode,
            key_length,
            extra_length: self.extras.len(),
            total_body_length,
            opaque: self.opaque,
        })
    }

    /// Write header, extras, key and value in that order. Does not flush.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let header = self.header()?;
        write_request(
            writer,
            header.opcode,
            header.key_length,
            header.extra_length,
            header.total_body_length,
            header.opaque,
        )?;
        self.extras.write_to(writer)?;
        writer.write_all(self.key)?;
        writer.write_all(self.value)?;
        Ok(())
    }
}
