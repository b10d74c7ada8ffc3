//! Fixed 24-byte request and response headers
//!
//! ```text
//! Byte/     0       |       1       |       2       |       3       |
//!   +---------------+---------------+---------------+---------------+
//!  0| Magic         | Opcode        | Key length                    |
//!   +---------------+---------------+---------------+---------------+
//!  4| Extras length | Data type     | vbucket id / status           |
//!   +---------------+---------------+---------------+---------------+
//!  8| Total body length                                             |
//!   +---------------+---------------+---------------+---------------+
//! 12| Opaque                                                        |
//!   +---------------+---------------+---------------+---------------+
//! 16| CAS                                                           |
//!   |                                                               |
//!   +---------------+---------------+---------------+---------------+
//! ```
//!
//! All multi-byte fields are big-endian.

use crate::error::{BinProtError, Result};
use super::Opcode;

/// Magic byte for request packets
pub const REQUEST_MAGIC: u8 = 0x80;

/// Magic byte for response packets
pub const RESPONSE_MAGIC: u8 = 0x81;

/// Header size for both directions
pub const HEADER_SIZE: usize = 24;

fn parse_opcode(byte: u8) -> Result<Opcode> {
    Opcode::from_u8(byte)
        .ok_or_else(|| BinProtError::Protocol(format!("unknown opcode: 0x{:02x}", byte)))
}

// =============================================================================
// Request Header
// =============================================================================

/// Request header as written by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestHeader {
    pub opcode: Opcode,
    pub key_length: u16,
    pub extra_length: u8,
    /// extra_length + key_length + value length
    pub total_body_length: u32,
    pub opaque: u32,
}

impl RequestHeader {
    /// Create a header with no body.
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            key_length: 0,
            extra_length: 0,
            total_body_length: 0,
            opaque: 0,
        }
    }

    /// Encode into a 24-byte buffer. Data type, vbucket and CAS are zero.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0] = REQUEST_MAGIC;
        buf[1] = self.opcode as u8;
        buf[2..4].copy_from_slice(&self.key_length.to_be_bytes());
        buf[4] = self.extra_length;
        buf[8..12].copy_from_slice(&self.total_body_length.to_be_bytes());
        buf[12..16].copy_from_slice(&self.opaque.to_be_bytes());
        buf
    }

    /// Parse a request header. Used to inspect what the client wrote.
    pub fn parse(data: &[u8; HEADER_SIZE]) -> Result<Self> {
        if data[0] != REQUEST_MAGIC {
            return Err(BinProtError::Protocol(format!(
                "invalid request magic: 0x{:02x}",
                data[0]
            )));
        }

        Ok(Self {
            opcode: parse_opcode(data[1])?,
            key_length: u16::from_be_bytes([data[2], data[3]]),
            extra_length: data[4],
            total_body_length: u32::from_be_bytes([data[8], data[9], data[10], data[11]]),
            opaque: u32::from_be_bytes([data[12], data[13], data[14], data[15]]),
        })
    }
}

// =============================================================================
// Response Header
// =============================================================================

/// Response header as sent by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader {
    pub opcode: Opcode,
    pub key_length: u16,
    pub extra_length: u8,
    pub data_type: u8,
    /// Raw status, classified by [`super::status_to_error`]
    pub status: u16,
    pub total_body_length: u32,
    pub opaque: u32,
    pub cas: u64,
}

impl Default for ResponseHeader {
    fn default() -> Self {
        Self::new(Opcode::Noop, 0)
    }
}

impl ResponseHeader {
    pub fn new(opcode: Opcode, status: u16) -> Self {
        Self {
            opcode,
            key_length: 0,
            extra_length: 0,
            data_type: 0,
            status,
            total_body_length: 0,
            opaque: 0,
            cas: 0,
        }
    }

    /// Parse a response header, rejecting anything without the response magic.
    pub fn parse(data: &[u8; HEADER_SIZE]) -> Result<Self> {
        if data[0] != RESPONSE_MAGIC {
            return Err(BinProtError::Protocol(format!(
                "invalid response magic: 0x{:02x}",
                data[0]
            )));
        }

        Ok(Self {
            opcode: parse_opcode(data[1])?,
            key_length: u16::from_be_bytes([data[2], data[3]]),
            extra_length: data[4],
            data_type: data[5],
            status: u16::from_be_bytes([data[6], data[7]]),
            total_body_length: u32::from_be_bytes([data[8], data[9], data[10], data[11]]),
            opaque: u32::from_be_bytes([data[12], data[13], data[14], data[15]]),
            cas: u64::from_be_bytes([
                data[16], data[17], data[18], data[19], data[20], data[21], data[22], data[23],
            ]),
        })
    }

    /// Encode into a 24-byte buffer.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0] = RESPONSE_MAGIC;
        buf[1] = self.opcode as u8;
        buf[2..4].copy_from_slice(&self.key_length.to_be_bytes());
        buf[4] = self.extra_length;
        buf[5] = self.data_type;
        buf[6..8].copy_from_slice(&self.status.to_be_bytes());
        buf[8..12].copy_from_slice(&self.total_body_length.to_be_bytes());
        buf[12..16].copy_from_slice(&self.opaque.to_be_bytes());
        buf[16..24].copy_from_slice(&self.cas.to_be_bytes());
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_header_layout() {
        let header = RequestHeader {
            opcode: Opcode::Set,
            key_length: 5,
            extra_length: 8,
            total_body_length: 13,
            opaque: 0xDEADBEEF,
        };
        let buf = header.encode();

        assert_eq!(buf[0], 0x80);
        assert_eq!(buf[1], 0x01);
        assert_eq!(&buf[2..4], &[0x00, 0x05]);
        assert_eq!(buf[4], 8);
        assert_eq!(&buf[5..8], &[0, 0, 0]);
        assert_eq!(&buf[8..12], &[0, 0, 0, 13]);
        assert_eq!(&buf[12..16], &[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(&buf[16..24], &[0u8; 8]);
    }

    #[test]
    fn test_response_header_rejects_request_magic() {
        let buf = RequestHeader::new(Opcode::Get).encode();
        assert!(matches!(
            ResponseHeader::parse(&buf),
            Err(BinProtError::Protocol(_))
        ));
    }

    #[test]
    fn test_response_header_rejects_unknown_opcode() {
        let mut buf = ResponseHeader::new(Opcode::Get, 0).encode();
        buf[1] = 0x42;
        assert!(matches!(
            ResponseHeader::parse(&buf),
            Err(BinProtError::Protocol(_))
        ));
    }
}
