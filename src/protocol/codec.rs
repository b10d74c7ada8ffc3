//! Protocol codec
//!
//! Stream-level header I/O for the binary protocol.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! ┌────────────────────┬──────────┬─────────┬─────────────┐
//! │ Header (24, 0x80)  │  Extras  │   Key   │    Value    │
//! └────────────────────┴──────────┴─────────┴─────────────┘
//! ```
//!
//! ### Response
//! ```text
//! ┌────────────────────┬──────────┬───────────────────────┐
//! │ Header (24, 0x81)  │  Extras  │  Value (key for GetK) │
//! └────────────────────┴──────────┴───────────────────────┘
//! ```

use std::io::{Read, Write};

use crate::error::Result;
use super::{Opcode, RequestHeader, ResponseHeader, HEADER_SIZE};

/// Write a request header to a stream.
///
/// The caller writes extras, key and value right after and flushes once for
/// the whole operation.
pub fn write_request<W: Write>(
    writer: &mut W,
    opcode: Opcode,
    key_length: u16,
    extra_length: u8,
    total_body_length: u32,
    opaque: u32,
) -> Result<()> {
    let header = RequestHeader {
        opcode,
        key_length,
        extra_length,
        total_body_length,
        opaque,
    };
    writer.write_all(&header.encode())?;
    Ok(())
}

/// Read a response header from a stream into `header`.
///
/// Blocks until 24 bytes are read. A short read is a transport error; a
/// wrong magic byte is a protocol error.
pub fn read_response_header<R: Read>(reader: &mut R, header: &mut ResponseHeader) -> Result<()> {
    let mut buf = [0u8; HEADER_SIZE];
    reader.read_exact(&mut buf)?;
    *header = ResponseHeader::parse(&buf)?;
    Ok(())
}
