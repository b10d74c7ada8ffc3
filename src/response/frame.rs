//! Response frame
//!
//! A drained response: header fields plus the full declared body.

use bytes::Bytes;

use crate::error::{Result, ServerError};
use crate::protocol::{status_to_error, Opcode, ServerErrorKind};

/// One response read off the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseFrame {
    pub opcode: Opcode,
    pub status: u16,
    pub key_length: u16,
    pub extra_length: u8,
    pub opaque: u32,
    pub cas: u64,

    /// Exactly `total_body_length` bytes: extras, then value
    pub body: Bytes,
}

impl ResponseFrame {
    pub fn extras(&self) -> Bytes {
        self.body.slice(..self.extra_length as usize)
    }

    /// The body with extras stripped.
    pub fn value(&self) -> Bytes {
        self.body.slice(self.extra_length as usize..)
    }

    pub fn error_kind(&self) -> Option<ServerErrorKind> {
        status_to_error(self.status)
    }

    /// The value on success, or the mapped server error.
    pub fn into_result(self) -> Result<Bytes> {
        let value = self.value();
        match self.error_kind() {
            None => Ok(value),
            Some(kind) => Err(ServerError::new(kind, value).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BinProtError;

    fn frame(status: u16, body: &'static [u8], extra_length: u8) -> ResponseFrame {
        ResponseFrame {
            opcode: Opcode::Get,
            status,
            key_length: 0,
            extra_length,
            opaque: 0,
            cas: 0,
            body: Bytes::from_static(body),
        }
    }

    #[test]
    fn test_value_strips_extras() {
        let f = frame(0, b"\x00\x00\x00\x01value", 4);
        assert_eq!(&f.extras()[..], b"\x00\x00\x00\x01");
        assert_eq!(&f.value()[..], b"value");
    }

    #[test]
    fn test_exists_keeps_payload() {
        let err = frame(0x0002, b"Data exists for key.", 0).into_result().unwrap_err();
        match err {
            BinProtError::Server(e) => {
                assert_eq!(e.kind, ServerErrorKind::Exists);
                assert_eq!(e.payload.as_deref(), Some(&b"Data exists for key."[..]));
            }
            other => panic!("Expected server error, got {other:?}"),
        }
    }

    #[test]
    fn test_not_found_has_no_payload() {
        let err = frame(0x0001, b"Not found", 0).into_result().unwrap_err();
        match err {
            BinProtError::Server(e) => {
                assert_eq!(e.kind, ServerErrorKind::NotFound);
                assert_eq!(e.payload, None);
            }
            other => panic!("Expected server error, got {other:?}"),
        }
    }
}
