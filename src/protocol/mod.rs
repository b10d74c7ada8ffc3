//! Protocol Module
//!
//! The memcached binary wire protocol as seen from the client.
//!
//! ## Frame Format
//! ```text
//! ┌──────────────┬──────────┬─────────┬─────────────┐
//! │ Header (24)  │  Extras  │   Key   │    Value    │
//! └──────────────┴──────────┴─────────┴─────────────┘
//! ```
//!
//! ### Opcodes
//! - 0x00: GET      - key
//! - 0x01: SET      - flags + expiration, key, value
//! - 0x02: ADD      - flags + expiration, key, value
//! - 0x03: REPLACE  - flags + expiration, key, value
//! - 0x04: DELETE   - key
//! - 0x09: GETQ     - key (quiet)
//! - 0x0a: NOOP     - empty
//! - 0x1c: TOUCH    - expiration, key
//! - 0x1d: GAT      - expiration, key
//!
//! ### Status Codes
//! See [`status`] for the full table and how each code is classified.

mod opcode;
pub mod status;
mod header;
mod extras;
mod request;
mod codec;

pub use opcode::Opcode;
pub use status::{
    disposition, is_surface_worthy, status_to_error, Disposition, ServerErrorKind, Status,
    ERROR_TABLE,
};
pub use header::{RequestHeader, ResponseHeader, HEADER_SIZE, REQUEST_MAGIC, RESPONSE_MAGIC};
pub use extras::Extras;
pub use request::Request;
pub use codec::{read_response_header, write_request};
