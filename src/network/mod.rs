//! Network Module
//!
//! The byte stream the client talks over.
//!
//! ## Responsibilities
//! - Buffered write-with-flush on the request side
//! - Blocking read-exactly-N on the response side
//! - Opening a configured TCP connection
//!
//! Pooling, reconnects and exclusivity are left to the caller: one
//! `ReadWriter` must serve one operation at a time.

mod connection;

pub use connection::{connect, ReadWriter, TcpReadWriter};
