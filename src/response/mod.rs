//! Response Module
//!
//! Turns bytes from the server back into values and errors.
//!
//! ## Access Patterns
//! - Single response: one frame, value or server error
//! - Single response with opaque check: as above, plus correlation
//! - Batch: frames until the no-op terminator, last error wins

mod pool;
mod frame;
mod consumer;

pub use pool::{HeaderPool, PooledHeader, DEFAULT_POOL_CAPACITY};
pub use frame::ResponseFrame;
pub use consumer::{BatchResponse, ResponseConsumer, DEFAULT_MAX_BODY_LENGTH};
