//! Client Module
//!
//! The public verbs of the binary protocol.
//!
//! ## Verbs
//! | Verb          | Extras              | Response            |
//! |---------------|---------------------|---------------------|
//! | set/add/replace | flags + expiration | single            |
//! | get           | none                | single              |
//! | get_with_opaque | none              | single, correlated  |
//! | batch_get     | none                | batch (GETQ + NOOP) |
//! | gat           | expiration          | single              |
//! | delete        | none                | single              |
//! | touch         | expiration          | single              |

mod expiration;
mod operations;

pub use expiration::{from_policy, ExpirationSource, FixedExpiration, RandomExpiration};
pub use operations::Client;
