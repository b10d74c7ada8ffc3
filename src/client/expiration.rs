//! Expiration providers
//!
//! Storage, touch and get-and-touch requests carry a 4-byte expiration.
//! The client asks its [`ExpirationSource`] for one value per such call.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::ExpirationPolicy;
use crate::error::{BinProtError, Result};

/// Produces the expiration extra for one request
pub trait ExpirationSource: Send + Sync {
    fn next_expiration(&self) -> u32;
}

/// Same expiration every time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedExpiration(pub u32);

impl ExpirationSource for FixedExpiration {
    fn next_expiration(&self) -> u32 {
        self.0
    }
}

/// Uniformly random expiration in an inclusive range of seconds
///
/// The RNG sits behind a mutex so one provider can be shared by clients on
/// different threads.
pub struct RandomExpiration {
    min_secs: u32,
    max_secs: u32,
    rng: Mutex<SmallRng>,
}

impl RandomExpiration {
    pub fn new(min_secs: u32, max_secs: u32) -> Result<Self> {
        Self::with_rng(min_secs, max_secs, SmallRng::from_entropy())
    }

    /// Deterministic sequence, for reproducible runs
    pub fn with_seed(min_secs: u32, max_secs: u32, seed: u64) -> Result<Self> {
        Self::with_rng(min_secs, max_secs, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(min_secs: u32, max_secs: u32, rng: SmallRng) -> Result<Self> {
        if min_secs > max_secs {
            return Err(BinProtError::Config(format!(
                "empty expiration range: {}..={}",
                min_secs, max_secs
            )));
        }
        Ok(Self {
            min_secs,
            max_secs,
            rng: Mutex::new(rng),
        })
    }

    pub fn range(&self) -> (u32, u32) {
        (self.min_secs, self.max_secs)
    }
}

impl ExpirationSource for RandomExpiration {
    fn next_expiration(&self) -> u32 {
        self.rng.lock().gen_range(self.min_secs..=self.max_secs)
    }
}

impl<T: ExpirationSource + ?Sized> ExpirationSource for Box<T> {
    fn next_expiration(&self) -> u32 {
        (**self).next_expiration()
    }
}

impl<T: ExpirationSource + ?Sized> ExpirationSource for Arc<T> {
    fn next_expiration(&self) -> u32 {
        (**self).next_expiration()
    }
}

/// Build the provider described by a policy
pub fn from_policy(policy: ExpirationPolicy) -> Result<Box<dyn ExpirationSource>> {
    Ok(match policy {
        ExpirationPolicy::Fixed(secs) => Box::new(FixedExpiration(secs)),
        ExpirationPolicy::Random { min_secs, max_secs } => {
            Box::new(RandomExpiration::new(min_secs, max_secs)?)
        }
    })
}
