//! Configuration for binprot clients
//!
//! Centralized configuration with sensible defaults.

use crate::error::{BinProtError, Result};

/// Main configuration for a client and its connection
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Server address (host:port)
    pub server_addr: String,

    /// Socket read timeout (milliseconds, 0 = block forever)
    pub read_timeout_ms: u64,

    /// Socket write timeout (milliseconds, 0 = block forever)
    pub write_timeout_ms: u64,

    /// Disable Nagle's algorithm
    pub nodelay: bool,

    // -------------------------------------------------------------------------
    // Buffer Configuration
    // -------------------------------------------------------------------------
    /// Capacity of the buffered reader (bytes)
    pub read_buffer_size: usize,

    /// Capacity of the buffered writer (bytes)
    pub write_buffer_size: usize,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Largest response body accepted before the connection is declared broken
    pub max_body_length: usize,

    /// Idle response header slots kept per consumer
    pub header_pool_capacity: usize,

    /// How expiration extras are chosen
    pub expiration: ExpirationPolicy,
}

/// Expiration extra policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationPolicy {
    /// Same expiration on every call
    Fixed(u32),

    /// Uniformly random in `min_secs..=max_secs` on every call
    Random { min_secs: u32, max_secs: u32 },
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:11211".to_string(),
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
            nodelay: true,
            read_buffer_size: 64 * 1024,
            write_buffer_size: 64 * 1024,
            max_body_length: crate::response::DEFAULT_MAX_BODY_LENGTH,
            header_pool_capacity: crate::response::DEFAULT_POOL_CAPACITY,
            // 1 second up to 1 hour
            expiration: ExpirationPolicy::Random {
                min_secs: 1,
                max_secs: 3600,
            },
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Check the config before any connection is made
    pub fn validate(&self) -> Result<()> {
        if self.server_addr.is_empty() {
            return Err(BinProtError::Config("server address is empty".to_string()));
        }
        if self.read_buffer_size == 0 || self.write_buffer_size == 0 {
            return Err(BinProtError::Config(
                "buffer sizes must be non-zero".to_string(),
            ));
        }
        if let ExpirationPolicy::Random { min_secs, max_secs } = self.expiration {
            if min_secs > max_secs {
                return Err(BinProtError::Config(format!(
                    "empty expiration range: {}..={}",
                    min_secs, max_secs
                )));
            }
        }
        Ok(())
    }
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the server address
    pub fn server_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.server_addr = addr.into();
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.config.nodelay = nodelay;
        self
    }

    /// Set the buffered reader capacity (in bytes)
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.config.read_buffer_size = size;
        self
    }

    /// Set the buffered writer capacity (in bytes)
    pub fn write_buffer_size(mut self, size: usize) -> Self {
        self.config.write_buffer_size = size;
        self
    }

    /// Set the largest accepted response body (in bytes)
    pub fn max_body_length(mut self, size: usize) -> Self {
        self.config.max_body_length = size;
        self
    }

    pub fn header_pool_capacity(mut self, capacity: usize) -> Self {
        self.config.header_pool_capacity = capacity;
        self
    }

    /// Set the expiration policy
    pub fn expiration(mut self, policy: ExpirationPolicy) -> Self {
        self.config.expiration = policy;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        ClientConfig::default().validate().unwrap();
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::builder()
            .server_addr("10.0.0.1:11311")
            .read_timeout_ms(0)
            .expiration(ExpirationPolicy::Fixed(60))
            .build();

        assert_eq!(config.server_addr, "10.0.0.1:11311");
        assert_eq!(config.read_timeout_ms, 0);
        assert_eq!(config.expiration, ExpirationPolicy::Fixed(60));
    }

    #[test]
    fn test_empty_expiration_range_rejected() {
        let config = ClientConfig::builder()
            .expiration(ExpirationPolicy::Random { min_secs: 10, max_secs: 5 })
            .build();
        assert!(matches!(config.validate(), Err(BinProtError::Config(_))));
    }

    #[test]
    fn test_zero_buffer_rejected() {
        let config = ClientConfig::builder().write_buffer_size(0).build();
        assert!(config.validate().is_err());
    }
}
