//! Operation client
//!
//! One method per protocol verb. Every method writes its whole request,
//! flushes once, and reads the matching response before returning.

use std::io::{Read, Write};

use bytes::Bytes;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::network::ReadWriter;
use crate::protocol::{Extras, Opcode, Request};
use crate::response::{BatchResponse, HeaderPool, ResponseConsumer};
use super::expiration::{from_policy, ExpirationSource};

/// Binary protocol client
///
/// Holds no connection state; the caller passes the connection to each call
/// and must not interleave calls on the same connection.
pub struct Client<E = Box<dyn ExpirationSource>> {
    consumer: ResponseConsumer,
    expiration: E,
}

impl Client {
    /// Build a client with the consumer limits and expiration policy of
    /// `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let consumer = ResponseConsumer::with_pool(HeaderPool::with_capacity(
            config.header_pool_capacity,
        ))
        .max_body_length(config.max_body_length);

        Ok(Self::with_consumer(consumer, from_policy(config.expiration)?))
    }
}

impl<E: ExpirationSource> Client<E> {
    pub fn new(expiration: E) -> Self {
        Self::with_consumer(ResponseConsumer::new(), expiration)
    }

    pub fn with_consumer(consumer: ResponseConsumer, expiration: E) -> Self {
        Self { consumer, expiration }
    }

    pub fn consumer(&self) -> &ResponseConsumer {
        &self.consumer
    }

    // -------------------------------------------------------------------------
    // Storage
    // -------------------------------------------------------------------------

    /// Store a value unconditionally
    pub fn set<R: Read, W: Write>(
        &self,
        rw: &mut ReadWriter<R, W>,
        key: &[u8],
        value: &[u8],
    ) -> Result<()> {
        self.store(rw, Opcode::Set, key, value)
    }

    /// Store a value only if the key is absent
    pub fn add<R: Read, W: Write>(
        &self,
        rw: &mut ReadWriter<R, W>,
        key: &[u8],
        value: &[u8],
    ) -> Result<()> {
        self.store(rw, Opcode::Add, key, value)
    }

    /// Store a value only if the key is present
    pub fn replace<R: Read, W: Write>(
        &self,
        rw: &mut ReadWriter<R, W>,
        key: &[u8],
        value: &[u8],
    ) -> Result<()> {
        self.store(rw, Opcode::Replace, key, value)
    }

    fn store<R: Read, W: Write>(
        &self,
        rw: &mut ReadWriter<R, W>,
        opcode: Opcode,
        key: &[u8],
        value: &[u8],
    ) -> Result<()> {
        // Flags are irrelevant to the client and always zero.
        let extras = Extras::Storage {
            flags: 0,
            expiration: self.expiration.next_expiration(),
        };
        let request = Request::new(opcode).key(key).value(value).extras(extras);

        self.send(rw, &request)?;
        self.observe(opcode, self.consumer.consume_response(&mut rw.reader))
            .map(|_| ())
    }

    // -------------------------------------------------------------------------
    // Retrieval
    // -------------------------------------------------------------------------

    /// Fetch a value
    pub fn get<R: Read, W: Write>(&self, rw: &mut ReadWriter<R, W>, key: &[u8]) -> Result<Bytes> {
        self.send(rw, &Request::new(Opcode::Get).key(key))?;
        self.observe(Opcode::Get, self.consumer.consume_response(&mut rw.reader))
    }

    /// Fetch a value, verifying the response echoes `opaque`
    pub fn get_with_opaque<R: Read, W: Write>(
        &self,
        rw: &mut ReadWriter<R, W>,
        key: &[u8],
        opaque: u32,
    ) -> Result<Bytes> {
        self.send(rw, &Request::new(Opcode::Get).key(key).opaque(opaque))?;
        self.observe(
            Opcode::Get,
            self.consumer
                .consume_response_check_opaque(&mut rw.reader, opaque),
        )
    }

    /// Fetch many values in one pipelined round trip
    ///
    /// Sends one quiet get per key and a no-op terminator, flushed together.
    /// Every key is validated before anything is buffered, so a rejected key
    /// leaves nothing half-written.
    pub fn batch_get<R: Read, W: Write, K: AsRef<[u8]>>(
        &self,
        rw: &mut ReadWriter<R, W>,
        keys: &[K],
    ) -> Result<BatchResponse> {
        let requests: Vec<Request<'_>> = keys
            .iter()
            .map(|key| Request::new(Opcode::GetQ).key(key.as_ref()))
            .collect();
        for request in &requests {
            request.header()?;
        }

        for request in &requests {
            request.write_to(&mut rw.writer)?;
        }
        Request::new(Opcode::Noop).write_to(&mut rw.writer)?;
        rw.flush()?;

        tracing::trace!("Sent batch of {} quiet gets", keys.len());

        self.observe(
            Opcode::GetQ,
            self.consumer.consume_batch_response(&mut rw.reader),
        )
    }

    /// Fetch a value and reset its expiration
    pub fn gat<R: Read, W: Write>(&self, rw: &mut ReadWriter<R, W>, key: &[u8]) -> Result<Bytes> {
        let extras = Extras::Expiration {
            expiration: self.expiration.next_expiration(),
        };
        self.send(rw, &Request::new(Opcode::Gat).key(key).extras(extras))?;
        self.observe(Opcode::Gat, self.consumer.consume_response(&mut rw.reader))
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Remove a key
    pub fn delete<R: Read, W: Write>(&self, rw: &mut ReadWriter<R, W>, key: &[u8]) -> Result<()> {
        self.send(rw, &Request::new(Opcode::Delete).key(key))?;
        self.observe(Opcode::Delete, self.consumer.consume_response(&mut rw.reader))
            .map(|_| ())
    }

    /// Reset the expiration of a key
    pub fn touch<R: Read, W: Write>(&self, rw: &mut ReadWriter<R, W>, key: &[u8]) -> Result<()> {
        let extras = Extras::Expiration {
            expiration: self.expiration.next_expiration(),
        };
        self.send(rw, &Request::new(Opcode::Touch).key(key).extras(extras))?;
        self.observe(Opcode::Touch, self.consumer.consume_response(&mut rw.reader))
            .map(|_| ())
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn send<R: Read, W: Write>(&self, rw: &mut ReadWriter<R, W>, request: &Request<'_>) -> Result<()> {
        request.write_to(&mut rw.writer)?;
        rw.flush()?;
        tracing::trace!(
            "Sent {} request: key={} value={}",
            request.opcode.name(),
            request.key.len(),
            request.value.len()
        );
        Ok(())
    }

    fn observe<T>(&self, opcode: Opcode, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if e.is_connection_fatal() {
                tracing::warn!("{} failed, connection is unusable: {}", opcode.name(), e);
            } else {
                tracing::debug!("{} returned {}", opcode.name(), e);
            }
        }
        result
    }
}
