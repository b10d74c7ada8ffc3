//! Buffered connection halves
//!
//! The client writes whole frames into a buffered writer, flushes once per
//! operation, then blocks on a buffered reader for the response.

use std::io::{BufReader, BufWriter, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::Result;

/// A buffered reader/writer pair over one logical connection
pub struct ReadWriter<R: Read, W: Write> {
    /// Response side (buffered for efficiency)
    pub reader: BufReader<R>,

    /// Request side, flushed once per operation
    pub writer: BufWriter<W>,
}

impl<R: Read, W: Write> ReadWriter<R, W> {
    /// Wrap a reader and writer with default buffer capacities
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer: BufWriter::new(writer),
        }
    }

    /// Wrap a reader and writer with explicit buffer capacities
    pub fn with_capacity(read_capacity: usize, write_capacity: usize, reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::with_capacity(read_capacity, reader),
            writer: BufWriter::with_capacity(write_capacity, writer),
        }
    }

    /// Push everything buffered on the request side to the stream
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// A TCP connection split into buffered halves
pub type TcpReadWriter = ReadWriter<TcpStream, TcpStream>;

/// Open a TCP connection configured from `config`
///
/// Applies nodelay and the read/write timeouts; a timeout of 0 leaves the
/// socket blocking.
pub fn connect(config: &ClientConfig) -> Result<TcpReadWriter> {
    config.validate()?;

    let stream = TcpStream::connect(&config.server_addr)?;
    stream.set_nodelay(config.nodelay)?;

    if config.read_timeout_ms > 0 {
        stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
    }
    if config.write_timeout_ms > 0 {
        stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
    }

    // Clone stream for separate read/write handles
    let read_stream = stream.try_clone()?;

    tracing::debug!("Connected to {}", config.server_addr);

    Ok(ReadWriter::with_capacity(
        config.read_buffer_size,
        config.write_buffer_size,
        read_stream,
        stream,
    ))
}
