//! Connection Handler Module
//!
//! This module handles individual client connections.
//! Each client gets its own handler task that runs in a loop,
//! reading one request, executing it and writing the reply before
//! reading the next.
//!
//! ## Connection Lifecycle
//!
//! ```text
//! 1. Client connects (TCP handshake)
//!        │
//!        ▼
//! 2. ConnectionHandler spawned
//!        │
//!        ▼
//! 3. ┌──────────────────────────────┐
//!    │      Main Loop               │
//!    │                              │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Reading: decode value   │─┼──> decode error ──┐
//!    │  └───────────┬─────────────┘ │                   │
//!    │              ▼               │                   │
//!    │  ┌─────────────────────────┐ │                   │
//!    │  │ Dispatching: execute    │ │                   │
//!    │  └───────────┬─────────────┘ │                   │
//!    │              ▼               │                   │
//!    │  ┌─────────────────────────┐ │                   │
//!    │  │ Writing: send reply     │─┼──> write error ───┤
//!    │  └───────────┬─────────────┘ │                   │
//!    │              ▼               │                   │
//!    │         [Loop back]          │                   │
//!    └──────────────────────────────┘                   │
//!                                                       ▼
//! 4. Closed: error logged locally, nothing sent, socket dropped
//! ```
//!
//! Decode failures are never reported to the peer. The stream is owned by the
//! handler, so it is released on every exit path.

use crate::commands::CommandHandler;
use crate::protocol::{DecodeError, RespDecoder, RespValue};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufStream};
use tokio::net::TcpStream;
use tracing::{debug, info, trace, warn};

/// Statistics for connection handling
#[derive(Debug, Default)]
pub struct ConnectionStats {
    /// Total number of connections accepted
    pub connections_accepted: AtomicU64,
    /// Currently active connections
    pub active_connections: AtomicU64,
    /// Total commands processed
    pub commands_processed: AtomicU64,
    /// Total bytes written
    pub bytes_written: AtomicU64,
}

impl ConnectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_opened(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn command_processed(&self) {
        self.commands_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bytes_written(&self, count: usize) {
        self.bytes_written
            .fetch_add(count as u64, Ordering::Relaxed);
    }
}

/// Handles a single client connection.
///
/// Generic over the stream so it can run on a `TcpStream` or any in-memory
/// duplex.
pub struct ConnectionHandler<S> {
    /// Buffered stream; reads go through the decoder, writes through `get_mut`
    decoder: RespDecoder<BufStream<S>>,

    /// Client's address (for logging)
    addr: SocketAddr,

    /// The command handler (shared across connections)
    command_handler: CommandHandler,

    /// Connection statistics (shared)
    stats: Arc<ConnectionStats>,
}

impl<S> ConnectionHandler<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a new connection handler.
    ///
    /// # Arguments
    ///
    /// * `stream` - The client stream
    /// * `addr` - The client's socket address
    /// * `command_handler` - The command handler for executing commands
    /// * `stats` - Shared connection statistics
    pub fn new(
        stream: S,
        addr: SocketAddr,
        command_handler: CommandHandler,
        stats: Arc<ConnectionStats>,
    ) -> Self {
        stats.connection_opened();

        Self {
            decoder: RespDecoder::new(BufStream::new(stream)),
            addr,
            command_handler,
            stats,
        }
    }

    /// Runs the connection until the client disconnects or an error occurs.
    ///
    /// A peer closing the stream between requests counts as a graceful
    /// disconnect and yields `Ok(())`.
    pub async fn run(mut self) -> Result<(), ConnectionError> {
        info!(client = %self.addr, "Client connected");

        let result = match self.main_loop().await {
            Err(ConnectionError::Decode(DecodeError::Closed)) => Ok(()),
            other => other,
        };

        match &result {
            Ok(()) => info!(client = %self.addr, "Client disconnected"),
            Err(ConnectionError::Decode(e)) if e.is_io() => {
                debug!(client = %self.addr, error = %e, "Connection closed mid-request")
            }
            Err(ConnectionError::Decode(e)) => {
                warn!(client = %self.addr, error = %e, "Error decoding RESP")
            }
            Err(e) => debug!(client = %self.addr, error = %e, "Connection error"),
        }

        self.stats.connection_closed();
        result
    }

    /// The read-dispatch-write loop.
    async fn main_loop(&mut self) -> Result<(), ConnectionError> {
        loop {
            let request = self.decoder.decode().await?;
            trace!(client = %self.addr, request = %request, "Decoded request");

            let response = self.command_handler.execute(&request);
            self.stats.command_processed();

            self.send_response(&response).await?;
        }
    }

    /// Sends a response to the client.
    async fn send_response(&mut self, response: &RespValue) -> Result<(), ConnectionError> {
        let bytes = response.serialize();
        let stream = self.decoder.get_mut();
        stream.write_all(&bytes).await?;
        stream.flush().await?;
        self.stats.bytes_written(bytes.len());
        trace!(
            client = %self.addr,
            bytes = bytes.len(),
            "Sent response"
        );
        Ok(())
    }
}

/// Errors that end a connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// The request could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Writing the reply failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handles a client connection.
///
/// This is a convenience function that creates a ConnectionHandler
/// and runs it to completion. The handler has already logged any error
/// by kind, so it is only traced here.
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    command_handler: CommandHandler,
    stats: Arc<ConnectionStats>,
) {
    let handler = ConnectionHandler::new(stream, addr, command_handler, stats);
    if let Err(e) = handler.run().await {
        trace!(client = %addr, error = %e, "Connection handler exited with error");
    }
}
