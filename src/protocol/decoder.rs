//! Streaming RESP Decoder
//!
//! The decoder pulls exactly one value at a time from a buffered async byte
//! source and never consumes bytes belonging to the next value.
//!
//! ## How the Decoder Works
//!
//! 1. Read one byte: the type marker.
//! 2. `+` reads a line up to CRLF and returns it as a simple string.
//! 3. `$` reads a length line, then exactly `length + 2` raw bytes, and returns
//!    the payload without its two trailing bytes. The payload buffer grows as
//!    bytes arrive, so a declared length alone never reserves memory.
//!
//! A line ends only where a `\n` is immediately preceded by `\r`. A bare `\n`
//! is folded into the content and scanning continues, possibly across many
//! underlying reads.
//!
//! ## Errors
//!
//! Errors fall into two categories:
//! - I/O: the peer closed the stream or the transport failed ([`DecodeError::is_io`])
//! - Protocol: bad type marker, unsupported type, malformed length, or a line
//!   longer than [`MAX_LINE_SIZE`]
//!
//! Either one ends the owning connection.

use crate::protocol::types::{prefix, RespValue, CRLF};
use bytes::Bytes;
use std::io;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// Maximum size for a single bulk string (512 MB, same as Redis)
pub const MAX_BULK_SIZE: usize = 512 * 1024 * 1024;

/// Maximum length of a simple string or bulk length line, CRLF excluded (64 KB)
pub const MAX_LINE_SIZE: usize = 64 * 1024;

/// Upper bound on the buffer reserved before a bulk payload starts arriving
const INITIAL_BULK_CAPACITY: usize = 4096;

/// Errors that can occur while decoding a RESP value.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The stream ended before a type marker was read
    #[error("connection closed")]
    Closed,

    /// The stream ended mid-value or the transport failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The type marker is not a RESP type at all
    #[error("invalid RESP data type byte: {0:#04x}")]
    InvalidMarker(u8),

    /// A known RESP type this server does not decode
    #[error("unsupported RESP data type byte: {0:#04x}")]
    UnsupportedType(u8),

    /// The bulk string length line is not a non-negative decimal
    #[error("invalid bulk string length: {0:?}")]
    InvalidLength(String),

    /// The bulk string exceeds the size limit
    #[error("bulk string too large: {size} bytes (max: {max})")]
    TooLarge { size: usize, max: usize },

    /// No CRLF within the line size limit
    #[error("line too long (max: {max} bytes)")]
    LineTooLong { max: usize },
}

impl DecodeError {
    /// Returns true for I/O-category failures (stream closed, short read,
    /// transport error), false for protocol violations.
    pub fn is_io(&self) -> bool {
        matches!(self, DecodeError::Closed | DecodeError::Io(_))
    }
}

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Decodes RESP values from a buffered async reader.
///
/// # Example
///
/// ```
/// # tokio_test::block_on(async {
/// use respkv::protocol::{RespDecoder, RespValue};
///
/// let mut decoder = RespDecoder::new(&b"$5\r\nhello\r\n+PING\r\n"[..]);
/// assert_eq!(decoder.decode().await.unwrap(), RespValue::bulk_string("hello"));
/// assert_eq!(decoder.decode().await.unwrap(), RespValue::simple_string("PING"));
/// # });
/// ```
#[derive(Debug)]
pub struct RespDecoder<R> {
    reader: R,
}

impl<R> RespDecoder<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Returns a mutable reference to the underlying reader.
    ///
    /// The connection handler writes replies through this when the reader
    /// is a bidirectional buffered stream.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Reads exactly one RESP value from the stream.
    pub async fn decode(&mut self) -> DecodeResult<RespValue> {
        let marker = match self.reader.read_u8().await {
            Ok(byte) => byte,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(DecodeError::Closed)
            }
            Err(e) => return Err(e.into()),
        };

        match marker {
            prefix::SIMPLE_STRING => self.decode_simple_string().await,
            prefix::BULK_STRING => self.decode_bulk_string().await,
            prefix::ARRAY | prefix::INTEGER | prefix::ERROR => {
                Err(DecodeError::UnsupportedType(marker))
            }
            other => Err(DecodeError::InvalidMarker(other)),
        }
    }

    /// Decodes the rest of a simple string: `<string>\r\n`
    async fn decode_simple_string(&mut self) -> DecodeResult<RespValue> {
        let line = self.read_line().await?;
        Ok(RespValue::SimpleString(Bytes::from(line)))
    }

    /// Decodes the rest of a bulk string: `<length>\r\n<data>\r\n`
    async fn decode_bulk_string(&mut self) -> DecodeResult<RespValue> {
        let line = self.read_line().await?;
        let text = String::from_utf8_lossy(&line);

        let length: usize = text
            .parse()
            .map_err(|_| DecodeError::InvalidLength(text.to_string()))?;

        if length > MAX_BULK_SIZE {
            return Err(DecodeError::TooLarge {
                size: length,
                max: MAX_BULK_SIZE,
            });
        }

        // Payload plus its trailing CRLF.
        let expected = length + CRLF.len();
        let mut data = Vec::with_capacity(expected.min(INITIAL_BULK_CAPACITY));
        (&mut self.reader)
            .take(expected as u64)
            .read_to_end(&mut data)
            .await?;

        if data.len() < expected {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stream closed inside bulk string",
            )
            .into());
        }
        data.truncate(length);

        Ok(RespValue::BulkString(Bytes::from(data)))
    }

    /// Reads up to and including a CRLF, returning the line without it.
    ///
    /// At most `MAX_LINE_SIZE + 2` bytes are buffered.
    async fn read_line(&mut self) -> DecodeResult<Vec<u8>> {
        let mut line = Vec::new();

        loop {
            let budget = (MAX_LINE_SIZE + CRLF.len()).saturating_sub(line.len());
            if budget == 0 {
                return Err(DecodeError::LineTooLong { max: MAX_LINE_SIZE });
            }

            let mut limited = (&mut self.reader).take(budget as u64);
            let n = limited.read_until(b'\n', &mut line).await?;
            if n == 0 || line.last() != Some(&b'\n') {
                if n == budget {
                    continue;
                }
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "stream closed before CRLF",
                )
                .into());
            }

            let len = line.len();
            if len >= 2 && line[len - 2] == b'\r' {
                line.truncate(len - 2);
                return Ok(line);
            }
        }
    }
}

/// Decodes a single value from an in-memory buffer.
pub async fn decode_message(buf: &[u8]) -> DecodeResult<RespValue> {
    RespDecoder::new(buf).decode().await
}
