//! RESP (Redis Serialization Protocol) Data Types
//!
//! This module defines the subset of RESP values the server understands,
//! along with their wire encoding.
//!
//! ## Protocol Format
//!
//! Each RESP type starts with a type prefix byte:
//! - `+` Simple String
//! - `$` Bulk String
//! - `-` Error (server to client only)
//!
//! Integers (`:`) and arrays (`*`) have reserved prefixes but are never
//! decoded or produced.
//!
//! All types are terminated with CRLF (`\r\n`).
//!
//! ## Examples
//!
//! Simple String: `+OK\r\n`
//! Bulk String: `$5\r\nhello\r\n`
//! Error: `-ERR unknown command 'foo'\r\n`

use bytes::Bytes;
use std::fmt;

/// The CRLF terminator used in RESP protocol
pub const CRLF: &[u8] = b"\r\n";

/// RESP protocol type prefixes
pub mod prefix {
    pub const SIMPLE_STRING: u8 = b'+';
    pub const ERROR: u8 = b'-';
    pub const INTEGER: u8 = b':';
    pub const BULK_STRING: u8 = b'$';
    pub const ARRAY: u8 = b'*';
}

/// Represents a value in the RESP protocol.
///
/// The decoder only ever yields `SimpleString` and `BulkString`. `Error`
/// exists so command replies can be built and serialized through the same
/// type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RespValue {
    /// Simple strings cannot contain CRLF.
    /// Format: `+<string>\r\n`
    SimpleString(Bytes),

    /// Bulk strings are binary-safe and length-prefixed.
    /// Format: `$<length>\r\n<data>\r\n`
    BulkString(Bytes),

    /// Error reply.
    /// Format: `-<error message>\r\n`
    Error(String),
}

impl RespValue {
    /// Creates a new simple string value.
    ///
    /// # Example
    /// ```
    /// use respkv::protocol::types::RespValue;
    /// let ok = RespValue::simple_string("OK");
    /// assert_eq!(ok.serialize(), b"+OK\r\n");
    /// ```
    pub fn simple_string(s: impl Into<Bytes>) -> Self {
        RespValue::SimpleString(s.into())
    }

    /// Creates a new bulk string value.
    ///
    /// # Example
    /// ```
    /// use respkv::protocol::types::RespValue;
    /// let bulk = RespValue::bulk_string("hello");
    /// assert_eq!(bulk.serialize(), b"$5\r\nhello\r\n");
    /// ```
    pub fn bulk_string(data: impl Into<Bytes>) -> Self {
        RespValue::BulkString(data.into())
    }

    /// Creates a new error reply.
    pub fn error(s: impl Into<String>) -> Self {
        RespValue::Error(s.into())
    }

    /// Common response for successful operations
    pub fn ok() -> Self {
        RespValue::simple_string("OK")
    }

    /// Common response for PONG
    pub fn pong() -> Self {
        RespValue::simple_string("PONG")
    }

    /// Serializes the RESP value to bytes for sending over the wire.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.serialize_into(&mut buf);
        buf
    }

    /// Serializes the RESP value into an existing buffer.
    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        match self {
            RespValue::SimpleString(s) => {
                buf.push(prefix::SIMPLE_STRING);
                buf.extend_from_slice(s);
                buf.extend_from_slice(CRLF);
            }
            RespValue::BulkString(data) => {
                buf.push(prefix::BULK_STRING);
                buf.extend_from_slice(data.len().to_string().as_bytes());
                buf.extend_from_slice(CRLF);
                buf.extend_from_slice(data);
                buf.extend_from_slice(CRLF);
            }
            RespValue::Error(s) => {
                buf.push(prefix::ERROR);
                buf.extend_from_slice(s.as_bytes());
                buf.extend_from_slice(CRLF);
            }
        }
    }

    /// Returns true if this value is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, RespValue::Error(_))
    }

    /// Returns the raw content of a string value.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            RespValue::SimpleString(b) | RespValue::BulkString(b) => b,
            RespValue::Error(s) => s.as_bytes(),
        }
    }

    /// Returns the raw content as a shared buffer, without copying string
    /// payloads.
    ///
    /// Commands are read from this form.
    pub fn to_bytes(&self) -> Bytes {
        match self {
            RespValue::SimpleString(b) | RespValue::BulkString(b) => b.clone(),
            RespValue::Error(s) => Bytes::from(s.clone()),
        }
    }
}

impl fmt::Display for RespValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RespValue::SimpleString(data) | RespValue::BulkString(data) => {
                match std::str::from_utf8(data) {
                    Ok(s) => write!(f, "\"{}\"", s),
                    Err(_) => write!(f, "(binary data, {} bytes)", data.len()),
                }
            }
            RespValue::Error(s) => write!(f, "(error) {}", s),
        }
    }
}
