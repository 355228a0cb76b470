//! RESP Protocol Implementation
//!
//! This module implements the subset of the Redis Serialization Protocol (RESP)
//! the server speaks: simple strings and bulk strings in, simple strings, bulk
//! strings and errors out.
//!
//! ## Modules
//!
//! - `types`: Defines the `RespValue` enum and serialization
//! - `decoder`: Streaming decoder reading one value at a time from a socket
//!
//! ## Example
//!
//! ```ignore
//! use respkv::protocol::{RespDecoder, RespValue};
//! use tokio::io::BufReader;
//!
//! // Decoding incoming data
//! let mut decoder = RespDecoder::new(BufReader::new(stream));
//! let value = decoder.decode().await?;
//!
//! // Creating responses
//! let response = RespValue::bulk_string("hello");
//! let bytes = response.serialize();
//! ```

pub mod decoder;
pub mod types;

// Re-export commonly used types for convenience
pub use decoder::{decode_message, DecodeError, DecodeResult, RespDecoder};
pub use types::RespValue;
