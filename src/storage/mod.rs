//! Storage Engine Module
//!
//! This module provides the associative store shared by every connection:
//! string keys to string values, unbounded, no expiry, no persistence.
//!
//! ## Features
//!
//! - **Sharded Storage**: 64 independent shards reduce lock contention
//! - **RwLock**: Multiple concurrent readers, exclusive writers
//!
//! ## Example
//!
//! ```
//! use respkv::storage::StorageEngine;
//! use bytes::Bytes;
//! use std::sync::Arc;
//!
//! // Created once at startup and shared by every connection
//! let engine = Arc::new(StorageEngine::new());
//!
//! engine.set(Bytes::from("name"), Bytes::from("Ariz"));
//! assert_eq!(engine.get(b"name"), Some(Bytes::from("Ariz")));
//! ```

pub mod engine;

// Re-export commonly used types
pub use engine::{StorageEngine, StorageStats};
