//! # respkv - A Minimal RESP Key-Value Server
//!
//! respkv speaks a small subset of the Redis Serialization Protocol (RESP)
//! over TCP and serves four commands against an in-memory store:
//! `PING`, `ECHO`, `SET` and `GET`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                              respkv                                 │
//! │                                                                     │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐              │
//! │  │ TCP Server  │───>│ Connection  │───>│  Command    │              │
//! │  │ (Listener)  │    │  Handler    │    │  Handler    │              │
//! │  └─────────────┘    └──────┬──────┘    └──────┬──────┘              │
//! │                            │                  │                     │
//! │                            ▼                  ▼                     │
//! │                     ┌─────────────┐    ┌─────────────────────────┐  │
//! │                     │    RESP     │    │     StorageEngine       │  │
//! │                     │   Decoder   │    │  (sharded RwLock map)   │  │
//! │                     └─────────────┘    └─────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use respkv::server::accept_loop;
//! use respkv::connection::ConnectionStats;
//! use respkv::storage::StorageEngine;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let storage = Arc::new(StorageEngine::new());
//!     let stats = Arc::new(ConnectionStats::new());
//!     let listener = TcpListener::bind("0.0.0.0:6379").await?;
//!     accept_loop(listener, storage, stats).await;
//!     Ok(())
//! }
//! ```
//!
//! ## Wire Format
//!
//! Requests are a single simple string (`+SET k v\r\n`) or bulk string
//! (`$9\r\nSET k val\r\n`) whose bytes are split on whitespace into a command
//! name and arguments. Arrays, integers and errors are not accepted; a client
//! that sends one is disconnected.
//!
//! ## Module Overview
//!
//! - [`protocol`]: RESP decoder and value types
//! - [`storage`]: Thread-safe key-value store
//! - [`commands`]: Command parsing and dispatch
//! - [`connection`]: Client connection management
//! - [`server`]: Accept loop

pub mod commands;
pub mod connection;
pub mod protocol;
pub mod server;
pub mod storage;

// Re-export commonly used types for convenience
pub use commands::{Command, CommandHandler};
pub use connection::{handle_connection, ConnectionStats};
pub use protocol::{DecodeError, RespDecoder, RespValue};
pub use server::accept_loop;
pub use storage::StorageEngine;

/// The default port respkv listens on (same as Redis)
pub const DEFAULT_PORT: u16 = 6379;

/// The default host respkv binds to (all interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Version of respkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
