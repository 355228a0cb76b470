//! Command Handler Module
//!
//! This module executes parsed commands against the storage engine and builds
//! the RESP reply for each one.
//!
//! ## Supported Commands
//!
//! - `PING` - Replies `+PONG`; arguments are ignored
//! - `ECHO message` - Replies with `message` as a bulk string
//! - `SET key value` - Stores `value` under `key`, replies `+OK`
//! - `GET key` - Replies with the stored value as a simple string, or an
//!   empty simple string when the key is absent
//!
//! Anything else replies `-ERR unknown command '<name>'` and the connection
//! stays open.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CommandHandler                          │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐     │
//! │  │   parse()   │───>│  dispatch() │───>│  cmd_*()    │     │
//! │  └─────────────┘    └─────────────┘    └─────────────┘     │
//! │                                               │             │
//! │                                               ▼             │
//! │                                      StorageEngine          │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use crate::commands::command::Command;
use crate::protocol::RespValue;
use crate::storage::StorageEngine;
use std::sync::Arc;
use tracing::trace;

/// Handles commands by dispatching them to the appropriate handlers.
#[derive(Debug, Clone)]
pub struct CommandHandler {
    storage: Arc<StorageEngine>,
}

impl CommandHandler {
    /// Creates a new command handler with the given storage engine.
    pub fn new(storage: Arc<StorageEngine>) -> Self {
        Self { storage }
    }

    /// Executes a request and returns the response.
    ///
    /// # Arguments
    ///
    /// * `request` - The decoded RESP value carrying the command text
    ///
    /// # Returns
    ///
    /// The RESP response to send back to the client.
    pub fn execute(&self, request: &RespValue) -> RespValue {
        match Command::from_value(request) {
            Some(command) => self.dispatch(&command),
            None => RespValue::error("ERR empty command"),
        }
    }

    /// Dispatches a command to its handler.
    fn dispatch(&self, cmd: &Command) -> RespValue {
        trace!(command = %cmd.name, args = cmd.args.len(), "Dispatching command");

        match cmd.name.as_str() {
            "ping" => self.cmd_ping(cmd),
            "echo" => self.cmd_echo(cmd),
            "set" => self.cmd_set(cmd),
            "get" => self.cmd_get(cmd),
            _ => RespValue::error(format!("ERR unknown command '{}'", cmd.name)),
        }
    }

    fn wrong_arity(cmd: &Command) -> RespValue {
        RespValue::error(format!(
            "ERR wrong number of arguments for '{}' command",
            cmd.name
        ))
    }

    /// PING
    fn cmd_ping(&self, _cmd: &Command) -> RespValue {
        RespValue::pong()
    }

    /// ECHO message
    fn cmd_echo(&self, cmd: &Command) -> RespValue {
        match cmd.args.as_slice() {
            [message] => RespValue::bulk_string(message.clone()),
            _ => Self::wrong_arity(cmd),
        }
    }

    /// SET key value
    fn cmd_set(&self, cmd: &Command) -> RespValue {
        match cmd.args.as_slice() {
            [key, value] => {
                self.storage.set(key.clone(), value.clone());
                RespValue::ok()
            }
            _ => Self::wrong_arity(cmd),
        }
    }

    /// GET key
    ///
    /// Values are whitespace-free tokens, so simple-string framing is safe.
    fn cmd_get(&self, cmd: &Command) -> RespValue {
        match cmd.args.as_slice() {
            [key] => {
                let value = self.storage.get(key).unwrap_or_default();
                RespValue::simple_string(value)
            }
            _ => Self::wrong_arity(cmd),
        }
    }
}
