//! Command Parsing
//!
//! A request is a single decoded string value. Its bytes are split on runs of
//! ASCII whitespace: the first token names the command, the rest are
//! positional arguments. There is no quoting or escaping.
//!
//! Tokens are sliced out of the request buffer as-is, so arguments are
//! binary-safe. Only the command name is lower-cased.

use crate::protocol::RespValue;
use bytes::Bytes;

/// A parsed client command.
///
/// Built fresh for each request and discarded after dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Lower-cased command name
    pub name: String,
    /// Positional arguments, in order, byte-for-byte as received
    pub args: Vec<Bytes>,
}

/// Space, tab, LF, VT, FF and CR.
fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

impl Command {
    /// Parses a command from a decoded value.
    ///
    /// Returns `None` when the value holds no tokens at all.
    ///
    /// # Example
    ///
    /// ```
    /// use respkv::commands::Command;
    /// use respkv::protocol::RespValue;
    ///
    /// let cmd = Command::from_value(&RespValue::bulk_string("SET  name\tAriz")).unwrap();
    /// assert_eq!(cmd.name, "set");
    /// assert_eq!(cmd.args, vec!["name", "Ariz"]);
    /// ```
    pub fn from_value(value: &RespValue) -> Option<Self> {
        Self::parse(&value.to_bytes())
    }

    /// Parses a command from the raw request bytes.
    pub fn parse(data: &Bytes) -> Option<Self> {
        let mut tokens = data
            .split(|b| is_separator(*b))
            .filter(|token| !token.is_empty());

        let name = String::from_utf8_lossy(&tokens.next()?.to_ascii_lowercase()).into_owned();
        let args = tokens.map(|token| data.slice_ref(token)).collect();

        Some(Self { name, args })
    }

    /// Returns the argument at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&Bytes> {
        self.args.get(index)
    }
}
