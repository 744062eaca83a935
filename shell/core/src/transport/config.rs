//! Transport Configuration
//!
//! Settings the transport manager needs, and the errors opening a transport
//! can produce.

use std::num::ParseIntError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default prompt written before each read
pub const DEFAULT_PROMPT: &str = "goal-shell> ";

/// Default bind address for the socket transport (all interfaces)
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

/// Errors opening a transport
#[derive(Debug, Error)]
pub enum TransportError {
    /// The configured port is not a valid port number
    #[error("Invalid port {value:?}: {source}")]
    InvalidPort {
        /// The configured value
        value: String,
        /// Parse failure
        #[source]
        source: ParseIntError,
    },

    /// Binding the listening socket failed
    #[error("Cannot open port {port} on {address}: {source}")]
    Bind {
        /// Bind address
        address: String,
        /// Port
        port: u16,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Parse a configured port string
///
/// # Errors
///
/// Returns [`TransportError::InvalidPort`] unless the trimmed value is an
/// integer in `0..=65535`.
pub fn parse_port(value: &str) -> Result<u16, TransportError> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|source| TransportError::InvalidPort {
            value: value.to_string(),
            source,
        })
}

/// Transport configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// TCP port as configured (None = local transport only)
    ///
    /// Kept as a string so an invalid value disables the socket transport
    /// instead of failing startup.
    pub port: Option<String>,

    /// Address the listening socket binds to
    pub bind_address: String,

    /// Prompt written before each read, on every transport
    pub prompt: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            port: None,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl TransportConfig {
    /// Configuration for the local transport only
    #[must_use]
    pub fn local_only() -> Self {
        Self::default()
    }

    /// Configuration with the socket transport on `port`
    #[must_use]
    pub fn with_port(port: impl Into<String>) -> Self {
        Self {
            port: Some(port.into()),
            ..Default::default()
        }
    }

    /// Resolve the configured port
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidPort`] if a port is configured but
    /// does not parse.
    pub fn socket_port(&self) -> Result<Option<u16>, TransportError> {
        self.port.as_deref().map(parse_port).transpose()
    }
}
