//! Transport Layer
//!
//! Delivers sessions over two transports:
//! - Local: the operator's terminal, always on, run on a spawned task
//! - Socket: optional plain TCP listener, one session at a time
//!
//! # Lifecycle
//!
//! ```text
//!   local task                         accept loop (caller's task)
//!   ──────────                         ───────────────────────────
//!   Session on stdin/stdout            bind port ──► accept ◄──┐
//!          │                                 │         │       │
//!          ▼                                 │    Session on   │
//!   ShutdownTrigger::trigger() ──────────────┘    connection ──┘
//!                                   (wakes a pending accept,
//!                                    loop exits, listener dropped)
//! ```
//!
//! The local track is the only thing that fires the shutdown signal. An
//! in-flight socket session is allowed to finish; the accept loop just never
//! starts another one.
//!
//! # Security
//!
//! There is none: anyone who can reach the port can run commands. Bind to
//! `127.0.0.1` unless remote access is intended.

pub mod config;
pub mod manager;
pub mod shutdown;
pub mod socket;

// Re-exports for convenience
pub use config::{parse_port, TransportConfig, TransportError};
pub use manager::{LocalOutcome, ShutdownSummary, TransportManager};
pub use shutdown::{shutdown_channel, ShutdownListener, ShutdownTrigger};
pub use socket::{SocketReport, SocketTrack};
