//! Shell Core - Session Orchestration for goal-shell
//!
//! This crate provides the session-orchestration layer of goal-shell: an
//! interactive command shell whose commands invoke build goals. Operators
//! reach it from the local terminal and, optionally, over a plain TCP port.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                       Transport Manager                          │
//! │  ┌─────────────────────────┐      ┌───────────────────────────┐  │
//! │  │      Local track        │      │       Socket track        │  │
//! │  │  (spawned task, stdin)  │      │ (accept loop, 1 session   │  │
//! │  │                         │      │   at a time)              │  │
//! │  └───────────┬─────────────┘      └─────────────┬─────────────┘  │
//! │              │  finished ──► ShutdownTrigger ──►│ listener closed│
//! │              │                                  │                │
//! │              └──────────────┬───────────────────┘                │
//! │                        Session Loop                              │
//! │                             │                                    │
//! │                   CommandRegistry (Arc, read-only)               │
//! │              ┌──────────────┼──────────────┐                     │
//! │         GoalCommand     HelpCommand    ExitCommand               │
//! │              │                                                   │
//! │         GoalExecutor (mvn, ...)                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Overview
//!
//! - [`aliases`]: Builds the command registry from configured aliases
//! - [`commands`]: Command trait, registry, built-in and goal commands
//! - [`config`]: TOML/env configuration loading
//! - [`console`]: Line-oriented console over any async reader/writer
//! - [`executor`]: Goal execution abstraction and process-backed executor
//! - [`session`]: The per-connection read/dispatch loop
//! - [`transport`]: Local + TCP transports and coordinated shutdown

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod aliases;
pub mod commands;
pub mod config;
pub mod console;
pub mod executor;
pub mod session;
pub mod transport;

// Re-exports for convenience
pub use aliases::{build_registry, AliasMap};
pub use commands::{
    register_builtins, Command, CommandEnv, CommandError, CommandOutput, CommandRegistry,
    ExitCommand, GoalCommand, HelpCommand,
};
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigOverrides,
    ConfigSource, ShellConfig,
};
pub use console::{CommandCompleter, LineConsole};
pub use executor::{
    ExecutionError, ExecutorConfig, GoalExecutor, GoalReport, ProcessGoalExecutor,
};
pub use session::{Session, SessionEnd, SessionId, SessionStats};
pub use transport::{
    shutdown_channel, LocalOutcome, ShutdownListener, ShutdownSummary, ShutdownTrigger,
    SocketReport, SocketTrack, TransportConfig, TransportError, TransportManager,
};
