//! Command Dispatch
//!
//! Every operator-facing command implements the [`Command`] trait and is
//! registered under one or more tokens in a [`CommandRegistry`]. The session
//! loop resolves the first word of a line to a command and calls
//! [`Command::execute`] with the rest of the line.
//!
//! # Available Commands
//!
//! - **Goal commands**: one per configured alias, delegate to a [`GoalExecutor`]
//! - **help** / **?**: list the known tokens, or describe one with `help <token>`
//! - **exit** / **quit** / **bye**: end the current session
//!
//! [`GoalExecutor`]: crate::executor::GoalExecutor

mod builtin;
mod goal;
mod registry;

pub use builtin::{register_builtins, ExitCommand, HelpCommand};
pub use goal::GoalCommand;
pub use registry::CommandRegistry;

use async_trait::async_trait;
use thiserror::Error;

use crate::executor::ExecutionError;
use crate::session::SessionId;

/// Output produced by a command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutput {
    /// Text to write back to the session
    Text(String),
    /// Command produced no visible output
    None,
    /// Signal to end the current session
    Exit,
}

/// Read-only context handed to every command invocation
pub struct CommandEnv<'a> {
    /// Session the command runs in
    pub session_id: &'a SessionId,
    /// The registry the command was resolved from
    pub registry: &'a CommandRegistry,
}

/// Errors a command can report back to the session
#[derive(Debug, Error)]
pub enum CommandError {
    /// The underlying goal execution failed
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// The command was given arguments it cannot use
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl CommandError {
    /// Captured tool output attached to the failure, if any
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Execution(e) => e.output(),
            Self::InvalidArguments(_) => None,
        }
    }
}

/// A single executable command
#[async_trait]
pub trait Command: Send + Sync {
    /// The primary token the operator types
    fn name(&self) -> &str;

    /// One-line description for `help`
    fn description(&self) -> &str;

    /// Execute the command with the argument remainder of the line
    async fn execute(
        &self,
        args: &str,
        env: &CommandEnv<'_>,
    ) -> Result<CommandOutput, CommandError>;
}
