//! Session Loop
//!
//! A session is one interactive read/dispatch loop bound to one console.
//! It ends when the input reaches end-of-stream or a command asks to exit;
//! a failing or unknown command never ends it.
//!
//! # Design Philosophy
//!
//! The loop owns no transport resources. Closing sockets or signalling
//! shutdown is the job of whoever created the console (see
//! [`crate::transport`]).

use std::fmt;
use std::io;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::commands::{CommandEnv, CommandOutput, CommandRegistry};
use crate::console::{CommandCompleter, LineConsole};

/// Greeting written when a session starts
pub const GREETING: &str = "Waiting for commands";

/// Unique session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a new random session ID
    #[must_use]
    pub fn new() -> Self {
        Self(format!("sess-{}", uuid::Uuid::new_v4()))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a session loop returned
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// Input reached end-of-stream (peer disconnect, Ctrl-D)
    EndOfInput,
    /// A command asked to end the session
    Exit,
}

/// Counters for one session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Lines read, blank ones included
    pub lines_read: u64,
    /// Commands that were resolved and executed
    pub commands_executed: u64,
    /// Executed commands that reported failure
    pub commands_failed: u64,
    /// Lines whose command word was not registered
    pub unknown_commands: u64,
}

/// Split a line into command word and argument remainder
///
/// Returns `None` for blank lines.
#[must_use]
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (trimmed, ""),
    })
}

/// One interactive session
pub struct Session<R, W> {
    id: SessionId,
    console: LineConsole<R, W>,
    registry: Arc<CommandRegistry>,
    stats: SessionStats,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Create a session over `console` dispatching through `registry`
    pub fn new(registry: Arc<CommandRegistry>, mut console: LineConsole<R, W>) -> Self {
        console.set_completer(CommandCompleter::new(registry.tokens()));
        Self {
            id: SessionId::new(),
            console,
            registry,
            stats: SessionStats::default(),
        }
    }

    /// Session identifier
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Counters collected so far
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Consume the session, returning its console
    pub fn into_console(self) -> LineConsole<R, W> {
        self.console
    }

    /// Run the loop until end-of-stream or an exit command
    ///
    /// # Errors
    ///
    /// Returns the I/O error if reading from or writing to the console fails.
    pub async fn run(&mut self) -> io::Result<SessionEnd> {
        tracing::debug!(session_id = %self.id, "Session started");
        self.console.write_info(GREETING).await?;

        while let Some(line) = self.console.read_line().await? {
            self.stats.lines_read += 1;
            let Some((word, args)) = parse_line(&line) else {
                continue;
            };

            if self.dispatch(word, args).await? == Some(SessionEnd::Exit) {
                tracing::debug!(session_id = %self.id, stats = ?self.stats, "Session exited");
                return Ok(SessionEnd::Exit);
            }
        }

        tracing::debug!(session_id = %self.id, stats = ?self.stats, "Session input ended");
        Ok(SessionEnd::EndOfInput)
    }

    async fn dispatch(&mut self, word: &str, args: &str) -> io::Result<Option<SessionEnd>> {
        let Some(cmd) = self.registry.get(word).cloned() else {
            self.stats.unknown_commands += 1;
            tracing::debug!(session_id = %self.id, command = word, "Unknown command");
            self.console
                .write_error(&format!("Command not recognized: {word}"))
                .await?;
            let candidates = self.console.completer().complete(word).join(" ");
            if !candidates.is_empty() {
                self.console
                    .write_info(&format!("Possible commands: {candidates}"))
                    .await?;
            }
            return Ok(None);
        };

        self.stats.commands_executed += 1;
        let env = CommandEnv {
            session_id: &self.id,
            registry: &self.registry,
        };

        match cmd.execute(args, &env).await {
            Ok(CommandOutput::Text(text)) => self.console.write_info(&text).await?,
            Ok(CommandOutput::None) => {}
            Ok(CommandOutput::Exit) => return Ok(Some(SessionEnd::Exit)),
            Err(e) => {
                self.stats.commands_failed += 1;
                tracing::warn!(session_id = %self.id, command = word, error = %e, "Command failed");
                if let Some(output) = e.output() {
                    self.console.write_info(output.trim_end()).await?;
                }
                self.console
                    .write_error(&format!("Command failed: {e}"))
                    .await?;
            }
        }
        Ok(None)
    }
}
