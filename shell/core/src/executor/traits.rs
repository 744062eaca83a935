//! Goal Executor Traits
//!
//! Trait definitions for goal executors. This abstraction keeps the session
//! layer independent of the build tool that runs goals, and lets tests swap
//! in recording executors.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Result of a successful goal run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoalReport {
    /// Goal identifier that ran
    pub goal: String,
    /// Combined output captured from the run
    pub output: String,
    /// Wall-clock time the run took
    pub duration: Duration,
}

/// Errors from goal execution
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The build tool could not be started
    #[error("Failed to start {program}: {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The goal ran and reported failure
    #[error("Goal {goal} failed ({status})")]
    GoalFailed {
        /// Goal identifier that failed
        goal: String,
        /// Exit status as reported by the OS
        status: String,
        /// Combined output captured from the run
        output: String,
    },

    /// The goal identifier cannot be passed to the build tool
    #[error("Invalid goal identifier: {0:?}")]
    InvalidGoal(String),
}

impl ExecutionError {
    /// Captured tool output, for failures that have any
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::GoalFailed { output, .. } if !output.trim().is_empty() => Some(output),
            _ => None,
        }
    }
}

/// Goal executor trait
///
/// Implement this trait to run goals with a different build tool.
#[async_trait]
pub trait GoalExecutor: Send + Sync {
    /// Executor name (for logging)
    fn name(&self) -> &str;

    /// Run `goal` with `args`
    ///
    /// A failure is reported to the session that asked for it; it never ends
    /// that session.
    async fn execute(&self, goal: &str, args: &[String]) -> Result<GoalReport, ExecutionError>;
}
