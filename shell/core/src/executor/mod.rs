//! Goal Execution
//!
//! Abstracted access to the build tool that actually runs goals. The shell
//! core only ever talks to a [`GoalExecutor`]; what runs underneath is an
//! implementation detail.
//!
//! # Available Executors
//!
//! - **Process**: spawns the configured build tool (default: `mvn`)
//!
//! # Usage
//!
//! ```ignore
//! use shell_core::executor::{ExecutorConfig, GoalExecutor, ProcessGoalExecutor};
//!
//! let executor = ProcessGoalExecutor::new(ExecutorConfig::default());
//! let report = executor.execute("org.example:plugin:build", &["-o".into()]).await?;
//! ```

mod process;
mod traits;

pub use process::{ExecutorConfig, ProcessGoalExecutor};
pub use traits::{ExecutionError, GoalExecutor, GoalReport};
