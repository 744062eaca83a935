//! Process Goal Executor
//!
//! Runs goals by spawning the configured build tool:
//! `<program> <default_args..> <goal> <args..>`.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::traits::{ExecutionError, GoalExecutor, GoalReport};

/// Configuration for the process executor
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Build tool to spawn (default: `mvn`)
    pub program: String,
    /// Working directory for the build tool (None = inherit)
    pub working_dir: Option<PathBuf>,
    /// Arguments placed before the goal on every run (e.g. `-o`)
    pub default_args: Vec<String>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            program: "mvn".to_string(),
            working_dir: None,
            default_args: Vec::new(),
        }
    }
}

/// Executor that spawns the build tool once per goal
pub struct ProcessGoalExecutor {
    config: ExecutorConfig,
}

impl ProcessGoalExecutor {
    /// Create an executor from configuration
    #[must_use]
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    #[must_use]
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Arguments passed to the program for one goal run
    #[must_use]
    pub fn command_args(&self, goal: &str, args: &[String]) -> Vec<String> {
        let mut all = Vec::with_capacity(self.config.default_args.len() + args.len() + 1);
        all.extend(self.config.default_args.iter().cloned());
        all.push(goal.to_string());
        all.extend(args.iter().cloned());
        all
    }
}

#[async_trait]
impl GoalExecutor for ProcessGoalExecutor {
    fn name(&self) -> &str {
        &self.config.program
    }

    async fn execute(&self, goal: &str, args: &[String]) -> Result<GoalReport, ExecutionError> {
        if goal.trim().is_empty() || goal.chars().any(char::is_whitespace) {
            return Err(ExecutionError::InvalidGoal(goal.to_string()));
        }

        let started = Instant::now();
        let mut cmd = tokio::process::Command::new(&self.config.program);
        cmd.args(self.command_args(goal, args))
            .stdin(Stdio::null())
            .kill_on_drop(true);
        if let Some(dir) = &self.config.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.map_err(|source| ExecutionError::Spawn {
            program: self.config.program.clone(),
            source,
        })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        tracing::debug!(
            goal = goal,
            status = %output.status,
            elapsed_ms = started.elapsed().as_millis(),
            "Build tool exited"
        );

        if !output.status.success() {
            return Err(ExecutionError::GoalFailed {
                goal: goal.to_string(),
                status: output.status.to_string(),
                output: text,
            });
        }

        Ok(GoalReport {
            goal: goal.to_string(),
            output: text,
            duration: started.elapsed(),
        })
    }
}
