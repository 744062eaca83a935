//! Goal Command
//!
//! A command bound to one fully-qualified goal identifier. Invoking it hands
//! the goal and the whitespace-split argument remainder to the executor.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Command, CommandEnv, CommandError, CommandOutput};
use crate::executor::GoalExecutor;

/// Runs a goal through the configured executor
pub struct GoalCommand {
    token: String,
    goal: String,
    description: String,
    executor: Arc<dyn GoalExecutor>,
}

impl GoalCommand {
    /// Create a command that runs `goal` when `token` is typed
    pub fn new(
        token: impl Into<String>,
        goal: impl Into<String>,
        executor: Arc<dyn GoalExecutor>,
    ) -> Self {
        let goal = goal.into();
        Self {
            token: token.into(),
            description: format!("Run {goal}"),
            goal,
            executor,
        }
    }

    /// The goal identifier this command resolves to
    #[must_use]
    pub fn goal(&self) -> &str {
        &self.goal
    }
}

#[async_trait]
impl Command for GoalCommand {
    fn name(&self) -> &str {
        &self.token
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn execute(
        &self,
        args: &str,
        env: &CommandEnv<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let args: Vec<String> = args.split_whitespace().map(str::to_string).collect();

        tracing::info!(
            session_id = %env.session_id,
            goal = %self.goal,
            executor = self.executor.name(),
            args = ?args,
            "Executing goal"
        );

        let report = self.executor.execute(&self.goal, &args).await?;

        let mut out = report.output.trim_end().to_string();
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!(
            "Goal {} completed in {}ms",
            report.goal,
            report.duration.as_millis()
        ));
        Ok(CommandOutput::Text(out))
    }
}
