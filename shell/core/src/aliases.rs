//! Alias Resolution
//!
//! Builds the dispatch table a shell runs with: one goal command per
//! configured alias, merged with the built-in commands. The result is
//! complete before any session reads its first line and is never mutated
//! afterwards.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::commands::{register_builtins, CommandRegistry, GoalCommand};
use crate::executor::GoalExecutor;

/// Configured alias -> fully-qualified goal identifier
pub type AliasMap = BTreeMap<String, String>;

/// Build the command registry from configured aliases and built-ins
///
/// An absent alias map is the same as an empty one. Goal identifiers are
/// not validated here; a bad one fails when the executor runs it.
pub fn build_registry(
    aliases: Option<&AliasMap>,
    executor: Arc<dyn GoalExecutor>,
) -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    for (alias, goal) in aliases.into_iter().flatten() {
        tracing::debug!(alias = %alias, goal = %goal, "Registering goal alias");
        registry.register(Arc::new(GoalCommand::new(
            alias.clone(),
            goal.clone(),
            Arc::clone(&executor),
        )));
    }

    register_builtins(&mut registry);

    tracing::info!(
        commands = registry.len(),
        aliases = aliases.map_or(0, BTreeMap::len),
        "Command registry built"
    );
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::commands::{CommandEnv, CommandOutput};
    use crate::executor::{ExecutionError, GoalReport};
    use crate::session::SessionId;

    #[derive(Default)]
    struct Recording {
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    #[async_trait]
    impl GoalExecutor for Recording {
        fn name(&self) -> &str {
            "recording"
        }

        async fn execute(&self, goal: &str, args: &[String]) -> Result<GoalReport, ExecutionError> {
            self.calls
                .lock()
                .unwrap()
                .push((goal.to_string(), args.to_vec()));
            Ok(GoalReport {
                goal: goal.to_string(),
                output: String::new(),
                duration: Duration::ZERO,
            })
        }
    }

    #[test]
    fn test_absent_aliases_yield_builtins_only() {
        let registry = build_registry(None, Arc::new(Recording::default()));
        assert_eq!(registry.tokens(), vec!["?", "bye", "exit", "help", "quit"]);

        let empty = AliasMap::new();
        let registry = build_registry(Some(&empty), Arc::new(Recording::default()));
        assert_eq!(registry.len(), 5);
    }

    #[tokio::test]
    async fn test_alias_dispatches_to_goal() {
        let executor = Arc::new(Recording::default());
        let aliases = AliasMap::from([(
            "b".to_string(),
            "org.example:plugin:build".to_string(),
        )]);
        let registry = build_registry(Some(&aliases), executor.clone());

        let cmd = registry.get("b").expect("alias registered");
        let session_id = SessionId::new();
        let env = CommandEnv {
            session_id: &session_id,
            registry: &registry,
        };
        let output = cmd.execute("--flag x", &env).await.unwrap();
        assert!(matches!(output, CommandOutput::Text(_)));

        let calls = executor.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "org.example:plugin:build");
        assert_eq!(calls[0].1, vec!["--flag", "x"]);
    }

    #[test]
    fn test_alias_takes_precedence_over_builtin() {
        let aliases = AliasMap::from([("quit".to_string(), "org.example:plugin:stop".to_string())]);
        let registry = build_registry(Some(&aliases), Arc::new(Recording::default()));

        assert_eq!(
            registry.get("quit").unwrap().description(),
            "Run org.example:plugin:stop"
        );
        assert_eq!(registry.get("exit").unwrap().name(), "exit");
        assert_eq!(registry.get("bye").unwrap().name(), "exit");
    }
}
