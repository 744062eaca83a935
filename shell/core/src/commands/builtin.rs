//! Built-in Commands
//!
//! Commands every shell carries regardless of configuration.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Command, CommandEnv, CommandError, CommandOutput, CommandRegistry};

/// Lists every registered token with its description
///
/// With an argument, describes that one command.
pub struct HelpCommand;

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn description(&self) -> &str {
        "List available commands"
    }

    async fn execute(
        &self,
        args: &str,
        env: &CommandEnv<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let topic = args.trim();
        if !topic.is_empty() {
            return match env.registry.get(topic) {
                Some(cmd) => Ok(CommandOutput::Text(format!("{topic}  {}", cmd.description()))),
                None => Err(CommandError::InvalidArguments(format!(
                    "no command named {topic}"
                ))),
            };
        }

        let entries = env.registry.entries();
        let width = entries.iter().map(|(token, _)| token.len()).max().unwrap_or(0);

        let mut out = String::from("Available commands:");
        for (token, description) in entries {
            out.push_str(&format!("\n  {token:<width$}  {description}"));
        }
        Ok(CommandOutput::Text(out))
    }
}

/// Ends the current session
pub struct ExitCommand;

#[async_trait]
impl Command for ExitCommand {
    fn name(&self) -> &str {
        "exit"
    }

    fn description(&self) -> &str {
        "End this session"
    }

    async fn execute(
        &self,
        _args: &str,
        _env: &CommandEnv<'_>,
    ) -> Result<CommandOutput, CommandError> {
        Ok(CommandOutput::Exit)
    }
}

/// Register the built-in commands and their aliases
///
/// Tokens already present in the registry are left alone, so user-defined
/// aliases take precedence over built-ins.
pub fn register_builtins(registry: &mut CommandRegistry) {
    let builtins: [(Arc<dyn Command>, &[&str]); 2] = [
        (Arc::new(HelpCommand), &["?"]),
        (Arc::new(ExitCommand), &["quit", "bye"]),
    ];

    for (cmd, aliases) in builtins {
        let name = cmd.name().to_string();
        if !registry.register_if_absent(cmd) {
            tracing::warn!(token = %name, "Built-in command shadowed by configured alias");
            continue;
        }
        for alias in aliases {
            if !registry.register_alias(*alias, &name) {
                tracing::warn!(token = %alias, "Built-in alias shadowed by configured alias");
            }
        }
    }
}
