//! Command Registry
//!
//! Token -> command mapping. Several tokens may point at the same command
//! (aliases). Lookup is exact and case-sensitive; prefix matching belongs to
//! the completer, not the dispatcher.

use std::collections::HashMap;
use std::sync::Arc;

use super::Command;

/// Registry of available commands
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under its own name, replacing any existing entry
    pub fn register(&mut self, cmd: Arc<dyn Command>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    /// Register a command under its own name unless the token is taken
    ///
    /// Returns `false` when an existing entry was kept.
    pub fn register_if_absent(&mut self, cmd: Arc<dyn Command>) -> bool {
        if self.commands.contains_key(cmd.name()) {
            return false;
        }
        self.register(cmd);
        true
    }

    /// Make `alias` resolve to the command registered under `target`
    ///
    /// Returns `false` if `target` is unknown or `alias` is already taken.
    pub fn register_alias(&mut self, alias: impl Into<String>, target: &str) -> bool {
        let alias = alias.into();
        if self.commands.contains_key(&alias) {
            return false;
        }
        match self.commands.get(target) {
            Some(cmd) => {
                let cmd = Arc::clone(cmd);
                self.commands.insert(alias, cmd);
                true
            }
            None => false,
        }
    }

    /// Look up a command by exact token
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&Arc<dyn Command>> {
        self.commands.get(token)
    }

    /// Whether a token is registered
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.commands.contains_key(token)
    }

    /// All registered tokens, sorted
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens: Vec<String> = self.commands.keys().cloned().collect();
        tokens.sort();
        tokens
    }

    /// `(token, description)` pairs, sorted by token
    #[must_use]
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .commands
            .iter()
            .map(|(token, cmd)| (token.as_str(), cmd.description()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Number of registered tokens
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
