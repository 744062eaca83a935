//! Configuration
//!
//! Loads shell configuration from a TOML file, then layers environment
//! variables and command-line overrides on top.
//!
//! # Precedence (lowest to highest)
//!
//! 1. Built-in defaults
//! 2. Config file (`$XDG_CONFIG_HOME/goal-shell/config.toml` or `--config`)
//! 3. Environment variables
//! 4. Command-line overrides
//!
//! # Example
//!
//! ```toml
//! prompt = "mvn> "
//! port = "4330"
//! bind_address = "127.0.0.1"
//!
//! [aliases]
//! b = "org.example:plugin:build"
//! ci = "org.apache.maven.plugins:maven-clean-plugin:clean"
//!
//! [executor]
//! program = "mvn"
//! default_args = ["-o"]
//! ```
//!
//! # Environment Variables
//!
//! - `GOAL_SHELL_PORT`: TCP port for socket access
//! - `GOAL_SHELL_BIND`: Bind address for the socket
//! - `GOAL_SHELL_PROMPT`: Prompt string
//! - `GOAL_SHELL_PROGRAM`: Build tool to spawn

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::aliases::AliasMap;
use crate::executor::ExecutorConfig;
use crate::transport::config::{TransportConfig, DEFAULT_BIND_ADDRESS, DEFAULT_PROMPT};

/// Environment variable for the socket port
pub const ENV_PORT: &str = "GOAL_SHELL_PORT";
/// Environment variable for the bind address
pub const ENV_BIND: &str = "GOAL_SHELL_BIND";
/// Environment variable for the prompt
pub const ENV_PROMPT: &str = "GOAL_SHELL_PROMPT";
/// Environment variable for the build tool
pub const ENV_PROGRAM: &str = "GOAL_SHELL_PROGRAM";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// The config file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// File path
        path: PathBuf,
        /// TOML error
        #[source]
        source: toml::de::Error,
    },

    /// An alias override is not of the form `name=goal`
    #[error("Invalid alias {0:?}, expected name=goal")]
    InvalidAlias(String),
}

/// Where the loaded configuration came from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    /// No file; built-in defaults
    Defaults,
    /// Parsed from this file
    File(PathBuf),
}

/// Shell configuration file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Prompt written before each read
    pub prompt: String,

    /// TCP port for socket access (None = local only)
    ///
    /// Accepts either `port = 4330` or `port = "4330"`; validated when the
    /// socket transport starts.
    #[serde(deserialize_with = "deserialize_port")]
    pub port: Option<String>,

    /// Bind address for the socket transport
    pub bind_address: String,

    /// Alias -> fully-qualified goal identifier
    pub aliases: AliasMap,

    /// Build tool settings
    pub executor: ExecutorConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            port: None,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            aliases: AliasMap::new(),
            executor: ExecutorConfig::default(),
        }
    }
}

impl ShellConfig {
    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text does not match the schema.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT) {
            self.port = Some(port);
        }
        if let Some(bind) = lookup(ENV_BIND) {
            self.bind_address = bind;
        }
        if let Some(prompt) = lookup(ENV_PROMPT) {
            self.prompt = prompt;
        }
        if let Some(program) = lookup(ENV_PROGRAM) {
            self.executor.program = program;
        }
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Transport settings derived from this configuration
    #[must_use]
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            port: self.port.clone(),
            bind_address: self.bind_address.clone(),
            prompt: self.prompt.clone(),
        }
    }
}

/// Command-line overrides, applied last
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Port override
    pub port: Option<String>,
    /// Bind address override
    pub bind_address: Option<String>,
    /// Prompt override
    pub prompt: Option<String>,
    /// Build tool override
    pub program: Option<String>,
    /// Extra aliases, added to (or replacing) the configured ones
    pub aliases: Vec<(String, String)>,
}

impl ConfigOverrides {
    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut ShellConfig) {
        if let Some(ref port) = self.port {
            config.port = Some(port.clone());
        }
        if let Some(ref bind) = self.bind_address {
            config.bind_address = bind.clone();
        }
        if let Some(ref prompt) = self.prompt {
            config.prompt = prompt.clone();
        }
        if let Some(ref program) = self.program {
            config.executor.program = program.clone();
        }
        for (alias, goal) in &self.aliases {
            config.aliases.insert(alias.clone(), goal.clone());
        }
    }
}

/// Parse an alias given as `name=goal`
///
/// # Errors
///
/// Returns [`ConfigError::InvalidAlias`] if either side is empty or there is
/// no `=`.
pub fn parse_alias_spec(spec: &str) -> Result<(String, String), ConfigError> {
    match spec.split_once('=') {
        Some((name, goal)) if !name.trim().is_empty() && !goal.trim().is_empty() => {
            Ok((name.trim().to_string(), goal.trim().to_string()))
        }
        _ => Err(ConfigError::InvalidAlias(spec.to_string())),
    }
}

/// Default config file path
///
/// `$XDG_CONFIG_HOME/goal-shell/config.toml`, or `None` if the platform has
/// no config directory.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("goal-shell").join("config.toml"))
}

/// Load configuration from a specific file (no env overrides)
///
/// # Errors
///
/// Returns [`ConfigError`] if the file is missing, unreadable, or invalid.
pub fn load_config_from_path(path: &Path) -> Result<ShellConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ShellConfig::from_toml(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load configuration and apply environment overrides
///
/// With an explicit `path` the file must exist. Without one, the default
/// path is used if present and built-in defaults otherwise.
///
/// # Errors
///
/// Returns [`ConfigError`] if a file that should be read cannot be.
pub fn load_config(path: Option<&Path>) -> Result<(ShellConfig, ConfigSource), ConfigError> {
    let (mut config, source) = match path {
        Some(path) => (load_config_from_path(path)?, ConfigSource::File(path.to_path_buf())),
        None => match default_config_path().filter(|p| p.exists()) {
            Some(default) => (
                load_config_from_path(&default)?,
                ConfigSource::File(default),
            ),
            None => (ShellConfig::default(), ConfigSource::Defaults),
        },
    };

    config.apply_env();
    tracing::debug!(source = ?source, "Configuration loaded");
    Ok((config, source))
}

fn deserialize_port<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPort {
        Text(String),
        Number(i64),
    }

    Ok(Option::<RawPort>::deserialize(deserializer)?.map(|raw| match raw {
        RawPort::Text(text) => text,
        RawPort::Number(n) => n.to_string(),
    }))
}
