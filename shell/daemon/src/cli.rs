//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

use shell_core::config::{parse_alias_spec, ConfigError, ConfigOverrides};

/// Interactive goal shell on the local terminal and, optionally, a TCP port
#[derive(Debug, Parser)]
#[command(name = "goal-shell", version, about)]
pub struct Args {
    /// Config file (default: $XDG_CONFIG_HOME/goal-shell/config.toml)
    #[arg(short, long, env = "GOAL_SHELL_CONFIG")]
    pub config: Option<PathBuf>,

    /// TCP port for socket shell access
    #[arg(short, long)]
    pub port: Option<String>,

    /// Address the socket binds to
    #[arg(long)]
    pub bind: Option<String>,

    /// Prompt string
    #[arg(long)]
    pub prompt: Option<String>,

    /// Build tool to run goals with
    #[arg(long)]
    pub program: Option<String>,

    /// Goal alias as name=goal (repeatable)
    #[arg(short, long = "alias", value_name = "NAME=GOAL")]
    pub aliases: Vec<String>,
}

impl Args {
    /// Command-line values as config overrides
    pub fn overrides(&self) -> Result<ConfigOverrides, ConfigError> {
        let aliases = self
            .aliases
            .iter()
            .map(|spec| parse_alias_spec(spec))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ConfigOverrides {
            port: self.port.clone(),
            bind_address: self.bind.clone(),
            prompt: self.prompt.clone(),
            program: self.program.clone(),
            aliases,
        })
    }
}
