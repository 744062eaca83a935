//! goal-shell
//!
//! Interactive shell for running build goals. Reads commands from the local
//! terminal and, when a port is configured, from one TCP client at a time.
//!
//! # Usage
//!
//! ```bash
//! # Local terminal only
//! goal-shell -a b=org.example:plugin:build
//!
//! # Also accept socket sessions on port 4330
//! goal-shell --port 4330
//!
//! # With verbose logging
//! RUST_LOG=debug goal-shell
//! ```
//!
//! # Environment Variables
//!
//! - `GOAL_SHELL_CONFIG`: Config file path
//! - `GOAL_SHELL_PORT`: TCP port for socket access
//! - `GOAL_SHELL_BIND`: Bind address (default: 0.0.0.0)
//! - `GOAL_SHELL_PROMPT`: Prompt string
//! - `GOAL_SHELL_PROGRAM`: Build tool (default: mvn)
//! - `RUST_LOG`: Log level (trace, debug, info, warn, error)
//!
//! # Shutdown
//!
//! The shell exits when the local session ends (`exit` or end-of-input).
//! Socket clients cannot stop the process.

mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tokio::signal;
use tracing::{info, warn};

use shell_core::{
    build_registry, load_config, GoalExecutor, LocalOutcome, ProcessGoalExecutor,
    TransportManager,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout belongs to the local session.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("goal_shell=info".parse()?)
                .add_directive("shell_core=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args = cli::Args::parse();
    let overrides = args.overrides().context("Invalid command-line alias")?;

    let (mut config, source) =
        load_config(args.config.as_deref()).context("Failed to load configuration")?;
    overrides.apply(&mut config);
    info!(source = ?source, "Configuration loaded");

    let executor: Arc<dyn GoalExecutor> =
        Arc::new(ProcessGoalExecutor::new(config.executor.clone()));
    let registry = Arc::new(build_registry(Some(&config.aliases), executor));
    let manager = TransportManager::new(registry, config.transport_config());

    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();

    tokio::select! {
        summary = manager.run(reader, writer) => {
            if let Some(socket) = &summary.socket {
                info!(
                    addr = %socket.local_addr,
                    sessions = socket.sessions_served,
                    "Socket transport closed"
                );
            }
            if !matches!(summary.local, LocalOutcome::Finished(_)) {
                warn!(local = ?summary.local, "Local session did not end cleanly");
            }
        }
        result = signal::ctrl_c() => {
            result.context("Failed to listen for Ctrl+C")?;
            info!("Received Ctrl+C, shutting down");
            // A blocked stdin read cannot be cancelled, so leave without
            // waiting for the runtime to drain it.
            std::process::exit(130);
        }
    }

    info!("goal-shell stopped");
    Ok(())
}
