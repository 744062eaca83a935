//! Transport Manager
//!
//! Owns the local track and the optional socket track and ties their
//! lifecycles together through a [`ShutdownTrigger`]:
//!
//! - Local track (spawned task): one session on the operator's terminal.
//!   When it finishes, for whatever reason, it fires the trigger.
//! - Socket track (caller's task): bind, then accept/serve connections one
//!   at a time until the trigger fires.
//!
//! [`TransportManager::run`] returns once the local session has finished,
//! the accept loop has closed the listener, and any socket session that was
//! running at that point has ended.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::Instrument;

use super::config::TransportConfig;
use super::shutdown::{shutdown_channel, ShutdownTrigger};
use super::socket::{SocketReport, SocketTrack};
use crate::commands::CommandRegistry;
use crate::console::LineConsole;
use crate::session::{Session, SessionEnd};

/// How the local track finished
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalOutcome {
    /// The local session ended normally
    Finished(SessionEnd),
    /// The local streams failed mid-session
    Faulted,
    /// The local task panicked or was cancelled
    Aborted,
}

/// Result of a full [`TransportManager::run`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShutdownSummary {
    /// How the local track finished
    pub local: LocalOutcome,
    /// What the socket track did (None = it never started)
    pub socket: Option<SocketReport>,
}

/// Coordinates the local and socket transports
pub struct TransportManager {
    registry: Arc<CommandRegistry>,
    config: TransportConfig,
}

impl TransportManager {
    /// Create a manager serving `registry` with `config`
    #[must_use]
    pub fn new(registry: Arc<CommandRegistry>, config: TransportConfig) -> Self {
        Self { registry, config }
    }

    /// Transport configuration
    #[must_use]
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Run the shell until the local session finishes
    ///
    /// Starts the local session on `reader`/`writer`, then opens the socket
    /// transport if a port is configured. An invalid port or a failed bind
    /// is logged and leaves only the local transport running.
    pub async fn run<R, W>(&self, reader: R, writer: W) -> ShutdownSummary
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        self.drive(None, reader, writer).await
    }

    /// Like [`run`](Self::run), with an already-bound socket track
    pub async fn run_with_socket<R, W>(
        &self,
        socket: SocketTrack,
        reader: R,
        writer: W,
    ) -> ShutdownSummary
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        self.drive(Some(socket), reader, writer).await
    }

    /// Bind the socket track from configuration
    ///
    /// Returns `None` when no port is configured, the port is invalid, or
    /// the bind fails. The last two are logged as errors.
    pub async fn open_socket_track(&self) -> Option<SocketTrack> {
        let port = match self.config.socket_port() {
            Ok(Some(port)) => port,
            Ok(None) => {
                tracing::debug!("No port configured, socket transport disabled");
                return None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Invalid port configuration, socket transport disabled");
                return None;
            }
        };

        match SocketTrack::bind(&self.config.bind_address, port).await {
            Ok(track) => {
                tracing::info!(addr = %track.local_addr(), "Opened port for socket shell access");
                Some(track)
            }
            Err(e) => {
                tracing::error!(error = %e, "Socket transport disabled");
                None
            }
        }
    }

    async fn drive<R, W>(&self, socket: Option<SocketTrack>, reader: R, writer: W) -> ShutdownSummary
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (trigger, shutdown) = shutdown_channel();

        let local = tokio::spawn(
            local_track(
                Arc::clone(&self.registry),
                LineConsole::new(reader, writer, self.config.prompt.clone()),
                trigger,
            )
            .instrument(tracing::info_span!("local")),
        );

        let socket = match socket {
            Some(track) => Some(track),
            None => self.open_socket_track().await,
        };

        let socket_report = match socket {
            Some(track) => Some(
                track
                    .serve(Arc::clone(&self.registry), &self.config.prompt, shutdown)
                    .await,
            ),
            None => None,
        };

        let local = match local.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Local session task aborted");
                LocalOutcome::Aborted
            }
        };

        tracing::info!(local = ?local, "Shell stopped");
        ShutdownSummary {
            local,
            socket: socket_report,
        }
    }
}

/// Run the local session, then fire the shutdown signal
async fn local_track<R, W>(
    registry: Arc<CommandRegistry>,
    console: LineConsole<R, W>,
    trigger: ShutdownTrigger,
) -> LocalOutcome
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = Session::new(registry, console);
    tracing::info!(session_id = %session.id(), "Local session started");

    let outcome = match session.run().await {
        Ok(end) => {
            tracing::info!(session_id = %session.id(), end = ?end, "Local session finished");
            LocalOutcome::Finished(end)
        }
        Err(e) => {
            tracing::error!(session_id = %session.id(), error = %e, "Local session I/O fault");
            LocalOutcome::Faulted
        }
    };

    if trigger.trigger() {
        tracing::debug!("Shutdown signalled to socket track");
    }
    outcome
}
