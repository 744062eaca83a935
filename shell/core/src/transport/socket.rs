//! Socket Track
//!
//! TCP side of the shell. Accepts one connection at a time and runs a full
//! session on it before accepting the next; a second client waits in the
//! listen backlog until the first one is done.
//!
//! When the local session ends the listener is closed right away. A socket
//! session that is already running keeps going until its client leaves.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};
use tracing::Instrument;

use super::config::TransportError;
use super::shutdown::ShutdownListener;
use crate::commands::CommandRegistry;
use crate::console::LineConsole;
use crate::session::Session;

/// What the accept loop did before it closed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SocketReport {
    /// Address the listener was bound to
    pub local_addr: SocketAddr,
    /// Accept calls that returned a connection or an error
    pub accepts_completed: u64,
    /// Sessions run to completion (or to an I/O fault)
    pub sessions_served: u64,
    /// Accept calls that failed
    pub accept_errors: u64,
    /// Sessions that ended with an I/O fault
    pub connection_faults: u64,
}

/// A bound listener, ready to serve sessions
pub struct SocketTrack {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl SocketTrack {
    /// Bind the listening socket
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Bind`] if the address cannot be bound.
    pub async fn bind(address: &str, port: u16) -> Result<Self, TransportError> {
        let bind_err = |source| TransportError::Bind {
            address: address.to_string(),
            port,
            source,
        };
        let listener = TcpListener::bind((address, port)).await.map_err(bind_err)?;
        let local_addr = listener.local_addr().map_err(bind_err)?;
        Ok(Self {
            listener,
            local_addr,
        })
    }

    /// Address the listener is bound to
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept and serve connections until shutdown is signalled
    ///
    /// The listener is closed exactly once: as soon as the signal fires, even
    /// if a session is still running, or on a fatal accept error. A running
    /// session is left to finish; no accept is issued after the listener is
    /// closed, and a pending accept is abandoned when the signal fires.
    pub async fn serve(
        self,
        registry: Arc<CommandRegistry>,
        prompt: &str,
        mut shutdown: ShutdownListener,
    ) -> SocketReport {
        let Self {
            listener,
            local_addr,
        } = self;
        let mut listener = Some(listener);
        let mut report = SocketReport {
            local_addr,
            accepts_completed: 0,
            sessions_served: 0,
            accept_errors: 0,
            connection_faults: 0,
        };

        tracing::info!(addr = %local_addr, "Listening for socket sessions");

        loop {
            let Some(active) = listener.as_ref() else {
                break;
            };
            if shutdown.is_triggered() {
                break;
            }

            let accepted = tokio::select! {
                biased;
                () = shutdown.wait() => break,
                accepted = active.accept() => accepted,
            };
            report.accepts_completed += 1;

            let (stream, peer) = match accepted {
                Ok(conn) => conn,
                Err(e) => {
                    if report.record_accept_error(&e) {
                        continue;
                    }
                    tracing::error!(error = %e, "Fatal accept error, closing socket transport");
                    break;
                }
            };

            let span = tracing::info_span!("connection", %peer);
            let session = serve_connection(stream, Arc::clone(&registry), prompt).instrument(span);
            tokio::pin!(session);

            let faulted = tokio::select! {
                biased;
                faulted = &mut session => faulted,
                () = shutdown.wait() => {
                    close_listener(&mut listener, &report);
                    tracing::info!("Waiting for active socket session to finish");
                    session.await
                }
            };

            report.sessions_served += 1;
            if faulted {
                report.connection_faults += 1;
            }
        }

        close_listener(&mut listener, &report);
        report
    }
}

impl SocketReport {
    /// Count a failed accept
    ///
    /// Returns `true` if the error only affected the connection being
    /// accepted and the loop can go on.
    fn record_accept_error(&mut self, e: &io::Error) -> bool {
        self.accept_errors += 1;
        let transient = matches!(
            e.kind(),
            io::ErrorKind::ConnectionAborted
                | io::ErrorKind::ConnectionReset
                | io::ErrorKind::ConnectionRefused
                | io::ErrorKind::Interrupted
                | io::ErrorKind::WouldBlock
                | io::ErrorKind::TimedOut
        );
        if transient {
            tracing::warn!(error = %e, "Accept failed");
        }
        transient
    }
}

fn close_listener(listener: &mut Option<TcpListener>, report: &SocketReport) {
    if listener.take().is_some() {
        tracing::info!(
            addr = %report.local_addr,
            sessions = report.sessions_served,
            "Socket listener closed"
        );
    }
}

/// Run one session on an accepted connection
///
/// Returns `true` if the session ended with an I/O fault. The connection is
/// closed when this returns either way.
async fn serve_connection(stream: TcpStream, registry: Arc<CommandRegistry>, prompt: &str) -> bool {
    let (read_half, write_half) = stream.into_split();
    let console = LineConsole::new(BufReader::new(read_half), write_half, prompt);
    let mut session = Session::new(registry, console);

    tracing::info!(session_id = %session.id(), "Socket session started");
    match session.run().await {
        Ok(end) => {
            tracing::info!(
                session_id = %session.id(),
                end = ?end,
                stats = ?session.stats(),
                "Socket session finished"
            );
            false
        }
        Err(e) => {
            tracing::warn!(session_id = %session.id(), error = %e, "Socket session I/O fault");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::shutdown_channel;

    fn empty_report() -> SocketReport {
        SocketReport {
            local_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            accepts_completed: 0,
            sessions_served: 0,
            accept_errors: 0,
            connection_faults: 0,
        }
    }

    #[test]
    fn test_transient_accept_errors_keep_loop_running() {
        let mut report = empty_report();

        for kind in [
            io::ErrorKind::ConnectionAborted,
            io::ErrorKind::ConnectionReset,
            io::ErrorKind::Interrupted,
        ] {
            assert!(report.record_accept_error(&io::Error::from(kind)));
        }
        assert_eq!(report.accept_errors, 3);
    }

    #[test]
    fn test_persistent_accept_error_is_fatal() {
        let mut report = empty_report();

        // EMFILE and friends surface as uncategorized errors
        let emfile = io::Error::other("Too many open files");
        assert!(!report.record_accept_error(&emfile));
        assert!(!report.record_accept_error(&io::Error::from(
            io::ErrorKind::PermissionDenied
        )));
        assert_eq!(report.accept_errors, 2);
    }

    #[tokio::test]
    async fn test_shutdown_before_serve_issues_no_accept() {
        let track = SocketTrack::bind("127.0.0.1", 0).await.unwrap();
        let addr = track.local_addr();
        let (trigger, listener) = shutdown_channel();
        assert!(trigger.trigger());

        let report = track
            .serve(Arc::new(CommandRegistry::new()), "> ", listener)
            .await;

        assert_eq!(report.local_addr, addr);
        assert_eq!(report.accepts_completed, 0);
        assert_eq!(report.sessions_served, 0);
        assert!(TcpStream::connect(addr).await.is_err());
    }
}
