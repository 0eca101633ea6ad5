//! Graceful shutdown on SIGTERM and SIGINT (Ctrl+C off unix).

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

/// Owns the shutdown flag that [`HttpServer::run`](crate::HttpServer::run)
/// waits on.
pub struct SignalHandler {
    stop: Arc<watch::Sender<bool>>,
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalHandler {
    pub fn new() -> Self {
        let (stop, _) = watch::channel(false);
        Self {
            stop: Arc::new(stop),
        }
    }

    /// Spawns a task that raises the flag on the first termination signal.
    pub fn spawn_listener(&self) {
        let stop = self.stop.clone();
        tokio::spawn(async move {
            if let Some(signal) = termination().await {
                info!(signal, "Shutting down");
                stop.send_replace(true);
            }
        });
    }

    /// A future that completes once shutdown starts.
    pub fn shutdown(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.stop.subscribe(),
        }
    }

    pub fn is_shutdown(&self) -> bool {
        *self.stop.borrow()
    }

    /// Starts shutdown without a signal.
    pub fn trigger_shutdown(&self) {
        self.stop.send_replace(true);
    }
}

#[cfg(unix)]
async fn termination() -> Option<&'static str> {
    use tokio::signal::unix::{SignalKind, signal};

    let (mut term, mut int) = match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
        (Ok(term), Ok(int)) => (term, int),
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "Signal handlers unavailable; stop the server by killing it");
            return None;
        }
    };

    tokio::select! {
        _ = term.recv() => Some("SIGTERM"),
        _ = int.recv() => Some("SIGINT"),
    }
}

#[cfg(not(unix))]
async fn termination() -> Option<&'static str> {
    match tokio::signal::ctrl_c().await {
        Ok(()) => Some("Ctrl+C"),
        Err(e) => {
            warn!(error = %e, "Ctrl+C handler unavailable");
            None
        }
    }
}

/// Resolves once shutdown is signaled, or when its [`SignalHandler`] is gone.
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    pub async fn wait(mut self) {
        let _ = self.rx.wait_for(|stop| *stop).await;
    }
}
