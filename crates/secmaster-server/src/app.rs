//! Application lifecycle: initial load, signal-driven refresh, shutdown.

use crate::di::AppModule;
use crate::startup::print_load_summary;
use secmaster_core::SecMasterResult;
use secmaster_service::SecurityMasterService;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Process-level request the run loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    /// Rebuild the cache (`SIGHUP`).
    Refresh,
    /// Stop the process (Ctrl+C or `SIGTERM`).
    Shutdown,
}

/// Running application.
pub struct Application {
    module: AppModule,
}

impl Application {
    /// Creates an application over a wired module.
    #[must_use]
    pub fn new(module: AppModule) -> Self {
        Self { module }
    }

    /// Loads the cache, then serves refresh requests until shutdown.
    pub async fn run(self) -> SecMasterResult<()> {
        let service = self.module.security_master();

        let summary = service.initialize().await;
        print_load_summary(&summary);

        let signals = spawn_signal_listener()?;
        info!("Ready. Send SIGHUP to refresh the cache");
        serve_signals(service, signals).await;

        self.module.database_pool().close().await;
        info!("Shutdown complete");
        Ok(())
    }
}

/// Runs one refresh per `Refresh` until `Shutdown` arrives or the channel closes.
///
/// Requests arriving during a refresh queue up behind it.
pub async fn serve_signals(service: Arc<dyn SecurityMasterService>, mut signals: mpsc::Receiver<ControlSignal>) {
    while let Some(request) = signals.recv().await {
        match request {
            ControlSignal::Refresh => {
                info!("Refresh requested");
                let summary = service.refresh_cache().await;
                print_load_summary(&summary);
            }
            ControlSignal::Shutdown => {
                info!("Shutting down");
                return;
            }
        }
    }
    warn!("Signal listener stopped, shutting down");
}

/// Forwards OS signals into a channel.
#[cfg(unix)]
pub fn spawn_signal_listener() -> SecMasterResult<mpsc::Receiver<ControlSignal>> {
    use secmaster_core::SecMasterError;
    use signal::unix::{signal as unix_signal, SignalKind};

    let install = |kind: SignalKind| {
        unix_signal(kind).map_err(|e| SecMasterError::internal(format!("Failed to install signal handler: {}", e)))
    };
    let mut hangup = install(SignalKind::hangup())?;
    let mut terminate = install(SignalKind::terminate())?;

    let (tx, rx) = mpsc::channel(8);
    tokio::spawn(async move {
        loop {
            let request = tokio::select! {
                _ = hangup.recv() => ControlSignal::Refresh,
                _ = terminate.recv() => {
                    info!("Received terminate signal, initiating graceful shutdown...");
                    ControlSignal::Shutdown
                }
                result = signal::ctrl_c() => {
                    if let Err(e) = result {
                        warn!("Ctrl+C listener failed: {}", e);
                    }
                    info!("Received Ctrl+C, initiating graceful shutdown...");
                    ControlSignal::Shutdown
                }
            };

            if tx.send(request).await.is_err() || request == ControlSignal::Shutdown {
                break;
            }
        }
    });

    Ok(rx)
}

/// Forwards Ctrl+C into a channel. Refresh signals are unix-only.
#[cfg(not(unix))]
pub fn spawn_signal_listener() -> SecMasterResult<mpsc::Receiver<ControlSignal>> {
    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Ctrl+C listener failed: {}", e);
        }
        let _ = tx.send(ControlSignal::Shutdown).await;
    });
    Ok(rx)
}
