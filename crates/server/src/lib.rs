//! Dashboard server for `bison-guard`.
//!
//! Wires together all long-running tasks:
//! - Refresh loop (fetch → update → render → publish, once per tick)
//! - Config file watcher (live theme reload on change)
//! - HTTP server (view API + embedded browser shell)
//! - Ctrl-C handler (graceful shutdown)

pub mod dashboard;
pub mod http;
pub mod refresh;
pub mod views;

pub use dashboard::Dashboard;
pub use http::{bind, router, serve, AppState};
pub use refresh::{RefreshLoop, TickPhase};
pub use views::{RenderState, ViewSet};

use guard_config::{default_path, ConfigWatcher};
use guard_core::{Message, Result};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Start the dashboard.  Returns after Ctrl-C once the loop has stopped.
pub async fn run() -> Result<()> {
    let path = default_path();
    let config = guard_config::load(&path)?;

    let source = guard_source::build_source(&config)?;
    let dashboard = Dashboard::new(&config, source.media()).with_config_path(&path);
    let interval = Duration::from_millis(config.source.interval_ms);
    let (refresh, views) = RefreshLoop::new(dashboard, source, interval);

    let (control_tx, control_rx) = mpsc::channel(8);
    let refresh_task = tokio::spawn(refresh.run(control_rx));
    tokio::spawn(forward_config_changes(path, control_tx.clone()));

    let listener = bind(&config.server.addr()).await?;
    info!("Dashboard listening on http://{}", listener.local_addr()?);

    let state = AppState::new(views, config.source.interval_ms);
    serve(listener, state, shutdown_signal()).await?;

    if control_tx.send(Message::Shutdown).await.is_err() {
        warn!("Refresh loop already stopped");
    }
    if let Err(e) = refresh_task.await {
        error!("Refresh loop panicked: {e}");
    }
    info!("Shut down cleanly");
    Ok(())
}

// ── Background tasks ──────────────────────────────────────────────────────────

/// Turns config file writes into `ConfigReloaded` messages.
async fn forward_config_changes(path: PathBuf, tx: mpsc::Sender<Message>) {
    let (_watcher, mut rx) = ConfigWatcher::spawn(path);

    while rx.recv().await.is_some() {
        if tx.send(Message::ConfigReloaded).await.is_err() {
            break;
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl-C received; shutting down"),
        Err(e) => {
            error!("Cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    }
}
