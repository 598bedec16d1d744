use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, error, info, warn};

/// Burst of filesystem events collapsed into one reload.
const SETTLE: Duration = Duration::from_millis(250);

/// Reports edits to the config file.
///
/// The parent directory is watched rather than the file, so editors that save
/// by writing a temp file and renaming it over the original are still seen, as
/// is a config file created after startup.
///
/// ```no_run
/// # async fn demo() {
/// let (_watcher, mut changes) = guard_config::ConfigWatcher::spawn("/etc/bison-guard.toml");
/// while changes.recv().await.is_some() {
///     // re-read the file
/// }
/// # }
/// ```
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    /// Start watching `path`.  The receiver yields once per settled burst of
    /// changes and closes if watching is impossible.
    pub fn spawn(path: impl AsRef<Path>) -> (Self, mpsc::Receiver<()>) {
        let path = path.as_ref().to_path_buf();
        let (tx, rx) = mpsc::channel(1);
        tokio::spawn(watch_dir(path.clone(), tx));
        (Self { path }, rx)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Whether `event` is a content change of `target`.
fn touches(event: &Event, target: &Path) -> bool {
    let relevant_kind = matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_));
    relevant_kind && event.paths.iter().any(|p| p.file_name() == target.file_name())
}

async fn watch_dir(path: PathBuf, tx: mpsc::Sender<()>) {
    let Some(dir) = path.parent().filter(|d| d.is_dir()).map(Path::to_path_buf) else {
        info!(
            "Config directory for '{}' does not exist; live reload disabled",
            path.display()
        );
        return;
    };

    let (raw_tx, mut raw_rx) = mpsc::channel::<notify::Result<Event>>(32);
    let watcher = RecommendedWatcher::new(
        move |res| {
            let _ = raw_tx.blocking_send(res);
        },
        notify::Config::default(),
    );
    let mut watcher = match watcher {
        Ok(w) => w,
        Err(e) => {
            error!("Cannot create config watcher: {e}");
            return;
        }
    };
    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        error!("Cannot watch '{}': {e}", dir.display());
        return;
    }
    info!("Watching config file: {}", path.display());

    while let Some(res) = raw_rx.recv().await {
        match res {
            Ok(event) if touches(&event, &path) => {
                // Swallow the rest of the burst (truncate, write, chmod, ...).
                while let Ok(Some(_)) = time::timeout(SETTLE, raw_rx.recv()).await {}
                debug!("Config change settled");
                if tx.send(()).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Config watcher error: {e}"),
        }
    }
}
