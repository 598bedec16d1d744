use guard_config::GuardConfig;
use guard_core::{History, MediaSources, Message, Page, Snapshot, TrackingLog};
use guard_renderer::render;
use guard_theme::Theme;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::views::{RenderState, ViewSet};

/// The single owner of all mutable dashboard state.
///
/// Only the refresh loop holds a `Dashboard`; everything else sees the
/// immutable [`ViewSet`]s it publishes.
#[derive(Debug)]
pub struct Dashboard {
    snapshot:    Snapshot,
    history:     History,
    tracking:    TrackingLog,
    categories:  Vec<String>,
    media:       MediaSources,
    theme:       Theme,
    config_path: Option<PathBuf>,
}

impl Dashboard {
    pub fn new(config: &GuardConfig, media: MediaSources) -> Self {
        Self {
            snapshot:    Snapshot::default(),
            history:     History::new(config.history.capacity),
            tracking:    TrackingLog::demo(),
            categories:  config.tracking.categories.clone(),
            media,
            theme:       Theme::from_config(&config.theme),
            config_path: None,
        }
    }

    /// Enable theme reloads from `path` on [`Message::ConfigReloaded`].
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Apply one message to the owned state.
    pub fn update(&mut self, msg: Message) {
        match msg {
            Message::SampleReceived(sample) => {
                // History first: a rejected sample must not touch the counters.
                match self.history.append(sample.clone()) {
                    Ok(()) => {
                        self.snapshot.apply(&sample);
                        debug!(
                            bisons = sample.total_bisons,
                            history = self.history.len(),
                            "Sample stored"
                        );
                    }
                    Err(e) => warn!("Dropping sample: {e}"),
                }
            }
            Message::UpstreamUnavailable(reason) => {
                warn!("Upstream unavailable: {reason}");
                self.snapshot.mark_unavailable(reason);
            }
            Message::ConfigReloaded => self.reload_theme(),
            Message::Shutdown => {}
        }
    }

    fn reload_theme(&mut self) {
        let Some(path) = &self.config_path else {
            return;
        };
        match guard_config::load(path) {
            Ok(cfg) => {
                self.theme = Theme::from_config(&cfg.theme);
                info!("Config reloaded; theme applied (other settings need a restart)");
            }
            Err(e) => warn!("Config reload failed: {e}"),
        }
    }

    /// Render every known page into an immutable, shareable set.
    pub fn publish(&self) -> Arc<ViewSet> {
        let state = RenderState {
            snapshot:   self.snapshot.clone(),
            history:    self.history.snapshot(),
            tracking:   self.tracking.clone(),
            categories: self.categories.clone(),
            media:      self.media.clone(),
            theme:      self.theme.clone(),
        };
        let input = state.input();
        let overview = Arc::new(render(&Page::Overview, &input));
        let streams = Arc::new(render(&Page::LiveStream, &input));
        let trends = Arc::new(render(&Page::Trends, &input));

        Arc::new(ViewSet {
            overview,
            streams,
            trends,
            state: Arc::new(state),
        })
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }
}
