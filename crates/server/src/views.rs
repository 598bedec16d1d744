use guard_core::{MediaSources, Page, Sample, Snapshot, TrackingLog};
use guard_renderer::{render, render_track, PageView, RenderInput};
use guard_theme::Theme;
use guard_widgets::Table;
use std::sync::Arc;

/// Owned copy of everything a render reads, frozen at publish time.
#[derive(Debug, Clone)]
pub struct RenderState {
    pub snapshot:   Snapshot,
    pub history:    Vec<Sample>,
    pub tracking:   TrackingLog,
    pub categories: Vec<String>,
    pub media:      MediaSources,
    pub theme:      Theme,
}

impl RenderState {
    pub fn input(&self) -> RenderInput<'_> {
        RenderInput {
            snapshot:   &self.snapshot,
            history:    &self.history,
            tracking:   &self.tracking,
            categories: &self.categories,
            media:      &self.media,
            theme:      &self.theme,
        }
    }
}

/// One tick's worth of rendered pages.
///
/// Published whole through a `watch` channel, so a reader always sees every
/// page from the same tick.
#[derive(Debug)]
pub struct ViewSet {
    pub overview: Arc<PageView>,
    pub streams:  Arc<PageView>,
    pub trends:   Arc<PageView>,
    pub state:    Arc<RenderState>,
}

impl ViewSet {
    /// The view for `page`.  Known pages are pre-rendered; the not-found page
    /// echoes the requested path so it is rendered on demand.
    pub fn view(&self, page: &Page) -> Arc<PageView> {
        match page {
            Page::Overview => Arc::clone(&self.overview),
            Page::LiveStream => Arc::clone(&self.streams),
            Page::Trends => Arc::clone(&self.trends),
            Page::NotFound(_) => Arc::new(render(page, &self.state.input())),
        }
    }

    pub fn track(&self, entity: &str) -> Option<Table> {
        render_track(&self.state.tracking, entity)
    }
}
