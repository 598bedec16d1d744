//! Render stage: turns the current snapshot and history into a [`PageView`].
//!
//! Rendering is a pure function of its inputs.  The refresh loop renders
//! every known page once per tick and publishes the results; the HTTP layer
//! only ever hands those immutable views to the browser.

use guard_core::{MediaSources, Page, Sample, Snapshot, TrackingLog};
use guard_theme::{PanelStyle, Theme};
use guard_widgets::{chart, kpi, media, status, table};
use guard_widgets::{Chart, Kpi, MediaPanel, NavLink, StatusBlock, Table};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything a page render reads.  Borrowed, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub snapshot:   &'a Snapshot,
    /// History copy, oldest first.
    pub history:    &'a [Sample],
    pub tracking:   &'a TrackingLog,
    pub categories: &'a [String],
    pub media:      &'a MediaSources,
    pub theme:      &'a Theme,
}

/// Complete description of one page, serialized straight to the browser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    /// Machine-readable page kind (`"overview"`, `"streams"`, …).
    pub page:      String,
    pub title:     String,
    pub nav:       Vec<NavLink>,
    pub status:    StatusBlock,
    pub kpis:      Vec<Kpi>,
    pub charts:    Vec<Chart>,
    pub tables:    Vec<Table>,
    pub media:     Option<MediaPanel>,
    /// Per-entity detail tables, keyed by entity id.
    pub drilldown: BTreeMap<String, Table>,
    /// The unmatched path, only on the not-found page.
    pub not_found: Option<String>,
    pub style:     PanelStyle,
}

impl PageView {
    fn frame(page: &Page, input: &RenderInput<'_>) -> Self {
        Self {
            page:      page.kind().to_string(),
            title:     page.title().to_string(),
            nav:       status::navigation(page),
            status:    status::status(input.snapshot),
            kpis:      Vec::new(),
            charts:    Vec::new(),
            tables:    Vec::new(),
            media:     None,
            drilldown: BTreeMap::new(),
            not_found: None,
            style:     input.theme.panel.clone(),
        }
    }
}

/// Render `page` from `input`.
pub fn render(page: &Page, input: &RenderInput<'_>) -> PageView {
    let mut view = PageView::frame(page, input);
    let snapshot = input.snapshot;
    let chart_style = &input.theme.chart;

    match page {
        Page::Overview => {
            view.kpis = vec![
                kpi::live_count(snapshot),
                kpi::processing_fps(snapshot),
                kpi::total_detections(snapshot),
                kpi::avg_confidence(snapshot),
                kpi::detections_rate(input.history),
                kpi::flow(snapshot),
            ];
            view.charts = vec![chart::classification_bar(
                snapshot,
                input.categories,
                chart_style,
            )];
            view.media = Some(media::video_feed(input.media, snapshot));
        }
        Page::LiveStream => {
            view.kpis = vec![kpi::live_count(snapshot), kpi::processing_fps(snapshot)];
            view.charts = vec![chart::detections_line(input.history, chart_style)];
            view.media = Some(media::video_feed(input.media, snapshot));
        }
        Page::Trends => {
            view.charts = vec![
                chart::population_line(input.history, chart_style),
                chart::hotspot_heatmap(input.tracking),
            ];
            view.tables = vec![table::recent_history(
                input.history,
                snapshot.total_detections,
            )];
            view.drilldown = drilldown(input.tracking);
        }
        Page::NotFound(path) => {
            view.not_found = Some(format!("No page at '{path}'"));
        }
    }

    view
}

/// Detail table for one tracked entity, if it exists.
pub fn render_track(tracking: &TrackingLog, entity: &str) -> Option<Table> {
    tracking
        .get(entity)
        .map(|points| table::track_history(entity, points))
}

fn drilldown(tracking: &TrackingLog) -> BTreeMap<String, Table> {
    tracking
        .entities()
        .filter_map(|id| render_track(tracking, id).map(|t| (id.to_string(), t)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    struct Fixture {
        snapshot:   Snapshot,
        history:    Vec<Sample>,
        tracking:   TrackingLog,
        categories: Vec<String>,
        media:      MediaSources,
        theme:      Theme,
    }

    impl Fixture {
        fn new() -> Self {
            let mut snapshot = Snapshot::default();
            let mut history = Vec::new();
            for tick in 0..3u32 {
                let mut s = Sample::empty(
                    Local.timestamp_opt(1_700_000_000 + i64::from(tick) * 2, 0).unwrap(),
                );
                s.total_bisons = tick + 1;
                s.new_detections = 10;
                s.fps = 25.0;
                s.detection_counts.insert("bison".into(), tick + 1);
                snapshot.apply(&s);
                history.push(s);
            }
            Self {
                snapshot,
                history,
                tracking: TrackingLog::demo(),
                categories: ["bison", "deer", "elk", "other"].map(String::from).to_vec(),
                media: MediaSources::default(),
                theme: Theme::default(),
            }
        }

        fn input(&self) -> RenderInput<'_> {
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

    #[test]
    fn overview_has_six_kpis_and_bar_chart() {
        let fx = Fixture::new();
        let view = render(&Page::Overview, &fx.input());

        assert_eq!(view.page, "overview");
        let labels: Vec<&str> = view.kpis.iter().map(|k| k.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Live Bison Count",
                "Processing FPS",
                "Total Detections",
                "Avg. Confidence",
                "Avg Detections/Min",
                "Inflow/Outflow",
            ]
        );
        assert_eq!(view.kpis[0].value, "3");
        assert_eq!(view.kpis[2].value, "30");
        assert!(matches!(view.charts[0], Chart::Bar { .. }));
        assert!(view.media.is_some());
    }

    #[test]
    fn trends_has_table_heatmap_and_drilldown() {
        let fx = Fixture::new();
        let view = render(&Page::Trends, &fx.input());

        assert!(matches!(view.charts[0], Chart::Line { .. }));
        assert!(matches!(view.charts[1], Chart::Heatmap { .. }));
        assert_eq!(view.tables[0].rows.len(), 3);
        assert_eq!(view.tables[0].rows[0][3], "30");
        assert_eq!(
            view.drilldown.keys().map(String::as_str).collect::<Vec<_>>(),
            ["bison_id_101", "bison_id_102"]
        );
    }

    #[test]
    fn live_stream_charts_detections() {
        let fx = Fixture::new();
        let view = render(&Page::LiveStream, &fx.input());
        let Chart::Line { values, .. } = &view.charts[0] else {
            panic!("expected line chart");
        };
        assert_eq!(values, &[10.0, 10.0, 10.0]);
        assert!(view.nav.iter().any(|l| l.active && l.href == "/streams"));
    }

    #[test]
    fn not_found_echoes_path() {
        let fx = Fixture::new();
        let view = render(&Page::route("/nope"), &fx.input());
        assert_eq!(view.page, "not_found");
        assert_eq!(view.not_found.as_deref(), Some("No page at '/nope'"));
        assert!(view.kpis.is_empty() && view.charts.is_empty());
    }

    #[test]
    fn unavailable_upstream_shows_last_known_values_and_error() {
        let mut fx = Fixture::new();
        let before = render(&Page::Overview, &fx.input());
        fx.snapshot.mark_unavailable("connection refused");
        let after = render(&Page::Overview, &fx.input());

        assert_eq!(after.kpis, before.kpis);
        assert_eq!(after.charts, before.charts);
        assert_eq!(
            after.status.error.as_deref(),
            Some("Upstream unavailable: connection refused")
        );
    }

    #[test]
    fn render_is_idempotent() {
        let fx = Fixture::new();
        for page in Page::KNOWN {
            assert_eq!(render(&page, &fx.input()), render(&page, &fx.input()));
        }
    }

    #[test]
    fn track_lookup() {
        let tracking = TrackingLog::demo();
        assert_eq!(render_track(&tracking, "bison_id_102").map(|t| t.rows.len()), Some(3));
        assert!(render_track(&tracking, "bison_id_404").is_none());
    }

    #[test]
    fn view_serializes() {
        let fx = Fixture::new();
        let json = serde_json::to_value(render(&Page::Overview, &fx.input())).unwrap();
        assert_eq!(json["kpis"][1]["value"], "25.0");
        assert_eq!(json["charts"][0]["kind"], "bar");
        assert_eq!(json["style"]["accent"], "#a78bfa");
    }
}
