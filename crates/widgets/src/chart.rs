use crate::format::format_clock;
use guard_core::{Sample, Snapshot, TrackingLog};
use guard_theme::{ChartStyle, Color};
use serde::Serialize;

/// Camera frame the tracker reports positions in.
pub const FRAME_WIDTH: u32 = 640;
pub const FRAME_HEIGHT: u32 = 480;
/// Hotspot grid resolution.
pub const HEATMAP_ROWS: usize = 6;
pub const HEATMAP_COLS: usize = 8;

/// A chart description the browser draws as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    /// Category / value pairs.
    Bar {
        title:      String,
        categories: Vec<String>,
        values:     Vec<u32>,
        /// Vertical gradient stops for the bar fill.
        stops:      Vec<Color>,
    },
    /// Time-label / value pairs, oldest first.
    Line {
        title:   String,
        x_label: String,
        y_label: String,
        labels:  Vec<String>,
        values:  Vec<f64>,
        stroke:  Color,
        marker:  Color,
    },
    /// Row-major grid of intensities in `[0, 1]`.
    Heatmap {
        title: String,
        rows:  usize,
        cols:  usize,
        cells: Vec<Vec<f64>>,
        hot:   Color,
    },
}

/// Live per-category counts, in configured category order.
pub fn classification_bar(snapshot: &Snapshot, categories: &[String], style: &ChartStyle) -> Chart {
    let values = categories
        .iter()
        .map(|label| {
            snapshot
                .latest
                .as_ref()
                .and_then(|s| s.detection_counts.get(label).copied())
                .unwrap_or(0)
        })
        .collect();

    Chart::Bar {
        title:      "Live Classification Counts".to_string(),
        categories: categories.to_vec(),
        values,
        stops:      style.bar_stops.clone(),
    }
}

/// Primary count over the history window.
pub fn population_line(history: &[Sample], style: &ChartStyle) -> Chart {
    line(
        "Bison Count Over Time",
        "Bison Count",
        history,
        |s| f64::from(s.total_bisons),
        style,
    )
}

/// Per-sample new detections over the history window.
pub fn detections_line(history: &[Sample], style: &ChartStyle) -> Chart {
    line(
        "Detections Over Time",
        "Detections",
        history,
        |s| f64::from(s.new_detections),
        style,
    )
}

fn line(
    title: &str,
    y_label: &str,
    history: &[Sample],
    value: impl Fn(&Sample) -> f64,
    style: &ChartStyle,
) -> Chart {
    Chart::Line {
        title:   title.to_string(),
        x_label: "Time".to_string(),
        y_label: y_label.to_string(),
        labels:  history.iter().map(|s| format_clock(&s.timestamp)).collect(),
        values:  history.iter().map(value).collect(),
        stroke:  style.line,
        marker:  style.marker,
    }
}

/// Bin every tracked position into a coarse grid, normalised so the busiest
/// cell is 1.0.  An empty log yields an all-zero grid.
pub fn hotspot_heatmap(tracking: &TrackingLog) -> Chart {
    let mut counts = vec![vec![0u32; HEATMAP_COLS]; HEATMAP_ROWS];
    for point in tracking.points() {
        let col = bin(point.x, FRAME_WIDTH, HEATMAP_COLS);
        let row = bin(point.y, FRAME_HEIGHT, HEATMAP_ROWS);
        counts[row][col] += 1;
    }

    let peak = counts.iter().flatten().copied().max().unwrap_or(0);
    let cells = counts
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|c| if peak == 0 { 0.0 } else { f64::from(c) / f64::from(peak) })
                .collect()
        })
        .collect();

    Chart::Heatmap {
        title: "Spatial Hotspots".to_string(),
        rows:  HEATMAP_ROWS,
        cols:  HEATMAP_COLS,
        cells,
        hot:   Color::RED,
    }
}

/// Map a coordinate onto one of `bins` equal buckets; out-of-frame values
/// land in the last bucket.
fn bin(value: u32, extent: u32, bins: usize) -> usize {
    let idx = (u64::from(value) * bins as u64 / u64::from(extent.max(1))) as usize;
    idx.min(bins - 1)
}
