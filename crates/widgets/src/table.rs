use crate::format::{format_clock, format_rate};
use guard_core::{Sample, TrackPoint};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub key:   String,
    pub label: String,
    pub align: Align,
}

impl Column {
    fn new(key: &str, label: &str, align: Align) -> Self {
        Self {
            key:   key.to_string(),
            label: label.to_string(),
            align,
        }
    }
}

/// A titled table of pre-formatted cells; each row has one cell per column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub title:   String,
    pub columns: Vec<Column>,
    pub rows:    Vec<Vec<String>>,
}

/// Recent history, newest first.
///
/// "Total Detections" is the cumulative count as of each sample, walked back
/// from the snapshot's running total.
pub fn recent_history(history: &[Sample], total_detections: u64) -> Table {
    let mut running = total_detections;
    let rows = history
        .iter()
        .rev()
        .map(|s| {
            let row = vec![
                format_clock(&s.timestamp),
                s.total_bisons.to_string(),
                format_rate(s.fps),
                running.to_string(),
            ];
            running = running.saturating_sub(u64::from(s.new_detections));
            row
        })
        .collect();

    Table {
        title: "Recent Tracking History".to_string(),
        columns: vec![
            Column::new("timestamp", "Time", Align::Left),
            Column::new("total_bisons", "Bison Count", Align::Center),
            Column::new("fps", "FPS", Align::Center),
            Column::new("detections", "Total Detections", Align::Center),
        ],
        rows,
    }
}

/// Movement history for a single tracked individual.
pub fn track_history(entity: &str, points: &[TrackPoint]) -> Table {
    Table {
        title: format!("Tracking History for {entity}"),
        columns: vec![
            Column::new("time", "Time", Align::Left),
            Column::new("location", "Location", Align::Left),
            Column::new("activity", "Activity", Align::Left),
        ],
        rows: points
            .iter()
            .map(|p| {
                vec![
                    p.time.clone(),
                    format!("({}, {})", p.x, p.y),
                    p.activity.clone(),
                ]
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn sample(secs: i64, bisons: u32, detections: u32) -> Sample {
        let mut s = Sample::empty(Local.timestamp_opt(secs, 0).unwrap());
        s.total_bisons = bisons;
        s.new_detections = detections;
        s.fps = 25.0;
        s
    }

    #[test]
    fn history_is_newest_first_with_cumulative_detections() {
        let history = [sample(0, 1, 10), sample(2, 2, 5), sample(4, 3, 7)];
        let table = recent_history(&history, 22);

        let counts: Vec<&str> = table.rows.iter().map(|r| r[1].as_str()).collect();
        assert_eq!(counts, ["3", "2", "1"]);
        let totals: Vec<&str> = table.rows.iter().map(|r| r[3].as_str()).collect();
        assert_eq!(totals, ["22", "15", "10"]);
        assert!(table.rows.iter().all(|r| r.len() == table.columns.len()));
    }

    #[test]
    fn track_rows_format_location() {
        let points = [TrackPoint::new("09:00:00", 150, 200, "Grazing")];
        let table = track_history("bison_id_101", &points);
        assert_eq!(table.rows[0], ["09:00:00", "(150, 200)", "Grazing"]);
        assert_eq!(table.title, "Tracking History for bison_id_101");
    }
}
