use crate::format::{detections_per_minute, format_confidence, format_flow, format_rate};
use guard_core::{Sample, Snapshot};
use guard_theme::Color;
use serde::Serialize;

/// A headline number card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpi {
    pub label:  String,
    pub value:  String,
    pub unit:   String,
    pub accent: Color,
}

impl Kpi {
    pub fn new(label: &str, value: String, unit: &str, accent: Color) -> Self {
        Self {
            label: label.to_string(),
            value,
            unit: unit.to_string(),
            accent,
        }
    }
}

pub fn live_count(snapshot: &Snapshot) -> Kpi {
    Kpi::new(
        "Live Bison Count",
        snapshot.live_count().to_string(),
        "Bisons",
        Color::GREEN,
    )
}

pub fn processing_fps(snapshot: &Snapshot) -> Kpi {
    let fps = snapshot.latest.as_ref().map_or(0.0, |s| s.fps);
    Kpi::new("Processing FPS", format_rate(fps), "FPS", Color::BLUE)
}

pub fn total_detections(snapshot: &Snapshot) -> Kpi {
    Kpi::new(
        "Total Detections",
        snapshot.total_detections.to_string(),
        "",
        Color::PURPLE,
    )
}

pub fn avg_confidence(snapshot: &Snapshot) -> Kpi {
    let confidence = snapshot.latest.as_ref().map_or(0.0, |s| s.avg_confidence);
    Kpi::new("Avg. Confidence", format_confidence(confidence), "", Color::YELLOW)
}

pub fn detections_rate(history: &[Sample]) -> Kpi {
    Kpi::new(
        "Avg Detections/Min",
        format_rate(detections_per_minute(history)),
        "/min",
        Color::BLUE,
    )
}

pub fn flow(snapshot: &Snapshot) -> Kpi {
    let (inflow, outflow) = snapshot
        .latest
        .as_ref()
        .map_or((0, 0), |s| (s.inflow, s.outflow));
    Kpi::new("Inflow/Outflow", format_flow(inflow, outflow), "", Color::GREEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn empty_snapshot_renders_zeros() {
        let snap = Snapshot::default();
        assert_eq!(live_count(&snap).value, "0");
        assert_eq!(processing_fps(&snap).value, "0.0");
        assert_eq!(avg_confidence(&snap).value, "0.000");
        assert_eq!(flow(&snap).value, "0/0");
    }

    #[test]
    fn values_come_from_latest_sample() {
        let mut sample = Sample::empty(Local::now());
        sample.total_bisons = 6;
        sample.fps = 27.26;
        sample.avg_confidence = 0.91234;
        sample.inflow = 2;
        sample.new_detections = 11;
        let mut snap = Snapshot::default();
        snap.apply(&sample);

        assert_eq!(live_count(&snap).value, "6");
        assert_eq!(processing_fps(&snap).value, "27.3");
        assert_eq!(avg_confidence(&snap).value, "0.912");
        assert_eq!(total_detections(&snap).value, "11");
        assert_eq!(flow(&snap).value, "2/0");
    }
}
