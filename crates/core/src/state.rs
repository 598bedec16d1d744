use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::fmt;

/// One statistics sample produced by a sample source on a single tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// When the sample was observed.
    pub timestamp: DateTime<Local>,
    /// Primary tracked count (bisons currently in view).
    pub total_bisons: u32,
    /// Processing frame rate of the upstream tracker.
    pub fps: f64,
    /// Mean detection confidence, always within `[0, 1]`.
    pub avg_confidence: f64,
    /// Detections observed since the previous sample.
    pub new_detections: u32,
    /// Frames processed since the previous sample.
    pub frames: u32,
    /// Animals entering the frame since the previous sample.
    pub inflow: u32,
    /// Animals leaving the frame since the previous sample.
    pub outflow: u32,
    /// Live count per classification label (`"bison"`, `"deer"`, …).
    pub detection_counts: BTreeMap<String, u32>,
}

impl Sample {
    /// A zeroed sample at `timestamp`, useful as a builder base.
    pub fn empty(timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            total_bisons: 0,
            fps: 0.0,
            avg_confidence: 0.0,
            new_detections: 0,
            frames: 0,
            inflow: 0,
            outflow: 0,
            detection_counts: BTreeMap::new(),
        }
    }

    /// Clamp confidence into `[0, 1]` and replace non-finite rates with zero.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.avg_confidence = if self.avg_confidence.is_finite() {
            self.avg_confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if !self.fps.is_finite() || self.fps < 0.0 {
            self.fps = 0.0;
        }
        self
    }
}

/// Connection state of the upstream tracker as shown in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamStatus {
    /// No tick has completed yet.
    #[default]
    Connecting,
    /// The last tick produced a sample.
    Live,
    /// The last tick failed to reach the upstream.
    Offline,
}

impl fmt::Display for StreamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connecting => f.write_str("Connecting..."),
            Self::Live       => f.write_str("LIVE"),
            Self::Offline    => f.write_str("OFFLINE"),
        }
    }
}

/// Latest observed sample plus process-lifetime cumulative counters.
///
/// Owned exclusively by the refresh loop; renderers only ever see `&Snapshot`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Most recent successfully received sample.
    pub latest: Option<Sample>,
    /// Running total of detections since process start.
    pub total_detections: u64,
    /// Running total of processed frames since process start.
    pub total_frames: u64,
    /// Number of samples folded in.
    pub ticks: u64,
    pub stream_status: StreamStatus,
    /// Time of the last successful sample.
    pub last_updated: Option<DateTime<Local>>,
    /// Reason of the most recent upstream failure, cleared on success.
    pub last_error: Option<String>,
}

impl Snapshot {
    /// Fold a new sample into the snapshot.  Counters only ever grow.
    pub fn apply(&mut self, sample: &Sample) {
        self.total_detections = self
            .total_detections
            .saturating_add(u64::from(sample.new_detections));
        self.total_frames = self.total_frames.saturating_add(u64::from(sample.frames));
        self.ticks = self.ticks.saturating_add(1);
        self.stream_status = StreamStatus::Live;
        self.last_updated = Some(sample.timestamp);
        self.last_error = None;
        self.latest = Some(sample.clone());
    }

    /// Record an upstream failure, keeping the last known-good values intact.
    pub fn mark_unavailable(&mut self, reason: impl Into<String>) {
        self.stream_status = StreamStatus::Offline;
        self.last_error = Some(reason.into());
    }

    /// Primary count of the latest sample (0 before the first tick).
    #[must_use]
    pub fn live_count(&self) -> u32 {
        self.latest.as_ref().map_or(0, |s| s.total_bisons)
    }
}

/// Media endpoints of the upstream tracker, embedded as-is by the UI.
///
/// Never fetched or validated by the dashboard itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaSources {
    /// Motion-JPEG stream URL.
    pub mjpeg: Option<String>,
    /// HLS playlist URL.
    pub hls: Option<String>,
}

impl MediaSources {
    /// Media links under a tracker base URL (`{base}/mjpeg`, `{base}/hls.m3u8`).
    pub fn under(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            mjpeg: Some(format!("{base}/mjpeg")),
            hls:   Some(format!("{base}/hls.m3u8")),
        }
    }

    /// `true` when no live media exists (synthetic mode).
    pub fn is_simulated(&self) -> bool {
        self.mjpeg.is_none() && self.hls.is_none()
    }
}
