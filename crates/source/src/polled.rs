use crate::{RetryPolicy, SampleSource};
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use guard_core::{GuardError, MediaSources, Result, Sample};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

/// JSON shape returned by `GET {base}/stats`.
///
/// Only `total_bisons` and `timestamp` are guaranteed; everything else
/// defaults to zero / empty when absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatsPayload {
    pub total_bisons:     u32,
    pub timestamp:        Option<String>,
    pub fps:              f64,
    pub avg_confidence:   f64,
    pub detections:       u32,
    pub frames:           u32,
    pub inflow:           u32,
    pub outflow:          u32,
    pub detection_counts: BTreeMap<String, u32>,
}

impl StatsPayload {
    /// Convert into a [`Sample`], filling the timestamp with `now` when it is
    /// missing or unparseable.
    pub fn into_sample(self, primary: &str, now: DateTime<Local>) -> Sample {
        let timestamp = self
            .timestamp
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now);

        let mut detection_counts = self.detection_counts;
        detection_counts
            .entry(primary.to_string())
            .or_insert(self.total_bisons);

        Sample {
            timestamp,
            total_bisons: self.total_bisons,
            fps: self.fps,
            avg_confidence: self.avg_confidence,
            new_detections: self.detections,
            frames: self.frames,
            inflow: self.inflow,
            outflow: self.outflow,
            detection_counts,
        }
        .normalized()
    }
}

/// Polls a tracker backend once per tick.
///
/// Every failure mode (refused connection, timeout, non-2xx status, bad JSON)
/// surfaces as [`GuardError::Upstream`].
#[derive(Debug)]
pub struct PolledSource {
    client:    reqwest::Client,
    base_url:  String,
    stats_url: String,
    primary:   String,
    retry:     RetryPolicy,
}

impl PolledSource {
    /// Build a source for `base_url`.  `timeout` bounds each request.
    pub fn new(
        base_url: &str,
        primary: &str,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| GuardError::Config(format!("cannot build HTTP client: {e}")))?;

        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self {
            client,
            stats_url: format!("{base_url}/stats"),
            base_url,
            primary: primary.to_string(),
            retry,
        })
    }

    pub fn stats_url(&self) -> &str {
        &self.stats_url
    }

    /// One request, no retries.
    async fn fetch_once(&self) -> Result<Sample> {
        let response = self
            .client
            .get(&self.stats_url)
            .send()
            .await
            .map_err(describe_request_error)?
            .error_for_status()
            .map_err(|e| GuardError::Upstream(format!("bad status: {e}")))?;

        let payload: StatsPayload = response
            .json()
            .await
            .map_err(|e| GuardError::Upstream(format!("malformed stats payload: {e}")))?;

        Ok(payload.into_sample(&self.primary, Local::now()))
    }
}

#[async_trait]
impl SampleSource for PolledSource {
    async fn next_sample(&mut self) -> Result<Sample> {
        let attempts = self.retry.attempts.max(1);
        let mut attempt = 0;

        loop {
            match self.fetch_once().await {
                Ok(sample) => {
                    debug!(bisons = sample.total_bisons, "Fetched stats");
                    return Ok(sample);
                }
                Err(e) if attempt + 1 < attempts => {
                    let delay = self.retry.delay(attempt);
                    warn!(
                        "Stats fetch attempt {}/{} failed: {e}; retrying in {:?}",
                        attempt + 1,
                        attempts,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn describe(&self) -> String {
        format!("polled {}", self.stats_url)
    }

    fn media(&self) -> MediaSources {
        MediaSources::under(&self.base_url)
    }
}

fn describe_request_error(e: reqwest::Error) -> GuardError {
    let kind = if e.is_timeout() {
        "timed out"
    } else if e.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    GuardError::Upstream(format!("{kind}: {e}"))
}

/// Parse an upstream timestamp: RFC 3339, or `%Y-%m-%d %H:%M:%S` local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Local));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_and_local_formats() {
        let a = parse_timestamp("2025-06-01T09:00:00Z").unwrap();
        assert_eq!(a.timestamp(), 1_748_768_400);

        let b = parse_timestamp("2025-06-01 09:00:00").unwrap();
        assert_eq!(b.format("%H:%M:%S").to_string(), "09:00:00");

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn absent_fields_default() {
        let payload: StatsPayload = serde_json::from_str("{}").unwrap();
        let now = Local::now();
        let s = payload.into_sample("bison", now);
        assert_eq!(s.total_bisons, 0);
        assert_eq!(s.timestamp, now);
        assert_eq!(s.detection_counts.get("bison"), Some(&0));
    }

    #[test]
    fn payload_maps_onto_sample() {
        let payload: StatsPayload = serde_json::from_str(
            r#"{"total_bisons": 7, "timestamp": "garbage", "fps": 24.5,
                "avg_confidence": 1.4, "detections": 12,
                "detection_counts": {"bison": 7, "elk": 2}}"#,
        )
        .unwrap();
        let now = Local::now();
        let s = payload.into_sample("bison", now);

        assert_eq!(s.total_bisons, 7);
        assert_eq!(s.timestamp, now);
        assert_eq!(s.fps, 24.5);
        assert_eq!(s.avg_confidence, 1.0);
        assert_eq!(s.new_detections, 12);
        assert_eq!(s.detection_counts.len(), 2);
    }

    #[test]
    fn stats_url_strips_trailing_slash() {
        let source = PolledSource::new(
            "http://localhost:8080/",
            "bison",
            Duration::from_secs(1),
            RetryPolicy::none(),
        )
        .unwrap();
        assert_eq!(source.stats_url(), "http://localhost:8080/stats");
    }
}
