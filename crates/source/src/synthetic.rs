use crate::SampleSource;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use guard_core::{Result, Sample};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::time::Duration;

/// Per-tick change of the primary count.
pub const WALK_DELTA: RangeInclusive<i32> = -1..=2;
/// New detections per tick.
pub const DETECTIONS_PER_TICK: RangeInclusive<u32> = 5..=15;
/// Mean confidence range before rounding to 3 decimals.
pub const CONFIDENCE: RangeInclusive<f64> = 0.75..=0.99;
/// Frame rate range before rounding to 1 decimal.
pub const FPS: RangeInclusive<f64> = 20.0..=30.0;

/// Mock tracker: the primary count follows a bounded random walk clamped at
/// zero, everything else is drawn from fixed uniform ranges.  Never fails.
#[derive(Debug)]
pub struct SyntheticSource<R = StdRng> {
    rng:        R,
    primary:    String,
    categories: Vec<String>,
    tick:       Duration,
    count:      u32,
    last:       Option<DateTime<Local>>,
}

impl SyntheticSource<StdRng> {
    pub fn new(primary: &str, categories: &[String], tick: Duration) -> Self {
        Self::with_rng(StdRng::from_entropy(), primary, categories, tick)
    }
}

impl<R: Rng + Send> SyntheticSource<R> {
    /// Build with an explicit RNG; tests pass a seeded one.
    pub fn with_rng(rng: R, primary: &str, categories: &[String], tick: Duration) -> Self {
        Self {
            rng,
            primary: primary.to_string(),
            categories: categories.to_vec(),
            tick,
            count: 0,
            last: None,
        }
    }

    /// Current value of the walk.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Produce the next sample at `now`.
    pub fn generate(&mut self, now: DateTime<Local>) -> Sample {
        // Never step backwards, even if the wall clock does.
        let timestamp = match self.last {
            Some(last) if now < last => last,
            _ => now,
        };
        self.last = Some(timestamp);

        let previous = self.count;
        let delta = self.rng.gen_range(WALK_DELTA);
        self.count = step_count(previous, delta);
        let (inflow, outflow) = flow(previous, self.count);

        let fps = round_to(self.rng.gen_range(FPS), 1);
        let mut detection_counts = BTreeMap::new();
        for label in &self.categories {
            let value = if *label == self.primary {
                self.count
            } else {
                self.rng.gen_range(0..=category_max(label))
            };
            detection_counts.insert(label.clone(), value);
        }
        detection_counts
            .entry(self.primary.clone())
            .or_insert(self.count);

        Sample {
            timestamp,
            total_bisons: self.count,
            fps,
            avg_confidence: round_to(self.rng.gen_range(CONFIDENCE), 3),
            new_detections: self.rng.gen_range(DETECTIONS_PER_TICK),
            frames: (fps * self.tick.as_secs_f64()).round() as u32,
            inflow,
            outflow,
            detection_counts,
        }
        .normalized()
    }
}

#[async_trait]
impl<R: Rng + Send> SampleSource for SyntheticSource<R> {
    async fn next_sample(&mut self) -> Result<Sample> {
        Ok(self.generate(Local::now()))
    }

    fn describe(&self) -> String {
        format!(
            "synthetic random walk ({} categories, {:?} tick)",
            self.categories.len(),
            self.tick
        )
    }
}

/// Apply one walk step, clamping at zero (and at `u32::MAX`).
pub fn step_count(current: u32, delta: i32) -> u32 {
    (i64::from(current) + i64::from(delta)).clamp(0, i64::from(u32::MAX)) as u32
}

/// Split a count change into `(inflow, outflow)`.
fn flow(previous: u32, current: u32) -> (u32, u32) {
    if current >= previous {
        (current - previous, 0)
    } else {
        (0, previous - current)
    }
}

/// Upper bound of the uniform draw for a secondary category.
fn category_max(label: &str) -> u32 {
    match label {
        "deer"  => 5,
        "elk"   => 3,
        "other" => 10,
        _       => 5,
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn categories() -> Vec<String> {
        ["bison", "deer", "elk", "other"].map(String::from).to_vec()
    }

    fn seeded(seed: u64) -> SyntheticSource<StdRng> {
        SyntheticSource::with_rng(
            StdRng::seed_from_u64(seed),
            "bison",
            &categories(),
            Duration::from_secs(2),
        )
    }

    fn at(secs: i64) -> DateTime<Local> {
        Local.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn step_clamps_at_zero() {
        assert_eq!(step_count(0, -1), 0);
        assert_eq!(step_count(1, -1), 0);
        assert_eq!(step_count(3, 2), 5);
        assert_eq!(step_count(u32::MAX, 2), u32::MAX);
    }

    #[test]
    fn flow_splits_change() {
        assert_eq!(flow(3, 5), (2, 0));
        assert_eq!(flow(5, 4), (0, 1));
        assert_eq!(flow(0, 0), (0, 0));
    }

    #[test]
    fn samples_stay_in_declared_ranges() {
        let mut source = seeded(7);
        for tick in 0..200 {
            let s = source.generate(at(1_000 + tick));
            assert!((20.0..=30.0).contains(&s.fps));
            assert!((0.75..=0.99).contains(&s.avg_confidence));
            assert!(DETECTIONS_PER_TICK.contains(&s.new_detections));
            assert!(s.detection_counts["deer"] <= 5);
            assert!(s.detection_counts["elk"] <= 3);
            assert!(s.detection_counts["other"] <= 10);
            assert_eq!(s.detection_counts["bison"], s.total_bisons);
        }
    }

    #[test]
    fn walk_moves_by_declared_delta() {
        let mut source = seeded(11);
        let mut previous = 0u32;
        for tick in 0..200 {
            let s = source.generate(at(tick));
            let delta = i64::from(s.total_bisons) - i64::from(previous);
            assert!((-1..=2).contains(&delta), "delta {delta} out of range");
            assert_eq!(
                i64::from(s.inflow) - i64::from(s.outflow),
                delta
            );
            previous = s.total_bisons;
        }
    }

    #[test]
    fn frames_follow_fps_and_tick() {
        let mut source = seeded(3);
        let s = source.generate(at(0));
        assert_eq!(s.frames, (s.fps * 2.0).round() as u32);
    }

    #[test]
    fn timestamps_never_go_backwards() {
        let mut source = seeded(1);
        let first = source.generate(at(100));
        let second = source.generate(at(50));
        assert_eq!(second.timestamp, first.timestamp);
    }

    #[test]
    fn primary_missing_from_categories_is_still_reported() {
        let mut source = SyntheticSource::with_rng(
            StdRng::seed_from_u64(0),
            "bison",
            &["deer".to_string()],
            Duration::from_secs(1),
        );
        let s = source.generate(at(0));
        assert!(s.detection_counts.contains_key("bison"));
    }

    #[tokio::test]
    async fn next_sample_never_fails() {
        let mut source = seeded(5);
        for _ in 0..10 {
            source.next_sample().await.unwrap();
        }
        assert!(source.describe().starts_with("synthetic"));
    }
}
