//! Sample sources for the refresh loop.
//!
//! A source produces exactly one [`Sample`] per tick:
//! - [`SyntheticSource`]: bounded random walk, never fails
//! - [`PolledSource`]: `GET {base}/stats` with timeout and backoff

pub mod backoff;
pub mod polled;
pub mod synthetic;

pub use backoff::RetryPolicy;
pub use polled::PolledSource;
pub use synthetic::SyntheticSource;

use async_trait::async_trait;
use guard_config::{GuardConfig, SourceMode};
use guard_core::{MediaSources, Result, Sample};
use std::time::Duration;

/// Produces one statistics sample per refresh tick.
#[async_trait]
pub trait SampleSource: Send {
    /// Fetch or synthesize the next sample.
    ///
    /// Any failure is reported as [`guard_core::GuardError::Upstream`]; the
    /// caller keeps its previous state and tries again next tick.
    async fn next_sample(&mut self) -> Result<Sample>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;

    /// Media endpoints the UI should embed for the live feed.
    fn media(&self) -> MediaSources {
        MediaSources::default()
    }
}

/// Build the source selected by `config.source.mode`.
pub fn build_source(config: &GuardConfig) -> Result<Box<dyn SampleSource>> {
    let tick = Duration::from_millis(config.source.interval_ms);
    let source: Box<dyn SampleSource> = match config.source.mode {
        SourceMode::Synthetic => Box::new(SyntheticSource::new(
            &config.tracking.primary_category,
            &config.tracking.categories,
            tick,
        )),
        SourceMode::Polled => Box::new(PolledSource::new(
            &config.source.base_url,
            &config.tracking.primary_category,
            Duration::from_millis(config.source.request_timeout_ms),
            RetryPolicy::from_config(&config.source),
        )?),
    };

    tracing::info!("Sample source: {}", source.describe());
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_synthetic_by_default() {
        let source = build_source(&GuardConfig::default()).unwrap();
        assert!(source.describe().starts_with("synthetic"));
        assert!(source.media().is_simulated());
    }

    #[test]
    fn builds_polled_with_media_links() {
        let mut config = GuardConfig::default();
        config.source.mode = SourceMode::Polled;
        config.source.base_url = "http://tracker.local:8080".into();

        let source = build_source(&config).unwrap();
        assert!(source.describe().contains("tracker.local"));
        assert_eq!(
            source.media().mjpeg.as_deref(),
            Some("http://tracker.local:8080/mjpeg")
        );
    }
}
