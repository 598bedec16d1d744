use guard_config::SourceConfig;
use std::time::Duration;

/// Per-tick retry policy for the polled source.
///
/// Delays grow exponentially (×2) from `initial_delay` and never exceed
/// `max_delay`, which is the tick interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per tick, including the first.
    pub attempts:      u32,
    pub initial_delay: Duration,
    pub max_delay:     Duration,
}

impl RetryPolicy {
    pub fn from_config(cfg: &SourceConfig) -> Self {
        Self {
            attempts:      cfg.retry_attempts.max(1),
            initial_delay: Duration::from_millis(cfg.retry_initial_delay_ms),
            max_delay:     Duration::from_millis(cfg.interval_ms),
        }
    }

    /// Single attempt, no waiting.
    pub fn none() -> Self {
        Self {
            attempts:      1,
            initial_delay: Duration::ZERO,
            max_delay:     Duration::ZERO,
        }
    }

    /// Delay to wait after failed attempt number `attempt` (0-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy {
            attempts:      5,
            initial_delay: Duration::from_millis(200),
            max_delay:     Duration::from_millis(1_000),
        }
    }

    #[test]
    fn doubles_each_attempt() {
        let p = policy();
        assert_eq!(p.delay(0), Duration::from_millis(200));
        assert_eq!(p.delay(1), Duration::from_millis(400));
        assert_eq!(p.delay(2), Duration::from_millis(800));
    }

    #[test]
    fn capped_at_tick_interval() {
        let p = policy();
        assert_eq!(p.delay(3), Duration::from_millis(1_000));
        assert_eq!(p.delay(40), Duration::from_millis(1_000));
    }

    #[test]
    fn from_config_uses_interval_as_cap() {
        let cfg = SourceConfig {
            retry_attempts: 0,
            interval_ms: 2_000,
            ..SourceConfig::default()
        };
        let p = RetryPolicy::from_config(&cfg);
        assert_eq!(p.attempts, 1);
        assert_eq!(p.max_delay, Duration::from_secs(2));
    }
}
