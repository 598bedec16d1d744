use crate::state::Sample;

/// All messages (events) that can flow into the refresh loop.
///
/// Sources:
/// - Sample source       → `SampleReceived`, `UpstreamUnavailable`
/// - Config watcher task → `ConfigReloaded`
/// - Signal handler      → `Shutdown`
#[derive(Debug, Clone)]
pub enum Message {
    // ── Sample source ─────────────────────────────────────────────────────────
    /// A fresh sample was produced for this tick.
    SampleReceived(Sample),
    /// The polled endpoint failed this tick; carries the reason for display.
    UpstreamUnavailable(String),

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk; triggers a live theme reload.
    ConfigReloaded,

    // ── Internal ──────────────────────────────────────────────────────────────
    /// Graceful shutdown requested.
    Shutdown,
}
