//! The refresh loop: one fetch, one update, one publish per tick.

use guard_core::{GuardError, Message};
use guard_source::SampleSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::dashboard::Dashboard;
use crate::views::ViewSet;

/// Where the loop is within the current tick, observable through
/// [`RefreshLoop::phases`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickPhase {
    #[default]
    Idle,
    Fetching,
    Rendering,
}

pub struct RefreshLoop {
    dashboard: Dashboard,
    source:    Box<dyn SampleSource>,
    publisher: watch::Sender<Arc<ViewSet>>,
    interval:  Duration,
    phase:     watch::Sender<TickPhase>,
    ticks:     u64,
}

impl RefreshLoop {
    /// Build the loop and publish an initial (pre-sample) view set.
    pub fn new(
        dashboard: Dashboard,
        source: Box<dyn SampleSource>,
        interval: Duration,
    ) -> (Self, watch::Receiver<Arc<ViewSet>>) {
        let (publisher, views) = watch::channel(dashboard.publish());
        let this = Self {
            dashboard,
            source,
            publisher,
            interval,
            phase: watch::Sender::new(TickPhase::Idle),
            ticks: 0,
        };
        (this, views)
    }

    pub fn phase(&self) -> TickPhase {
        *self.phase.borrow()
    }

    /// Follow phase changes from outside the loop task.
    pub fn phases(&self) -> watch::Receiver<TickPhase> {
        self.phase.subscribe()
    }

    fn enter(&self, phase: TickPhase) {
        self.phase.send_replace(phase);
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Run one full tick.  The next tick cannot start until this returns.
    pub async fn tick(&mut self) {
        self.ticks += 1;
        self.enter(TickPhase::Fetching);
        let msg = match self.source.next_sample().await {
            Ok(sample) => Message::SampleReceived(sample),
            Err(GuardError::Upstream(reason)) => Message::UpstreamUnavailable(reason),
            Err(other) => Message::UpstreamUnavailable(other.to_string()),
        };
        self.dashboard.update(msg);

        self.enter(TickPhase::Rendering);
        self.publish();
        self.enter(TickPhase::Idle);
        debug!(tick = self.ticks, "Tick complete");
    }

    fn publish(&self) {
        // send_replace never fails, even with every receiver dropped.
        self.publisher.send_replace(self.dashboard.publish());
    }

    /// Drive ticks until `control` yields [`Message::Shutdown`] or closes.
    ///
    /// Ticks that come due while one is still running are skipped, not queued.
    pub async fn run(mut self, mut control: mpsc::Receiver<Message>) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("Refresh loop started ({:?} interval)", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.tick().await,
                msg = control.recv() => match msg {
                    Some(Message::Shutdown) | None => break,
                    Some(msg) => {
                        self.dashboard.update(msg);
                        self.publish();
                    }
                },
            }
        }

        info!("Refresh loop stopped after {} ticks", self.ticks);
    }
}
