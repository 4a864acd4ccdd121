//! Keeps a page hydrated as content is added to it.

use std::{sync::Arc, time::Duration};

use slider_dom::DomMutation;
use tokio::{
    sync::broadcast::{self, error::TryRecvError},
    time::{Instant, MissedTickBehavior, interval_at},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::{AssetLoader, AssetManifest, Hydrator, Result, ScanReport, load_assets};

/// How the driver learns that the page changed.
pub enum ChangeFeed {
    /// Mutation notifications from the page.
    Notifications(broadcast::Receiver<DomMutation>),
    /// No notifications available; rescan on a fixed period.
    Interval(Duration),
}

/// Totals for one driver run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Scans performed, including the initial one.
    pub scans: usize,
    /// Containers attached across all scans.
    pub attached: usize,
}

impl RunSummary {
    /// Count one scan.
    fn record(&mut self, report: &ScanReport) {
        self.scans += 1;
        self.attached += report.attached.len();
    }
}

/// Loads assets, runs the initial scan, then rescans whenever the page's
/// structure changes.
pub struct HydrationDriver {
    /// Hydrator rescanned on every change.
    hydrator: Arc<Hydrator>,
}

impl HydrationDriver {
    /// Drive `hydrator`.
    pub fn new(hydrator: Arc<Hydrator>) -> Self {
        Self { hydrator }
    }

    /// Run until `cancel` fires or the notification stream closes.
    ///
    /// An asset failure is returned before any scan. A burst of notifications
    /// is coalesced into a single rescan; a lagged receiver always rescans.
    pub async fn run(
        &self,
        assets: &dyn AssetLoader,
        manifest: &AssetManifest,
        feed: ChangeFeed,
        cancel: CancellationToken,
    ) -> Result<RunSummary> {
        load_assets(assets, manifest).await?;

        let mut summary = RunSummary::default();
        summary.record(&self.hydrator.scan());

        match feed {
            ChangeFeed::Notifications(rx) => self.follow(rx, &cancel, &mut summary).await,
            ChangeFeed::Interval(period) => self.poll(period, &cancel, &mut summary).await,
        }

        info!(
            scans = summary.scans,
            attached = summary.attached,
            "hydration driver stopped"
        );
        Ok(summary)
    }

    /// Rescan on structural notifications until cancelled or closed.
    async fn follow(
        &self,
        mut rx: broadcast::Receiver<DomMutation>,
        cancel: &CancellationToken,
        summary: &mut RunSummary,
    ) {
        loop {
            let first = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                ev = rx.recv() => ev,
            };
            let (mut rescan, mut closed) = match first {
                Ok(m) => (m.is_structural(), false),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(skipped = n, "mutation feed lagged");
                    (true, false)
                }
                Err(broadcast::error::RecvError::Closed) => break,
            };
            loop {
                match rx.try_recv() {
                    Ok(m) => rescan |= m.is_structural(),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Lagged(n)) => {
                        warn!(skipped = n, "mutation feed lagged");
                        rescan = true;
                    }
                    Err(TryRecvError::Closed) => {
                        closed = true;
                        break;
                    }
                }
            }
            if rescan {
                trace!("page structure changed");
                summary.record(&self.hydrator.scan());
            }
            if closed {
                debug!("mutation feed closed");
                break;
            }
        }
    }

    /// Rescan every `period` until cancelled.
    async fn poll(&self, period: Duration, cancel: &CancellationToken, summary: &mut RunSummary) {
        let period = period.max(Duration::from_millis(1));
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => summary.record(&self.hydrator.scan()),
            }
        }
    }
}
