//! Waiting for the authoring host to become available.

use std::{fmt, sync::Arc, time::Duration};

use slider_dom::DesignerHost;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Lifecycle of the link between the tool and its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Not polling and not connected.
    #[default]
    Disconnected,
    /// Polling for the host.
    Connecting,
    /// Host available; actions are allowed.
    Connected,
    /// Polling gave up. Reload the host environment to retry.
    Failed,
}

impl ConnectionState {
    /// Status text for the tool's header.
    pub const fn status_line(self) -> &'static str {
        match self {
            Self::Disconnected => "Not connected",
            Self::Connecting => "Connecting to Webflow Designer...",
            Self::Connected => "Connected to Webflow Designer",
            Self::Failed => "Connection Failed (Is this Webflow?)",
        }
    }

    /// True when create/update actions may run.
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status_line())
    }
}

/// Something that can report whether the host API object exists yet.
pub trait HostProbe: Send + Sync {
    /// The host, if it is available now.
    fn probe(&self) -> Option<Arc<dyn DesignerHost>>;
}

impl<F> HostProbe for F
where
    F: Fn() -> Option<Arc<dyn DesignerHost>> + Send + Sync,
{
    fn probe(&self) -> Option<Arc<dyn DesignerHost>> {
        self()
    }
}

/// Bounds for host polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between probes; the first probe happens after one interval.
    pub interval: Duration,
    /// Probes before giving up. At least one probe is always made.
    pub max_attempts: u32,
}

impl PollConfig {
    /// Create a poll configuration.
    #[must_use]
    pub const fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Total time budget before a timeout.
    pub fn budget(&self) -> Duration {
        self.interval.saturating_mul(self.max_attempts.max(1))
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(250),
            max_attempts: 30,
        }
    }
}

/// Result of [`poll_for_host`].
pub enum PollOutcome {
    /// The host became available.
    Connected(Arc<dyn DesignerHost>),
    /// The attempt budget ran out.
    TimedOut {
        /// Probes made.
        attempts: u32,
    },
    /// The token was cancelled first.
    Cancelled {
        /// Probes made.
        attempts: u32,
    },
}

impl fmt::Debug for PollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected(_) => f.write_str("Connected"),
            Self::TimedOut { attempts } => {
                f.debug_struct("TimedOut").field("attempts", attempts).finish()
            }
            Self::Cancelled { attempts } => {
                f.debug_struct("Cancelled").field("attempts", attempts).finish()
            }
        }
    }
}

/// Probe for the host every `cfg.interval` until it appears, the attempt
/// budget is spent, or `cancel` fires.
pub async fn poll_for_host(
    probe: &dyn HostProbe,
    cfg: PollConfig,
    cancel: &CancellationToken,
) -> PollOutcome {
    let period = cfg.interval.max(Duration::from_millis(1));
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut attempts = 0u32;
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(attempts, "host polling cancelled");
                return PollOutcome::Cancelled { attempts };
            }
            _ = ticker.tick() => {}
        }
        attempts += 1;
        if let Some(host) = probe.probe() {
            debug!(attempts, "host available");
            return PollOutcome::Connected(host);
        }
        trace!(attempts, "host not available yet");
        if attempts >= cfg.max_attempts {
            return PollOutcome::TimedOut { attempts };
        }
    }
}
