//! The authoring-side coordinator: connection state, create/update actions and
//! selection affordances.

use std::sync::Arc;

use parking_lot::Mutex;
use slider_config::{ConfigBuilder, FormSource};
use slider_dom::{DesignerHost, NodeId, classes};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::{
    ConnectionState, CreatedSlider, Error, HostProbe, PollConfig, PollOutcome, Result,
    StructureBuilder, poll_for_host,
};

/// Instruction shown when an action is attempted before the host is connected.
pub const NOT_CONNECTED_HELP: &str = "APP NOT CONNECTED YET\n\n\
1. Wait for the green 'Connected' text at the top.\n\
2. In Webflow, press CTRL + SHIFT + R to force refresh.\n\
3. Make sure you are inside the Webflow Designer.";

/// Notice shown after a successful update.
pub const RELOAD_NOTICE: &str =
    "Slider settings updated! Refresh the page to see changes in preview.";

/// Which action the tool offers for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Affordance {
    /// Offer to create a new slider.
    #[default]
    Create,
    /// Offer to update the selected slider.
    Update,
}

/// Result of an update action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The selected container's configuration was replaced. A page reload is
    /// needed before the change is visible; see [`RELOAD_NOTICE`].
    Updated {
        /// Updated container.
        container: NodeId,
    },
    /// Nothing is selected.
    NothingSelected,
    /// The selection is not a slider container; nothing was changed.
    NotASlider {
        /// Selected node.
        node: NodeId,
    },
}

/// True when an attribute list marks a slider container.
pub fn is_slider(attributes: &[(String, String)]) -> bool {
    attributes
        .iter()
        .any(|(k, v)| k == classes::ATTR_SLIDER && v == classes::ATTR_SLIDER_VALUE)
}

/// Coordinates the tool's connection to its host and the actions that need it.
pub struct Designer {
    /// Published connection state.
    state: watch::Sender<ConnectionState>,
    /// Host, once connected.
    host: Mutex<Option<Arc<dyn DesignerHost>>>,
    /// Polling bounds used by [`Designer::connect`].
    poll: PollConfig,
    /// Fixed wrapper suffix for deterministic output.
    suffix: Option<u32>,
}

impl Default for Designer {
    fn default() -> Self {
        Self::new(PollConfig::default())
    }
}

impl Designer {
    /// A disconnected coordinator.
    pub fn new(poll: PollConfig) -> Self {
        let (state, _rx) = watch::channel(ConnectionState::Disconnected);
        Self {
            state,
            host: Mutex::new(None),
            poll,
            suffix: None,
        }
    }

    /// Use a fixed wrapper suffix for every slider created.
    #[must_use]
    pub const fn with_suffix(mut self, suffix: u32) -> Self {
        self.suffix = Some(suffix);
        self
    }

    /// Subscribe to connection state changes.
    pub fn state(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Poll `probe` until the host is available.
    ///
    /// On success the state becomes `Connected`; on exhaustion it becomes
    /// `Failed` and is not retried; on cancellation it returns to
    /// `Disconnected`.
    pub async fn connect(&self, probe: &dyn HostProbe, cancel: &CancellationToken) -> Result<()> {
        self.state.send_replace(ConnectionState::Connecting);
        match poll_for_host(probe, self.poll, cancel).await {
            PollOutcome::Connected(host) => {
                *self.host.lock() = Some(host);
                self.state.send_replace(ConnectionState::Connected);
                info!("host connected");
                Ok(())
            }
            PollOutcome::TimedOut { attempts } => {
                self.state.send_replace(ConnectionState::Failed);
                error!(attempts, "host connection timeout");
                Err(Error::ConnectionTimeout { attempts })
            }
            PollOutcome::Cancelled { attempts } => {
                self.state.send_replace(ConnectionState::Disconnected);
                Err(Error::ConnectionCancelled { attempts })
            }
        }
    }

    /// The connected host, or the rejection shown to the user.
    fn host(&self) -> Result<Arc<dyn DesignerHost>> {
        if !self.connection_state().is_connected() {
            return Err(Error::ActionRejected {
                message: NOT_CONNECTED_HELP,
            });
        }
        self.host.lock().clone().ok_or(Error::ActionRejected {
            message: NOT_CONNECTED_HELP,
        })
    }

    /// Structure builder honoring the fixed suffix.
    fn builder(&self, host: Arc<dyn DesignerHost>) -> StructureBuilder {
        let builder = StructureBuilder::new(host);
        match self.suffix {
            Some(s) => builder.with_suffix(s),
            None => builder,
        }
    }

    /// Build a slider from `form`, inserted under the current selection or
    /// the document root.
    pub async fn create<F>(&self, form: &F) -> Result<CreatedSlider>
    where
        F: FormSource + Sync + ?Sized,
    {
        let host = self.host()?;
        let config = ConfigBuilder::new(form).build()?;
        let target = host.selected_element().await?;
        let created = self
            .builder(host)
            .create(&config, target)
            .await
            .inspect_err(|e| error!(error = %e, "slider creation failed"))?;
        Ok(created)
    }

    /// Replace the configuration of the selected slider with one built from `form`.
    pub async fn update<F>(&self, form: &F) -> Result<UpdateOutcome>
    where
        F: FormSource + Sync + ?Sized,
    {
        let host = self.host()?;
        let Some(node) = host.selected_element().await? else {
            return Ok(UpdateOutcome::NothingSelected);
        };
        if !is_slider(&host.attributes(node).await?) {
            warn!(%node, "update requested on a non-slider selection");
            return Ok(UpdateOutcome::NotASlider { node });
        }
        let config = ConfigBuilder::new(form).build()?;
        self.builder(host).update(node, &config).await?;
        Ok(UpdateOutcome::Updated { container: node })
    }

    /// Affordance for `selection`, or `None` when the previous one should stay.
    pub async fn affordance_for(&self, selection: Option<NodeId>) -> Result<Option<Affordance>> {
        let Some(node) = selection else {
            return Ok(None);
        };
        let host = self.host()?;
        let attrs = host.attributes(node).await?;
        Ok(Some(if is_slider(&attrs) {
            Affordance::Update
        } else {
            Affordance::Create
        }))
    }

    /// Follow selection changes and publish the matching affordance until the
    /// selection stream closes. Selections that cannot be inspected are skipped.
    pub async fn watch_selection(
        &self,
        mut selections: mpsc::UnboundedReceiver<Option<NodeId>>,
        affordance: watch::Sender<Affordance>,
    ) {
        while let Some(selection) = selections.recv().await {
            match self.affordance_for(selection).await {
                Ok(Some(a)) => {
                    affordance.send_replace(a);
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "selection skip"),
            }
        }
    }
}
