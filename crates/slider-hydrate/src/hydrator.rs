//! Scans a page for slider containers and attaches behavior to each once.

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use slider_config::Configuration;
use slider_dom::{NodeId, PageDom, classes};
use tracing::{debug, info, warn};

use crate::{BehaviorHandle, BehaviorOptions, CarouselBehavior, HydrateError};

/// What one scan did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Containers matched by class.
    pub visited: usize,
    /// Containers attached during this scan.
    pub attached: Vec<NodeId>,
    /// Containers skipped because they were attached earlier.
    pub already_attached: usize,
    /// Containers skipped because another scan is attaching them right now.
    pub in_progress: usize,
    /// Containers without a stored configuration, or with an empty one.
    pub missing_config: usize,
    /// Containers skipped because of an error.
    pub failed: Vec<HydrateError>,
}

/// Registry entry for a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// A scan has claimed the container and is attaching it.
    Pending,
    /// Behavior is attached.
    Attached(BehaviorHandle),
}

/// Attaches carousel behavior to slider containers on a page.
///
/// Each container moves from unattached to attached at most once; handles are
/// never released, even if the container leaves the page.
pub struct Hydrator {
    /// Page being hydrated.
    page: Arc<dyn PageDom>,
    /// Library that takes over each container.
    behavior: Arc<dyn CarouselBehavior>,
    /// Registry keyed by container.
    slots: Mutex<HashMap<NodeId, Slot>>,
}

impl Hydrator {
    /// Hydrate `page` using `behavior`.
    pub fn new(page: Arc<dyn PageDom>, behavior: Arc<dyn CarouselBehavior>) -> Self {
        Self {
            page,
            behavior,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Handle attached to `container`, if any.
    pub fn handle(&self, container: NodeId) -> Option<BehaviorHandle> {
        match self.slots.lock().get(&container) {
            Some(Slot::Attached(h)) => Some(*h),
            _ => None,
        }
    }

    /// Number of containers attached so far.
    pub fn attached_count(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|s| matches!(s, Slot::Attached(_)))
            .count()
    }

    /// Visit every container on the page and attach behavior where missing.
    ///
    /// Safe to call repeatedly, concurrently and from inside
    /// [`CarouselBehavior::attach`]: a container is claimed under the registry
    /// lock, and the lock is released while it is being attached.
    pub fn scan(&self) -> ScanReport {
        let mut report = ScanReport::default();
        for node in self.page.query_all(&classes::CONTAINER) {
            report.visited += 1;
            let Some(raw) = self
                .page
                .attribute(node, classes::ATTR_CONFIG)
                .filter(|raw| !raw.is_empty())
            else {
                if self.handle(node).is_some() {
                    report.already_attached += 1;
                } else {
                    debug!(%node, "container without configuration");
                    report.missing_config += 1;
                }
                continue;
            };
            match self.claim(node) {
                Some(Slot::Attached(_)) => {
                    report.already_attached += 1;
                    continue;
                }
                Some(Slot::Pending) => {
                    report.in_progress += 1;
                    continue;
                }
                None => {}
            }
            match self.attach(node, &raw) {
                Ok(handle) => {
                    self.slots.lock().insert(node, Slot::Attached(handle));
                    info!(%node, "initialized slider");
                    report.attached.push(node);
                }
                Err(e) => {
                    self.slots.lock().remove(&node);
                    warn!(error = %e, "slider skipped");
                    report.failed.push(e);
                }
            }
        }
        debug!(
            visited = report.visited,
            attached = report.attached.len(),
            failed = report.failed.len(),
            "scan finished"
        );
        report
    }

    /// Mark `node` pending unless it is already registered; returns the
    /// existing slot in that case.
    fn claim(&self, node: NodeId) -> Option<Slot> {
        let mut slots = self.slots.lock();
        if let Some(slot) = slots.get(&node) {
            return Some(*slot);
        }
        slots.insert(node, Slot::Pending);
        None
    }

    /// Decode the stored configuration and hand the container to the library.
    /// Runs without the registry lock.
    fn attach(&self, node: NodeId, raw: &str) -> Result<BehaviorHandle, HydrateError> {
        let config = Configuration::from_json(raw)
            .map_err(|source| HydrateError::ConfigParse { node, source })?;
        let options = BehaviorOptions::overlay(config, self.page.as_ref(), node);
        self.behavior
            .attach(node, &options)
            .map_err(|message| HydrateError::Attach { node, message })
    }
}
