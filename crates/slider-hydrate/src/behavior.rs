//! The carousel behavior library, as seen by the hydrator.

use std::{
    collections::HashSet,
    sync::atomic::{AtomicU64, Ordering},
};

use parking_lot::Mutex;
use slider_dom::NodeId;

use crate::BehaviorOptions;

/// Marker for behavior attached to one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BehaviorHandle(pub u64);

/// A carousel implementation that can take ownership of a container.
pub trait CarouselBehavior: Send + Sync {
    /// Attach behavior to `container`. The library owns it from then on.
    fn attach(
        &self,
        container: NodeId,
        options: &BehaviorOptions,
    ) -> Result<BehaviorHandle, String>;
}

/// Behavior that records every attachment instead of driving a real carousel.
#[derive(Default)]
pub struct RecordingBehavior {
    /// Next handle to hand out.
    next: AtomicU64,
    /// Successful attachments in order.
    attached: Mutex<Vec<(NodeId, BehaviorOptions)>>,
    /// Containers whose attachment fails.
    refuse: Mutex<HashSet<NodeId>>,
}

impl RecordingBehavior {
    /// A recorder that accepts every container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make attachment to `container` fail.
    pub fn refuse(&self, container: NodeId) {
        self.refuse.lock().insert(container);
    }

    /// Undo [`RecordingBehavior::refuse`].
    pub fn allow(&self, container: NodeId) {
        self.refuse.lock().remove(&container);
    }

    /// Every successful attachment so far, in order.
    pub fn attached(&self) -> Vec<(NodeId, BehaviorOptions)> {
        self.attached.lock().clone()
    }

    /// Number of successful attachments to `container`.
    pub fn attach_count(&self, container: NodeId) -> usize {
        self.attached
            .lock()
            .iter()
            .filter(|(n, _)| *n == container)
            .count()
    }
}

impl CarouselBehavior for RecordingBehavior {
    fn attach(
        &self,
        container: NodeId,
        options: &BehaviorOptions,
    ) -> Result<BehaviorHandle, String> {
        if self.refuse.lock().contains(&container) {
            return Err(format!("refused {container}"));
        }
        self.attached.lock().push((container, options.clone()));
        Ok(BehaviorHandle(self.next.fetch_add(1, Ordering::SeqCst)))
    }
}
