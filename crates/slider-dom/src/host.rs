//! Capabilities the slider pipeline needs from its environments.
//!
//! [`DesignerHost`] is the authoring tool's element API: every call is async
//! and must be awaited in program order. [`PageDom`] is the published page as
//! seen by the hydrator: synchronous queries over the live tree.

use std::fmt;

use async_trait::async_trait;

use crate::HostResult;

/// Opaque handle to an element in a host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element kinds the authoring host can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementPreset {
    /// A plain block container (`div`).
    DivBlock,
}

impl ElementPreset {
    /// HTML tag produced by the preset.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::DivBlock => "div",
        }
    }
}

/// Element API of the authoring environment.
#[async_trait]
pub trait DesignerHost: Send + Sync {
    /// Create a detached element.
    async fn create_element(&self, preset: ElementPreset) -> HostResult<NodeId>;

    /// Set or replace an attribute.
    async fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> HostResult<()>;

    /// Apply inline styles as CSS property/value pairs.
    async fn set_styles(&self, node: NodeId, styles: &[(&str, &str)]) -> HostResult<()>;

    /// Replace the text content of an element.
    async fn set_text(&self, node: NodeId, text: &str) -> HostResult<()>;

    /// Append `child` as the last child of `parent`.
    async fn append(&self, parent: NodeId, child: NodeId) -> HostResult<()>;

    /// All attributes of an element, in insertion order.
    async fn attributes(&self, node: NodeId) -> HostResult<Vec<(String, String)>>;

    /// The element currently selected by the user, if any.
    async fn selected_element(&self) -> HostResult<Option<NodeId>>;

    /// The document root (page body).
    async fn root_element(&self) -> HostResult<NodeId>;
}

/// Read access to a live page.
pub trait PageDom: Send + Sync {
    /// Every attached element carrying all of `classes`, in document order.
    fn query_all(&self, classes: &[&str]) -> Vec<NodeId>;

    /// First descendant of `root` carrying all of `classes`, in document order.
    fn query_within(&self, root: NodeId, classes: &[&str]) -> Option<NodeId>;

    /// Value of an attribute on `node`.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
}

/// Structural change notification delivered to page observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomMutation {
    /// `child` was appended under `parent`.
    ChildAdded {
        /// New parent.
        parent: NodeId,
        /// Appended node (with its subtree).
        child: NodeId,
    },
    /// An attribute changed on `node`.
    AttributeChanged {
        /// Changed node.
        node: NodeId,
        /// Attribute name.
        name: String,
    },
}

impl DomMutation {
    /// True for child list changes, the only kind that can introduce new sliders.
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::ChildAdded { .. })
    }
}
