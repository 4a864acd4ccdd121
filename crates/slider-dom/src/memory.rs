//! In-memory document implementing both host capabilities.
//!
//! Used by tests and by the CLI preview. Supports failure injection for host
//! calls and records every [`DesignerHost`] call by name.

use std::{fmt::Write as _, sync::Arc};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::{
    DesignerHost, DomMutation, ElementPreset, HostError, HostResult, NodeId, PageDom,
    classes::{ATTR_CLASS, has_classes},
};

/// Mutation channel depth; slow observers see `Lagged` and should rescan.
const EVENT_CAPACITY: usize = 256;

/// One element of the tree.
#[derive(Debug, Clone)]
struct Node {
    /// Tag name.
    tag: String,
    /// Attributes in insertion order.
    attrs: Vec<(String, String)>,
    /// Inline styles in insertion order.
    styles: Vec<(String, String)>,
    /// Text content.
    text: Option<String>,
    /// Parent, `None` when detached or the root.
    parent: Option<NodeId>,
    /// Children in document order.
    children: Vec<NodeId>,
}

impl Node {
    /// A detached, empty element.
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            styles: Vec::new(),
            text: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Value of attribute `name`.
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// True when the class list contains all of `classes`.
    fn matches(&self, classes: &[&str]) -> bool {
        self.attr(ATTR_CLASS)
            .is_some_and(|value| has_classes(value, classes))
    }
}

/// Pending injected failure.
struct FailRule {
    /// Operation to fail.
    op: &'static str,
    /// Matching calls still allowed through.
    skip: usize,
    /// Rejection message.
    message: String,
}

/// Document state behind the shared lock.
struct Inner {
    /// Arena indexed by `NodeId`.
    nodes: Vec<Node>,
    /// The `body` element.
    root: NodeId,
    /// Current selection.
    selected: Option<NodeId>,
    /// Recorded host calls.
    calls: Vec<String>,
    /// Pending injected failure.
    fail: Option<FailRule>,
}

impl Inner {
    /// Look up a node.
    fn node(&self, id: NodeId) -> HostResult<&Node> {
        usize::try_from(id.0)
            .ok()
            .and_then(|i| self.nodes.get(i))
            .ok_or(HostError::UnknownElement(id))
    }

    /// Look up a node mutably.
    fn node_mut(&mut self, id: NodeId) -> HostResult<&mut Node> {
        usize::try_from(id.0)
            .ok()
            .and_then(|i| self.nodes.get_mut(i))
            .ok_or(HostError::UnknownElement(id))
    }

    /// Add a detached node.
    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u64);
        self.nodes.push(node);
        id
    }

    /// True when `id` is connected to the root.
    fn is_attached(&self, mut id: NodeId) -> bool {
        loop {
            if id == self.root {
                return true;
            }
            match self.node(id).ok().and_then(|n| n.parent) {
                Some(p) => id = p,
                None => return false,
            }
        }
    }

    /// True when `candidate` is `id` or one of its ancestors.
    fn is_ancestor_or_self(&self, candidate: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == candidate {
                return true;
            }
            match self.node(id).ok().and_then(|n| n.parent) {
                Some(p) => id = p,
                None => return false,
            }
        }
    }

    /// Preorder walk below `root`, excluding `root` itself.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.node(root) {
            Ok(n) => n.children.iter().rev().copied().collect(),
            Err(_) => return out,
        };
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Ok(n) = self.node(id) {
                stack.extend(n.children.iter().rev().copied());
            }
        }
        out
    }

    /// Record a host call and consume an injected failure if it applies.
    fn enter(&mut self, op: &'static str) -> HostResult<()> {
        self.calls.push(op.to_string());
        let Some(rule) = self.fail.as_mut() else {
            return Ok(());
        };
        if rule.op != op {
            return Ok(());
        }
        if rule.skip > 0 {
            rule.skip -= 1;
            return Ok(());
        }
        let message = rule.message.clone();
        self.fail = None;
        Err(HostError::Rejected { op, message })
    }

    /// Set an attribute; returns whether the node is attached.
    fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> HostResult<bool> {
        let node = self.node_mut(id)?;
        match node.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => node.attrs.push((name.to_string(), value.to_string())),
        }
        Ok(self.is_attached(id))
    }

    /// Move `child` under `parent`; returns whether `parent` is attached.
    fn append(&mut self, parent: NodeId, child: NodeId) -> HostResult<bool> {
        self.node(parent)?;
        let old_parent = self.node(child)?.parent;
        if self.is_ancestor_or_self(child, parent) {
            return Err(HostError::Rejected {
                op: "append",
                message: format!("{child} is an ancestor of {parent}"),
            });
        }
        if let Some(old) = old_parent {
            self.node_mut(old)?.children.retain(|c| *c != child);
        }
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(self.is_attached(parent))
    }
}

/// Shared, cloneable in-memory document rooted at a `body` element.
#[derive(Clone)]
pub struct MemoryDocument {
    /// Shared document state.
    inner: Arc<Mutex<Inner>>,
    /// Mutation notifications.
    events: broadcast::Sender<DomMutation>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create an empty document containing only its root.
    pub fn new() -> Self {
        let (events, _rx) = broadcast::channel(EVENT_CAPACITY);
        let inner = Inner {
            nodes: vec![Node::new("body")],
            root: NodeId(0),
            selected: None,
            calls: Vec::new(),
            fail: None,
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
            events,
        }
    }

    /// The root element.
    pub fn root(&self) -> NodeId {
        self.inner.lock().root
    }

    /// Subscribe to structural and attribute changes of attached nodes.
    pub fn subscribe(&self) -> broadcast::Receiver<DomMutation> {
        self.events.subscribe()
    }

    /// Create a detached element directly, bypassing call recording.
    pub fn element(&self, tag: &str) -> NodeId {
        self.inner.lock().push(Node::new(tag))
    }

    /// Set an attribute directly, bypassing call recording and failure injection.
    pub fn set_attr(&self, node: NodeId, name: &str, value: &str) -> HostResult<()> {
        let attached = self.inner.lock().set_attr(node, name, value)?;
        if attached {
            self.emit(DomMutation::AttributeChanged {
                node,
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Append directly, bypassing call recording and failure injection.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> HostResult<()> {
        let attached = self.inner.lock().append(parent, child)?;
        if attached {
            self.emit(DomMutation::ChildAdded { parent, child });
        }
        Ok(())
    }

    /// Detach `node` from its parent. Its subtree is kept but no longer queryable.
    pub fn detach(&self, node: NodeId) -> HostResult<()> {
        let mut inner = self.inner.lock();
        let parent = inner.node(node)?.parent;
        if let Some(parent) = parent {
            inner.node_mut(parent)?.children.retain(|c| *c != node);
            inner.node_mut(node)?.parent = None;
        }
        Ok(())
    }

    /// Set the element reported by [`DesignerHost::selected_element`].
    pub fn select(&self, node: Option<NodeId>) {
        self.inner.lock().selected = node;
    }

    /// Make the `skip`+1-th future call of `op` fail with `message`.
    pub fn fail_on(&self, op: &'static str, skip: usize, message: &str) {
        self.inner.lock().fail = Some(FailRule {
            op,
            skip,
            message: message.to_string(),
        });
    }

    /// Names of every [`DesignerHost`] call made so far.
    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().calls.clone()
    }

    /// Number of recorded calls named `op`.
    pub fn call_count(&self, op: &str) -> usize {
        self.inner.lock().calls.iter().filter(|c| *c == op).count()
    }

    /// Child ids of `node`.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.inner
            .lock()
            .node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Parent of `node`.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.inner.lock().node(node).ok().and_then(|n| n.parent)
    }

    /// Text content set on `node`.
    pub fn text(&self, node: NodeId) -> Option<String> {
        self.inner.lock().node(node).ok().and_then(|n| n.text.clone())
    }

    /// Inline styles set on `node`.
    pub fn styles(&self, node: NodeId) -> Vec<(String, String)> {
        self.inner
            .lock()
            .node(node)
            .map(|n| n.styles.clone())
            .unwrap_or_default()
    }

    /// Attributes of `node`, in insertion order.
    pub fn attrs(&self, node: NodeId) -> Vec<(String, String)> {
        self.inner
            .lock()
            .node(node)
            .map(|n| n.attrs.clone())
            .unwrap_or_default()
    }

    /// Descendants of `root` carrying all of `classes`, in document order.
    pub fn descendants_with(&self, root: NodeId, classes: &[&str]) -> Vec<NodeId> {
        let inner = self.inner.lock();
        inner
            .descendants(root)
            .into_iter()
            .filter(|id| inner.node(*id).is_ok_and(|n| n.matches(classes)))
            .collect()
    }

    /// Render the subtree at `node` as indented HTML.
    pub fn to_html(&self, node: NodeId) -> String {
        let inner = self.inner.lock();
        let mut out = String::new();
        render(&inner, node, 0, &mut out);
        out
    }

    /// Broadcast a mutation, ignoring the absence of subscribers.
    fn emit(&self, event: DomMutation) {
        self.events.send(event).ok();
    }
}

/// Append the HTML of `id` and its subtree to `out`.
fn render(inner: &Inner, id: NodeId, depth: usize, out: &mut String) {
    let Ok(node) = inner.node(id) else { return };
    let pad = "  ".repeat(depth);
    write!(out, "{pad}<{}", node.tag).ok();
    for (k, v) in &node.attrs {
        write!(out, " {k}=\"{}\"", escape(v, true)).ok();
    }
    if !node.styles.is_empty() {
        let style = node
            .styles
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ");
        write!(out, " style=\"{}\"", escape(&style, true)).ok();
    }
    out.push('>');
    if node.children.is_empty() {
        if let Some(text) = &node.text {
            out.push_str(&escape(text, false));
        }
        writeln!(out, "</{}>", node.tag).ok();
        return;
    }
    out.push('\n');
    if let Some(text) = &node.text {
        writeln!(out, "{pad}  {}", escape(text, false)).ok();
    }
    for child in &node.children {
        render(inner, *child, depth + 1, out);
    }
    writeln!(out, "{pad}</{}>", node.tag).ok();
}

/// HTML-escape `s`; quotes are escaped only inside attributes.
fn escape(s: &str, attr: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

#[async_trait]
impl DesignerHost for MemoryDocument {
    async fn create_element(&self, preset: ElementPreset) -> HostResult<NodeId> {
        let mut inner = self.inner.lock();
        inner.enter("create_element")?;
        Ok(inner.push(Node::new(preset.tag())))
    }

    async fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> HostResult<()> {
        self.inner.lock().enter("set_attribute")?;
        self.set_attr(node, name, value)
    }

    async fn set_styles(&self, node: NodeId, styles: &[(&str, &str)]) -> HostResult<()> {
        let mut inner = self.inner.lock();
        inner.enter("set_styles")?;
        let n = inner.node_mut(node)?;
        for (k, v) in styles {
            match n.styles.iter_mut().find(|(name, _)| name == k) {
                Some((_, value)) => *value = (*v).to_string(),
                None => n.styles.push(((*k).to_string(), (*v).to_string())),
            }
        }
        Ok(())
    }

    async fn set_text(&self, node: NodeId, text: &str) -> HostResult<()> {
        let mut inner = self.inner.lock();
        inner.enter("set_text")?;
        inner.node_mut(node)?.text = Some(text.to_string());
        Ok(())
    }

    async fn append(&self, parent: NodeId, child: NodeId) -> HostResult<()> {
        self.inner.lock().enter("append")?;
        self.append_child(parent, child)
    }

    async fn attributes(&self, node: NodeId) -> HostResult<Vec<(String, String)>> {
        let mut inner = self.inner.lock();
        inner.enter("attributes")?;
        Ok(inner.node(node)?.attrs.clone())
    }

    async fn selected_element(&self) -> HostResult<Option<NodeId>> {
        let mut inner = self.inner.lock();
        inner.enter("selected_element")?;
        Ok(inner.selected)
    }

    async fn root_element(&self) -> HostResult<NodeId> {
        let mut inner = self.inner.lock();
        inner.enter("root_element")?;
        Ok(inner.root)
    }
}

impl PageDom for MemoryDocument {
    fn query_all(&self, classes: &[&str]) -> Vec<NodeId> {
        let root = self.root();
        self.descendants_with(root, classes)
    }

    fn query_within(&self, root: NodeId, classes: &[&str]) -> Option<NodeId> {
        self.descendants_with(root, classes).into_iter().next()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.inner
            .lock()
            .node(node)
            .ok()
            .and_then(|n| n.attr(name).map(str::to_string))
    }
}
