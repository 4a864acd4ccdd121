//! Final behavior options: the stored configuration with navigation and
//! pagination resolved to nodes inside the container.

use serde_json::{Value, json};
use slider_config::{Configuration, PaginationKind, Switch};
use slider_dom::{NodeId, PageDom, classes};

/// Next/prev control nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationTargets {
    /// Next button, if present in the container.
    pub next_el: Option<NodeId>,
    /// Previous button, if present in the container.
    pub prev_el: Option<NodeId>,
}

/// Pagination node and its settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationTargets {
    /// Pagination node, if present in the container.
    pub el: Option<NodeId>,
    /// Indicator style.
    pub kind: PaginationKind,
    /// Whether bullets navigate on click.
    pub clickable: bool,
}

/// Options handed to the behavior library for one container.
///
/// `navigation` and `pagination` supersede the fields of the same name in
/// `config`; every other setting is taken from `config` unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorOptions {
    /// Stored configuration.
    pub config: Configuration,
    /// Resolved navigation, or off.
    pub navigation: Switch<NavigationTargets>,
    /// Resolved pagination, or off.
    pub pagination: Switch<PaginationTargets>,
}

impl BehaviorOptions {
    /// Resolve control nodes for `container`, searching only inside it.
    pub fn overlay(config: Configuration, page: &dyn PageDom, container: NodeId) -> Self {
        let navigation = if config.navigation {
            Switch::On(NavigationTargets {
                next_el: page.query_within(container, &[classes::NEXT_SELECTOR]),
                prev_el: page.query_within(container, &[classes::PREV_SELECTOR]),
            })
        } else {
            Switch::Off
        };
        let pagination = config.pagination.map(|p| PaginationTargets {
            el: page.query_within(container, &[classes::PAGINATION_SELECTOR]),
            kind: p.kind,
            clickable: p.clickable,
        });
        Self {
            config,
            navigation,
            pagination,
        }
    }

    /// The options as a JSON object, with nodes rendered as `"#<id>"` and
    /// missing nodes as `null`.
    pub fn to_value(&self) -> Value {
        let mut value = serde_json::to_value(&self.config).unwrap_or(Value::Null);
        if let Value::Object(map) = &mut value {
            map.insert(
                "navigation".into(),
                match self.navigation {
                    Switch::Off => Value::Bool(false),
                    Switch::On(n) => json!({
                        "nextEl": node_ref(n.next_el),
                        "prevEl": node_ref(n.prev_el),
                    }),
                },
            );
            map.insert(
                "pagination".into(),
                match self.pagination {
                    Switch::Off => Value::Bool(false),
                    Switch::On(p) => json!({
                        "el": node_ref(p.el),
                        "type": p.kind.as_str(),
                        "clickable": p.clickable,
                    }),
                },
            );
        }
        value
    }
}

/// `"#<id>"` for a resolved node, `null` otherwise.
fn node_ref(node: Option<NodeId>) -> Value {
    node.map_or(Value::Null, |n| Value::String(n.to_string()))
}
