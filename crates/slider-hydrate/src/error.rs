use slider_dom::NodeId;
use thiserror::Error;

/// Convenient result type for the hydrate crate.
pub type Result<T> = std::result::Result<T, HydrateError>;

/// Failures while hydrating a page. Per-container failures never abort a scan.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HydrateError {
    /// The stored configuration of a container could not be decoded.
    #[error("container {node}: {source}")]
    ConfigParse {
        /// Container that was skipped.
        node: NodeId,
        /// Decoder error.
        #[source]
        source: slider_config::Error,
    },

    /// The behavior library refused to attach.
    #[error("container {node}: attach failed: {message}")]
    Attach {
        /// Container that was left unattached.
        node: NodeId,
        /// Library message.
        message: String,
    },

    /// A runtime asset could not be loaded; no scan was run.
    #[error("failed to load {url}: {message}")]
    Assets {
        /// Asset that failed.
        url: String,
        /// Loader message.
        message: String,
    },
}
