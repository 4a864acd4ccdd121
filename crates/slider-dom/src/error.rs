use thiserror::Error;

use crate::NodeId;

/// Convenient result type for host document operations.
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Failures reported by a host document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The referenced node does not exist in the document.
    #[error("unknown element {0}")]
    UnknownElement(NodeId),

    /// The host refused the operation.
    #[error("{op} rejected: {message}")]
    Rejected {
        /// Operation name, e.g. `append`.
        op: &'static str,
        /// Host supplied reason.
        message: String,
    },
}
