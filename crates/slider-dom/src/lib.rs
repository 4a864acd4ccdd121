//! Host document capabilities for the slider pipeline.
//!
//! - [`DesignerHost`]: async element API of the authoring environment
//! - [`PageDom`]: synchronous queries over a published page
//! - [`DomMutation`]: structural change notifications
//! - [`MemoryDocument`]: an in-memory implementation of both, for tests and previews
//! - [`classes`]: the class/attribute contract shared by builder and hydrator

pub mod classes;
mod error;
mod host;
mod memory;

pub use error::{HostError, HostResult};
pub use host::{DesignerHost, DomMutation, ElementPreset, NodeId, PageDom};
pub use memory::MemoryDocument;
