//! Authoring-time side of the slider pipeline.
//!
//! - [`StructureBuilder`]: creates the slider element tree and rewrites its
//!   stored configuration
//! - [`Designer`]: owns the host connection and gates create/update actions
//! - [`poll_for_host`]: bounded, cancellable wait for the host API

mod connection;
mod designer;
mod error;
mod structure;

pub use connection::{ConnectionState, HostProbe, PollConfig, PollOutcome, poll_for_host};
pub use designer::{
    Affordance, Designer, NOT_CONNECTED_HELP, RELOAD_NOTICE, UpdateOutcome, is_slider,
};
pub use error::{Error, Result};
pub use structure::{CreatedSlider, PLACEHOLDER_SLIDES, StructureBuilder};
