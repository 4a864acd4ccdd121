//! Error handling for the arshad-slider binary.

use std::result;

use thiserror::Error;

/// Convenient result type for CLI operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum Error {
    /// The form could not be read or turned into a configuration.
    #[error("{}", .0.pretty())]
    Config(#[from] slider_config::Error),
    /// Building the preview structure failed.
    #[error("preview failed: {0}")]
    Designer(#[from] slider_designer::Error),
    /// Rendering output failed.
    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}
