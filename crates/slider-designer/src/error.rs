use std::result::Result as StdResult;

use slider_dom::HostError;
use thiserror::Error;

/// Convenient result type for the designer crate.
pub type Result<T> = StdResult<T, Error>;

/// Failures surfaced to the authoring user.
#[derive(Debug, Error)]
pub enum Error {
    /// The host never became available within the polling budget.
    #[error("host connection timed out after {attempts} attempts")]
    ConnectionTimeout {
        /// Probes made before giving up.
        attempts: u32,
    },

    /// Connection polling was cancelled before it completed.
    #[error("host connection cancelled after {attempts} attempts")]
    ConnectionCancelled {
        /// Probes made before cancellation.
        attempts: u32,
    },

    /// An action was attempted while disconnected.
    #[error("{message}")]
    ActionRejected {
        /// Instruction shown to the user.
        message: &'static str,
    },

    /// The form could not be turned into a configuration.
    #[error("invalid form: {0}")]
    Config(#[from] slider_config::Error),

    /// A host call failed while assembling the slider. Nodes created before
    /// the failure remain in the document.
    #[error("building slider failed at {step}: {source}")]
    StructureBuild {
        /// Build step that failed.
        step: &'static str,
        /// Host error.
        #[source]
        source: HostError,
    },

    /// A host call outside structure building failed.
    #[error("host error: {0}")]
    Host(#[from] HostError),
}

/// Attach a build step name to host failures.
pub(crate) trait StepExt<T> {
    /// Map a host error into [`Error::StructureBuild`] for `step`.
    fn at(self, step: &'static str) -> Result<T>;
}

impl<T> StepExt<T> for StdResult<T, HostError> {
    fn at(self, step: &'static str) -> Result<T> {
        self.map_err(|source| Error::StructureBuild { step, source })
    }
}
