//! Slider configuration: the data model shared by the authoring tool and the
//! runtime, and the builder that derives it from authoring form values.
//!
//! - [`Configuration`]: canonical, serializable slider settings
//! - [`ConfigBuilder`]: reads a [`FormSource`] into a [`Configuration`]
//! - [`FormValues`]: an owned form snapshot, loadable from RON files

mod builder;
mod error;
pub mod fields;
mod form;
mod model;

#[cfg(test)]
mod test_build;

pub use builder::{ConfigBuilder, parse_int_prefix};
pub use error::{Error, Result};
pub use form::{FormSource, FormValues};
pub use model::{
    Autoplay, Breakpoint, Breakpoints, Configuration, Effect, Pagination, PaginationKind, Switch,
};

/// Build a configuration from `form`.
pub fn build_config<F: FormSource + ?Sized>(form: &F) -> Result<Configuration> {
    ConfigBuilder::new(form).build()
}
