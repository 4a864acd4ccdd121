//! Runtime hydration for published slider markup.
//!
//! A [`Hydrator`] finds every slider container on a page, decodes the
//! configuration stored on it, resolves navigation and pagination against
//! the container's own children, and hands the result to a
//! [`CarouselBehavior`]. Each container is attached at most once.
//! [`HydrationDriver`] loads the runtime assets, performs the initial scan
//! and rescans whenever new content appears.

mod assets;
mod behavior;
mod driver;
mod error;
mod hydrator;
mod options;

pub use assets::{
    AssetLoader, AssetManifest, DEFAULT_STYLESHEET, RecordingAssets, SCRIPT_URL,
    STYLESHEET_MARKER, STYLESHEET_URL, load_assets,
};
pub use behavior::{BehaviorHandle, CarouselBehavior, RecordingBehavior};
pub use driver::{ChangeFeed, HydrationDriver, RunSummary};
pub use error::{HydrateError, Result};
pub use hydrator::{Hydrator, ScanReport};
pub use options::{BehaviorOptions, NavigationTargets, PaginationTargets};
