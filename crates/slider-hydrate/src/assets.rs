//! Runtime assets the carousel library needs before the first scan.

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use crate::{HydrateError, Result};

/// Default carousel script.
pub const SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/swiper@11/swiper-bundle.min.js";
/// Default carousel stylesheet.
pub const STYLESHEET_URL: &str = "https://cdn.jsdelivr.net/npm/swiper@11/swiper-bundle.min.css";
/// Substring identifying an already linked carousel stylesheet.
pub const STYLESHEET_MARKER: &str = "swiper-bundle.min.css";

/// Baseline styles for slider containers, injected once per page.
pub const DEFAULT_STYLESHEET: &str = "\
.arshad-slide-container {
    width: 100%;
    height: auto;
    overflow: hidden;
}
.arshad-slide-item {
    width: 100%;
    display: flex;
    justify-content: center;
    align-items: center;
}
.arshad-slide-next, .arshad-slide-prev {
    color: #007aff !important;
}
.swiper-pagination-bullet-active {
    background: #007aff !important;
}
";

/// Where to load the carousel library from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetManifest {
    /// Script URL.
    pub script_url: String,
    /// Stylesheet URL.
    pub stylesheet_url: String,
    /// Substring of an existing stylesheet link that counts as already loaded.
    pub stylesheet_marker: String,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            script_url: SCRIPT_URL.to_string(),
            stylesheet_url: STYLESHEET_URL.to_string(),
            stylesheet_marker: STYLESHEET_MARKER.to_string(),
        }
    }
}

/// Page-side asset operations.
#[async_trait]
pub trait AssetLoader: Send + Sync {
    /// True when the carousel library is already available.
    fn has_script(&self) -> bool;

    /// True when a stylesheet whose URL contains `marker` is linked.
    fn has_stylesheet(&self, marker: &str) -> bool;

    /// Load a script and wait until it has executed.
    async fn load_script(&self, url: &str) -> std::result::Result<(), String>;

    /// Link a stylesheet. Completion of the download is not awaited.
    async fn link_stylesheet(&self, url: &str) -> std::result::Result<(), String>;

    /// Add an inline `<style>` block.
    async fn inject_style(&self, css: &str) -> std::result::Result<(), String>;
}

/// Ensure the library and its styles are present. Assets already on the page
/// are not loaded again.
pub async fn load_assets(loader: &dyn AssetLoader, manifest: &AssetManifest) -> Result<()> {
    let fail = |url: &str| {
        let url = url.to_string();
        move |message: String| HydrateError::Assets { url, message }
    };

    if !loader.has_stylesheet(&manifest.stylesheet_marker) {
        loader
            .link_stylesheet(&manifest.stylesheet_url)
            .await
            .map_err(fail(&manifest.stylesheet_url))?;
    }
    if !loader.has_script() {
        loader
            .load_script(&manifest.script_url)
            .await
            .map_err(fail(&manifest.script_url))?;
    }
    loader
        .inject_style(DEFAULT_STYLESHEET)
        .await
        .map_err(fail("inline stylesheet"))?;
    debug!("runtime assets ready");
    Ok(())
}

/// Asset loader that records requests, for tests and offline previews.
#[derive(Default)]
pub struct RecordingAssets {
    /// Report the script as loaded.
    script_present: bool,
    /// Report the stylesheet as linked.
    stylesheet_present: bool,
    /// Target whose requests fail.
    fail_url: Option<String>,
    /// Requests as `kind:target`.
    requests: Mutex<Vec<String>>,
}

impl RecordingAssets {
    /// Nothing loaded yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the script and stylesheet as already present.
    #[must_use]
    pub fn preloaded(mut self) -> Self {
        self.script_present = true;
        self.stylesheet_present = true;
        self
    }

    /// Fail any request for `url`.
    #[must_use]
    pub fn failing(mut self, url: &str) -> Self {
        self.fail_url = Some(url.to_string());
        self
    }

    /// Requests made so far, as `kind:target`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Log a request and fail it when it targets `fail_url`.
    fn record(&self, kind: &str, target: &str) -> std::result::Result<(), String> {
        self.requests.lock().push(format!("{kind}:{target}"));
        if self.fail_url.as_deref() == Some(target) {
            return Err("network error".to_string());
        }
        Ok(())
    }
}

#[async_trait]
impl AssetLoader for RecordingAssets {
    fn has_script(&self) -> bool {
        self.script_present
    }

    fn has_stylesheet(&self, _marker: &str) -> bool {
        self.stylesheet_present
    }

    async fn load_script(&self, url: &str) -> std::result::Result<(), String> {
        self.record("script", url)
    }

    async fn link_stylesheet(&self, url: &str) -> std::result::Result<(), String> {
        self.record("stylesheet", url)
    }

    async fn inject_style(&self, _css: &str) -> std::result::Result<(), String> {
        self.record("style", "inline")
    }
}
