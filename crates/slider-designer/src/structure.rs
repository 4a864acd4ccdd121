//! Builds the slider element tree in the authoring host.
//!
//! ```text
//! wrapper  .arshad-slider-wrapper-main.arshad-slider-<n>
//! └─ container  .arshad-slide-container.swiper [data-arshad-slider, data-swiper-config]
//!    ├─ slide wrapper  .arshad-slide-wrapper.swiper-wrapper
//!    │  └─ slide ×3  .arshad-slide-item.swiper-slide
//!    │     └─ "Arshad Slide {i}"
//!    ├─ pagination  (when enabled)
//!    ├─ next        (when navigation is enabled)
//!    └─ prev        (when navigation is enabled)
//! ```
//!
//! Host calls are awaited strictly in the order above; the wrapper is inserted
//! into the document last.

use std::sync::Arc;

use rand::Rng;
use slider_config::Configuration;
use slider_dom::{DesignerHost, ElementPreset, NodeId, classes};
use tracing::{debug, info};

use crate::{Result, error::StepExt};

/// Placeholder slides created for every new slider.
pub const PLACEHOLDER_SLIDES: usize = 3;

/// Exclusive upper bound of the wrapper suffix.
const SUFFIX_RANGE: u32 = 10_000;

/// Inline styles of the outer wrapper.
const WRAPPER_STYLES: &[(&str, &str)] = &[
    ("position", "relative"),
    ("width", "100%"),
    ("margin", "20px 0"),
];

/// Inline styles of each placeholder slide.
const SLIDE_STYLES: &[(&str, &str)] = &[
    ("height", "300px"),
    ("background-color", "#222"),
    ("display", "flex"),
    ("align-items", "center"),
    ("justify-content", "center"),
    ("color", "#fff"),
    ("font-size", "24px"),
    ("border-radius", "8px"),
];

/// Ids of the nodes created for one slider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSlider {
    /// Outermost node, inserted into the document.
    pub wrapper: NodeId,
    /// Class list of the wrapper, including the random suffix class.
    pub wrapper_class: String,
    /// Tagged container carrying the configuration.
    pub container: NodeId,
    /// Parent of the slides.
    pub slide_wrapper: NodeId,
    /// Placeholder slides, in order.
    pub slides: Vec<NodeId>,
    /// Pagination node, when pagination is enabled.
    pub pagination: Option<NodeId>,
    /// Next and previous buttons, when navigation is enabled.
    pub navigation: Option<(NodeId, NodeId)>,
}

/// Builds and updates slider structures through a [`DesignerHost`].
pub struct StructureBuilder {
    /// Host the structure is built in.
    host: Arc<dyn DesignerHost>,
    /// Fixed wrapper suffix; random when `None`.
    suffix: Option<u32>,
}

impl StructureBuilder {
    /// Build through `host` with random wrapper suffixes.
    pub fn new(host: Arc<dyn DesignerHost>) -> Self {
        Self { host, suffix: None }
    }

    /// Use a fixed wrapper suffix instead of a random one.
    #[must_use]
    pub const fn with_suffix(mut self, suffix: u32) -> Self {
        self.suffix = Some(suffix);
        self
    }

    /// Suffix for the next wrapper class.
    fn next_suffix(&self) -> u32 {
        self.suffix
            .unwrap_or_else(|| rand::thread_rng().gen_range(0..SUFFIX_RANGE))
    }

    /// Create a slider for `config` as the last child of `target`, or of the
    /// document root when no target is given.
    pub async fn create(
        &self,
        config: &Configuration,
        target: Option<NodeId>,
    ) -> Result<CreatedSlider> {
        let host = self.host.as_ref();
        let config_json = config.to_json()?;
        let wrapper_class = format!(
            "{} {}{}",
            classes::WRAPPER_MAIN,
            classes::WRAPPER_ID_PREFIX,
            self.next_suffix()
        );

        let wrapper = div(host, "create wrapper").await?;
        host.set_styles(wrapper, WRAPPER_STYLES)
            .await
            .at("style wrapper")?;
        host.set_attribute(wrapper, classes::ATTR_CLASS, &wrapper_class)
            .await
            .at("class wrapper")?;

        let container = div(host, "create container").await?;
        set_classes(host, container, &classes::CONTAINER, "class container").await?;
        host.set_attribute(
            container,
            classes::ATTR_SLIDER,
            classes::ATTR_SLIDER_VALUE,
        )
        .await
        .at("tag container")?;
        host.set_attribute(container, classes::ATTR_CONFIG, &config_json)
            .await
            .at("store configuration")?;

        let slide_wrapper = div(host, "create slide wrapper").await?;
        set_classes(
            host,
            slide_wrapper,
            &classes::SLIDE_WRAPPER,
            "class slide wrapper",
        )
        .await?;

        let mut slides = Vec::with_capacity(PLACEHOLDER_SLIDES);
        for i in 1..=PLACEHOLDER_SLIDES {
            let slide = div(host, "create slide").await?;
            set_classes(host, slide, &classes::SLIDE, "class slide").await?;
            host.set_styles(slide, SLIDE_STYLES)
                .await
                .at("style slide")?;
            let text = div(host, "create slide text").await?;
            host.set_text(text, &format!("Arshad Slide {i}"))
                .await
                .at("set slide text")?;
            host.append(slide, text).await.at("append slide text")?;
            host.append(slide_wrapper, slide)
                .await
                .at("append slide")?;
            slides.push(slide);
        }
        host.append(container, slide_wrapper)
            .await
            .at("append slide wrapper")?;

        let pagination = if config.pagination.is_on() {
            let pag = div(host, "create pagination").await?;
            set_classes(host, pag, &classes::PAGINATION, "class pagination").await?;
            host.append(container, pag).await.at("append pagination")?;
            Some(pag)
        } else {
            None
        };

        let navigation = if config.navigation {
            let next = div(host, "create next button").await?;
            set_classes(host, next, &classes::NEXT, "class next button").await?;
            let prev = div(host, "create prev button").await?;
            set_classes(host, prev, &classes::PREV, "class prev button").await?;
            host.append(container, next)
                .await
                .at("append next button")?;
            host.append(container, prev)
                .await
                .at("append prev button")?;
            Some((next, prev))
        } else {
            None
        };

        host.append(wrapper, container)
            .await
            .at("append container")?;

        let parent = match target {
            Some(t) => t,
            None => host.root_element().await.at("find root")?,
        };
        host.append(parent, wrapper).await.at("insert slider")?;

        info!(%container, %parent, class = %wrapper_class, "slider created");
        Ok(CreatedSlider {
            wrapper,
            wrapper_class,
            container,
            slide_wrapper,
            slides,
            pagination,
            navigation,
        })
    }

    /// Replace the stored configuration of an existing container.
    ///
    /// Only `data-swiper-config` changes: slides, pagination and navigation
    /// nodes are left as they are even when `config` toggles them. Pages that
    /// were already hydrated need a reload to pick the change up.
    pub async fn update(&self, container: NodeId, config: &Configuration) -> Result<()> {
        let json = config.to_json()?;
        self.host
            .set_attribute(container, classes::ATTR_CONFIG, &json)
            .await?;
        debug!(%container, "slider configuration replaced");
        Ok(())
    }
}

/// Create a detached `div`.
async fn div(host: &dyn DesignerHost, step: &'static str) -> Result<NodeId> {
    host.create_element(ElementPreset::DivBlock).await.at(step)
}

/// Set the class list of `node`.
async fn set_classes(
    host: &dyn DesignerHost,
    node: NodeId,
    list: &[&str],
    step: &'static str,
) -> Result<()> {
    host.set_attribute(node, classes::ATTR_CLASS, &classes::class_attr(list))
        .await
        .at(step)
}
