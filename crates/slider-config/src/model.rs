//! The canonical slider configuration and its JSON shape.
//!
//! The serialized form of [`Configuration`] is the contract between the
//! authoring tool and the runtime hydrator, so field names and order here are
//! fixed. `autoplay` and `pagination` are either the literal `false` or a fully
//! populated object; see [`Switch`].

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

use crate::{Error, Result};

/// A feature that is either disabled (`false` on the wire) or enabled with a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Switch<T> {
    /// Feature disabled; serialized as `false`.
    #[default]
    Off,
    /// Feature enabled with its settings; serialized as the payload object.
    On(T),
}

impl<T> Switch<T> {
    /// True when the feature is enabled.
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On(_))
    }

    /// Map the payload, keeping `Off` as `Off`.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Switch<U> {
        match self {
            Self::Off => Switch::Off,
            Self::On(v) => Switch::On(f(v)),
        }
    }
}

impl<T: Serialize> Serialize for Switch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Off => serializer.serialize_bool(false),
            Self::On(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Switch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Flag(bool),
            Value(T),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Flag(false) => Ok(Self::Off),
            Repr::Flag(true) => Err(D::Error::custom(
                "expected `false` or a settings object, found `true`",
            )),
            Repr::Value(v) => Ok(Self::On(v)),
        }
    }
}

/// Autoplay settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Autoplay {
    /// Delay between transitions in milliseconds.
    pub delay: u32,
    /// Stop autoplay after user interaction. The form never enables this.
    pub disable_on_interaction: bool,
    /// Pause while the pointer is over the slider.
    pub pause_on_hover: bool,
}

/// Pagination indicator style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationKind {
    /// One dot per slide.
    Bullets,
    /// `current / total` text.
    Fraction,
    /// Progress bar.
    Progressbar,
}

/// Pagination settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pagination {
    /// Indicator style.
    #[serde(rename = "type")]
    pub kind: PaginationKind,
    /// Whether bullets navigate on click.
    pub clickable: bool,
}

/// Slide transition effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    /// Horizontal slide.
    Slide,
    /// Cross fade.
    Fade,
    /// 3D cube.
    Cube,
    /// Coverflow.
    Coverflow,
    /// Card flip.
    Flip,
    /// Creative transforms.
    Creative,
    /// Stacked cards.
    Cards,
}

impl Effect {
    /// Every effect, in form order.
    pub const ALL: [Self; 7] = [
        Self::Slide,
        Self::Fade,
        Self::Cube,
        Self::Coverflow,
        Self::Flip,
        Self::Creative,
        Self::Cards,
    ];

    /// Wire name of the effect.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slide => "slide",
            Self::Fade => "fade",
            Self::Cube => "cube",
            Self::Coverflow => "coverflow",
            Self::Flip => "flip",
            Self::Creative => "creative",
            Self::Cards => "cards",
        }
    }

    /// Look up an effect by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == name)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PaginationKind {
    /// Every pagination style, in form order.
    pub const ALL: [Self; 3] = [Self::Bullets, Self::Fraction, Self::Progressbar];

    /// Wire name of the style.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bullets => "bullets",
            Self::Fraction => "fraction",
            Self::Progressbar => "progressbar",
        }
    }

    /// Look up a style by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

/// Per-viewport overrides applied at and above a minimum width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Breakpoint {
    /// Slides visible at once.
    pub slides_per_view: u32,
    /// Gap between slides in pixels.
    pub space_between: u32,
}

/// Breakpoints keyed by minimum viewport width, ascending.
pub type Breakpoints = BTreeMap<u32, Breakpoint>;

/// Canonical carousel configuration.
///
/// Built once from the authoring form by [`crate::ConfigBuilder`] and never
/// mutated afterwards. It is stored as JSON on the slider container and read
/// back verbatim by the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Wrap around after the last slide.
    #[serde(rename = "loop")]
    pub loop_slides: bool,
    /// Transition duration in milliseconds.
    pub speed: u32,
    /// Index of the slide shown first.
    pub initial_slide: u32,
    /// Center the active slide.
    pub centered_slides: bool,
    /// Autoplay, or `false`.
    pub autoplay: Switch<Autoplay>,
    /// Render next/prev controls.
    pub navigation: bool,
    /// Pagination, or `false`.
    pub pagination: Switch<Pagination>,
    /// Transition effect.
    pub effect: Effect,
    /// Show a grab cursor over the slider.
    pub grab_cursor: bool,
    /// Slides visible at once on the widest viewport.
    pub slides_per_view: u32,
    /// Gap between slides in pixels.
    pub space_between: u32,
    /// Responsive overrides.
    pub breakpoints: Breakpoints,
}

impl Configuration {
    /// Serialize to the compact JSON stored in the container attribute.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Json {
            message: e.to_string(),
        })
    }

    /// Parse a stored attribute value.
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| Error::Json {
            message: e.to_string(),
        })
    }
}
