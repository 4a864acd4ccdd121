//! Class and attribute names shared by the structure builder, the hydrator
//! and the default stylesheet. These strings are a published contract and must
//! stay byte-exact.

/// Attribute marking a slider container.
pub const ATTR_SLIDER: &str = "data-arshad-slider";
/// Value of [`ATTR_SLIDER`] on a slider container.
pub const ATTR_SLIDER_VALUE: &str = "true";
/// Attribute holding the JSON configuration.
pub const ATTR_CONFIG: &str = "data-swiper-config";
/// Attribute holding the class list.
pub const ATTR_CLASS: &str = "class";

/// Outer wrapper base class; a per-slider suffix class is appended.
pub const WRAPPER_MAIN: &str = "arshad-slider-wrapper-main";
/// Prefix of the per-slider suffix class.
pub const WRAPPER_ID_PREFIX: &str = "arshad-slider-";

/// Container classes.
pub const CONTAINER: [&str; 2] = ["arshad-slide-container", "swiper"];
/// Slide wrapper classes.
pub const SLIDE_WRAPPER: [&str; 2] = ["arshad-slide-wrapper", "swiper-wrapper"];
/// Slide classes.
pub const SLIDE: [&str; 2] = ["arshad-slide-item", "swiper-slide"];
/// Pagination classes.
pub const PAGINATION: [&str; 2] = ["arshad-slide-pagination", "swiper-pagination"];
/// Next button classes.
pub const NEXT: [&str; 2] = ["arshad-slide-next", "swiper-button-next"];
/// Previous button classes.
pub const PREV: [&str; 2] = ["arshad-slide-prev", "swiper-button-prev"];

/// Class used to locate the next button inside a container.
pub const NEXT_SELECTOR: &str = "swiper-button-next";
/// Class used to locate the previous button inside a container.
pub const PREV_SELECTOR: &str = "swiper-button-prev";
/// Class used to locate the pagination node inside a container.
pub const PAGINATION_SELECTOR: &str = "swiper-pagination";

/// Join a class list into a `class` attribute value.
pub fn class_attr(classes: &[&str]) -> String {
    classes.join(" ")
}

/// True when the whitespace separated `class_value` contains every class in `wanted`.
pub fn has_classes(class_value: &str, wanted: &[&str]) -> bool {
    wanted
        .iter()
        .all(|w| class_value.split_ascii_whitespace().any(|c| c == *w))
}
