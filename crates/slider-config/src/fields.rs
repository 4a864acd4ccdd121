//! Authoring form field names and their initial values.

/// `"true"` when the slider wraps around.
pub const LOOP: &str = "loop";
/// Transition duration in milliseconds.
pub const SPEED: &str = "speed";
/// Index of the first visible slide.
pub const INITIAL_SLIDE: &str = "initialSlide";
/// `"true"` to center the active slide.
pub const CENTERED_SLIDES: &str = "centeredSlides";
/// `"true"` to enable autoplay.
pub const AUTOPLAY_ENABLED: &str = "autoplay-enabled";
/// Autoplay delay in milliseconds.
pub const AUTOPLAY_DELAY: &str = "autoplay-delay";
/// `"true"` to pause autoplay on hover.
pub const PAUSE_ON_HOVER: &str = "pauseOnHover";
/// `"true"` to render next/prev controls.
pub const NAV_ENABLED: &str = "nav-enabled";
/// `"true"` to render pagination.
pub const PAG_ENABLED: &str = "pag-enabled";
/// Pagination style select.
pub const PAG_TYPE: &str = "pag-type";
/// `"true"` for clickable pagination.
pub const PAG_CLICKABLE: &str = "pag-clickable";
/// Transition effect select.
pub const EFFECT: &str = "effect";
/// `"true"` for a grab cursor.
pub const GRAB_CURSOR: &str = "grabCursor";
/// Slides per view from 1200px up; also the top-level value.
pub const SPV_DESKTOP: &str = "spv-desktop";
/// Slides per view from 768px up.
pub const SPV_TABLET: &str = "spv-tablet";
/// Slides per view from 480px up.
pub const SPV_MOBILE: &str = "spv-mobile";
/// Gap between slides in pixels; also used by the 1200px breakpoint.
pub const SPACE_BETWEEN: &str = "spaceBetween";

/// Minimum viewport width of the mobile breakpoint.
pub const BREAKPOINT_MOBILE: u32 = 480;
/// Minimum viewport width of the tablet breakpoint.
pub const BREAKPOINT_TABLET: u32 = 768;
/// Minimum viewport width of the desktop breakpoint.
pub const BREAKPOINT_DESKTOP: u32 = 1200;

/// Fixed gap of the mobile breakpoint.
pub(crate) const MOBILE_SPACE_BETWEEN: u32 = 10;
/// Fixed gap of the tablet breakpoint.
pub(crate) const TABLET_SPACE_BETWEEN: u32 = 20;

/// Initial values of the authoring form.
pub const DEFAULTS: &[(&str, &str)] = &[
    (LOOP, "false"),
    (SPEED, "300"),
    (INITIAL_SLIDE, "0"),
    (CENTERED_SLIDES, "false"),
    (AUTOPLAY_ENABLED, "false"),
    (AUTOPLAY_DELAY, "3000"),
    (PAUSE_ON_HOVER, "true"),
    (NAV_ENABLED, "true"),
    (PAG_ENABLED, "true"),
    (PAG_TYPE, "bullets"),
    (PAG_CLICKABLE, "true"),
    (EFFECT, "slide"),
    (GRAB_CURSOR, "true"),
    (SPV_DESKTOP, "3"),
    (SPV_TABLET, "2"),
    (SPV_MOBILE, "1"),
    (SPACE_BETWEEN, "30"),
];
