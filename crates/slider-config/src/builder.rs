//! Form values to [`Configuration`].
//!
//! Coercion rules:
//! - booleans are `true` only for the exact string `"true"`; absence is `false`
//! - integers use truncating prefix parsing (`"12.7"` is 12, `"300px"` is 300)
//! - a numeric field without a leading integer fails with the field name
//! - sub-fields of autoplay and pagination are read only when enabled

use tracing::trace;

use crate::{
    Autoplay, Breakpoint, Breakpoints, Configuration, Effect, Error, FormSource, Pagination,
    PaginationKind, Result, Switch, fields,
};

/// Builds a [`Configuration`] from a [`FormSource`].
pub struct ConfigBuilder<'a, F: FormSource + ?Sized> {
    /// Form being read.
    form: &'a F,
}

impl<'a, F: FormSource + ?Sized> ConfigBuilder<'a, F> {
    /// Read from `form`.
    pub const fn new(form: &'a F) -> Self {
        Self { form }
    }

    /// Read every field and assemble the configuration.
    pub fn build(&self) -> Result<Configuration> {
        let autoplay = if self.flag(fields::AUTOPLAY_ENABLED) {
            Switch::On(Autoplay {
                delay: self.number(fields::AUTOPLAY_DELAY, 0)?,
                disable_on_interaction: false,
                pause_on_hover: self.flag(fields::PAUSE_ON_HOVER),
            })
        } else {
            Switch::Off
        };

        let pagination = if self.flag(fields::PAG_ENABLED) {
            Switch::On(Pagination {
                kind: self.choice(fields::PAG_TYPE, PaginationKind::from_name, || {
                    PaginationKind::ALL.map(PaginationKind::as_str).join(", ")
                })?,
                clickable: self.flag(fields::PAG_CLICKABLE),
            })
        } else {
            Switch::Off
        };

        let slides_per_view = self.number(fields::SPV_DESKTOP, 1)?;
        let space_between = self.number(fields::SPACE_BETWEEN, 0)?;

        let mut breakpoints = Breakpoints::new();
        breakpoints.insert(
            fields::BREAKPOINT_MOBILE,
            Breakpoint {
                slides_per_view: self.number(fields::SPV_MOBILE, 1)?,
                space_between: fields::MOBILE_SPACE_BETWEEN,
            },
        );
        breakpoints.insert(
            fields::BREAKPOINT_TABLET,
            Breakpoint {
                slides_per_view: self.number(fields::SPV_TABLET, 1)?,
                space_between: fields::TABLET_SPACE_BETWEEN,
            },
        );
        breakpoints.insert(
            fields::BREAKPOINT_DESKTOP,
            Breakpoint {
                slides_per_view,
                space_between,
            },
        );

        let config = Configuration {
            loop_slides: self.flag(fields::LOOP),
            speed: self.number(fields::SPEED, 0)?,
            initial_slide: self.number(fields::INITIAL_SLIDE, 0)?,
            centered_slides: self.flag(fields::CENTERED_SLIDES),
            autoplay,
            navigation: self.flag(fields::NAV_ENABLED),
            pagination,
            effect: self.choice(fields::EFFECT, Effect::from_name, || {
                Effect::ALL.map(Effect::as_str).join(", ")
            })?,
            grab_cursor: self.flag(fields::GRAB_CURSOR),
            slides_per_view,
            space_between,
            breakpoints,
        };
        trace!(?config, "built slider configuration");
        Ok(config)
    }

    /// `true` only for the exact value `"true"`.
    fn flag(&self, field: &'static str) -> bool {
        self.form.field(field).as_deref() == Some("true")
    }

    /// Leading integer of `field`, at least `min` and within `u32`.
    fn number(&self, field: &'static str, min: u32) -> Result<u32> {
        let raw = self.form.field(field);
        let value = raw
            .as_deref()
            .and_then(parse_int_prefix)
            .ok_or_else(|| Error::InvalidNumber {
                field,
                value: raw.clone(),
            })?;
        u32::try_from(value)
            .ok()
            .filter(|v| *v >= min)
            .ok_or(Error::OutOfRange {
                field,
                value,
                min,
                max: u32::MAX,
            })
    }

    /// Value of a select field looked up through `lookup`.
    fn choice<T>(
        &self,
        field: &'static str,
        lookup: impl Fn(&str) -> Option<T>,
        expected: impl Fn() -> String,
    ) -> Result<T> {
        let raw = self.form.field(field).ok_or(Error::MissingField { field })?;
        lookup(&raw).ok_or_else(|| Error::InvalidChoice {
            field,
            value: raw.clone(),
            expected: expected(),
        })
    }
}

/// Parse the leading integer of `s`, ignoring anything after it.
///
/// Leading whitespace and a single sign are accepted. Returns `None` when no
/// digit follows. Digits that do not fit in an `i64` saturate to its bounds.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude = rest[..digits].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}
