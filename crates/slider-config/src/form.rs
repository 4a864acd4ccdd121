//! Sources of authoring form values.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, fields};

/// Read access to the current value of named form fields.
pub trait FormSource {
    /// Current value of `name`, or `None` when the field does not exist.
    fn field(&self, name: &str) -> Option<String>;
}

impl FormSource for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl FormSource for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<F: FormSource + ?Sized> FormSource for &F {
    fn field(&self, name: &str) -> Option<String> {
        (**self).field(name)
    }
}

/// A snapshot of form values, stored on disk as a RON map of field name to string.
///
/// ```ron
/// {
///     "loop": "true",
///     "speed": "500",
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    /// An empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// The authoring form as it appears before the user edits anything.
    pub fn defaults() -> Self {
        Self(
            fields::DEFAULTS
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    /// Set a field, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), value.into());
    }

    /// Remove a field entirely.
    pub fn remove(&mut self, name: &str) {
        self.0.remove(name);
    }

    /// Apply every value of `other` over this form.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Parse a RON form snapshot.
    pub fn from_ron(text: &str) -> Result<Self> {
        parse_ron(text, None)
    }

    /// Load a RON form snapshot from disk and lay it over [`FormValues::defaults`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::Read {
            path: Some(path.to_path_buf()),
            message: e.to_string(),
        })?;
        let mut values = Self::defaults();
        values.merge(parse_ron(&text, Some(path))?);
        Ok(values)
    }

    /// Render as pretty RON.
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()).map_err(|e| {
            Error::Serialize {
                message: e.to_string(),
            }
        })
    }
}

impl FormSource for FormValues {
    fn field(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

/// Decode RON text, attributing errors to `path`.
fn parse_ron(text: &str, path: Option<&Path>) -> Result<FormValues> {
    ron::from_str(text).map_err(|e| Error::Parse {
        path: path.map(Path::to_path_buf),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ron_map_parses() {
        let form = FormValues::from_ron(r#"{"loop": "true", "speed": "500"}"#).unwrap();
        assert_eq!(form.field("loop").as_deref(), Some("true"));
        assert_eq!(form.field("speed").as_deref(), Some("500"));
        assert_eq!(form.field("effect"), None);
    }

    #[test]
    fn ron_syntax_error_is_reported() {
        let err = FormValues::from_ron(r#"{"loop": "#).unwrap_err();
        assert!(matches!(err, Error::Parse { path: None, .. }));
    }

    #[test]
    fn defaults_round_trip_through_ron() {
        let defaults = FormValues::defaults();
        let text = defaults.to_ron().unwrap();
        assert_eq!(FormValues::from_ron(&text).unwrap(), defaults);
    }

    #[test]
    fn render_failure_is_not_a_parse_error() {
        let err = Error::Serialize {
            message: "exceeded recursion limit".into(),
        };
        assert_eq!(err.field(), None);
        assert_eq!(
            err.pretty(),
            "failed to render form as RON: exceeded recursion limit"
        );
        assert!(!matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn merge_overrides_defaults() {
        let mut form = FormValues::defaults();
        form.merge(FormValues::new().with(fields::SPEED, "900"));
        assert_eq!(form.field(fields::SPEED).as_deref(), Some("900"));
        assert_eq!(form.field(fields::EFFECT).as_deref(), Some("slide"));
    }
}
