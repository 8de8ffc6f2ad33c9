//! Style rule sets and the button style bundle.

use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::StyleError;

/// An ordered set of `property -> value` style rules.
///
/// Property names and values are passed through verbatim to the page. For
/// per-button scripts the names are DOM style object properties
/// (`backgroundColor`); for the global stylesheet they are CSS properties
/// (`background-color`). Nothing is validated here.
///
/// Setting a property that is already present replaces its value and keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRules {
    rules: Vec<(String, String)>,
}

impl StyleRules {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule, returning the updated set for chaining.
    pub fn add(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Sets a rule in place.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.rules.iter_mut().find(|(p, _)| *p == property) {
            Some(existing) => existing.1 = value,
            None => self.rules.push((property, value)),
        }
    }

    /// Returns the value for a property.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over rules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleRules {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut rules = StyleRules::new();
        for (property, value) in iter {
            rules.set(property, value);
        }
        rules
    }
}

impl Serialize for StyleRules {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rules.len()))?;
        for (property, value) in &self.rules {
            map.serialize_entry(property, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StyleRules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RulesVisitor;

        impl<'de> Visitor<'de> for RulesVisitor {
            type Value = StyleRules;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of style properties to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<StyleRules, A::Error> {
                let mut rules = StyleRules::new();
                while let Some((property, value)) = access.next_entry::<String, String>()? {
                    rules.set(property, value);
                }
                Ok(rules)
            }
        }

        deserializer.deserialize_map(RulesVisitor)
    }
}

/// Base, hover and click styles for a group of buttons.
///
/// The base style is applied right away and restored whenever the pointer
/// leaves the button. Hover and click styles are optional. Click styling is
/// one-way: a second click does not revert it.
///
/// # Example
///
/// ```rust
/// use panelkit::ButtonStyle;
///
/// let style = ButtonStyle::new()
///     .style("color", "white")
///     .style("backgroundColor", "#444")
///     .hover("backgroundColor", "#666")
///     .click("border", "2px solid red");
///
/// assert_eq!(style.base().len(), 2);
/// assert!(style.hover_rules().is_some());
/// ```
///
/// Styles can also be loaded from YAML:
///
/// ```rust
/// use panelkit::ButtonStyle;
///
/// let style = ButtonStyle::from_yaml(
///     r#"
/// style:
///   color: white
/// hover:
///   color: yellow
/// "#,
/// )
/// .unwrap();
/// assert_eq!(style.base().get("color"), Some("white"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ButtonStyle {
    #[serde(default)]
    style: StyleRules,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hover: Option<StyleRules>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    click: Option<StyleRules>,
}

impl ButtonStyle {
    /// Creates a style with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a style from complete rule sets.
    pub fn from_parts(
        style: StyleRules,
        hover: Option<StyleRules>,
        click: Option<StyleRules>,
    ) -> Self {
        Self {
            style,
            hover,
            click,
        }
    }

    /// Parses a YAML definition with optional `style`, `hover` and `click`
    /// mappings.
    pub fn from_yaml(source: &str) -> Result<Self, StyleError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Reads and parses a YAML definition file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StyleError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| StyleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&source)
    }

    /// Adds a base rule.
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.set(property, value);
        self
    }

    /// Adds a hover rule.
    pub fn hover(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.hover
            .get_or_insert_with(StyleRules::new)
            .set(property, value);
        self
    }

    /// Adds a click rule.
    pub fn click(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.click
            .get_or_insert_with(StyleRules::new)
            .set(property, value);
        self
    }

    pub fn base(&self) -> &StyleRules {
        &self.style
    }

    pub fn hover_rules(&self) -> Option<&StyleRules> {
        self.hover.as_ref()
    }

    pub fn click_rules(&self) -> Option<&StyleRules> {
        self.click.as_ref()
    }
}
