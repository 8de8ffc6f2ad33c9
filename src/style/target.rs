//! Button targets.

use serde::Serialize;

/// Identifies the buttons a style applies to.
///
/// A call to [`apply_button_style`](super::apply_button_style) takes a list
/// of targets, and the kind of the *first* target picks the lookup mode for
/// the whole list:
///
/// - [`Target::Label`]: every listed label is matched against the visible
///   text of the rendered buttons; the first button with equal text wins.
/// - [`Target::Index`]: the listed positions index the page's buttons in
///   document order directly. This is faster since no text is compared.
///
/// Mixing kinds is not rejected. In label mode an index is compared as its
/// decimal text; in index mode a label ends up in the script's index list as
/// a string and the browser resolves nothing for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Target {
    /// Match by visible button text.
    Label(String),
    /// Match by position among all rendered buttons.
    Index(usize),
}

impl Target {
    /// Returns `true` if this target is a label.
    pub fn is_label(&self) -> bool {
        matches!(self, Target::Label(_))
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Label(label) => f.write_str(label),
            Target::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for Target {
    fn from(label: &str) -> Self {
        Target::Label(label.to_string())
    }
}

impl From<String> for Target {
    fn from(label: String) -> Self {
        Target::Label(label)
    }
}

impl From<usize> for Target {
    fn from(index: usize) -> Self {
        Target::Index(index)
    }
}
