//! Button styling through injected scripts.
//!
//! This module provides:
//!
//! - [`ButtonStyle`]: base, hover and click rules for a group of buttons
//! - [`StyleRules`]: an ordered `property -> value` rule set
//! - [`Target`]: a button picked by label or by position
//! - [`apply_button_style`]: emits the scripts that style targeted buttons
//! - [`global_button_style`]: emits a stylesheet for every primary button
//! - [`StyleError`]: errors from the functions above
//!
//! Styles are applied by scripts that run in the parent document after the
//! buttons are rendered. They mutate each button's `style` object and install
//! pointer handlers; hover styling is undone when the pointer leaves, click
//! styling is not.

mod error;
mod inject;
mod rules;
mod script;
mod target;

pub use error::StyleError;
pub use inject::{apply_button_style, global_button_style};
pub use rules::{ButtonStyle, StyleRules};
pub use target::Target;
