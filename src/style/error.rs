//! Button styling errors.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned by the button styling functions.
#[derive(Debug, Error)]
pub enum StyleError {
    /// [`apply_button_style`](super::apply_button_style) was called without targets.
    #[error("at least one button must be passed")]
    EmptyTargets,

    /// A script template failed to render.
    #[error("failed to render style script: {0}")]
    Template(#[from] minijinja::Error),

    /// A YAML style definition could not be parsed.
    #[error("invalid style definition: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A style definition file could not be read.
    #[error("failed to read style file \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
