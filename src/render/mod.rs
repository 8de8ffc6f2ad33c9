//! Rendering sink seam.
//!
//! The host framework owns rendering. This crate only produces text fragments
//! and hands them to a [`RenderSink`]; what the host does with them (embedding
//! a script component, writing markup with HTML allowed) is outside this crate.
//!
//! - [`Fragment`]: a piece of output tagged with how the host should render it
//! - [`RenderSink`]: where fragments go

mod sink;

pub use sink::{Fragment, RenderSink};
