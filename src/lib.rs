//! # Panelkit - session state and button styling for reactive web apps
//!
//! Panelkit holds two small helpers for server-rendered reactive web-app
//! frameworks, where every user interaction re-evaluates the whole page:
//!
//! - **Button styling**: [`apply_button_style`] generates inline scripts that find
//!   rendered buttons (by label or by position) and apply base, hover and click
//!   styles to them.
//! - **Session records**: [`register`] turns a [`Schema`] into a singleton
//!   [`LiveRecord`] stored in the session's key-value store. Re-registering on
//!   the next evaluation pass returns the same record, so field values survive
//!   re-runs.
//!
//! Both helpers talk to the host framework through two traits:
//! [`SessionStore`] for the session-scoped key-value store and [`RenderSink`]
//! for the fragments the page should render.
//!
//! ## Session records
//!
//! ```rust
//! use panelkit::{register, FieldType, Schema, SessionState};
//! use serde_json::json;
//!
//! let mut session = SessionState::new();
//!
//! let counter = register(
//!     &mut session,
//!     Schema::new("Counter").field("clicks", FieldType::Int, 0),
//! )
//! .unwrap();
//! counter.set("clicks", json!(3)).unwrap();
//!
//! // The next evaluation pass declares the same schema again.
//! let again = register(
//!     &mut session,
//!     Schema::new("Counter").field("clicks", FieldType::Int, 0),
//! )
//! .unwrap();
//! assert!(again.same(&counter));
//! assert_eq!(again.get(&session, "clicks").unwrap(), json!(3));
//! ```
//!
//! Widgets can bind straight to a field by using `"<TypeName>.<field>"` as
//! their key. Whatever the widget writes under that key wins on the next read:
//!
//! ```rust
//! use panelkit::{register, FieldType, Schema, SessionState};
//! use serde_json::json;
//!
//! let mut session = SessionState::new();
//! let form = register(
//!     &mut session,
//!     Schema::new("Form").field("name", FieldType::Str, ""),
//! )
//! .unwrap();
//!
//! session.set_value(form.key("name"), "Ada").unwrap();
//! assert_eq!(form.get(&session, "name").unwrap(), json!("Ada"));
//! ```
//!
//! ## Button styling
//!
//! ```rust
//! use panelkit::{apply_button_style, ButtonStyle, Fragment, Target};
//!
//! let style = ButtonStyle::new()
//!     .style("backgroundColor", "#1f77b4")
//!     .hover("backgroundColor", "#2ca02c");
//!
//! let mut fragments: Vec<Fragment> = Vec::new();
//! apply_button_style(&mut fragments, &[Target::from("Submit")], &style).unwrap();
//! assert_eq!(fragments.len(), 1);
//! ```

pub mod render;
pub mod state;
pub mod style;
mod util;

pub use render::{Fragment, RenderSink};
pub use state::{
    register, shadow_key, BehaviorFn, FieldType, LiveRecord, Member, Receiver, Schema,
    SchemaError, SessionState, SessionStore, StateError, StoreValue,
};
pub use style::{
    apply_button_style, global_button_style, ButtonStyle, StyleError, StyleRules, Target,
};
