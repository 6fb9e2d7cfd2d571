//! Per-item UI state: sub-view machine, inline forms, toggle session.
//!
//! Everything in this module is ephemeral — created when a page's nodes are
//! built from a server response and discarded on the next full re-render.

pub mod forms;
pub mod item_view;
pub mod toggle;

pub use forms::{Form, FormAction, FormField, FormStore, ItemForms};
pub use item_view::{layout, EntityKind, ItemKey, SubView, SubViewLayout, ViewStates};
pub use toggle::ToggleSession;
