//! Completion-toggle session.
//!
//! Toggling a todo's completion checkbox is password-guarded, and instead of
//! owning a prompt it borrows the item's inline delete form. A
//! [`ToggleSession`] makes that borrowing explicit: `begin` captures the
//! delete form's submit binding and prompt before installing the toggle
//! ones, and `abort` is guaranteed to restore them on every non-success
//! exit (cancel, server error, transport error). The success path ends in a
//! full reload of the enclosing list, which discards the borrowed form along
//! with the rest of the page, so no restore is needed there.

use crate::error::StateError;
use crate::state::forms::{Form, FormAction, PLACEHOLDER_TOGGLE};
use crate::state::item_view::{ItemKey, SubView, ViewStates};

/// The delete-form bindings a session must put back.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedBindings {
    pub action: FormAction,
    pub submit_label: String,
    pub placeholder: String,
}

/// A live borrowing of one item's delete form for a status toggle.
///
/// At most one session may exist at a time; the owning `App` holds it in an
/// `Option` and refuses to begin another while one is live (the triggering
/// checkbox is disabled while the request is pending, so a second begin is
/// a caller error rather than an expected path).
#[derive(Debug, Clone)]
pub struct ToggleSession {
    /// The todo the session belongs to
    pub key: ItemKey,
    /// Completion state the user asked for
    pub desired: bool,
    /// Completion state before the click, restored on abort
    pub prior_completed: bool,
    original: CapturedBindings,
}

impl ToggleSession {
    /// Begin a session: reveal the delete sub-view, capture its bindings
    /// and install the toggle ones.
    ///
    /// Fails (without touching anything) when the delete sub-view is
    /// already visible — the previous session's restoration has not run,
    /// or a plain delete prompt is open.
    pub fn begin(
        key: ItemKey,
        prior_completed: bool,
        views: &mut ViewStates,
        form: &mut Form,
    ) -> Result<Self, StateError> {
        if views.mode(&key) == SubView::Delete {
            return Err(StateError::precondition(
                &key,
                "delete sub-view already visible",
            ));
        }

        let original = CapturedBindings {
            action: form.action.clone(),
            submit_label: form.submit_label.clone(),
            placeholder: form.password_placeholder().to_string(),
        };

        let desired = !prior_completed;
        views.show(&key, SubView::Delete);
        form.action = FormAction::ToggleTodo {
            id: key.id.clone(),
            desired,
        };
        form.submit_label = "Change status".to_string();
        form.set_password_placeholder(PLACEHOLDER_TOGGLE);
        form.clear_password();

        Ok(Self {
            key,
            desired,
            prior_completed,
            original,
        })
    }

    /// The checkbox value to render for `key` while the session is live.
    ///
    /// The flip is purely visual until the server confirms it; dropping the
    /// session reverts the checkbox to the authoritative value.
    pub fn checkbox_override(&self, key: &ItemKey) -> Option<bool> {
        (self.key == *key).then_some(self.desired)
    }

    /// End the session after a confirmed toggle.
    ///
    /// The caller reloads the enclosing list; the reload discards the
    /// borrowed form and every other per-node state, so nothing is
    /// restored here.
    pub fn commit(self) {}

    /// Restore the captured bindings and return the item to its plain view.
    ///
    /// Runs on cancel and on every failure path. `form` is re-resolved by
    /// the caller and may be gone if the page re-rendered while the request
    /// was in flight; restoration then degrades to a no-op on the form while
    /// still resetting the sub-view.
    pub fn abort(self, views: &mut ViewStates, form: Option<&mut Form>) {
        if let Some(form) = form {
            form.action = self.original.action;
            form.submit_label = self.original.submit_label;
            form.set_password_placeholder(&self.original.placeholder);
            form.clear_password();
        }
        views.show(&self.key, SubView::View);
    }
}
