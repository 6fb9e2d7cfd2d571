//! Inline form state for list items.
//!
//! Each rendered item owns the field values of its inline forms, created
//! with the item's node and discarded with it on the next full re-render.
//! Opening the edit form on one item therefore never disturbs the half-typed
//! edit form of a sibling. Submission is dispatched on a closed
//! [`FormAction`] enum rather than on which widget happened to be visible.

use std::collections::HashMap;

use crate::models::{Answer, Question, Todo};
use crate::state::item_view::{ItemKey, SubView};

/// Field labels shared between form construction and rendering.
pub const LABEL_TASK: &str = "Task";
pub const LABEL_DUE_DATE: &str = "Due date (YYYY-MM-DD)";
pub const LABEL_SUBJECT: &str = "Subject";
pub const LABEL_CONTENT: &str = "Content";
pub const LABEL_PASSWORD: &str = "Password";

/// Placeholder shown in the delete form's password field.
pub const PLACEHOLDER_DELETE: &str = "Delete password";
/// Placeholder installed while a toggle session borrows the delete form.
pub const PLACEHOLDER_TOGGLE: &str = "Status change password";

/// One editable field of a form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// Label displayed above or beside the field
    pub label: String,
    /// Current text
    pub value: String,
    /// Mask the value when rendering
    pub is_password: bool,
    /// Hint shown while the field is empty
    pub placeholder: String,
}

impl FormField {
    /// A plain text field with an initial value.
    pub fn text(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
            is_password: false,
            placeholder: String::new(),
        }
    }

    /// An empty password field.
    pub fn password(placeholder: &str) -> Self {
        Self {
            label: LABEL_PASSWORD.to_string(),
            value: String::new(),
            is_password: true,
            placeholder: placeholder.to_string(),
        }
    }
}

/// What submitting a form does.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    CreateTodo,
    UpdateTodo { id: String },
    DeleteTodo { id: String },
    /// Installed by a toggle session in place of `DeleteTodo`
    ToggleTodo { id: String, desired: bool },
    CreateQuestion,
    UpdateQuestion { id: String },
    DeleteQuestion { id: String },
    CreateAnswer {
        question_id: String,
        parent_id: Option<String>,
    },
    UpdateAnswer { id: String },
    DeleteAnswer { id: String },
}

/// A form: ordered fields, a focus cursor and a submit binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub focus: usize,
    pub action: FormAction,
    pub submit_label: String,
}

impl Form {
    pub fn new(action: FormAction, submit_label: &str, fields: Vec<FormField>) -> Self {
        Self {
            fields,
            focus: 0,
            action,
            submit_label: submit_label.to_string(),
        }
    }

    /// Value of the field with the given label, or `""`.
    pub fn value(&self, label: &str) -> &str {
        self.fields
            .iter()
            .find(|field| field.label == label)
            .map(|field| field.value.as_str())
            .unwrap_or("")
    }

    /// The password field's value, or `""`.
    pub fn password(&self) -> &str {
        self.value(LABEL_PASSWORD)
    }

    /// Clear the password field.
    pub fn clear_password(&mut self) {
        if let Some(field) = self
            .fields
            .iter_mut()
            .find(|field| field.is_password)
        {
            field.value.clear();
        }
    }

    /// Replace the password field's placeholder text.
    pub fn set_password_placeholder(&mut self, placeholder: &str) {
        if let Some(field) = self
            .fields
            .iter_mut()
            .find(|field| field.is_password)
        {
            field.placeholder = placeholder.to_string();
        }
    }

    /// The password field's placeholder text, or `""`.
    pub fn password_placeholder(&self) -> &str {
        self.fields
            .iter()
            .find(|field| field.is_password)
            .map(|field| field.placeholder.as_str())
            .unwrap_or("")
    }

    /// Append a character to the focused field.
    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    /// Remove the last character of the focused field.
    pub fn pop_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    /// Move focus to the next field (wraps).
    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    /// Move focus to the previous field (wraps).
    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }
}

/// The inline forms belonging to one rendered item.
#[derive(Debug, Clone)]
pub struct ItemForms {
    pub edit: Form,
    pub delete: Form,
    /// Reply composer; answers only
    pub reply: Option<Form>,
}

impl ItemForms {
    /// Forms for a todo row, edit pre-filled from the current values.
    pub fn for_todo(todo: &Todo) -> Self {
        let due = todo
            .due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        Self {
            edit: Form::new(
                FormAction::UpdateTodo {
                    id: todo.id.clone(),
                },
                "Save",
                vec![
                    FormField::text(LABEL_TASK, todo.task.clone()),
                    FormField::text(LABEL_DUE_DATE, due),
                    FormField::password(""),
                ],
            ),
            delete: Form::new(
                FormAction::DeleteTodo {
                    id: todo.id.clone(),
                },
                "Confirm",
                vec![FormField::password(PLACEHOLDER_DELETE)],
            ),
            reply: None,
        }
    }

    /// Forms for the question block on the detail page.
    pub fn for_question(question: &Question) -> Self {
        Self {
            edit: Form::new(
                FormAction::UpdateQuestion {
                    id: question.id.clone(),
                },
                "Save",
                vec![
                    FormField::text(LABEL_SUBJECT, question.subject.clone()),
                    FormField::text(LABEL_CONTENT, question.content.clone()),
                    FormField::password(""),
                ],
            ),
            delete: Form::new(
                FormAction::DeleteQuestion {
                    id: question.id.clone(),
                },
                "Confirm",
                vec![FormField::password(PLACEHOLDER_DELETE)],
            ),
            reply: None,
        }
    }

    /// Forms for an answer node, including the nested-reply composer.
    pub fn for_answer(answer: &Answer) -> Self {
        Self {
            edit: Form::new(
                FormAction::UpdateAnswer {
                    id: answer.id.clone(),
                },
                "Save",
                vec![
                    FormField::text(LABEL_CONTENT, answer.content.clone()),
                    FormField::password(""),
                ],
            ),
            delete: Form::new(
                FormAction::DeleteAnswer {
                    id: answer.id.clone(),
                },
                "Confirm",
                vec![FormField::password(PLACEHOLDER_DELETE)],
            ),
            reply: Some(Form::new(
                FormAction::CreateAnswer {
                    question_id: answer.question_id.clone(),
                    parent_id: Some(answer.id.clone()),
                },
                "Post reply",
                vec![
                    FormField::text(LABEL_CONTENT, ""),
                    FormField::password(""),
                ],
            )),
        }
    }

    /// The form backing a sub-view, if the item has one.
    pub fn form(&self, mode: SubView) -> Option<&Form> {
        match mode {
            SubView::Edit => Some(&self.edit),
            SubView::Delete => Some(&self.delete),
            SubView::Reply => self.reply.as_ref(),
            SubView::View => None,
        }
    }

    /// Mutable variant of [`ItemForms::form`].
    pub fn form_mut(&mut self, mode: SubView) -> Option<&mut Form> {
        match mode {
            SubView::Edit => Some(&mut self.edit),
            SubView::Delete => Some(&mut self.delete),
            SubView::Reply => self.reply.as_mut(),
            SubView::View => None,
        }
    }
}

/// All inline forms on the current page, keyed by item.
pub type FormStore = HashMap<ItemKey, ItemForms>;
