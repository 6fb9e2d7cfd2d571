//! Keyboard dispatch.
//!
//! Three layers, checked in order: an open modal swallows everything, an
//! active form captures text input, and otherwise keys browse the page.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::models::DeletedKind;
use crate::state::{Form, ItemKey, SubView};
use crate::view_state::PageNav;

use super::{App, Modal, Route, RowRef};

/// Which form the keystrokes currently target.
#[derive(Debug, Clone)]
enum ActiveForm {
    /// The full-page create form
    Create,
    /// An inline form on an item
    Item(ItemKey, SubView),
    /// The answer composer
    Composer,
}

impl App {
    /// Apply one key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let Some(modal) = self.modal.clone() {
            self.handle_modal_key(modal, key);
            return;
        }
        if self.input_active {
            self.handle_form_key(key);
            return;
        }
        self.handle_browse_key(key);
    }

    // ------------------------------------------------------------------
    // Modal layer
    // ------------------------------------------------------------------

    fn handle_modal_key(&mut self, modal: Modal, key: KeyEvent) {
        match modal {
            Modal::Error(_) | Modal::Info(_) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.modal = None;
                }
            }
            Modal::Confirm { action, .. } => match key.code {
                KeyCode::Enter | KeyCode::Char('y') => {
                    self.modal = None;
                    self.run_confirmed(action);
                }
                KeyCode::Esc | KeyCode::Char('n') => {
                    self.modal = None;
                }
                _ => {}
            },
        }
    }

    // ------------------------------------------------------------------
    // Form layer
    // ------------------------------------------------------------------

    fn active_form(&self) -> Option<ActiveForm> {
        if self.create_form.is_some() {
            return Some(ActiveForm::Create);
        }
        if let Some((key, mode)) = self.selected_form_mode() {
            return Some(ActiveForm::Item(key, mode));
        }
        if self.composer.is_some() && matches!(self.selected_row(), Some(RowRef::Composer)) {
            return Some(ActiveForm::Composer);
        }
        None
    }

    fn active_form_mut(&mut self) -> Option<&mut Form> {
        match self.active_form()? {
            ActiveForm::Create => self.create_form.as_mut(),
            ActiveForm::Item(key, mode) => self
                .forms
                .get_mut(&key)
                .and_then(|forms| forms.form_mut(mode)),
            ActiveForm::Composer => self.composer.as_mut(),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(active) = self.active_form() else {
            // The target disappeared (e.g. page reloaded); leave input mode.
            self.input_active = false;
            return;
        };

        match key.code {
            KeyCode::Esc => match active {
                ActiveForm::Create => {
                    let back = match self.route {
                        Route::TodoNew => Route::TodoList { page: 1 },
                        _ => Route::QuestionList { page: 1 },
                    };
                    self.navigate(back);
                }
                ActiveForm::Item(key, mode) => self.cancel_item_form(key, mode),
                ActiveForm::Composer => {
                    // The composer stays on screen; Esc just releases focus.
                    self.input_active = false;
                }
            },
            KeyCode::Enter => match active {
                ActiveForm::Create => self.submit_create_form(),
                ActiveForm::Item(key, mode) => self.submit_item_form(key, mode),
                ActiveForm::Composer => self.submit_composer(),
            },
            KeyCode::Tab | KeyCode::Down => {
                if let Some(form) = self.active_form_mut() {
                    form.next_field();
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Some(form) = self.active_form_mut() {
                    form.prev_field();
                }
            }
            KeyCode::Backspace => {
                if let Some(form) = self.active_form_mut() {
                    form.pop_char();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(form) = self.active_form_mut() {
                    form.push_char(c);
                }
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Browse layer
    // ------------------------------------------------------------------

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') => self.should_quit = true,

            KeyCode::Char('1') => self.navigate(Route::TodoList { page: 1 }),
            KeyCode::Char('2') => self.navigate(Route::QuestionList { page: 1 }),
            KeyCode::Char('3') if self.is_admin => self.navigate(Route::Admin),
            KeyCode::Char('R') => self.reload(),

            KeyCode::Char('n') => match self.route {
                Route::TodoList { .. } => self.navigate(Route::TodoNew),
                Route::QuestionList { .. } => self.navigate(Route::QuestionNew),
                _ => {}
            },

            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.rows().len();
                if len > 0 && self.selected + 1 < len {
                    self.selected += 1;
                }
            }

            KeyCode::Left => self.page_step(false),
            KeyCode::Right => self.page_step(true),

            KeyCode::Esc => {
                if matches!(self.route, Route::QuestionDetail { .. } | Route::NotFound) {
                    self.navigate(Route::QuestionList { page: 1 });
                }
            }

            KeyCode::Enter => self.activate_selected(),

            KeyCode::Char('e') => {
                if let Some(key) = self.selected_item_key() {
                    self.open_form(key, SubView::Edit);
                }
            }
            KeyCode::Char('d') => {
                if let Some(key) = self.selected_item_key() {
                    self.open_form(key, SubView::Delete);
                }
            }
            KeyCode::Char('r') => {
                if let Some(RowRef::Answer(id)) = self.selected_row() {
                    let key = ItemKey::answer(id);
                    if self.views.mode(&key) == SubView::Reply {
                        self.cancel_item_form(key, SubView::Reply);
                    } else {
                        self.open_form(key, SubView::Reply);
                    }
                }
            }
            KeyCode::Char(' ') => {
                if let Some(RowRef::Todo(id)) = self.selected_row() {
                    self.begin_toggle(&id);
                }
            }
            KeyCode::Char('x') if self.is_admin => {
                match self.selected_row() {
                    Some(RowRef::Todo(id)) => {
                        self.request_admin_soft_delete(DeletedKind::Todos, &id)
                    }
                    Some(RowRef::QuestionBody(id)) => {
                        self.request_admin_soft_delete(DeletedKind::Questions, &id)
                    }
                    Some(RowRef::Answer(id)) => {
                        let key = ItemKey::answer(id.clone());
                        // Tombstones offer no actions.
                        if self.views.is_registered(&key, SubView::Edit) {
                            self.request_admin_soft_delete(DeletedKind::Answers, &id);
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    /// Reveal a sub-view and capture input when a form actually opened.
    fn open_form(&mut self, key: ItemKey, mode: SubView) {
        let shown = self.views.show(&key, mode);
        self.input_active = shown != SubView::View;
    }

    fn activate_selected(&mut self) {
        match self.selected_row() {
            Some(RowRef::NewItemLink) => match self.route {
                Route::TodoList { .. } => self.navigate(Route::TodoNew),
                Route::QuestionList { .. } => self.navigate(Route::QuestionNew),
                _ => {}
            },
            Some(RowRef::QuestionLink(id)) => {
                self.navigate(Route::QuestionDetail { id });
            }
            Some(RowRef::LoadMore(id)) => self.activate_load_more(&id),
            Some(RowRef::Composer) => {
                self.input_active = true;
            }
            Some(RowRef::AdminItem { kind, id }) => {
                self.request_admin_hard_delete(kind, &id);
            }
            _ => {}
        }
    }

    /// Follow the previous/next pagination link of whatever strip applies.
    fn page_step(&mut self, forward: bool) {
        match self.route.clone() {
            Route::TodoList { .. } => {
                if let Some(route) = follow(self.todo_nav(), forward) {
                    self.navigate(route);
                }
            }
            Route::QuestionList { .. } => {
                if let Some(route) = follow(self.question_nav(), forward) {
                    self.navigate(route);
                }
            }
            Route::Admin => {
                if let Some(RowRef::AdminPageNav(kind)) = self.selected_row() {
                    if let Some(page) = follow(self.bucket_nav(kind), forward) {
                        self.change_bucket_page(kind, page);
                    }
                }
            }
            _ => {}
        }
    }
}

fn follow<L>(nav: Option<PageNav<L>>, forward: bool) -> Option<L> {
    let nav = nav?;
    if forward {
        nav.next
    } else {
        nav.prev
    }
}
