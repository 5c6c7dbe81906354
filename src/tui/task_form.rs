//! Add-task form state for the terminal user interface.
//!
//! The form holds a draft separately from the store together with an
//! open/closed flag. Submitting hands the draft to the store; only a
//! successful add resets and closes the form.

use chrono::NaiveDate;

use crate::{
    db::{parse_due_input, Storage},
    error::Result,
    fields::Priority,
    store::TaskStore,
    task::Draft,
    tui::input::InputField,
};

/// Field order for Tab navigation.
pub const TITLE_FIELD: usize = 0;
pub const DESCRIPTION_FIELD: usize = 1;
pub const DUE_FIELD: usize = 2;
pub const PRIORITY_FIELD: usize = 3;
const FIELD_COUNT: usize = 4;

/// What happened when the form was submitted.
#[derive(Debug, PartialEq, Eq)]
pub enum Submit {
    /// Task created with this id; the form is reset and closed.
    Created(String),
    /// Blank title; nothing changed and the form stays open.
    Ignored,
    /// Due text could not be read as a date; the form stays open.
    InvalidDue,
}

/// Draft and focus state of the add-task modal.
#[derive(Debug, Default)]
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub due: InputField,
    pub priority: Priority,
    pub current_field: usize,
    open: bool,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the modal is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show the form, keeping whatever draft it already holds.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Discard the draft and hide the form.
    pub fn cancel(&mut self) {
        *self = TaskForm::default();
    }

    /// Move focus to the next field, wrapping at the end.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
    }

    /// Move focus to the previous field, wrapping at the start.
    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
    }

    fn active_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_FIELD => Some(&mut self.title),
            DESCRIPTION_FIELD => Some(&mut self.description),
            DUE_FIELD => Some(&mut self.due),
            _ => None,
        }
    }

    /// The text field under the cursor, if the current field is one.
    pub fn cursor_field(&self) -> Option<&InputField> {
        match self.current_field {
            TITLE_FIELD => Some(&self.title),
            DESCRIPTION_FIELD => Some(&self.description),
            DUE_FIELD => Some(&self.due),
            _ => None,
        }
    }

    /// Type into the focused text field.
    pub fn handle_char(&mut self, c: char) {
        if let Some(field) = self.active_input() {
            field.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(field) = self.active_input() {
            field.handle_backspace();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(field) = self.active_input() {
            field.handle_delete();
        }
    }

    pub fn handle_home(&mut self) {
        if let Some(field) = self.active_input() {
            field.move_home();
        }
    }

    pub fn handle_end(&mut self) {
        if let Some(field) = self.active_input() {
            field.move_end();
        }
    }

    /// Move the cursor in text fields, or change the priority selector.
    pub fn handle_left_right(&mut self, right: bool) {
        if self.current_field == PRIORITY_FIELD {
            self.priority = if right {
                self.priority.next()
            } else {
                self.priority.prev()
            };
        } else if let Some(field) = self.active_input() {
            if right {
                field.move_cursor_right();
            } else {
                field.move_cursor_left();
            }
        }
    }

    /// Build a draft, resolving the due text against `today`.
    ///
    /// Returns `None` when the due text is non-empty but unreadable.
    pub fn to_draft(&self, today: NaiveDate) -> Option<Draft> {
        let due_text = self.due.value.trim();
        let due_date = if due_text.is_empty() {
            None
        } else {
            Some(parse_due_input(due_text, today)?)
        };
        Some(Draft {
            title: self.title.value.clone(),
            description: self.description.value.trim().to_string(),
            due_date,
            priority: self.priority,
        })
    }

    /// Hand the draft to `store`. Storage errors leave the form open.
    pub fn submit<S: Storage>(&mut self, store: &mut TaskStore<S>, today: NaiveDate) -> Result<Submit> {
        let Some(draft) = self.to_draft(today) else {
            return Ok(Submit::InvalidDue);
        };
        match store.add(draft)? {
            Some(id) => {
                self.cancel();
                Ok(Submit::Created(id))
            }
            None => Ok(Submit::Ignored),
        }
    }
}
