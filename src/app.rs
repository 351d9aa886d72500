use crate::docket::Docket;
use crate::domain::{parse_due_input, Clock, FilterMode, SortMode, SystemClock, Todo, TodoId, UiMode};
use crate::persistence::KeyValueStore;
use chrono::{DateTime, Local};

/// Field being edited in the add form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Text,
    Due,
}

/// Input form state for adding todos
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub text: String,
    /// Raw due date as typed, parsed on submit
    pub due: String,
    pub editing_field: FormField,
}

impl InputFormState {
    fn new() -> Self {
        Self {
            text: String::new(),
            due: String::new(),
            editing_field: FormField::Text,
        }
    }

    fn current_field_mut(&mut self) -> &mut String {
        match self.editing_field {
            FormField::Text => &mut self.text,
            FormField::Due => &mut self.due,
        }
    }
}

/// Main application state
pub struct AppState<S, C = SystemClock> {
    pub docket: Docket<S, C>,
    pub filter: FilterMode,
    pub sort: SortMode,
    /// Index into the visible (filtered and sorted) list
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    /// One-line message shown under the list (save failures, bad input)
    pub status: Option<String>,
    pub changelog_scroll: usize,
}

impl<S: KeyValueStore, C: Clock> AppState<S, C> {
    pub fn new(docket: Docket<S, C>) -> Self {
        Self {
            docket,
            filter: FilterMode::All,
            sort: SortMode::None,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            status: None,
            changelog_scroll: 0,
        }
    }

    /// Current instant in the local time zone, used for due labels
    pub fn local_now(&self) -> DateTime<Local> {
        self.docket.now().with_timezone(&Local)
    }

    /// Todos as they are displayed
    pub fn visible(&self) -> Vec<&Todo> {
        self.docket.view(self.filter, self.sort)
    }

    pub fn selected_id(&self) -> Option<TodoId> {
        self.visible().get(self.selected_index).map(|t| t.id)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.visible().len() {
            self.selected_index += 1;
        }
    }

    /// Keep the selection inside the visible list after it shrinks
    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn set_filter(&mut self, filter: FilterMode) {
        self.filter = filter;
        self.clamp_selection();
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.filter.cycle());
    }

    pub fn toggle_sort(&mut self) {
        self.sort = self.sort.toggle();
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.docket.toggle(id);
            self.after_mutation();
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.docket.delete(id);
            self.after_mutation();
        }
    }

    fn after_mutation(&mut self) {
        self.clamp_selection();
        if let Some(err) = self.docket.take_save_error() {
            self.status = Some(format!("Save failed: {}", err));
        }
    }

    /// Open input form for adding a todo
    pub fn start_add_todo(&mut self) {
        self.input_form = Some(InputFormState::new());
        self.status = None;
        self.ui_mode = UiMode::AddingTodo;
    }

    pub fn input_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = match form.editing_field {
                FormField::Text => FormField::Due,
                FormField::Due => FormField::Text,
            };
        }
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            form.current_field_mut().push(c);
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.current_field_mut().pop();
        }
    }

    /// Submit the add form.
    ///
    /// An unreadable due date keeps the form open; blank text just closes it.
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.take() else {
            return;
        };

        let due = if form.due.trim().is_empty() {
            None
        } else {
            match parse_due_input(&form.due, &Local) {
                Ok(due) => Some(due),
                Err(e) => {
                    self.status = Some(format!("Invalid due date: {}", e));
                    self.input_form = Some(form);
                    return;
                }
            }
        };

        self.status = None;
        self.docket.add(&form.text, due);
        self.ui_mode = UiMode::Normal;
        self.after_mutation();
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn open_changelog(&mut self) {
        self.changelog_scroll = 0;
        self.ui_mode = UiMode::Changelog;
    }

    pub fn close_changelog(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    pub fn scroll_changelog_up(&mut self) {
        self.changelog_scroll = self.changelog_scroll.saturating_sub(1);
    }

    pub fn scroll_changelog_down(&mut self) {
        if self.changelog_scroll + 1 < self.docket.changelog().len() {
            self.changelog_scroll += 1;
        }
    }
}
