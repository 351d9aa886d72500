use crate::app::AppState;
use crate::domain::{Clock, FilterMode, UiMode};
use crate::persistence::KeyValueStore;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key<S: KeyValueStore, C: Clock>(app: &mut AppState<S, C>, key: KeyEvent) -> bool {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTodo => handle_input_form_mode(app, key),
        UiMode::Changelog => handle_changelog_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode<S: KeyValueStore, C: Clock>(app: &mut AppState<S, C>, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,

        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected(),
        KeyCode::Char('x') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('a') => app.start_add_todo(),

        KeyCode::Char('1') => app.set_filter(FilterMode::All),
        KeyCode::Char('2') => app.set_filter(FilterMode::Active),
        KeyCode::Char('3') => app.set_filter(FilterMode::Completed),
        KeyCode::Char('f') => app.cycle_filter(),
        KeyCode::Char('s') => app.toggle_sort(),

        KeyCode::Char('l') => app.open_changelog(),

        _ => {}
    }
    false
}

/// Handle keys while the add form is open
fn handle_input_form_mode<S: KeyValueStore, C: Clock>(app: &mut AppState<S, C>, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Tab | KeyCode::BackTab => app.input_form_toggle_field(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    false
}

/// Handle keys while the changelog drawer is open
fn handle_changelog_mode<S: KeyValueStore, C: Clock>(app: &mut AppState<S, C>, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Esc | KeyCode::Char('l') => app.close_changelog(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_changelog_up(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_changelog_down(),
        _ => {}
    }
    false
}
