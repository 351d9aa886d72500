pub mod changelog_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod styles;

use crate::app::AppState;
use crate::domain::{Clock, UiMode};
use crate::persistence::KeyValueStore;
use changelog_pane::render_changelog_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use ratatui::{text::Span, widgets::Paragraph, Frame};
use styles::status_style;

/// Main render function - draws the entire UI
pub fn render<S: KeyValueStore, C: Clock>(f: &mut Frame, app: &AppState<S, C>) {
    let size = f.size();
    let layout = create_layout(size, app.ui_mode == UiMode::Changelog);

    render_keybindings(f, app.ui_mode, layout.keybindings_area);
    render_list_pane(f, app, layout.list_area);

    if let Some(changelog_area) = layout.changelog_area {
        render_changelog_pane(f, app, changelog_area);
    }

    if let Some(status) = &app.status {
        let line = Paragraph::new(Span::styled(format!(" {}", status), status_style()));
        f.render_widget(line, layout.status_area);
    }

    // Render input form if active
    if let Some(form) = &app.input_form {
        render_input_form(f, form, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docket::Docket;
    use crate::domain::FixedClock;
    use crate::persistence::MemoryStore;
    use chrono::{TimeZone, Utc};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn create_test_app() -> AppState<MemoryStore, FixedClock> {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap());
        let mut docket = Docket::open(MemoryStore::new(), clock).unwrap();
        docket.add("Buy milk", None);
        docket.add("Walk dog", None);
        docket.toggle(2);
        AppState::new(docket)
    }

    #[test]
    fn test_render_list_and_drawer() {
        let mut app = create_test_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();

        terminal.draw(|f| render(f, &app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("[ ] Buy milk"));
        assert!(text.contains("[x] Walk dog"));
        assert!(!text.contains("Changelog"));

        app.open_changelog();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Changelog (3)"));
        assert!(text.contains("created"));
    }

    #[test]
    fn test_render_form_and_status() {
        let mut app = create_test_app();
        app.start_add_todo();
        app.status = Some("Save failed".to_string());
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| render(f, &app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Add Todo"));
        assert!(text.contains("Save failed"));
    }
}
