use crate::app::AppState;
use crate::domain::{completion_mark, due_badge, Clock, Todo};
use crate::persistence::KeyValueStore;
use crate::ui::styles::{
    border_style, default_style, done_style, due_style, overdue_style, selected_style, title_style,
};
use chrono::{DateTime, TimeZone};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use std::fmt::Display;

/// Render the todo list pane
pub fn render_list_pane<S: KeyValueStore, C: Clock>(f: &mut Frame, app: &AppState<S, C>, area: Rect) {
    let now = app.local_now();
    let visible = app.visible();

    let items: Vec<ListItem> = visible
        .iter()
        .map(|todo| ListItem::new(create_todo_line(todo, &now)))
        .collect();

    let title = format!(
        " Docket · {} · sorted by {} ({}) ",
        app.filter.to_tag(),
        app.sort.name(),
        visible.len()
    );

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(title, title_style())),
        )
        .style(default_style())
        .highlight_style(selected_style());

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.selected_index));
    }

    f.render_stateful_widget(list, area, &mut state);
}

/// Create a single line for a todo
/// Format: [x] Write proposal   Tomorrow, 09:00
fn create_todo_line<Tz: TimeZone>(todo: &Todo, now: &DateTime<Tz>) -> Line<'static>
where
    Tz::Offset: Display,
{
    let mut spans = Vec::new();

    spans.push(Span::raw(format!("{} ", completion_mark(todo))));

    if todo.completed {
        spans.push(Span::styled(todo.text.clone(), done_style()));
    } else {
        spans.push(Span::raw(todo.text.clone()));
    }

    if let Some(badge) = due_badge(todo, now) {
        spans.push(Span::raw("   ".to_string()));
        if badge.overdue {
            spans.push(Span::styled(format!("⚠ {}", badge.label), overdue_style()));
        } else {
            spans.push(Span::styled(badge.label, due_style()));
        }
    }

    Line::from(spans)
}
