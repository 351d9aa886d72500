use crate::app::AppState;
use crate::domain::{ChangelogEntry, Clock};
use crate::persistence::KeyValueStore;
use crate::ui::styles::{border_style, change_kind_style, default_style, hint_style, title_style};
use chrono::{DateTime, TimeZone};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use std::fmt::Display;

/// Render the changelog drawer, oldest entry first
pub fn render_changelog_pane<S: KeyValueStore, C: Clock>(f: &mut Frame, app: &AppState<S, C>, area: Rect) {
    let now = app.local_now();
    let entries = app.docket.changelog();

    let items: Vec<ListItem> = if entries.is_empty() {
        vec![ListItem::new(Line::from(Span::styled("  Nothing recorded yet", hint_style())))]
    } else {
        entries
            .iter()
            .skip(app.changelog_scroll)
            .map(|entry| ListItem::new(create_entry_line(entry, &now.timezone())))
            .collect()
    };

    let title = format!(" Changelog ({}) ", entries.len());
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}

/// Format: created  "Buy milk"  2024-01-15 10:00
fn create_entry_line<Tz: TimeZone>(entry: &ChangelogEntry, tz: &Tz) -> Line<'static>
where
    Tz::Offset: Display,
{
    let when = entry.timestamp.with_timezone(tz);

    Line::from(vec![
        Span::styled(format!("{:<9}", entry.kind.to_tag()), change_kind_style(entry.kind)),
        Span::styled(format!(" \"{}\"", entry.text), default_style()),
        Span::styled(format!("  {}", format_when(&when)), hint_style()),
    ])
}

fn format_when<Tz: TimeZone>(when: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    when.format("%Y-%m-%d %H:%M").to_string()
}
