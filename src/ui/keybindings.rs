use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar for the current mode
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let hints = match mode {
        UiMode::Normal => vec![
            Span::raw(" ↑/↓ select   "),
            Span::raw("space toggle   "),
            Span::raw("x delete   "),
            Span::raw("a add   "),
            Span::raw("1/2/3 all/active/done   "),
            Span::raw("f filter   "),
            Span::raw("s sort   "),
            Span::raw("l changelog   "),
            Span::raw("q quit"),
        ],
        UiMode::AddingTodo => vec![
            Span::raw(" Tab switch field   "),
            Span::raw("Enter add   "),
            Span::raw("Esc cancel"),
        ],
        UiMode::Changelog => vec![
            Span::raw(" ↑/↓ scroll   "),
            Span::raw("Esc/l close   "),
            Span::raw("q quit"),
        ],
    };

    let paragraph = Paragraph::new(Line::from(hints)).style(hint_style());
    f.render_widget(paragraph, area);
}
