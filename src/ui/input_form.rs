use crate::app::{FormField, InputFormState};
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the input form for adding a todo
pub fn render_input_form(f: &mut Frame, form: &InputFormState, area: Rect) {
    let modal_area = create_modal_area(area);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let mut lines = Vec::new();
    lines.push(Line::raw(""));
    push_field(&mut lines, "Text:", &form.text, form.editing_field == FormField::Text);
    push_field(
        &mut lines,
        "Due (YYYY-MM-DD HH:MM, optional):",
        &form.due,
        form.editing_field == FormField::Due,
    );
    lines.push(Line::from(Span::styled(
        "Tab to switch fields  ·  Enter to add  ·  Esc to cancel",
        hint_style(),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Add Todo ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

fn push_field<'a>(lines: &mut Vec<Line<'a>>, label: &'a str, value: &'a str, editing: bool) {
    if editing {
        lines.push(Line::raw(format!("{} (editing)", label)));
    } else {
        lines.push(Line::raw(label));
    }

    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(value, modal_title_style()),
        if editing {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ]));
    lines.push(Line::raw(""));
}
