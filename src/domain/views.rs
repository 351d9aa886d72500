use super::dates::{is_overdue, is_overdue_str, label, label_str};
use super::todo::{DueDate, Todo};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Due date of a todo as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueBadge {
    pub label: String,
    pub overdue: bool,
}

/// Badge for a todo's due date, `None` when it has none
pub fn due_badge<Tz: TimeZone>(todo: &Todo, now: &DateTime<Tz>) -> Option<DueBadge>
where
    Tz::Offset: Display,
{
    todo.due_date.as_ref().map(|due| match due {
        DueDate::At(at) => DueBadge {
            label: label(at, now),
            overdue: is_overdue(at, now),
        },
        DueDate::Unreadable(raw) => DueBadge {
            label: label_str(raw, now),
            overdue: is_overdue_str(raw, now),
        },
    })
}

/// Checkbox text for a todo
pub fn completion_mark(todo: &Todo) -> &'static str {
    if todo.completed {
        "[x]"
    } else {
        "[ ]"
    }
}
