use super::enums::{FilterMode, SortMode};
use super::todo::{DueDate, Todo};
use std::cmp::Ordering;

/// Sort bucket: readable due dates, then unreadable ones, then undated todos
fn due_rank(todo: &Todo) -> u8 {
    match &todo.due_date {
        Some(DueDate::At(_)) => 0,
        Some(DueDate::Unreadable(_)) => 1,
        None => 2,
    }
}

/// Order two todos by due date, earliest first, with undated todos last.
///
/// Todos whose stored due date cannot be read sit between the two. Todos in the same
/// bucket without an instant compare equal so a stable sort keeps their insertion order.
pub fn compare_due(a: &Todo, b: &Todo) -> Ordering {
    match (a.due_instant(), b.due_instant()) {
        (Some(x), Some(y)) => x.cmp(y),
        _ => due_rank(a).cmp(&due_rank(b)),
    }
}

/// Compute the visible sequence: filter first, then sort. The store is never touched.
pub fn derive(todos: &[Todo], filter: FilterMode, sort: SortMode) -> Vec<&Todo> {
    let mut visible: Vec<&Todo> = todos.iter().filter(|t| filter.admits(t.completed)).collect();

    if sort == SortMode::DueDate {
        // slice::sort_by is stable, ties keep their filtered order
        visible.sort_by(|a, b| compare_due(a, b));
    }

    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 1, d, 12, 0, 0).unwrap())
    }

    fn todo(id: u64, completed: bool, due: Option<DateTime<Utc>>) -> Todo {
        Todo {
            id,
            text: format!("todo {id}"),
            completed,
            due_date: due.map(DueDate::At),
        }
    }

    fn ids(view: &[&Todo]) -> Vec<u64> {
        view.iter().map(|t| t.id).collect()
    }

    fn sample() -> Vec<Todo> {
        vec![
            todo(1, false, None),
            todo(2, true, day(20)),
            todo(3, false, day(16)),
            todo(4, true, None),
            todo(5, false, day(20)),
            todo(6, false, day(10)),
        ]
    }

    #[test]
    fn test_all_none_is_identity() {
        let todos = sample();
        assert_eq!(ids(&derive(&todos, FilterMode::All, SortMode::None)), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_completed_keeps_insertion_order() {
        let todos = sample();
        assert_eq!(ids(&derive(&todos, FilterMode::Completed, SortMode::None)), vec![2, 4]);
    }

    #[test]
    fn test_active_filter() {
        let todos = sample();
        assert_eq!(ids(&derive(&todos, FilterMode::Active, SortMode::None)), vec![1, 3, 5, 6]);
    }

    #[test]
    fn test_due_sort_puts_undated_last_and_is_stable() {
        let todos = sample();
        // 2 and 5 share a due date and keep their relative order; 1 and 4 are undated
        assert_eq!(ids(&derive(&todos, FilterMode::All, SortMode::DueDate)), vec![6, 3, 2, 5, 1, 4]);
    }

    #[test]
    fn test_sort_applies_after_filter() {
        let todos = sample();
        assert_eq!(ids(&derive(&todos, FilterMode::Active, SortMode::DueDate)), vec![6, 3, 5, 1]);
        assert_eq!(ids(&derive(&todos, FilterMode::Completed, SortMode::DueDate)), vec![2, 4]);
    }

    #[test]
    fn test_derive_leaves_source_untouched() {
        let todos = sample();
        let before = todos.clone();
        let _ = derive(&todos, FilterMode::Active, SortMode::DueDate);
        assert_eq!(todos, before);
    }

    #[test]
    fn test_compare_due() {
        let dated = todo(1, false, day(3));
        let later = todo(2, false, day(4));
        let undated = todo(3, false, None);

        assert_eq!(compare_due(&dated, &later), Ordering::Less);
        assert_eq!(compare_due(&later, &dated), Ordering::Greater);
        assert_eq!(compare_due(&undated, &dated), Ordering::Greater);
        assert_eq!(compare_due(&dated, &undated), Ordering::Less);
        assert_eq!(compare_due(&undated, &undated.clone()), Ordering::Equal);
    }

    #[test]
    fn test_unreadable_due_sorts_between_dated_and_undated() {
        let mut odd = todo(7, false, None);
        odd.due_date = Some(DueDate::Unreadable("garbage".to_string()));
        let mut todos = sample();
        todos.insert(0, odd);

        assert_eq!(
            ids(&derive(&todos, FilterMode::All, SortMode::DueDate)),
            vec![6, 3, 2, 5, 7, 1, 4]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(derive(&[], FilterMode::All, SortMode::DueDate).is_empty());
    }
}
