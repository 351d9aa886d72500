pub mod changelog;
pub mod clock;
pub mod dates;
pub mod enums;
pub mod query;
pub mod todo;
pub mod views;

pub use changelog::{Change, ChangeKind, ChangelogEntry, ChangelogStore};
#[cfg(test)]
pub use clock::FixedClock;
pub use clock::{Clock, SystemClock};
pub use dates::{is_overdue_str, label_str, parse_due_input};
pub use enums::{FilterMode, SortMode, UiMode};
pub use query::derive;
pub use todo::{counter_after, Todo, TodoId, TodoStore, COUNTER_LIMIT, FIRST_ID};
pub use views::{completion_mark, due_badge};
