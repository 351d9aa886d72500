use super::changelog::{Change, ChangeKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier assigned to a todo, never reused
pub type TodoId = u64;

/// First id handed out by an empty store
pub const FIRST_ID: TodoId = 1;

/// Exclusive upper bound of the id counter
pub const COUNTER_LIMIT: TodoId = TodoId::MAX;

/// Counter value that follows `id`, `None` once ids are exhausted
pub fn counter_after(id: TodoId) -> Option<TodoId> {
    id.checked_add(1).filter(|next| *next < COUNTER_LIMIT)
}

/// Due date as stored.
///
/// Stored text that is not an RFC 3339 instant is kept as written; it renders as an
/// invalid date and is never overdue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueDate {
    At(DateTime<Utc>),
    Unreadable(String),
}

impl DueDate {
    fn from_stored(raw: String) -> Self {
        match DateTime::parse_from_rfc3339(&raw) {
            Ok(at) => Self::At(at.with_timezone(&Utc)),
            Err(_) => Self::Unreadable(raw),
        }
    }

    pub fn instant(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::At(at) => Some(at),
            Self::Unreadable(_) => None,
        }
    }
}

impl From<DateTime<Utc>> for DueDate {
    fn from(at: DateTime<Utc>) -> Self {
        Self::At(at)
    }
}

impl Serialize for DueDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::At(at) => at.serialize(serializer),
            Self::Unreadable(raw) => serializer.serialize_str(raw),
        }
    }
}

/// `null`, a missing key and `""` all mean no due date
fn deserialize_due<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DueDate>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|r| !r.is_empty()).map(DueDate::from_stored))
}

/// A single todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    /// `null` when the todo has no due date
    #[serde(default, deserialize_with = "deserialize_due")]
    pub due_date: Option<DueDate>,
}

impl Todo {
    pub fn new(id: TodoId, text: String, due_date: Option<DateTime<Utc>>) -> Self {
        Self {
            id,
            text,
            completed: false,
            due_date: due_date.map(DueDate::At),
        }
    }

    /// Due instant, `None` when absent or unreadable
    pub fn due_instant(&self) -> Option<&DateTime<Utc>> {
        self.due_date.as_ref().and_then(DueDate::instant)
    }
}

/// Owns the live todo list and the id counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoStore {
    todos: Vec<Todo>,
    next_id: TodoId,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            todos: Vec::new(),
            next_id: FIRST_ID,
        }
    }

    /// Rebuild a store from persisted parts.
    ///
    /// The counter must stay strictly above every live id; a stale counter is raised
    /// to `max_id + 1`. Ids are expected to be distinct and below the counter limit.
    pub fn from_parts(todos: Vec<Todo>, next_id: TodoId) -> Self {
        let floor = todos
            .iter()
            .map(|t| t.id.saturating_add(1))
            .max()
            .unwrap_or(FIRST_ID);
        let next_id = if next_id < floor {
            tracing::warn!(stored = next_id, repaired = floor, "id counter behind live todos, raising it");
            floor
        } else {
            next_id
        };

        Self { todos, next_id }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn next_id(&self) -> TodoId {
        self.next_id
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Append a new todo. Whitespace-only text is rejected and nothing changes, as is
    /// any add once the id counter is exhausted.
    pub fn add(&mut self, text: &str, due_date: Option<DateTime<Utc>>) -> Option<Change> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let Some(next_id) = counter_after(self.next_id) else {
            tracing::error!(next_id = self.next_id, "id counter exhausted, todo not added");
            return None;
        };
        let id = self.next_id;
        self.next_id = next_id;
        self.todos.push(Todo::new(id, text.to_string(), due_date));

        Some(Change::new(ChangeKind::Created, id, text))
    }

    /// Flip the completion flag.
    ///
    /// Both directions report `Completed`; there is no separate "reopened" kind.
    pub fn toggle(&mut self, id: TodoId) -> Option<Change> {
        let todo = self.todos.iter_mut().find(|t| t.id == id)?;
        todo.completed = !todo.completed;
        Some(Change::new(ChangeKind::Completed, id, &todo.text))
    }

    /// Remove a todo entirely, reporting the text it had
    pub fn delete(&mut self, id: TodoId) -> Option<Change> {
        let index = self.todos.iter().position(|t| t.id == id)?;
        let removed = self.todos.remove(index);
        Some(Change::new(ChangeKind::Deleted, id, &removed.text))
    }
}
