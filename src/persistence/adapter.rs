use super::error::PersistenceError;
use super::store::KeyValueStore;
use crate::domain::{counter_after, ChangelogEntry, Todo, TodoId, COUNTER_LIMIT, FIRST_ID};
use std::collections::HashSet;

pub const TODOS_KEY: &str = "todos";
pub const NEXT_ID_KEY: &str = "nextId";
pub const CHANGELOG_KEY: &str = "changelog";

/// Encodes the todo list, id counter and changelog as JSON under fixed keys.
///
/// Missing keys load as empty collections and the default counter. Present but
/// unreadable values are errors, as are repeated ids and ids or counters that leave
/// no room for a next id; nothing is reset behind the caller's back.
#[derive(Debug, Clone)]
pub struct PersistenceAdapter<S> {
    store: S,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn save(&mut self, todos: &[Todo], next_id: TodoId) -> Result<(), PersistenceError> {
        let json = encode(TODOS_KEY, todos)?;
        self.store.set(TODOS_KEY, &json)?;
        self.store.set(NEXT_ID_KEY, &next_id.to_string())?;
        Ok(())
    }

    pub fn load(&self) -> Result<(Vec<Todo>, TodoId), PersistenceError> {
        let todos: Vec<Todo> = match self.store.get(TODOS_KEY)? {
            Some(raw) => decode(TODOS_KEY, &raw)?,
            None => Vec::new(),
        };
        check_ids(&todos)?;

        let next_id = match self.store.get(NEXT_ID_KEY)? {
            Some(raw) => parse_counter(&raw)?,
            None => FIRST_ID,
        };

        Ok((todos, next_id))
    }

    pub fn save_changelog(&mut self, entries: &[ChangelogEntry]) -> Result<(), PersistenceError> {
        let json = encode(CHANGELOG_KEY, entries)?;
        self.store.set(CHANGELOG_KEY, &json)
    }

    pub fn load_changelog(&self) -> Result<Vec<ChangelogEntry>, PersistenceError> {
        match self.store.get(CHANGELOG_KEY)? {
            Some(raw) => decode(CHANGELOG_KEY, &raw),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
impl<S> PersistenceAdapter<S> {
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

fn encode<T: serde::Serialize + ?Sized>(key: &str, value: &T) -> Result<String, PersistenceError> {
    serde_json::to_string(value).map_err(|source| PersistenceError::Encode {
        key: key.to_string(),
        source,
    })
}

fn decode<T: serde::de::DeserializeOwned>(key: &str, raw: &str) -> Result<T, PersistenceError> {
    serde_json::from_str(raw).map_err(|source| PersistenceError::Corrupt {
        key: key.to_string(),
        source,
    })
}

fn check_ids(todos: &[Todo]) -> Result<(), PersistenceError> {
    let mut seen = HashSet::with_capacity(todos.len());
    for todo in todos {
        if counter_after(todo.id).is_none() {
            return Err(PersistenceError::IdOutOfRange { id: todo.id });
        }
        if !seen.insert(todo.id) {
            return Err(PersistenceError::DuplicateId { id: todo.id });
        }
    }
    Ok(())
}

fn parse_counter(raw: &str) -> Result<TodoId, PersistenceError> {
    match raw.trim().parse::<TodoId>() {
        Ok(n) if (FIRST_ID..COUNTER_LIMIT).contains(&n) => Ok(n),
        _ => Err(PersistenceError::InvalidCounter {
            value: raw.to_string(),
        }),
    }
}
