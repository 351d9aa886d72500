use crate::domain::{
    derive, Change, ChangelogEntry, ChangelogStore, Clock, FilterMode, SortMode, SystemClock, Todo,
    TodoId, TodoStore,
};
use crate::persistence::{KeyValueStore, PersistenceAdapter, PersistenceError};
use chrono::{DateTime, Utc};

/// One open todo list: the todo store, its changelog and where both are saved.
///
/// Every successful add/toggle/delete appends exactly one changelog entry and then
/// writes the changelog and the todo list. No-ops write nothing. Saving is best-effort:
/// a failed write never undoes the in-memory change, it is kept in `last_save_error`.
pub struct Docket<S, C = SystemClock> {
    todos: TodoStore,
    changelog: ChangelogStore,
    persistence: PersistenceAdapter<S>,
    clock: C,
    last_save_error: Option<PersistenceError>,
}

impl<S: KeyValueStore, C: Clock> Docket<S, C> {
    /// Load todos, counter and changelog from `store`
    pub fn open(store: S, clock: C) -> Result<Self, PersistenceError> {
        let persistence = PersistenceAdapter::new(store);
        let (todos, next_id) = persistence.load()?;
        let changelog = persistence.load_changelog()?;

        tracing::debug!(
            todos = todos.len(),
            next_id,
            changelog = changelog.len(),
            "opened docket"
        );

        Ok(Self {
            todos: TodoStore::from_parts(todos, next_id),
            changelog: ChangelogStore::from_entries(changelog),
            persistence,
            clock,
            last_save_error: None,
        })
    }

    pub fn todos(&self) -> &[Todo] {
        self.todos.todos()
    }

    pub fn changelog(&self) -> &[ChangelogEntry] {
        self.changelog.entries()
    }

    pub fn next_id(&self) -> TodoId {
        self.todos.next_id()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Visible todos for the given filter and sort
    pub fn view(&self, filter: FilterMode, sort: SortMode) -> Vec<&Todo> {
        derive(self.todos.todos(), filter, sort)
    }

    pub fn add(&mut self, text: &str, due_date: Option<DateTime<Utc>>) -> Option<Todo> {
        let change = self.todos.add(text, due_date)?;
        let id = change.id;
        self.commit(change);
        self.todos.get(id).cloned()
    }

    /// Returns false when `id` is unknown
    pub fn toggle(&mut self, id: TodoId) -> bool {
        match self.todos.toggle(id) {
            Some(change) => {
                self.commit(change);
                true
            }
            None => false,
        }
    }

    /// Returns false when `id` is unknown
    pub fn delete(&mut self, id: TodoId) -> bool {
        match self.todos.delete(id) {
            Some(change) => {
                self.commit(change);
                true
            }
            None => false,
        }
    }

    /// Most recent save failure, cleared by taking it
    pub fn take_save_error(&mut self) -> Option<PersistenceError> {
        self.last_save_error.take()
    }

    fn commit(&mut self, change: Change) {
        let timestamp = self.clock.now();
        self.changelog.append(change.kind, &change.text, timestamp);
        tracing::debug!(kind = change.kind.to_tag(), id = change.id, "recorded change");

        if let Err(e) = self.persistence.save_changelog(self.changelog.entries()) {
            self.record_save_error(e);
        }
        if let Err(e) = self.persistence.save(self.todos.todos(), self.todos.next_id()) {
            self.record_save_error(e);
        }
    }

    fn record_save_error(&mut self, error: PersistenceError) {
        tracing::error!(error = %error, "failed to save docket");
        self.last_save_error = Some(error);
    }
}

#[cfg(test)]
impl<S: KeyValueStore, C: Clock> Docket<S, C> {
    pub fn persistence(&self) -> &PersistenceAdapter<S> {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut PersistenceAdapter<S> {
        &mut self.persistence
    }

    pub fn has_save_error(&self) -> bool {
        self.last_save_error.is_some()
    }
}
