use std::sync::{Arc, RwLock};

use crate::reminder_time::ReminderTime;
use crate::todo::{TodoId, TodoItem};

struct TodoListState {
    next_id: TodoId,
    todos: Vec<TodoItem>,
}

/// In-memory todo collection, shared by cloning. Lives for the session;
/// nothing is persisted.
#[derive(Clone)]
pub struct TodoList {
    state: Arc<RwLock<TodoListState>>,
}

impl TodoList {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(TodoListState {
                next_id: 1,
                todos: Vec::new(),
            })),
        }
    }

    /// Inserts a new entry, or returns `None` when the text is empty after
    /// trimming. Ids are handed out once and never reused.
    pub fn add(&self, text: &str, time: ReminderTime) -> Option<TodoItem> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let mut state = self.state.write().unwrap();
        let todo = TodoItem {
            id: state.next_id,
            text: text.to_string(),
            time,
            completed: false,
        };
        state.next_id += 1;
        state.todos.push(todo.clone());

        Some(todo)
    }

    /// Flips the completed flag by replacing the collection with one where
    /// the addressed entry is swapped out. Returns the updated item.
    pub fn toggle(&self, id: TodoId) -> Option<TodoItem> {
        let mut state = self.state.write().unwrap();
        let mut updated = None;

        let todos = state
            .todos
            .iter()
            .map(|todo| {
                if todo.id == id {
                    let toggled = TodoItem {
                        completed: !todo.completed,
                        ..todo.clone()
                    };
                    updated = Some(toggled.clone());
                    toggled
                } else {
                    todo.clone()
                }
            })
            .collect();
        state.todos = todos;

        updated
    }

    pub fn remove(&self, id: TodoId) -> bool {
        let mut state = self.state.write().unwrap();
        let before = state.todos.len();
        state.todos.retain(|todo| todo.id != id);

        state.todos.len() != before
    }

    pub fn snapshot(&self) -> Vec<TodoItem> {
        self.state.read().unwrap().todos.clone()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    use super::TodoList;
    use crate::reminder_time::ReminderTime;

    fn at(hhmm: &str) -> ReminderTime {
        let now = NaiveDateTime::new(
            NaiveDate::from_ymd_opt(2025, 5, 31).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        );
        ReminderTime::normalize(Some(hhmm), now)
    }

    #[test]
    fn add_trims_text_and_assigns_increasing_ids() {
        let list = TodoList::new();

        let first = list.add("  Buy milk  ", at("14:15")).unwrap();
        let second = list.add("Water plants", at("09:00")).unwrap();

        assert_eq!(first.text, "Buy milk");
        assert!(!first.completed);
        assert!(second.id > first.id);
    }

    #[test]
    fn add_rejects_empty_and_whitespace_text() {
        let list = TodoList::new();

        assert!(list.add("", at("14:15")).is_none());
        assert!(list.add("   ", at("14:15")).is_none());
        assert!(list.snapshot().is_empty());
    }

    #[test]
    fn toggle_flips_only_the_addressed_entry() {
        let list = TodoList::new();
        let first = list.add("Buy milk", at("14:15")).unwrap();
        let second = list.add("Water plants", at("09:00")).unwrap();

        let toggled = list.toggle(first.id).unwrap();
        assert!(toggled.completed);

        let todos = list.snapshot();
        assert!(todos.iter().find(|t| t.id == first.id).unwrap().completed);
        assert!(!todos.iter().find(|t| t.id == second.id).unwrap().completed);

        let toggled_back = list.toggle(first.id).unwrap();
        assert!(!toggled_back.completed);
    }

    #[test]
    fn toggle_of_unknown_id_returns_none() {
        let list = TodoList::new();

        assert!(list.toggle(42).is_none());
    }

    #[test]
    fn remove_keeps_remaining_ids_stable() {
        let list = TodoList::new();
        let first = list.add("Buy milk", at("14:15")).unwrap();
        let second = list.add("Water plants", at("09:00")).unwrap();

        assert!(list.remove(first.id));
        assert!(!list.remove(first.id), "removing twice should report false");

        let todos = list.snapshot();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, second.id);
    }

    #[test]
    fn snapshot_reflects_later_additions() {
        let list = TodoList::new();
        let before = list.snapshot();

        list.add("Buy milk", at("14:15")).unwrap();

        assert!(before.is_empty());
        assert_eq!(list.snapshot().len(), 1);
    }
}
