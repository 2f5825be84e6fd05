use std::sync::Arc;

use crate::clock::Clock;
use crate::notify::{Notification, Notifier};
use crate::reminder_time::ReminderTime;
use crate::scheduling::{ReminderScheduler, ReminderTask};
use crate::storage::TodoList;
use crate::todo::{TodoId, TodoItem};

/// Session facade: owns the list, stamps new todos with the injected clock,
/// announces additions, and wires up the reminder polling.
pub struct TodoManager {
    list: TodoList,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
}

impl TodoManager {
    pub fn new(clock: Arc<dyn Clock>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            list: TodoList::new(),
            clock,
            notifier,
        }
    }

    /// Adds a todo and announces it through the notification channel. The
    /// announcement is best effort; the todo is kept either way.
    pub async fn add(&self, text: &str, time24: Option<&str>) -> Option<TodoItem> {
        let time = ReminderTime::normalize(time24, self.clock.now());
        let todo = self.list.add(text, time)?;

        let note = Notification::reminder(format!("Added: {} at {}", todo.text, todo.time));
        if let Err(error) = self.notifier.dispatch(&note).await {
            log::warn!("failed to announce todo {}: {error}", todo.id);
        }

        Some(todo)
    }

    pub fn toggle(&self, id: TodoId) -> Option<TodoItem> {
        self.list.toggle(id)
    }

    pub fn remove(&self, id: TodoId) -> bool {
        self.list.remove(id)
    }

    pub fn todos(&self) -> Vec<TodoItem> {
        self.list.snapshot()
    }

    pub fn start_reminders(&self) -> ReminderTask {
        let list = self.list.clone();
        ReminderScheduler::start(
            self.clock.clone(),
            move || list.snapshot(),
            self.notifier.clone(),
        )
    }
}
