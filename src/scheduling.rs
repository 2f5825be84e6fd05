use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDateTime, Timelike};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use crate::clock::Clock;
use crate::notify::{Notification, Notifier};
use crate::todo::{TodoId, TodoItem};

pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Handle to the background polling task. Cancelling is idempotent, and
/// dropping the handle cancels as well.
pub struct ReminderTask {
    task_handle: Option<JoinHandle<()>>,
    cancellation_token: CancellationToken,
}

impl ReminderTask {
    fn new(task_handle: JoinHandle<()>, cancellation_token: CancellationToken) -> Self {
        Self {
            task_handle: Some(task_handle),
            cancellation_token,
        }
    }

    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    pub async fn shutdown(mut self) {
        self.cancel();
        if let Some(task_handle) = self.task_handle.take() {
            let _ = task_handle.await;
        }
    }
}

impl Drop for ReminderTask {
    fn drop(&mut self) {
        self.cancellation_token.cancel();
    }
}

pub struct ReminderScheduler;

impl ReminderScheduler {
    /// Spawns the polling loop. `todos` is called anew on every tick so the
    /// loop always sees the latest collection.
    pub fn start<F>(clock: Arc<dyn Clock>, todos: F, notifier: Arc<dyn Notifier>) -> ReminderTask
    where
        F: Fn() -> Vec<TodoItem> + Send + 'static,
    {
        let cancellation_token = CancellationToken::new();
        let task_cancellation_token = cancellation_token.child_token();

        let task_handle = tokio::spawn(async move {
            Self::poll_loop(task_cancellation_token, clock, todos, notifier).await;
        });

        ReminderTask::new(task_handle, cancellation_token)
    }

    async fn poll_loop<F>(
        cancellation_token: CancellationToken,
        clock: Arc<dyn Clock>,
        todos: F,
        notifier: Arc<dyn Notifier>,
    ) where
        F: Fn() -> Vec<TodoItem>,
    {
        // first tick comes one full period after start, not immediately
        let mut ticker = time::interval_at(Instant::now() + POLL_INTERVAL, POLL_INTERVAL);
        let mut last_fired: HashMap<TodoId, NaiveDateTime> = HashMap::new();

        loop {
            tokio::select! {
                _ = cancellation_token.cancelled() => {
                    log::info!("reminder polling stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let now = clock.now();
                    let current = todos();
                    for todo in Self::due_todos(&current, now, &mut last_fired) {
                        log::debug!("reminder due for todo {} at {}", todo.id, todo.time);
                        let note = Notification::reminder(todo.text.clone());
                        if let Err(error) = notifier.dispatch(&note).await {
                            log::warn!("failed to deliver reminder for todo {}: {error}", todo.id);
                        }
                    }
                }
            }
        }
    }

    /// Todos whose stored hour and minute equal `now`, deduped so each todo
    /// fires at most once per wall-clock minute.
    fn due_todos(
        todos: &[TodoItem],
        now: NaiveDateTime,
        last_fired: &mut HashMap<TodoId, NaiveDateTime>,
    ) -> Vec<TodoItem> {
        last_fired.retain(|id, _| todos.iter().any(|todo| todo.id == *id));

        let this_minute = now
            .with_second(0)
            .and_then(|truncated| truncated.with_nanosecond(0))
            .unwrap_or(now);

        let mut due = Vec::new();
        for todo in todos {
            let (hour, minute) = todo.time.hour_minute();
            if (hour, minute) != (now.hour(), now.minute()) {
                continue;
            }
            if last_fired.get(&todo.id) == Some(&this_minute) {
                continue;
            }

            last_fired.insert(todo.id, this_minute);
            due.push(todo.clone());
        }

        due
    }
}
