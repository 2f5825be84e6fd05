use std::time::Duration;

use async_trait::async_trait;

pub const NOTIFICATION_TITLE: &str = "Todo Reminder!";

const VIBRATION: Duration = Duration::from_millis(500);

/// One outgoing notification. `vibrate` is a hint; channels without
/// anything resembling a vibration motor ignore it.
#[derive(Debug, Clone)]
pub struct Notification {
    pub body: String,
    pub vibrate: Option<Duration>,
}

impl Notification {
    pub fn reminder(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            vibrate: Some(VIBRATION),
        }
    }
}

/// Delivery channel for notifications. Dispatch is best effort: callers log
/// failures and move on, nothing is retried.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn dispatch(&self, note: &Notification) -> anyhow::Result<()>;
}

/// Prints notifications to the terminal. The bell character stands in for
/// the vibration hint.
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn dispatch(&self, note: &Notification) -> anyhow::Result<()> {
        if note.vibrate.is_some() {
            print!("\x07");
        }
        println!("{NOTIFICATION_TITLE} {}", note.body);

        Ok(())
    }
}

#[cfg(test)]
#[derive(Clone)]
pub struct RecordingNotifier {
    bodies: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            bodies: std::sync::Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    pub fn recorded(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl Notifier for RecordingNotifier {
    async fn dispatch(&self, note: &Notification) -> anyhow::Result<()> {
        self.bodies.lock().unwrap().push(note.body.clone());
        Ok(())
    }
}
