use crate::reminder_time::ReminderTime;

pub type TodoId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoId,
    pub text: String,
    pub time: ReminderTime,
    pub completed: bool,
}
