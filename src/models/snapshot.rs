use serde::{Deserialize, Serialize};

use crate::models::task::{TaskRecord, UserRef};

/// Roster and task rows fetched together from the hosted tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RosterSnapshot {
    #[serde(default)]
    pub users: Vec<UserRef>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

impl RosterSnapshot {
    pub fn new(users: Vec<UserRef>, tasks: Vec<TaskRecord>) -> Self {
        Self { users, tasks }
    }

    /// Tasks assigned to nobody on the roster.
    pub fn orphaned_task_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| match task.assigned_to.as_deref() {
                Some(owner) => !self.users.iter().any(|user| user.id == owner),
                None => true,
            })
            .count()
    }
}
