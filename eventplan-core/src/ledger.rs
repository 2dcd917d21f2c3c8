use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
}

impl Task {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

impl From<String> for Task {
    fn from(description: String) -> Self {
        Self { description }
    }
}

impl From<&str> for Task {
    fn from(description: &str) -> Self {
        Self::new(description)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// What happens to a task once it is undone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndoPolicy {
    /// The task leaves the ledger entirely.
    #[default]
    Discard,
    /// The task returns to the front of the pending queue and runs next.
    Requeue,
}

impl UndoPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UndoPolicy::Discard => "discard",
            UndoPolicy::Requeue => "requeue",
        }
    }
}

impl fmt::Display for UndoPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pending tasks run first-in first-out; executed tasks are undone
/// last-in first-out.
#[derive(Debug, Clone, Default)]
pub struct TaskLedger {
    pending: VecDeque<Task>,
    completed: Vec<Task>,
    undo_policy: UndoPolicy,
}

impl TaskLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_undo_policy(mut self, policy: UndoPolicy) -> Self {
        self.undo_policy = policy;
        self
    }

    pub fn undo_policy(&self) -> UndoPolicy {
        self.undo_policy
    }

    pub fn add_task(&mut self, task: impl Into<Task>) {
        let task = task.into();
        debug!(target: "ledger", task = %task, "task added");
        self.pending.push_back(task);
    }

    pub fn execute_next_task(&mut self) -> Option<Task> {
        let task = self.pending.pop_front()?;
        debug!(
            target: "ledger",
            task = %task,
            remaining = self.pending.len(),
            "task executed"
        );
        self.completed.push(task.clone());
        Some(task)
    }

    pub fn undo_last_task(&mut self) -> Option<Task> {
        let task = self.completed.pop()?;
        if self.undo_policy == UndoPolicy::Requeue {
            self.pending.push_front(task.clone());
        }
        debug!(
            target: "ledger",
            task = %task,
            policy = %self.undo_policy,
            remaining = self.pending.len(),
            "task undone"
        );
        Some(task)
    }

    /// Number of tasks still waiting to run. Completed tasks are not counted.
    pub fn remaining_task_count(&self) -> usize {
        self.pending.len()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Pending tasks, next to run first.
    pub fn pending(&self) -> impl Iterator<Item = &Task> + '_ {
        self.pending.iter()
    }

    /// Completed tasks, most recent last.
    pub fn completed(&self) -> &[Task] {
        &self.completed
    }
}
