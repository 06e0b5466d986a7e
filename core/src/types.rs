//! Domain DTOs for the todo service.
//!
//! # Design
//! These types mirror the remote service's JSON schema but are defined
//! independently from the mock-server crate. Integration tests catch any
//! schema drift between the two.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user as listed by the service. The name doubles as the resource key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub id: u64,
}

/// Envelope returned by `GET /users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<User>,
}

/// Envelope returned by `GET /users/{name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTasks {
    pub name: String,
    #[serde(default)]
    pub todos: Vec<Task>,
}

/// Identifier of a task.
///
/// `Remote` ids come from the service. `Local` ids are placeholders for a task
/// whose creation has not been acknowledged yet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum TaskId {
    Remote(u64),
    Local(Uuid),
}

impl TaskId {
    pub fn new_local() -> Self {
        TaskId::Local(Uuid::new_v4())
    }

    /// The server-side id, if the service knows about this task.
    pub fn remote(&self) -> Option<u64> {
        match self {
            TaskId::Remote(id) => Some(*id),
            TaskId::Local(_) => None,
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Remote(id) => write!(f, "{id}"),
            TaskId::Local(uuid) => write!(f, "local:{uuid}"),
        }
    }
}

/// A single todo item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub label: String,
    #[serde(rename = "is_done", default)]
    pub done: bool,
}

impl Task {
    pub fn to_input(&self) -> TaskInput {
        TaskInput {
            label: self.label.clone(),
            is_done: self.done,
        }
    }
}

/// Request payload for creating or replacing a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskInput {
    pub label: String,
    #[serde(default)]
    pub is_done: bool,
}
