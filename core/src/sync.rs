//! In-memory task list kept in step with the remote service.
//!
//! # Design
//! Every mutation is applied locally first, then pushed with a single remote
//! call. A successful response replaces the local copy with the server's, so
//! ids and flags always come from the service. A failed call is logged and
//! followed by one reconciling fetch of the user's list; nothing is retried
//! and no error reaches the caller beyond a `false` return.

use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::http::Transport;
use crate::remote::RemoteStore;
use crate::types::{Task, TaskId};

pub struct SyncController<T> {
    store: RemoteStore<T>,
    username: Option<String>,
    tasks: Vec<Task>,
}

impl<T: Transport> SyncController<T> {
    pub fn new(store: RemoteStore<T>) -> Self {
        Self {
            store,
            username: None,
            tasks: Vec::new(),
        }
    }

    pub fn store(&self) -> &RemoteStore<T> {
        &self.store
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn has_user(&self) -> bool {
        self.username.is_some()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Number of tasks not yet done.
    pub fn pending_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.done).count()
    }

    /// Makes `name` the current user, loading its tasks if the service knows
    /// it and registering it with an empty list otherwise.
    pub fn select_or_create_user(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            warn!("ignoring empty username");
            return false;
        }

        let users = match self.store.list_users() {
            Ok(users) => users,
            Err(e) => {
                error!("failed to list users: {e}");
                return false;
            }
        };

        let tasks = if users.iter().any(|u| u.name == name) {
            info!(user = name, "user exists, fetching tasks");
            match self.store.get_user_tasks(name) {
                Ok(tasks) => tasks,
                Err(e) => {
                    error!(user = name, "failed to fetch tasks: {e}");
                    return false;
                }
            }
        } else {
            info!(user = name, "user does not exist, creating");
            match self.store.create_user(name) {
                Ok(user) => {
                    info!(user = %user.name, id = user.id, "user created");
                    Vec::new()
                }
                Err(e) => {
                    error!(user = name, "failed to create user: {e}");
                    return false;
                }
            }
        };

        self.username = Some(name.to_string());
        self.tasks = tasks;
        true
    }

    pub fn add_task(&mut self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() {
            warn!("ignoring empty task label");
            return false;
        }
        let Some(name) = self.username.clone() else {
            warn!("no user selected, cannot add task");
            return false;
        };

        let placeholder = Task {
            id: TaskId::new_local(),
            label: label.to_string(),
            done: false,
        };
        let local_id = placeholder.id;
        let input = placeholder.to_input();
        self.tasks.push(placeholder);

        match self.store.add_task(&name, &input) {
            Ok(task) => {
                info!(id = %task.id, "task added");
                self.replace(local_id, task);
                true
            }
            Err(e) => {
                error!("failed to add task: {e}");
                self.reconcile();
                false
            }
        }
    }

    pub fn toggle_task(&mut self, id: TaskId) -> bool {
        if self.username.is_none() {
            warn!("no user selected, cannot toggle task");
            return false;
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            warn!(%id, "no such task");
            return false;
        };
        task.done = !task.done;
        let input = task.to_input();

        let Some(remote_id) = id.remote() else {
            warn!(%id, "task not yet stored remotely, toggle kept local");
            return false;
        };

        match self.store.update_task(remote_id, &input) {
            Ok(updated) => {
                info!(%id, done = updated.done, "task toggled");
                self.replace(id, updated);
                true
            }
            Err(e) => {
                error!(%id, "failed to toggle task: {e}");
                self.reconcile();
                false
            }
        }
    }

    /// Removes one task. Removing the last task also removes the user.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let Some(name) = self.username.clone() else {
            warn!("no user selected, cannot delete task");
            return false;
        };
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            warn!(%id, "no such task");
            return false;
        };
        self.tasks.remove(pos);

        if let Some(remote_id) = id.remote() {
            if let Err(e) = self.store.delete_task(remote_id) {
                error!(%id, "failed to delete task: {e}");
                self.reconcile();
                return false;
            }
        }
        info!(%id, "task deleted");

        if self.tasks.is_empty() {
            return self.remove_user(&name);
        }
        true
    }

    /// Deletes every task, one request at a time, then the user itself.
    pub fn delete_all_tasks(&mut self) -> bool {
        let Some(name) = self.username.clone() else {
            warn!("no user selected, nothing to delete");
            return false;
        };

        for id in self.tasks.iter().filter_map(|t| t.id.remote()) {
            if let Err(e) = self.store.delete_task(id) {
                error!(id, "failed to delete task: {e}");
            }
        }
        self.remove_user(&name)
    }

    /// Replaces local tasks with the service's current list.
    pub fn refresh(&mut self) -> bool {
        let Some(name) = self.username.clone() else {
            warn!("no user selected, nothing to refresh");
            return false;
        };
        match self.store.get_user_tasks(&name) {
            Ok(tasks) => {
                self.tasks = tasks;
                true
            }
            Err(ApiError::NotFound) => {
                warn!(user = %name, "user no longer exists remotely");
                self.clear();
                false
            }
            Err(e) => {
                error!(user = %name, "failed to fetch tasks: {e}");
                false
            }
        }
    }

    fn remove_user(&mut self, name: &str) -> bool {
        match self.store.delete_user(name) {
            Ok(()) => {
                info!(user = name, "user deleted");
                self.clear();
                true
            }
            Err(e) => {
                error!(user = name, "failed to delete user: {e}");
                self.reconcile();
                false
            }
        }
    }

    fn reconcile(&mut self) {
        if self.refresh() {
            info!("local tasks reconciled with remote list");
        }
    }

    fn replace(&mut self, id: TaskId, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(slot) => *slot = task,
            None => self.tasks.push(task),
        }
    }

    fn clear(&mut self) {
        self.username = None;
        self.tasks.clear();
    }
}
