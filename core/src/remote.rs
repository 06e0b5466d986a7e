//! One method per remote operation: build, execute, parse.
//!
//! `RemoteStore` never retries and never touches caller state. Every method
//! issues exactly one request through its `Transport`.

use tracing::debug;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{Task, TaskInput, User};

#[derive(Debug, Clone)]
pub struct RemoteStore<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> RemoteStore<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(&request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }

    pub fn create_user(&self, name: &str) -> Result<User, ApiError> {
        let response = self.send(self.client.build_create_user(name))?;
        self.client.parse_create_user(response)
    }

    pub fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let response = self.send(self.client.build_list_users())?;
        self.client.parse_list_users(response)
    }

    pub fn get_user_tasks(&self, name: &str) -> Result<Vec<Task>, ApiError> {
        let response = self.send(self.client.build_get_user_tasks(name))?;
        self.client.parse_get_user_tasks(response)
    }

    pub fn add_task(&self, name: &str, input: &TaskInput) -> Result<Task, ApiError> {
        let response = self.send(self.client.build_add_task(name, input)?)?;
        self.client.parse_add_task(response)
    }

    pub fn update_task(&self, id: u64, input: &TaskInput) -> Result<Task, ApiError> {
        let response = self.send(self.client.build_update_task(id, input)?)?;
        self.client.parse_update_task(response)
    }

    pub fn delete_task(&self, id: u64) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_task(id))?;
        self.client.parse_delete_task(response)
    }

    pub fn delete_user(&self, name: &str) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_user(name))?;
        self.client.parse_delete_user(response)
    }
}
