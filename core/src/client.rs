//! Stateless HTTP request builder and response parser for the todo service.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each remote operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Usernames are percent-encoded before they land in a path.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Task, TaskInput, User, UserList, UserTasks};

/// Base URL of the public playground service.
pub const DEFAULT_BASE_URL: &str = "https://playground.4geeks.com/todo";

/// Synchronous, stateless client for the todo service.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn user_path(&self, name: &str) -> String {
        format!("{}/users/{}", self.base_url, urlencoding::encode(name))
    }

    pub fn build_create_user(&self, name: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: self.user_path(name),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_list_users(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/users", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_user_tasks(&self, name: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.user_path(name),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_delete_user(&self, name: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.user_path(name),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_add_task(&self, name: &str, input: &TaskInput) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/todos/{}", self.base_url, urlencoding::encode(name)),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_update_task(&self, id: u64, input: &TaskInput) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/todos/{id}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_task(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/todos/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        check_status(&response)?;
        let list: UserList = decode(&response)?;
        Ok(list.users)
    }

    pub fn parse_get_user_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ApiError> {
        check_status(&response)?;
        let user: UserTasks = decode(&response)?;
        Ok(user.todos)
    }

    pub fn parse_delete_user(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_add_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_update_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
///
/// The service documents 200, 201 or 204 per operation, but any 2xx counts as
/// success.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaskId;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000/todo")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_users_produces_correct_request() {
        let req = client().build_list_users();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todo/users");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_user_has_no_body() {
        let req = client().build_create_user("ana");
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/todo/users/ana");
        assert!(req.body.is_none());
    }

    #[test]
    fn usernames_are_percent_encoded() {
        let req = client().build_get_user_tasks("ana maria/2");
        assert_eq!(req.path, "http://localhost:3000/todo/users/ana%20maria%2F2");
    }

    #[test]
    fn build_add_task_targets_the_owner() {
        let input = TaskInput {
            label: "Buy milk".to_string(),
            is_done: false,
        };
        let req = client().build_add_task("ana", &input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/todo/todos/ana");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["label"], "Buy milk");
        assert_eq!(body["is_done"], false);
    }

    #[test]
    fn build_update_task_sends_full_task() {
        let input = TaskInput {
            label: "Buy milk".to_string(),
            is_done: true,
        };
        let req = client().build_update_task(12, &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/todo/todos/12");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["label"], "Buy milk");
        assert_eq!(body["is_done"], true);
    }

    #[test]
    fn build_delete_requests() {
        let req = client().build_delete_task(4);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/todo/todos/4");

        let req = client().build_delete_user("ana");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/todo/users/ana");
    }

    #[test]
    fn parse_list_users_unwraps_envelope() {
        let users = client()
            .parse_list_users(response(200, r#"{"users":[{"name":"ana","id":1},{"name":"bo","id":2}]}"#))
            .unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].name, "bo");
    }

    #[test]
    fn parse_get_user_tasks_returns_todos() {
        let tasks = client()
            .parse_get_user_tasks(response(
                200,
                r#"{"name":"ana","todos":[{"id":5,"label":"Walk dog","is_done":true}]}"#,
            ))
            .unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, TaskId::Remote(5));
        assert!(tasks[0].done);
    }

    #[test]
    fn parse_get_user_tasks_not_found() {
        let err = client().parse_get_user_tasks(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_user_conflict() {
        let err = client()
            .parse_create_user(response(400, r#"{"detail":"User already exists."}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 400, .. }));
    }

    #[test]
    fn parse_create_user_accepts_any_success_status() {
        let user = client()
            .parse_create_user(response(200, r#"{"name":"ana","id":1}"#))
            .unwrap();
        assert_eq!(user.name, "ana");
        assert!(client().parse_delete_user(response(200, "")).is_ok());
    }

    #[test]
    fn parse_add_task_success() {
        let task = client()
            .parse_add_task(response(201, r#"{"id":9,"label":"New","is_done":false}"#))
            .unwrap();
        assert_eq!(task.id, TaskId::Remote(9));
        assert_eq!(task.label, "New");
    }

    #[test]
    fn parse_add_task_wrong_status() {
        let err = client().parse_add_task(response(500, "internal error")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_delete_task_success_and_not_found() {
        assert!(client().parse_delete_task(response(204, "")).is_ok());
        let err = client().parse_delete_task(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/todo/");
        assert_eq!(client.build_list_users().path, "http://localhost:3000/todo/users");
    }

    #[test]
    fn parse_list_users_bad_json() {
        let err = client().parse_list_users(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
