use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub id: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub label: String,
    pub is_done: bool,
}

#[derive(Deserialize)]
pub struct TodoInput {
    pub label: String,
    #[serde(default)]
    pub is_done: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<User>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserWithTodos {
    pub name: String,
    pub id: u64,
    pub todos: Vec<Todo>,
}

#[derive(Default)]
pub struct Store {
    next_user_id: u64,
    next_todo_id: u64,
    users: BTreeMap<String, u64>,
    /// Todo id to (owner, todo).
    todos: BTreeMap<u64, (String, Todo)>,
}

impl Store {
    fn todos_of(&self, name: &str) -> Vec<Todo> {
        self.todos
            .values()
            .filter(|(owner, _)| owner == name)
            .map(|(_, todo)| todo.clone())
            .collect()
    }
}

pub type Db = Arc<RwLock<Store>>;

type ApiResult<T> = Result<T, (StatusCode, Json<Value>)>;

fn detail(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": message })))
}

/// Routes of the playground service, mounted under `/todo`.
pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let routes = Router::new()
        .route("/users", get(list_users))
        .route(
            "/users/{name}",
            post(create_user).get(get_user).delete(delete_user),
        )
        // `POST` keys todos by owner name, `PUT` and `DELETE` by todo id.
        .route(
            "/todos/{key}",
            post(create_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(db);
    Router::new()
        .nest("/todo", routes)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_users(State(db): State<Db>) -> Json<UserList> {
    let store = db.read().await;
    let mut users: Vec<User> = store
        .users
        .iter()
        .map(|(name, id)| User {
            name: name.clone(),
            id: *id,
        })
        .collect();
    users.sort_by_key(|u| u.id);
    Json(UserList { users })
}

async fn create_user(
    State(db): State<Db>,
    Path(name): Path<String>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let mut store = db.write().await;
    if store.users.contains_key(&name) {
        return Err(detail(StatusCode::BAD_REQUEST, "User already exists."));
    }
    store.next_user_id += 1;
    let id = store.next_user_id;
    store.users.insert(name.clone(), id);
    tracing::info!(user = %name, id, "user created");
    Ok((StatusCode::CREATED, Json(User { name, id })))
}

async fn get_user(State(db): State<Db>, Path(name): Path<String>) -> ApiResult<Json<UserWithTodos>> {
    let store = db.read().await;
    let id = *store
        .users
        .get(&name)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "User not found."))?;
    let todos = store.todos_of(&name);
    Ok(Json(UserWithTodos { name, id, todos }))
}

async fn delete_user(State(db): State<Db>, Path(name): Path<String>) -> ApiResult<StatusCode> {
    let mut store = db.write().await;
    store
        .users
        .remove(&name)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "User not found."))?;
    store.todos.retain(|_, (owner, _)| *owner != name);
    tracing::info!(user = %name, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn create_todo(
    State(db): State<Db>,
    Path(name): Path<String>,
    Json(input): Json<TodoInput>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    let mut store = db.write().await;
    if !store.users.contains_key(&name) {
        return Err(detail(StatusCode::NOT_FOUND, "User not found."));
    }
    store.next_todo_id += 1;
    let todo = Todo {
        id: store.next_todo_id,
        label: input.label,
        is_done: input.is_done,
    };
    store.todos.insert(todo.id, (name, todo.clone()));
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<TodoInput>,
) -> ApiResult<Json<Todo>> {
    let mut store = db.write().await;
    let (_, todo) = store
        .todos
        .get_mut(&id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Todo not found."))?;
    todo.label = input.label;
    todo.is_done = input.is_done;
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    let mut store = db.write().await;
    store
        .todos
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Todo not found."))
}
