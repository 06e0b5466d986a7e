//! Client core for the todo service.
//!
//! # Overview
//! `TodoClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). A `Transport`
//! executes the round-trip; `RemoteStore` pairs the two, and `SyncController`
//! keeps a user's task list in step with the service on top of it.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each remote operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and testable with plain data.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod remote;
pub mod sync;
pub mod types;

pub use client::{TodoClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use remote::RemoteStore;
pub use sync::SyncController;
pub use types::{Task, TaskId, TaskInput, User, UserList, UserTasks};
