//! Terminal front end for the todo service.
//!
//! `view` turns state into text and lines into intents, `session` runs the
//! read-dispatch-render loop over any reader/writer pair, and `config`
//! resolves where the service lives.

pub mod config;
pub mod session;
pub mod view;

pub use config::{Config, ConfigError};
pub use view::Intent;
