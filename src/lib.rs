//! Typed client for the Godot Manager backend.
//!
//! [`api::ProjectApi`] and [`api::JournalApi`] map project and journal
//! operations onto the backend's REST endpoints through a shared
//! [`api::HttpClient`]. The `godot-manager` binary wraps them in a CLI.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod metadata;

pub use api::{HttpClient, JournalApi, ProjectApi};
pub use config::ClientConfig;
pub use error::{ServiceError, ServiceResult};
