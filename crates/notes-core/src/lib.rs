//! notes-core - Core library for Notes
//!
//! This crate contains the typed API client, the resource repositories, the
//! widget cache bridge and the state holders shared by every Notes
//! front-end.

pub mod api;
pub mod auth;
pub mod config;
pub mod container;
pub mod error;
pub mod models;
pub mod repository;
pub mod state;
pub mod util;
pub mod widget;

pub use api::ApiClient;
pub use container::AppContainer;
pub use error::{ApiError, ApiResult, Error, Result};
pub use models::{Note, NoteId, User};
