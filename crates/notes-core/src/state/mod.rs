//! Plain state containers driven by the front-end.
//!
//! Holders own the in-memory note list and session flags, call the
//! repositories, and keep the widget snapshot in step with every completed
//! mutation. Errors stop the current operation and are kept as a
//! human-readable message; nothing is retried and `Unauthorized` does not
//! sign the user out by itself.

mod auth;
mod notes;

pub use auth::AuthState;
pub use notes::NotesState;
