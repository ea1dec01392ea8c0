use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] notes_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Note title cannot be empty")]
    EmptyTitle,
    #[error("Nothing to change; pass --title and/or --content")]
    NothingToUpdate,
    #[error("Email and password cannot be empty")]
    MissingCredentials,
    #[error("Not signed in. Run `notes auth login` first.")]
    NotSignedIn,
    #[error("Session rejected by the server. Run `notes auth login` to sign in again.")]
    SessionExpired,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("Request failed: {0}")]
    Request(String),
}
