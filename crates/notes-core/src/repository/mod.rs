//! Resource repositories over the transport client.
//!
//! Repositories are stateless adapters: they pick the endpoint, shape the
//! payload, and convert wire DTOs into domain models. Transport errors are
//! returned to the caller unchanged.

mod auth;
mod notes;

pub use auth::{AuthRepository, HttpAuthRepository};
pub use notes::{
    export_file_name, note_path, note_pdf_path, HttpNotesRepository, NotesRepository, NOTES_PATH,
};
