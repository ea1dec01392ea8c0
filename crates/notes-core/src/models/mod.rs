//! Domain models for Notes

mod note;
mod user;

pub use note::{Note, NoteId};
pub use user::User;
