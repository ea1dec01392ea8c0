//! Wire representations for the notes API.
//!
//! DTOs mirror the backend's snake_case JSON; domain types are produced via
//! `From` so nothing outside the repositories sees the wire shape.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dates;
use crate::models::{Note, NoteId, User};

#[derive(Serialize)]
pub struct CredentialsDto<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for CredentialsDto<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CredentialsDto")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, Deserialize)]
pub struct TokenDto {
    pub access_token: String,
    pub token_type: String,
}

impl fmt::Debug for TokenDto {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TokenDto")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    #[serde(deserialize_with = "dates::deserialize")]
    pub created_at: DateTime<Utc>,
}

impl From<UserDto> for User {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            email: value.email,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteDto {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(deserialize_with = "dates::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "dates::deserialize")]
    pub updated_at: DateTime<Utc>,
}

impl From<NoteDto> for Note {
    fn from(value: NoteDto) -> Self {
        Self {
            id: NoteId::new(value.id),
            title: value.title,
            content: value.content,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NoteCreateDto<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

/// Partial update payload.
///
/// Unset fields are sent as `null`; the backend is assumed to read `null`
/// as "leave unchanged".
#[derive(Debug, Clone, Serialize)]
pub struct NoteUpdateDto<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
}
