use std::io::{self, IsTerminal, Read};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use notes_core::auth::TokenStore;
use notes_core::config::ClientConfig;
use notes_core::state::NotesState;
use notes_core::widget::{FileSharedStore, NoopReloader};
use notes_core::{AppContainer, Note};
use serde::Serialize;

use crate::config::CliConfig;
use crate::error::CliError;
use crate::secret_store::KeyringTokenStore;

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: i64,
    pub title: String,
    pub preview: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
    pub relative_time: String,
}

pub fn resolve_client_config(api_url: Option<String>) -> Result<ClientConfig, CliError> {
    let file = CliConfig::load().map_err(CliError::Config)?;
    file.resolve(api_url)
}

/// Wires the container with the keychain token and the on-disk widget store.
pub fn open_container(api_url: Option<String>) -> Result<AppContainer, CliError> {
    let config = resolve_client_config(api_url)?;
    container_for(&config, Arc::new(KeyringTokenStore::default()))
}

pub fn container_for(
    config: &ClientConfig,
    token_store: Arc<dyn TokenStore>,
) -> Result<AppContainer, CliError> {
    tracing::debug!(
        "Widget snapshot directory: {}",
        config.widget_cache_dir.display()
    );
    Ok(AppContainer::new(
        config,
        token_store,
        Arc::new(FileSharedStore::new(&config.widget_cache_dir)),
        Arc::new(NoopReloader),
    )?)
}

/// Converts the state holder's last recorded failure into an error.
pub fn ensure_ok(state: &NotesState) -> Result<(), CliError> {
    if state.needs_reauthentication() {
        return Err(CliError::SessionExpired);
    }
    match state.error() {
        Some(message) => Err(CliError::Request(message.to_string())),
        None => Ok(()),
    }
}

/// Loads the server's list so later mutations keep the widget snapshot whole.
pub async fn load_notes(state: &mut NotesState) -> Result<(), CliError> {
    state.load().await;
    ensure_ok(state)
}

pub fn format_note_lines(notes: &[&Note]) -> Vec<String> {
    let now = Utc::now();
    notes
        .iter()
        .map(|note| {
            let title = truncate_line(&note.title, 30);
            let preview = note_preview(note, 40);
            let relative_time = format_relative_time(note.updated_at, now);
            let id = note.id.get();
            format!("{id:<6}  {title:<30}  {preview:<40}  {relative_time}")
        })
        .collect()
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    NoteListItem {
        id: note.id.get(),
        title: note.title.clone(),
        preview: note_preview(note, 80),
        content: note.content.clone(),
        created_at: note.created_at.to_rfc3339(),
        updated_at: note.updated_at.to_rfc3339(),
        relative_time: format_relative_time(note.updated_at, Utc::now()),
    }
}

pub fn note_preview(note: &Note, max_chars: usize) -> String {
    truncate_line(note.content.lines().next().unwrap_or(""), max_chars)
}

/// Collapses whitespace and cuts to `max_chars`, ending in `...` when cut.
pub fn truncate_line(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now
        .signed_duration_since(timestamp)
        .num_milliseconds()
        .max(0);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn normalize_title(title: &str) -> Result<String, CliError> {
    normalize_content(title).ok_or(CliError::EmptyTitle)
}

/// Content from arguments, else piped stdin, else empty.
pub fn resolve_note_content(content_parts: &[String]) -> Result<String, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(content);
    }

    Ok(read_piped_stdin()?.unwrap_or_default())
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}
