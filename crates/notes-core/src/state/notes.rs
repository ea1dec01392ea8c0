use std::path::PathBuf;
use std::sync::Arc;

use url::Url;

use crate::error::Error;
use crate::models::{Note, NoteId};
use crate::repository::NotesRepository;
use crate::widget::{WidgetCache, WidgetCacheSnapshot};

pub struct NotesState {
    repo: Arc<dyn NotesRepository>,
    widget: WidgetCache,
    notes: Vec<Note>,
    is_loading: bool,
    error: Option<String>,
    last_error_unauthorized: bool,
}

impl NotesState {
    pub fn new(repo: Arc<dyn NotesRepository>, widget: WidgetCache) -> Self {
        Self {
            repo,
            widget,
            notes: Vec::new(),
            is_loading: false,
            error: None,
            last_error_unauthorized: false,
        }
    }

    /// Notes in display order, newest insertions first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the last failure was a rejected token.
    pub const fn needs_reauthentication(&self) -> bool {
        self.last_error_unauthorized
    }

    pub fn filtered(&self, query: &str) -> Vec<&Note> {
        self.notes.iter().filter(|note| note.matches(query)).collect()
    }

    /// Replaces the list with the server's copy.
    pub async fn load(&mut self) {
        self.is_loading = true;
        self.clear_error();
        match self.repo.fetch_notes().await {
            Ok(notes) => {
                tracing::info!("Loaded {} notes", notes.len());
                self.notes = notes;
                self.refresh_widget();
            }
            Err(error) => self.record_error("load notes", &error),
        }
        self.is_loading = false;
    }

    pub async fn create(&mut self, title: &str, content: &str) -> Option<Note> {
        self.clear_error();
        match self.repo.create(title, content).await {
            Ok(note) => {
                tracing::info!("Created note {}", note.id);
                self.notes.insert(0, note.clone());
                self.refresh_widget();
                Some(note)
            }
            Err(error) => {
                self.record_error("create note", &error);
                None
            }
        }
    }

    pub async fn update(
        &mut self,
        id: NoteId,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Option<Note> {
        self.clear_error();
        match self.repo.update(id, title, content).await {
            Ok(updated) => {
                tracing::info!("Updated note {}", id);
                if let Some(slot) = self.notes.iter_mut().find(|note| note.id == id) {
                    *slot = updated.clone();
                }
                self.refresh_widget();
                Some(updated)
            }
            Err(error) => {
                self.record_error("update note", &error);
                None
            }
        }
    }

    pub async fn delete(&mut self, id: NoteId) -> bool {
        self.clear_error();
        match self.repo.delete(id).await {
            Ok(()) => {
                tracing::info!("Deleted note {}", id);
                self.notes.retain(|note| note.id != id);
                self.refresh_widget();
                true
            }
            Err(error) => {
                self.record_error("delete note", &error);
                false
            }
        }
    }

    pub fn pdf_url(&self, id: NoteId) -> Option<Url> {
        match self.repo.pdf_url(id) {
            Ok(url) => Some(url),
            Err(error) => {
                tracing::warn!("Failed to build export URL for note {}: {}", id, error);
                None
            }
        }
    }

    /// Downloads the note's PDF; failures are recorded and yield `None`.
    pub async fn export_pdf(&mut self, id: NoteId) -> Option<PathBuf> {
        self.clear_error();
        match self.repo.export_pdf_file(id).await {
            Ok(path) => Some(path),
            Err(error) => {
                self.record_error("export note", &error);
                None
            }
        }
    }

    fn refresh_widget(&self) {
        let snapshot = WidgetCacheSnapshot::from_notes(&self.notes);
        if let Err(error) = self.widget.save(&snapshot) {
            tracing::warn!("Failed to update widget cache: {}", error);
        }
    }

    fn clear_error(&mut self) {
        self.error = None;
        self.last_error_unauthorized = false;
    }

    fn record_error(&mut self, operation: &str, error: &Error) {
        tracing::warn!("Failed to {}: {}", operation, error);
        self.last_error_unauthorized = error.is_unauthorized();
        self.error = Some(error.to_string());
    }
}
