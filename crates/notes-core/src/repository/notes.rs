//! Note endpoints and PDF export.
//!
//! Paths keep the backend's trailing-slash convention exactly; the server
//! does not normalize them.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::Method;
use url::Url;
use uuid::Uuid;

use crate::api::dto::{NoteCreateDto, NoteDto, NoteUpdateDto};
use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{Note, NoteId};

pub const NOTES_PATH: &str = "/notes/";

#[must_use]
pub fn note_path(id: NoteId) -> String {
    format!("/notes/{id}/")
}

#[must_use]
pub fn note_pdf_path(id: NoteId) -> String {
    format!("/notes/{id}/export/pdf")
}

/// File name for one export; `token` keeps concurrent exports apart.
#[must_use]
pub fn export_file_name(id: NoteId, token: Uuid) -> String {
    format!("note-{id}-{token}.pdf")
}

#[async_trait]
pub trait NotesRepository: Send + Sync {
    async fn fetch_notes(&self) -> Result<Vec<Note>>;

    async fn create(&self, title: &str, content: &str) -> Result<Note>;

    /// Partial update: `None` fields are sent as `null` and left unchanged.
    async fn update(&self, id: NoteId, title: Option<&str>, content: Option<&str>)
        -> Result<Note>;

    async fn delete(&self, id: NoteId) -> Result<()>;

    /// Export URL for a note. No request is made.
    fn pdf_url(&self, id: NoteId) -> Result<Url>;

    /// Downloads the PDF into a fresh file and returns its path.
    async fn export_pdf_file(&self, id: NoteId) -> Result<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct HttpNotesRepository {
    api: ApiClient,
    export_dir: PathBuf,
}

impl HttpNotesRepository {
    pub fn new(api: ApiClient, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            api,
            export_dir: export_dir.into(),
        }
    }
}

#[async_trait]
impl NotesRepository for HttpNotesRepository {
    async fn fetch_notes(&self) -> Result<Vec<Note>> {
        let notes: Vec<NoteDto> = self
            .api
            .request::<_, ()>(NOTES_PATH, Method::GET, &[], None)
            .await?;
        Ok(notes.into_iter().map(Note::from).collect())
    }

    async fn create(&self, title: &str, content: &str) -> Result<Note> {
        let body = NoteCreateDto { title, content };
        let note: NoteDto = self
            .api
            .request(NOTES_PATH, Method::POST, &[], Some(&body))
            .await?;
        Ok(note.into())
    }

    async fn update(
        &self,
        id: NoteId,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Note> {
        let body = NoteUpdateDto { title, content };
        let note: NoteDto = self
            .api
            .request(&note_path(id), Method::PUT, &[], Some(&body))
            .await?;
        Ok(note.into())
    }

    async fn delete(&self, id: NoteId) -> Result<()> {
        self.api
            .request_void::<()>(&note_path(id), Method::DELETE, None)
            .await?;
        Ok(())
    }

    fn pdf_url(&self, id: NoteId) -> Result<Url> {
        Ok(self.api.url_for(&note_pdf_path(id), &[])?)
    }

    async fn export_pdf_file(&self, id: NoteId) -> Result<PathBuf> {
        let bytes = self
            .api
            .request_raw_bytes(&note_pdf_path(id), Method::GET, &[])
            .await?;

        tokio::fs::create_dir_all(&self.export_dir).await?;
        let file_name = export_file_name(id, Uuid::new_v4());
        let path = self.export_dir.join(&file_name);
        write_via_partial(&path, &bytes).await?;

        tracing::info!("Exported note {} to {}", id, path.display());
        Ok(path)
    }
}

/// Writes next to `path` under a `.part` name, then renames into place.
/// The partial file is removed when either step fails.
async fn write_via_partial(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    let written = match tokio::fs::write(&partial, bytes).await {
        Ok(()) => tokio::fs::rename(&partial, path).await,
        Err(error) => Err(error),
    };
    if written.is_err() {
        let _ = tokio::fs::remove_file(&partial).await;
    }
    written
}
