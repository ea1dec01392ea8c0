use notes_core::NoteId;

use crate::commands::common::{ensure_ok, load_notes, normalize_title, open_container};
use crate::error::CliError;

pub async fn run_edit(
    id: NoteId,
    title: Option<&str>,
    content: Option<&str>,
    api_url: Option<String>,
) -> Result<(), CliError> {
    if title.is_none() && content.is_none() {
        return Err(CliError::NothingToUpdate);
    }
    let title = title.map(normalize_title).transpose()?;

    let container = open_container(api_url)?;
    let mut state = container.notes_state();
    load_notes(&mut state).await?;

    match state.update(id, title.as_deref(), content).await {
        Some(note) => {
            println!("Updated note {}: {}", note.id, note.title);
            Ok(())
        }
        None => ensure_ok(&state),
    }
}
