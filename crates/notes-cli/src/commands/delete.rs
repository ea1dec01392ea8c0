use notes_core::NoteId;

use crate::commands::common::{ensure_ok, load_notes, open_container};
use crate::error::CliError;

pub async fn run_delete(id: NoteId, api_url: Option<String>) -> Result<(), CliError> {
    let container = open_container(api_url)?;
    let mut state = container.notes_state();
    load_notes(&mut state).await?;

    if state.delete(id).await {
        println!("Deleted note {id}");
        Ok(())
    } else {
        ensure_ok(&state)
    }
}
