use notes_core::NoteId;

use crate::commands::common::{ensure_ok, open_container};
use crate::error::CliError;

pub async fn run_export(id: NoteId, open_url: bool, api_url: Option<String>) -> Result<(), CliError> {
    let container = open_container(api_url)?;
    let mut state = container.notes_state();

    if open_url {
        let url = state
            .pdf_url(id)
            .ok_or_else(|| CliError::Request(format!("Cannot build export URL for note {id}")))?;
        println!("{url}");
        return Ok(());
    }

    match state.export_pdf(id).await {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => ensure_ok(&state),
    }
}
