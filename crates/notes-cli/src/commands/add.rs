use crate::commands::common::{
    ensure_ok, load_notes, normalize_title, open_container, resolve_note_content,
};
use crate::error::CliError;

pub async fn run_add(
    title: &str,
    content_parts: &[String],
    api_url: Option<String>,
) -> Result<(), CliError> {
    let title = normalize_title(title)?;
    let content = resolve_note_content(content_parts)?;

    let container = open_container(api_url)?;
    let mut state = container.notes_state();
    load_notes(&mut state).await?;

    match state.create(&title, &content).await {
        Some(note) => {
            println!("{}", note.id);
            Ok(())
        }
        None => ensure_ok(&state),
    }
}
