use crate::commands::common::{
    format_note_lines, load_notes, note_to_list_item, open_container, NoteListItem,
};
use crate::error::CliError;

pub async fn run_list(
    limit: usize,
    query: Option<&str>,
    as_json: bool,
    api_url: Option<String>,
) -> Result<(), CliError> {
    let container = open_container(api_url)?;
    let mut state = container.notes_state();
    load_notes(&mut state).await?;

    let notes = state
        .filtered(query.unwrap_or_default())
        .into_iter()
        .take(limit)
        .collect::<Vec<_>>();

    if as_json {
        let json_items = notes
            .iter()
            .map(|note| note_to_list_item(note))
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if notes.is_empty() {
        println!("No notes");
    } else {
        for line in format_note_lines(&notes) {
            println!("{line}");
        }
    }

    Ok(())
}
