//! Terminal rendering of the recent-notes widget snapshot.
//!
//! Reads the shared store only; the API is never contacted.

use std::sync::Arc;

use notes_core::widget::{FileSharedStore, NoopReloader, WidgetCache, WidgetCacheSnapshot};

use crate::cli::WidgetSize;
use crate::commands::common::{resolve_client_config, truncate_line};
use crate::error::CliError;

const WIDGET_TITLE: &str = "Notes";
const MEDIUM_HEADER: &str = "Recent Notes";
const EMPTY_MESSAGE: &str = "No recent notes";
const MEDIUM_ENTRIES: usize = 3;
const LINE_WIDTH: usize = 40;

pub fn run_widget(size: WidgetSize, as_json: bool, api_url: Option<String>) -> Result<(), CliError> {
    let config = resolve_client_config(api_url)?;
    let cache = WidgetCache::new(
        Arc::new(FileSharedStore::new(&config.widget_cache_dir)),
        Arc::new(NoopReloader),
    );
    let snapshot = cache.load();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    for line in render_widget(&snapshot, size) {
        println!("{line}");
    }
    Ok(())
}

pub fn render_widget(snapshot: &WidgetCacheSnapshot, size: WidgetSize) -> Vec<String> {
    match size {
        WidgetSize::Small => render_small(snapshot),
        WidgetSize::Medium => render_medium(snapshot),
    }
}

fn render_small(snapshot: &WidgetCacheSnapshot) -> Vec<String> {
    let Some(first) = snapshot.recent_notes().first() else {
        return vec![WIDGET_TITLE.to_string(), EMPTY_MESSAGE.to_string()];
    };

    let mut lines = vec![truncate_line(&first.title, LINE_WIDTH)];
    lines.extend(
        first
            .content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .take(2)
            .map(|line| truncate_line(line, LINE_WIDTH)),
    );
    lines
}

fn render_medium(snapshot: &WidgetCacheSnapshot) -> Vec<String> {
    let mut lines = vec![MEDIUM_HEADER.to_string()];
    if snapshot.is_empty() {
        lines.push(EMPTY_MESSAGE.to_string());
        return lines;
    }

    for note in snapshot.recent_notes().iter().take(MEDIUM_ENTRIES) {
        lines.push(format!("- {}", truncate_line(&note.title, LINE_WIDTH)));
        let first_line = note.content.lines().next().unwrap_or("");
        lines.push(format!("  {}", truncate_line(first_line, LINE_WIDTH)));
    }
    lines
}
