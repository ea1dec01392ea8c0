use notes_core::util::{is_http_url, normalize_text_option};

use crate::cli::ConfigCommands;
use crate::config::{default_config_path, CliConfig};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, api_url: Option<String>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            api_base_url,
            export_dir,
            widget_cache_dir,
        } => {
            let mut config = CliConfig::load().map_err(CliError::Config)?;
            apply_init(
                &mut config,
                api_base_url.or(api_url),
                export_dir,
                widget_cache_dir,
            )?;
            let path = config.save().map_err(CliError::Config)?;
            println!("Saved config to {}", path.display());
            Ok(())
        }
        ConfigCommands::Show => {
            let file = CliConfig::load().map_err(CliError::Config)?;
            let resolved = file.resolve(api_url)?;
            let path = default_config_path().map_err(CliError::Config)?;
            println!("config_file: {}", path.display());
            println!("api_base_url: {}", resolved.api_base_url);
            println!("export_dir: {}", resolved.export_dir.display());
            println!("widget_cache_dir: {}", resolved.widget_cache_dir.display());
            Ok(())
        }
    }
}

/// Merges explicit values into `config`; omitted values keep what is stored.
pub fn apply_init(
    config: &mut CliConfig,
    api_base_url: Option<String>,
    export_dir: Option<String>,
    widget_cache_dir: Option<String>,
) -> Result<(), CliError> {
    if let Some(url) = normalize_text_option(api_base_url) {
        if !is_http_url(&url) {
            return Err(CliError::Config(format!(
                "API base URL must start with http:// or https://: {url}"
            )));
        }
        config.api_base_url = Some(url.trim_end_matches('/').to_string());
    }
    if let Some(dir) = normalize_text_option(export_dir) {
        config.export_dir = Some(dir);
    }
    if let Some(dir) = normalize_text_option(widget_cache_dir) {
        config.widget_cache_dir = Some(dir);
    }
    Ok(())
}
