use ignux_core::config::DEFAULT_API_BASE_URL;
use ignux_core::util::{normalize_base_url, normalize_text_option};

use crate::cli::ConfigCommands;
use crate::config::{CliConfig, Settings};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, settings: &Settings) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            api_base_url,
            content_api_url,
            namespace,
        } => {
            let mut config = CliConfig::load()?;
            apply_config_init(&mut config, api_base_url, content_api_url, namespace)?;
            let path = config.save()?;

            println!("Saved CLI config to {}", path.display());
            println!(
                "API base URL: {}",
                config.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
            );
            match config.content_api_url.as_deref() {
                Some(url) => println!("Content API URL: {url}"),
                None => println!("Content API URL: (none, content commands are cache-only)"),
            }
            Ok(())
        }
        ConfigCommands::Show => {
            for line in settings.describe() {
                println!("{line}");
            }
            Ok(())
        }
    }
}

/// Merge explicit `config init` values into `config`, keeping unset ones.
pub fn apply_config_init(
    config: &mut CliConfig,
    api_base_url: Option<String>,
    content_api_url: Option<String>,
    namespace: Option<String>,
) -> Result<(), CliError> {
    if let Some(url) = normalize_text_option(api_base_url) {
        config.api_base_url = Some(normalize_base_url(&url, "api base URL")?);
    }
    if let Some(url) = normalize_text_option(content_api_url) {
        config.content_api_url = Some(normalize_base_url(&url, "content API URL")?);
    }
    if let Some(namespace) = normalize_text_option(namespace) {
        if namespace.chars().any(char::is_whitespace) {
            return Err(CliError::Config(
                "cache namespace must not contain whitespace".to_string(),
            ));
        }
        config.cache_namespace = Some(namespace);
    }
    Ok(())
}
