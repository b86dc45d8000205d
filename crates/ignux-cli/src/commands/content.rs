use chrono::Utc;
use ignux_core::{ContentId, ContentSynchronizer, ContentType, FileStore};

use crate::cli::ContentCommands;
use crate::commands::common::{
    format_content_lines, normalize_content_id, print_json, resolve_fields,
};
use crate::config::Settings;
use crate::error::CliError;

type Synchronizer = ContentSynchronizer<FileStore>;

pub async fn run_content(command: ContentCommands, settings: &Settings) -> Result<(), CliError> {
    match command {
        ContentCommands::List { content_type, json } => {
            run_content_list(&content_type, json, settings).await
        }
        ContentCommands::Add {
            content_type,
            fields,
            json,
        } => run_content_add(&content_type, &fields, json.as_deref(), settings).await,
        ContentCommands::Update {
            content_type,
            id,
            fields,
            json,
        } => run_content_update(&content_type, &id, &fields, json.as_deref(), settings).await,
        ContentCommands::Remove { content_type, id } => {
            run_content_remove(&content_type, &id, settings).await
        }
    }
}

/// Open a synchronizer for `content_type` over the CLI cache file and load it.
pub async fn open_synchronizer(
    content_type: &str,
    settings: &Settings,
) -> Result<Synchronizer, CliError> {
    let content_type = ContentType::new(content_type)?;
    let store = FileStore::new(&settings.cache_path);
    match settings.sync.remote_base_url.as_deref() {
        Some(url) => tracing::debug!("Syncing {content_type} with {url}"),
        None => tracing::debug!("Content API not configured; {content_type} is cache-only"),
    }
    Ok(Synchronizer::open(&settings.sync, content_type, store).await?)
}

async fn run_content_list(
    content_type: &str,
    as_json: bool,
    settings: &Settings,
) -> Result<(), CliError> {
    let synchronizer = open_synchronizer(content_type, settings).await?;
    let snapshot = synchronizer.snapshot().await;

    if let Some(error) = snapshot.error.as_deref() {
        eprintln!("Warning: {error}");
        if !snapshot.content.is_empty() {
            eprintln!("Showing cached {} content.", snapshot.content_type);
        }
    }

    if as_json {
        print_json(&snapshot.content)?;
    } else if snapshot.content.is_empty() {
        println!("No {} items.", snapshot.content_type);
    } else {
        for line in format_content_lines(&snapshot.content, Utc::now()) {
            println!("{line}");
        }
    }

    Ok(())
}

async fn run_content_add(
    content_type: &str,
    assignments: &[String],
    json: Option<&str>,
    settings: &Settings,
) -> Result<(), CliError> {
    let fields = resolve_fields(assignments, json)?;
    let synchronizer = open_synchronizer(content_type, settings).await?;
    let item = synchronizer.add(fields).await?;
    println!("{}", item.id);
    Ok(())
}

async fn run_content_update(
    content_type: &str,
    id: &str,
    assignments: &[String],
    json: Option<&str>,
    settings: &Settings,
) -> Result<(), CliError> {
    let id = ContentId::from(normalize_content_id(id)?);
    let patch = resolve_fields(assignments, json)?;
    let synchronizer = open_synchronizer(content_type, settings).await?;

    if synchronizer.update(&id, &patch).await?.is_none() {
        eprintln!("No local {content_type} item with id {id}; nothing changed locally.");
    }
    println!("{id}");
    Ok(())
}

async fn run_content_remove(
    content_type: &str,
    id: &str,
    settings: &Settings,
) -> Result<(), CliError> {
    let id = ContentId::from(normalize_content_id(id)?);
    let synchronizer = open_synchronizer(content_type, settings).await?;

    if !synchronizer.remove(&id).await? {
        eprintln!("No local {content_type} item with id {id}.");
    }
    println!("{id}");
    Ok(())
}
