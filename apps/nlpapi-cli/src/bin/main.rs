use anyhow::{bail, Context};
use serde_json::Value;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use nlpapi_collections::{CollectionManager, CreateOutcome, InMemoryRemote, WatchSelectionStore};
use nlpapi_core::config::{expand_path, ClientSettings, Config};
use nlpapi_core::normalize;
use nlpapi_core::traits::SelectionStore;
use nlpapi_core::types::NO_COLLECTION;
use nlpapi_core::wire::{
    read_json_file, ApiCollectionResponse, ApiDocumentListResponse, ApiDocumentObj, ApiDocumentResponse,
    ApiSearchResult, ApiStatResult, ApiUserResult,
};

const KINDS: &str = "user|stats|search|document|collection|documents-created|document-list";

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <normalize|session> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn init_tracing(settings: &ClientSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log.filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn normalize_file(kind: &str, path: &Path) -> anyhow::Result<Value> {
    let value = match kind {
        "user" => serde_json::to_value(normalize(&read_json_file::<ApiUserResult>(path)?))?,
        "stats" => serde_json::to_value(normalize(&read_json_file::<ApiStatResult>(path)?))?,
        "search" => serde_json::to_value(normalize(&read_json_file::<ApiSearchResult>(path)?))?,
        "document" => serde_json::to_value(normalize(&read_json_file::<ApiDocumentObj>(path)?))?,
        "collection" => serde_json::to_value(normalize(&read_json_file::<ApiCollectionResponse>(path)?))?,
        "documents-created" => serde_json::to_value(normalize(&read_json_file::<ApiDocumentResponse>(path)?))?,
        "document-list" => serde_json::to_value(normalize(&read_json_file::<ApiDocumentListResponse>(path)?))?,
        other => bail!("Unknown record kind '{}', expected one of {}", other, KINDS),
    };
    Ok(value)
}

fn list_json_files(root: &Path) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && p.extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();
    files.sort();
    files
}

fn run_normalize(args: &[String]) -> anyhow::Result<()> {
    let (Some(kind), Some(path)) = (args.first(), args.get(1)) else {
        bail!("Usage: nlpapi normalize <{}> <file-or-dir>", KINDS);
    };
    let root = expand_path(path);
    let files = list_json_files(&root);
    if files.is_empty() {
        warn!(path = %root.display(), "no .json files found");
        return Ok(());
    }
    for file in &files {
        let value = normalize_file(kind, file).with_context(|| format!("normalizing {}", file.display()))?;
        if files.len() > 1 {
            println!("# {}", file.display());
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    info!(count = files.len(), kind = kind.as_str(), "normalized");
    Ok(())
}

async fn run_session(settings: &ClientSettings, names: &[String]) -> anyhow::Result<()> {
    let remote = Arc::new(InMemoryRemote::new());
    let store = WatchSelectionStore::default();
    let mut manager = CollectionManager::new(remote.clone(), store.clone(), settings.collections.can_create)
        .with_deep_dive(settings.collections.deep_dive);

    manager.mount();
    manager.run_until_idle().await;

    for name in names {
        manager.select(NO_COLLECTION);
        if !manager.show_create_form() {
            warn!(collection_name = name.as_str(), "collection creation is disabled");
            continue;
        }
        match manager.submit_create(name) {
            CreateOutcome::Submitted => {
                manager.run_until_idle().await;
                info!(collection_name = name.as_str(), collection_id = store.current_collection(), "created");
            }
            outcome => warn!(collection_name = name.as_str(), ?outcome, "create refused"),
        }
    }

    println!("{}", serde_json::to_string_pretty(&manager.view())?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let settings = config.settings()?;
    init_tracing(&settings);

    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "normalize" => run_normalize(&args)?,
        "session" => run_session(&settings, &args).await?,
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}
