//! # CLI Layer
//!
//! This module is **one possible UI client** for pumpz. The table controller
//! lives in the library; everything here only turns arguments and input lines
//! into [`PumpzApi`] calls and renders what comes back.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the tracing subscriber
//! - Decides where the config and dataset live on disk
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Loads config and dataset, builds the `AppContext`
//! - `handle_*()`: Per-command handlers that call the API and print output

use super::print::{print_messages, print_table};
use super::setup::{Cli, Commands};
use super::shell;
use clap::Parser;
use directories::ProjectDirs;
use pumpz::api::{CmdMessage, PumpzApi};
use pumpz::commands::sort::SortKey;
use pumpz::config::PumpzConfig;
use pumpz::error::{PumpzError, Result};
use pumpz::store::fs::load_dataset_or_empty;
use pumpz::store::memory::InMemoryStore;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: PumpzApi<InMemoryStore>,
    config: PumpzConfig,
    config_dir: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List {
            query,
            sort,
            desc,
            page,
            page_size,
        }) => handle_list(&mut ctx, query, sort, desc, page, page_size),
        Some(Commands::Shell) => handle_shell(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, None, None, false, 1, None),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "pumpz=debug" } else { "pumpz=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn default_config_dir() -> PathBuf {
    ProjectDirs::from("com", "pumpz", "pumpz")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".pumpz"))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = cli.config_dir.clone().unwrap_or_else(default_config_dir);

    let config = match PumpzConfig::load(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            warn!(dir = %config_dir.display(), error = %e, "unreadable config, using defaults");
            PumpzConfig::default()
        }
    };

    let data_file = cli
        .data
        .clone()
        .unwrap_or_else(|| config.data_file.clone());
    debug!(config_dir = %config_dir.display(), data = %data_file.display(), "starting");

    let records = load_dataset_or_empty(&data_file);
    let store = InMemoryStore::with_records(records);
    let api = PumpzApi::new(store, &config);

    Ok(AppContext {
        api,
        config,
        config_dir,
    })
}

fn handle_list(
    ctx: &mut AppContext,
    query: Option<String>,
    sort: Option<String>,
    desc: bool,
    page: i64,
    page_size: Option<usize>,
) -> Result<()> {
    let api = &mut ctx.api;

    if let Some(query) = query {
        api.set_query(query);
    }
    if let Some(size) = page_size {
        api.set_page_size(size)?;
    }
    if let Some(sort) = sort {
        let key = SortKey::from(sort.as_str());
        api.set_sort_column(key.clone());
        if desc {
            api.set_sort_column(key);
        }
    }
    api.set_page(page);

    print_table(&api.view(), api.sort_state());
    Ok(())
}

fn handle_shell(ctx: &mut AppContext) -> Result<()> {
    let stdin = std::io::stdin();
    shell::run(&mut ctx.api, stdin.lock())
}

const CONFIG_KEYS: [&str; 3] = ["data-file", "page-sizes", "default-page-size"];

fn config_value(config: &PumpzConfig, key: &str) -> Result<String> {
    match key {
        "data-file" => Ok(config.data_file.display().to_string()),
        "page-sizes" => Ok(config
            .page_sizes
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(",")),
        "default-page-size" => Ok(config.default_page_size.to_string()),
        other => Err(unknown_key(other)),
    }
}

fn unknown_key(key: &str) -> PumpzError {
    PumpzError::Api(format!(
        "unknown config key '{}' (expected one of: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

fn parse_size(raw: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .map_err(|_| PumpzError::Api(format!("'{}' is not a page size", raw.trim())))
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let (key, value) = match (key, value) {
        (None, _) => {
            for key in CONFIG_KEYS {
                println!("{} = {}", key, config_value(&ctx.config, key)?);
            }
            return Ok(());
        }
        (Some(key), None) => {
            println!("{}", config_value(&ctx.config, &key)?);
            return Ok(());
        }
        (Some(key), Some(value)) => (key, value),
    };

    let mut config = ctx.config.clone();
    match key.as_str() {
        "data-file" => config.data_file = PathBuf::from(&value),
        "page-sizes" => {
            config.page_sizes = value
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(parse_size)
                .collect::<Result<Vec<_>>>()?;
            config = config.normalized();
        }
        "default-page-size" => config.set_default_page_size(parse_size(&value)?)?,
        other => return Err(unknown_key(other)),
    }

    config.save(&ctx.config_dir)?;
    ctx.config = config;
    print_messages(&[CmdMessage::success(format!(
        "{} = {}",
        key,
        config_value(&ctx.config, &key)?
    ))]);
    Ok(())
}
