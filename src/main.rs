//! Pixscroll - infinite-scroll image search in the terminal.
//!
//! # Usage
//!
//! ```bash
//! PIXABAY_API_KEY=... pixscroll "mountain lake"
//! pixscroll --api-key KEY --page-size 20 cats
//! pixscroll --api-key KEY --save
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use pixscroll::app::App;
use pixscroll::config::{
    API_KEY_ENV, ConfigFlags, DEBUG_LOG_ENV, clear_config_flags, global_config_path,
    load_config_flags, local_override_path, parse_flag_tokens, save_config_flags,
};
use pixscroll::perf;
use pixscroll::search::{DEFAULT_ENDPOINT, PixabayClient};

/// Search Pixabay from the terminal, loading more results as you scroll
#[derive(Parser, Debug)]
#[command(name = "pixscroll", version, about, long_about = None)]
struct Cli {
    /// Query to search for on startup
    #[arg(value_name = "QUERY")]
    query: Vec<String>,

    /// Pixabay API key (or set PIXABAY_API_KEY)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Search endpoint
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Results per page
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(3..=200))]
    page_size: Option<u32>,

    /// Rows of look-ahead before the next page is requested
    #[arg(long, value_name = "ROWS")]
    proximity: Option<usize>,

    /// Record timing scopes in the debug log (pixscroll-perf.log if no --debug-log)
    #[arg(long)]
    perf: bool,

    /// Write session, sentinel and fetch events to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn env_flags() -> ConfigFlags {
    ConfigFlags {
        api_key: std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty()),
        debug_log: std::env::var_os(DEBUG_LOG_ENV).map(PathBuf::from),
        ..ConfigFlags::default()
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&env_flags()).union(&cli_flags);

    perf::set_enabled(effective.perf);
    let debug_log = effective.effective_debug_log();
    if let Err(err) = perf::set_debug_log_path(debug_log.as_deref()) {
        eprintln!(
            "[warn] Failed to initialize debug log {}: {}",
            debug_log
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            err
        );
    }

    let api_key = effective.api_key.clone().with_context(|| {
        format!("No API key: pass --api-key or set {API_KEY_ENV}")
    })?;
    let endpoint = effective
        .endpoint
        .clone()
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let client = PixabayClient::with_endpoint(api_key, endpoint)
        .context("Failed to create search client")?;

    let query = cli.query.join(" ");
    let initial_query = (!query.trim().is_empty()).then_some(query);

    let mut app = App::new(Arc::new(client))
        .with_page_size(effective.effective_page_size())
        .with_proximity(effective.effective_proximity())
        .with_initial_query(initial_query)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
