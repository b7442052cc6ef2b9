//! tubs-manifest - Content catalog generator
//!
//! Scans the data root (instruments, sound packs, rhythms), writes
//! `manifest.json`, then derives `bata_metadata.json` for the Batà rhythms.
//! Exits non-zero only when configuration is invalid or an artifact cannot
//! be written.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};
use tubs_common::config::{self, ConfigOverrides, LoggingConfig};
use tubs_manifest::{generate, GenerateOptions};

/// Command-line arguments for tubs-manifest
#[derive(Parser, Debug)]
#[command(name = "tubs-manifest")]
#[command(about = "Generate manifest.json and Batà metadata from the content tree")]
#[command(version)]
struct Args {
    /// Project root; manifest paths are relative to it
    #[arg(short, long, env = "TUBS_PROJECT_ROOT")]
    project_root: Option<PathBuf>,

    /// Data root, relative to the project root
    #[arg(short, long, env = "TUBS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Manifest output file, relative to the project root
    #[arg(short, long, env = "TUBS_MANIFEST_FILE")]
    manifest: Option<PathBuf>,

    /// TOML configuration file (default: <project root>/tubs-manifest.toml)
    #[arg(short, long, env = "TUBS_CONFIG")]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, env = "TUBS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Only generate manifest.json
    #[arg(long)]
    skip_bata: bool,
}

/// Level used until the configuration file has been read
fn startup_level(cli_level: Option<&str>) -> String {
    cli_level
        .map(str::to_string)
        .unwrap_or_else(|| LoggingConfig::default().level)
}

/// Level from the configuration file, if it should replace the startup filter
///
/// RUST_LOG and `--log-level` both outrank the file.
fn configured_level<'a>(
    rust_log_set: bool,
    cli_level: Option<&str>,
    logging: &'a LoggingConfig,
) -> Option<&'a str> {
    if rust_log_set || cli_level.is_some() {
        return None;
    }
    Some(logging.level.as_str())
}

fn level_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).with_context(|| format!("Invalid log level {:?}", level))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Subscriber first, so configuration loading is logged too
    let env_filter = EnvFilter::try_from_default_env().ok();
    let rust_log_set = env_filter.is_some();
    let initial = match env_filter {
        Some(filter) => filter,
        None => level_filter(&startup_level(args.log_level.as_deref()))?,
    };
    let (filter_layer, filter_handle) = reload::Layer::new(initial);
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer())
        .init();

    info!(
        "Starting tubs-manifest v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let overrides = ConfigOverrides {
        project_root: args.project_root,
        data_dir: args.data_dir,
        manifest_file: args.manifest,
        config_file: args.config,
    };
    let (config, logging) = config::load(&overrides).context("Failed to load configuration")?;

    if let Some(level) = configured_level(rust_log_set, args.log_level.as_deref(), &logging) {
        filter_handle
            .reload(level_filter(level)?)
            .context("Failed to apply configured log level")?;
        debug!("Log level {} from configuration", level);
    }

    info!("Project root: {}", config.project_root.display());
    info!("Data root: {}", config.data_root().display());

    let report = generate(
        &config,
        GenerateOptions {
            skip_bata: args.skip_bata,
        },
    )
    .context("Generation failed")?;

    info!("Manifest written to {}", report.manifest_path.display());
    if let Some(bata) = report.bata.as_ref().and_then(|b| b.output.as_ref()) {
        info!("Batà metadata written to {}", bata.display());
    }

    Ok(())
}
