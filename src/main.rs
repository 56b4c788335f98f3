//! CDN distribution composer (dry run).
//!
//! Derives the routing rules, policies and custom domain wiring for a site and
//! prints the planned distribution as JSON.
//!
//! # Architecture Overview
//!
//! ```text
//!   site.toml ──▶ config ──────────────┐
//!                                      ▼
//!   static dir ─▶ manifest ──▶ ┌───────────────────┐      ┌──────────────┐
//!                              │ distribution      │─────▶│  platform    │
//!               policy ──────▶ │   composer        │◀─────│ (planning)   │
//!               routing ─────▶ │                   │      └──────────────┘
//!               domain ──────▶ │                   │
//!               edge ────────▶ └─────────┬─────────┘
//!                                        ▼
//!                              Composition (JSON on stdout)
//! ```

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use cdn_composer::config::load_config;
use cdn_composer::distribution::compose;
use cdn_composer::manifest::read_build_dir;
use cdn_composer::observability::init_logging;
use cdn_composer::platform::{PlannedAction, PlanningPlatform};
use cdn_composer::Composition;

#[derive(Parser)]
#[command(name = "cdn-composer")]
#[command(about = "Plan the CDN distribution for a static + server + image site")]
#[command(long_about = None)]
struct Cli {
    /// Site configuration (TOML).
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    /// Static build output directory; only its top level is read.
    #[arg(short, long)]
    static_dir: PathBuf,

    /// Log level when RUST_LOG is unset (overrides the config file).
    #[arg(long)]
    log_level: Option<String>,

    /// Include the recorded platform requests in the output.
    #[arg(long)]
    show_actions: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_domain_url: Option<String>,
    composition: &'a Composition,
    #[serde(skip_serializing_if = "Option::is_none")]
    actions: Option<&'a [PlannedAction]>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.observability.log_level.clone());
    init_logging(&log_level);

    tracing::info!(
        config = %cli.config.display(),
        static_dir = %cli.static_dir.display(),
        "cdn-composer starting"
    );

    let manifest = read_build_dir(&cli.static_dir)?;
    let mut platform = PlanningPlatform::new();
    let composition = compose(&config, &manifest, &mut platform)?;

    let output = Output {
        url: composition.url(),
        custom_domain_url: composition.custom_domain_url(),
        composition: &composition,
        actions: cli.show_actions.then(|| platform.actions()),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
