pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod parser;
pub mod services;

pub use config::Config;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Daemon) => cli::cmd_daemon(&config).await,

        Some(Commands::Reconcile { dry_run }) => cli::cmd_reconcile(&config, dry_run).await,

        Some(Commands::Report {
            unclassified,
            page,
            limit,
            json,
        }) => cli::cmd_report(&config, unclassified, page, limit, json).await,

        Some(Commands::Versions) => cli::cmd_versions(&config),

        Some(Commands::History { limit }) => cli::cmd_history(&config, limit).await,

        Some(Commands::Add {
            title,
            file,
            state,
            version,
        }) => cli::cmd_add(&config, &title, file.as_deref(), &state, version.as_deref()).await,

        Some(Commands::Init) => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("Config file already exists, nothing to do.");
            }
            Ok(())
        }

        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
