//! GenBI - Conversational BI assistant CLI
//!
#![doc = "GenBI - Conversational BI assistant CLI"]
#![doc = "Main entry point for the GenBI application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use genbi::cli::{Cli, Commands};
use genbi::commands;
use genbi::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing; --verbose lowers the default filter to debug
    init_tracing(cli.verbose);

    // If the user supplied a sessions path on the CLI, mirror it into
    // GENBI_SESSIONS_FILE so the store initializer can pick it up. This
    // keeps callers unchanged while allowing `JsonFileStore::new()` to
    // honor an override.
    if let Some(path) = &cli.sessions_path {
        std::env::set_var("GENBI_SESSIONS_FILE", path);
        tracing::info!("Using session file override from CLI: {}", path);
    }

    // Load configuration
    let config = Config::load(&cli.config)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { datasource, resume } => {
            if let Some(ds) = &datasource {
                tracing::debug!("Using datasource override: {}", ds);
            }
            if let Some(r) = &resume {
                tracing::debug!("Resuming session: {}", r);
            }

            commands::chat::run_chat(config, datasource, resume).await?;
            Ok(())
        }
        Commands::Sessions { command } => {
            tracing::info!("Starting sessions command");
            commands::sessions::handle_sessions(command, &config)?;
            Ok(())
        }
        Commands::Datasources { command } => {
            tracing::info!("Starting datasources command");
            commands::datasources::handle_datasources(command, &config)?;
            Ok(())
        }
        Commands::Export { id, format, output } => {
            tracing::info!("Starting export command");
            commands::export::run_export(&id, &format, output)?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` takes precedence; otherwise the default level is `info`,
/// or `debug` when `--verbose` was given.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "genbi=debug" } else { "genbi=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
