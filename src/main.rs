use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(
    name = "sonicpulse",
    version,
    about = "Top 10 trending songs, grounded in live web search",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch today's trending songs and print the leaderboard
    Fetch {
        /// Print the snapshot as JSON instead of a table
        #[arg(long, default_value = "false")]
        json: bool,

        /// Also write the CSV export into this directory
        #[arg(long)]
        export: Option<PathBuf>,

        /// Also generate a three-month forecast
        #[arg(long, default_value = "false")]
        forecast: bool,
    },

    /// Generate a three-month forecast
    Forecast {
        /// Snapshot JSON written by `fetch --json`; fetches fresh data when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Write the leaderboard as CSV
    Export {
        /// Output directory (defaults to the configured export directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Snapshot JSON written by `fetch --json`; fetches fresh data when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Serve the dashboard API
    Serve {
        /// Bind host
        #[arg(long)]
        host: Option<String>,

        /// Bind port
        #[arg(short, long)]
        port: Option<u16>,

        /// Skip the fetch normally run at startup
        #[arg(long, default_value = "false")]
        no_initial_fetch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = commands::load_config(cli.config.as_deref())?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    config.validate()?;

    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    tracing::info!("SonicPulse starting");

    match cli.command {
        Commands::Fetch {
            json,
            export,
            forecast,
        } => {
            tracing::info!(
                json = %json,
                export = ?export,
                forecast = %forecast,
                "Starting fetch command"
            );
            commands::fetch(&config, json, export, forecast).await?;
        }

        Commands::Forecast { input } => {
            tracing::info!(input = ?input, "Starting forecast command");
            commands::forecast(&config, input).await?;
        }

        Commands::Export { output, input } => {
            tracing::info!(output = ?output, input = ?input, "Starting export command");
            let output = output.unwrap_or_else(|| config.export.output_dir.clone());
            commands::export(&config, output, input).await?;
        }

        Commands::Serve {
            host,
            port,
            no_initial_fetch,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if no_initial_fetch {
                config.server.initial_fetch = false;
            }
            tracing::info!(
                host = %config.server.host,
                port = %config.server.port,
                initial_fetch = %config.server.initial_fetch,
                "Starting serve command"
            );
            commands::serve(&config).await?;
        }
    }

    tracing::info!("SonicPulse completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("sonicpulse=debug,tower_http=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new(format!("sonicpulse={level},warn"))
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
