pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod navigation;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, LocationCommands, StaffCommands};
pub use config::Config;
use state::SharedState;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = Config::load()?;
    config.validate()?;

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        Some(handle)
    } else {
        None
    };

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.observability.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    if prometheus_handle.is_some() {
        info!("Prometheus metrics recorder initialized");
    }

    match cli.command {
        Some(Commands::Serve) => run_server(config, prometheus_handle).await,

        Some(Commands::Init) => {
            if Config::create_default_if_missing()? {
                println!("Created config.toml with default settings.");
            } else {
                println!("config.toml already exists, leaving it untouched.");
            }
            Ok(())
        }

        Some(Commands::Staff { command }) => match command {
            StaffCommands::Add { name, role, pin } => {
                cli::cmd_staff_add(&config, &name, &role, &pin).await
            }
            StaffCommands::List => cli::cmd_staff_list(&config).await,
        },

        Some(Commands::Location { command }) => match command {
            LocationCommands::Add { name } => cli::cmd_location_add(&config, &name).await,
            LocationCommands::List => cli::cmd_location_list(&config).await,
        },

        None => {
            print_help();
            Ok(())
        }
    }
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<metrics_exporter_prometheus::PrometheusHandle>,
) -> anyhow::Result<()> {
    info!("Shiftflow v{} starting...", env!("CARGO_PKG_VERSION"));

    let port = config.server.port;
    let shared = Arc::new(SharedState::new(config).await?);
    let api_state = api::create_app_state(shared, prometheus_handle);
    let app = api::router(api_state).await?;

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Web server running at http://{}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Web server error: {}", e);
        return Err(e.into());
    }

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections...");
}

fn print_help() {
    println!(
        r"Shiftflow v{} - café shift operations

USAGE:
    shiftflow <COMMAND>

COMMANDS:
    serve                                     Start the web API
    init                                      Create default config.toml
    staff add --name N --role R --pin 1234    Create a staff profile
    staff list                                List staff profiles
    location add --name N                     Create a location
    location list                             List locations

Run 'shiftflow --help' for details.",
        env!("CARGO_PKG_VERSION")
    );
}
