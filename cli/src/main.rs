//! Fleet maintenance service, headless server binary.
//!
//! ```sh
//! # Run with default config (~/.config/fleet-maintenance/config.toml)
//! fleet-service
//!
//! # Custom config path
//! fleet-service --config /etc/fleet-maintenance/config.toml
//!
//! # Throwaway instance without a database file
//! fleet-service --in-memory --port 3000
//!
//! # Validate config without starting
//! fleet-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use fleet_maintenance::config::{default_config_path, AppConfig};
use fleet_maintenance::server::{init_tracing, ServerHandle, ServerOptions};

/// Vehicle fleet maintenance tracking service.
#[derive(Parser, Debug)]
#[command(
    name = "fleet-service",
    version,
    about = "REST service for vehicle fleet maintenance tracking",
    long_about = "Tracks vehicles, odometer readings and maintenance jobs \
                  through a REST API with Swagger documentation.\n\n\
                  Default config: ~/.config/fleet-maintenance/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "FLEET_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Use the in-memory store instead of the configured database.
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new(
                    cli.log_level.as_deref().unwrap_or("info"),
                ))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            AppConfig::default()
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }
    if let Some(ref level) = cli.log_level {
        info!("CLI override: log_level = {}", level);
        config.logging.level = level.clone();
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.api_address());
        if cli.in_memory {
            println!("   Storage     : in-memory");
        } else {
            println!("   Database    : {}", config.database.url);
        }
        println!("   Log level   : {}", config.logging.level);
        println!("   Log format  : {}", config.logging.format);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        in_memory: cli.in_memory,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;

    Ok(())
}
