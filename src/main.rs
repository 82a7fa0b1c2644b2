//! ==============================================================================
//! main.rs - chas-devtools entry point
//! ==============================================================================
//!
//! subcommands:
//!     control-unit-server   accept payloads on /post, show the latest on /
//!     sensor-unit-server    answer /connect and /time
//!     mint-token            print an hs256 token for a control unit
//!
//! startup order:
//!     1. parse cli
//!     2. load configuration (explicit --config, else config/devtools.toml, else defaults)
//!     3. install the log subscriber (RUST_LOG wins over logging.level)
//!     4. run the subcommand; any error here ends the process non-zero
//!
//! ==============================================================================

use chas_devtools::config::DevtoolsConfig;
use chas_devtools::store::PayloadStore;
use chas_devtools::token::{self, TokenProfile};
use chas_devtools::{control_unit, sensor_unit, server};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Path to devtools.toml (default: config/devtools.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stub backend for control units: POST /post, GET /
    ControlUnitServer {
        /// Listen address, overrides the config file
        #[arg(long)]
        listen: Option<SocketAddr>,
    },
    /// Stub control unit for sensor units: POST /connect, GET /time
    SensorUnitServer {
        /// Listen address, overrides the config file
        #[arg(long)]
        listen: Option<SocketAddr>,

        /// sensor_id returned by /connect
        #[arg(long)]
        sensor_id: Option<String>,
    },
    /// Sign a token with the shared secret and print it
    MintToken {
        #[arg(long, value_enum, default_value_t = TokenProfile::ControlUnit)]
        profile: TokenProfile,

        /// File holding the raw HMAC secret
        #[arg(long)]
        secret_file: Option<PathBuf>,

        /// File holding the control unit id
        #[arg(long)]
        unit_id_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, source) = match &cli.config {
        Some(path) => (
            DevtoolsConfig::load(path).context("loading configuration")?,
            Some(path.clone()),
        ),
        None => DevtoolsConfig::load_or_default().context("loading configuration")?,
    };

    init_tracing(&config.logging.level);
    match &source {
        Some(path) => info!(path = %path.display(), "configuration loaded"),
        None => info!("no config file found, using defaults"),
    }

    match cli.command {
        Command::ControlUnitServer { listen } => {
            if let Some(addr) = listen {
                config.control_unit_server.listen_address = addr;
            }
            config.log_summary();

            let store = PayloadStore::new();
            server::serve(
                "control-unit",
                config.control_unit_server.listen_address,
                control_unit::router(store),
            )
            .await
            .context("control-unit stub server")
        }
        Command::SensorUnitServer { listen, sensor_id } => {
            if let Some(addr) = listen {
                config.sensor_unit_server.listen_address = addr;
            }
            if let Some(id) = sensor_id {
                config.sensor_unit_server.sensor_id = id;
            }
            config.log_summary();

            server::serve(
                "sensor-unit",
                config.sensor_unit_server.listen_address,
                sensor_unit::router(config.sensor_unit_server.sensor_id.clone()),
            )
            .await
            .context("sensor-unit stub server")
        }
        Command::MintToken {
            profile,
            secret_file,
            unit_id_file,
        } => {
            if let Some(path) = secret_file {
                config.token.secret_file = path;
            }
            if let Some(path) = unit_id_file {
                config.token.unit_id_file = path;
            }

            let token = token::mint(profile, &config.token, chrono::Utc::now())
                .context("minting token")?;
            print!("{}", token::stdout_lines(&token));
            Ok(())
        }
    }
}

/// logs go to stderr so stdout carries only command output
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
