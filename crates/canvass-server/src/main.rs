//! canvass-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store, seeds it from CSV when configured and empty, and serves the webhook
//! over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use canvass_engine::Orchestrator;
use canvass_server::{AppState, ServerConfig, gateway::TwilioGateway, loader};
use canvass_store_sqlite::SqliteStore;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Canvass labeling webhook server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("CANVASS").separator("__"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // A store that cannot open is fatal: refusing to start beats running a
  // labeling session with nowhere to put the labels.
  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| {
      format!("failed to open store at {:?}", server_cfg.store_path)
    })?;
  let store = Arc::new(store);

  if let Some(seed_csv) = &server_cfg.seed_csv {
    loader::seed_items(store.as_ref(), seed_csv)
      .await
      .with_context(|| format!("failed to seed store from {seed_csv:?}"))?;
  }

  let gateway = Arc::new(TwilioGateway::new(server_cfg.twilio.clone()));
  let orchestrator = Arc::new(Orchestrator::new(store.clone(), gateway));

  let state = AppState { store, orchestrator };
  let app = canvass_server::router(state);

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
