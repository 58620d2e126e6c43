//! folio-web server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `FOLIO_*`
//! environment variables, builds the configured email relay, and serves the
//! portfolio over HTTP.
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `FOLIO_SENDER__ACCESS_KEY`.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use folio_core::content::Profile;
use folio_relay::Relay;
use folio_web::{AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Folio portfolio web server")]
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
    .add_source(
      config::Environment::with_prefix("FOLIO")
        .prefix_separator("_")
        .separator("__"),
    )
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let profile = Profile::load(server_cfg.content.as_deref()).with_context(|| {
    format!("failed to load content from {:?}", server_cfg.content)
  })?;
  let theme = server_cfg.theme();
  let relay = Relay::from_config(&server_cfg.sender).context("failed to build email relay")?;

  tracing::info!(
    preset = %server_cfg.preset,
    relay = relay.kind(),
    assets = %server_cfg.assets_dir.display(),
    "configuration loaded"
  );

  // Build application state.
  let state = AppState {
    sender:  Arc::new(relay),
    profile: Arc::new(profile),
    theme:   Arc::new(theme),
    config:  Arc::new(server_cfg.clone()),
  };

  let app = folio_web::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
