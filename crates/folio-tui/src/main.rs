//! `folio`: the portfolio in a terminal.
//!
//! # Usage
//!
//! ```
//! folio
//! folio --preset pastel --content ~/profile.toml
//! folio --config ~/.config/folio/config.toml --log-file /tmp/folio.log
//! ```

mod app;
mod ui;

use std::{
  fs::File,
  io,
  path::PathBuf,
  sync::Mutex,
  time::Instant,
};

use anyhow::{Context, Result};
use app::{App, TICK_RATE};
use clap::Parser;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use folio_core::{
  contact::SenderConfig,
  content::Profile,
  particles::FieldConfig,
  theme::{Preset, Theme, ThemeOverrides},
};
use folio_relay::Relay;
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "folio", about = "The Folio portfolio, in your terminal")]
struct Args {
  /// Path to a TOML config file (preset, content, theme, field, sender).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Theme preset: nebula or pastel.
  #[arg(long, env = "FOLIO_PRESET")]
  preset: Option<Preset>,

  /// Profile TOML to show instead of the bundled one.
  #[arg(long, value_name = "FILE")]
  content: Option<PathBuf>,

  /// Write logs to this file (the terminal is busy drawing).
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
  preset:  Option<Preset>,
  content: Option<PathBuf>,
  theme:   ThemeOverrides,
  /// Particle field in braille dots; used when the theme has a backdrop.
  field:   Option<FieldConfig>,
  sender:  SenderConfig,
}

/// Particle field scaled to braille-dot resolution.
fn terminal_field() -> FieldConfig {
  FieldConfig {
    count:       40,
    radius:      0.5,
    link_length: 20.0,
    speed:       0.6,
  }
}

/// Field to animate in the home section, if the theme has a backdrop.
fn backdrop_field(theme: &Theme, configured: Option<FieldConfig>) -> Option<FieldConfig> {
  theme.backdrop.map(|_| configured.unwrap_or_else(terminal_field))
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  if let Some(path) = &args.log_file {
    let file = File::create(path)
      .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
      .with_env_filter(
        EnvFilter::builder()
          .with_default_directive(LevelFilter::INFO.into())
          .from_env_lossy(),
      )
      .with_ansi(false)
      .with_writer(Mutex::new(file))
      .init();
  }

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let preset = args.preset.or(file_cfg.preset).unwrap_or_default();
  let content = args.content.or(file_cfg.content);

  let profile = Profile::load(content.as_deref()).context("loading content")?;
  let theme = preset.theme().with_overrides(&file_cfg.theme);
  let field = backdrop_field(&theme, file_cfg.field);
  let relay = Relay::from_config(&file_cfg.sender).context("building email relay")?;

  tracing::info!(%preset, relay = relay.kind(), "starting");

  let mut app = App::new(profile, theme, field, relay);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app);

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  tracing::info!("exiting");
  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<Relay>,
) -> Result<()> {
  let size = terminal.size().context("reading terminal size")?;
  app.resize(size.width, size.height);

  let mut last_tick = Instant::now();

  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event until the next tick is due, yielding control to
    // tokio while waiting.
    let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(timeout)? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
          if !app.handle_key(key) {
            break;
          }
        }
        Event::Resize(cols, rows) => app.resize(cols, rows),
        _ => {}
      }
    }

    if last_tick.elapsed() >= TICK_RATE {
      last_tick = Instant::now();
      app.tick(last_tick);
    }
  }

  Ok(())
}
