//! `absensi`: terminal admin dashboard for Non-ASN attendance.
//!
//! # Usage
//!
//! ```
//! absensi --config absensi.toml
//! absensi --seed employees.json
//! absensi --hash-password
//! ```

mod app;
mod auth;
mod form;
mod settings;
mod toast;
mod ui;

use std::{
  fs::OpenOptions,
  io,
  path::PathBuf,
  sync::Mutex,
  time::{Duration, Instant},
};

use absensi_core::{registry::InMemoryRegistry, seed};
use anyhow::{Context, Result};
use app::App;
use auth::AuthConfig;
use clap::Parser;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Settings;
use toast::Toasts;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "absensi", version, about = "Non-ASN attendance admin dashboard")]
struct Args {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "absensi.toml")]
  config: PathBuf,

  /// JSON file with attendance-exception records; overrides `seed_path`.
  #[arg(long, value_name = "FILE", env = "ABSENSI_SEED")]
  seed: Option<PathBuf>,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let args = Args::parse();

  if args.hash_password {
    let password = read_password()?;
    println!("{}", auth::hash_password(&password)?);
    return Ok(());
  }

  let settings = Settings::load(&args.config)?;
  init_tracing(&settings)?;

  let seed_path = args
    .seed
    .map(|p| settings::expand_tilde(&p))
    .or_else(|| settings.seed_path.clone());
  let records = match &seed_path {
    Some(path) => seed::load_records(path)
      .with_context(|| format!("loading records from {}", path.display()))?,
    None => seed::default_records(),
  };
  tracing::info!(records = records.len(), source = ?seed_path, "registry loaded");

  let registry =
    InMemoryRegistry::new(records, Toasts::new()).context("building registry")?;

  let auth = match settings.auth_password_hash.clone() {
    Some(password_hash) => Some(AuthConfig {
      username: settings.auth_username.clone(),
      password_hash,
    }),
    None => {
      tracing::warn!("auth_password_hash not set, login disabled");
      None
    }
  };

  let mut app = App::new(
    registry,
    seed::default_entries(),
    auth,
    settings.absence_threshold_days,
    chrono::Local::now().date_naive(),
  );

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app);

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

/// Log to `settings.log_file`; the terminal belongs to the UI.
fn init_tracing(settings: &Settings) -> Result<()> {
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(&settings.log_file)
    .with_context(|| format!("opening log file {}", settings.log_file.display()))?;

  tracing_subscriber::fmt()
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();
  Ok(())
}

// ─── Event loop ───────────────────────────────────────────────────────────────

fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    app.tick(Instant::now());
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    if !event::poll(Duration::from_millis(100)).context("polling events")? {
      continue;
    }

    match event::read().context("reading event")? {
      Event::Key(key) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key) {
          break;
        }
      }
      Event::Resize(_, _) => {
        // Terminal will redraw on next iteration.
      }
      _ => {}
    }
  }

  tracing::info!("exiting");
  Ok(())
}

fn read_password() -> Result<String> {
  use std::io::{BufRead, Write};
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(
    line
      .trim_end_matches('\n')
      .trim_end_matches('\r')
      .to_string(),
  )
}
