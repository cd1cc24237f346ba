//! Runtime configuration: optional TOML file layered with `ABSENSI_*`
//! environment variables.

use std::path::{Path, PathBuf};

use absensi_core::stats::DEFAULT_ABSENCE_THRESHOLD;
use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  #[serde(default = "default_username")]
  pub auth_username:          String,
  /// argon2 PHC string. Without it the login gate is skipped.
  #[serde(default)]
  pub auth_password_hash:     Option<String>,
  /// JSON array of attendance-exception records; built-in demo set if unset.
  #[serde(default)]
  pub seed_path:              Option<PathBuf>,
  #[serde(default = "default_log_file")]
  pub log_file:               PathBuf,
  #[serde(default = "default_threshold")]
  pub absence_threshold_days: u32,
}

fn default_username() -> String { "admin".into() }

fn default_log_file() -> PathBuf { PathBuf::from("absensi.log") }

fn default_threshold() -> u32 { DEFAULT_ABSENCE_THRESHOLD }

impl Default for Settings {
  fn default() -> Self {
    Self {
      auth_username:          default_username(),
      auth_password_hash:     None,
      seed_path:              None,
      log_file:               default_log_file(),
      absence_threshold_days: default_threshold(),
    }
  }
}

impl Settings {
  /// Read `path` (if it exists) and `ABSENSI_*` overrides.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("ABSENSI"))
      .build()
      .context("failed to read config file")?;

    let mut settings: Settings = settings
      .try_deserialize()
      .context("failed to deserialise Settings")?;

    settings.seed_path = settings.seed_path.map(|p| expand_tilde(&p));
    settings.log_file = expand_tilde(&settings.log_file);
    Ok(settings)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
