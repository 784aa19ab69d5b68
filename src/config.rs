//! Application configuration consumed by the view helper.
//!
//! Replaces a process-wide key/value registry with an explicit value handed to
//! [`crate::View::new`]. Files may be written as JSON or YAML and use the same upper-case
//! keys (`DEBUG`, `BASEDIR`) the host application already exposes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

const DEFAULT_CONFIG_FILE: &str = "view.config.json";

/// Directory below [`ViewConfig::basedir`] receiving the generated bundles.
pub const PUBLIC_DIR: &str = "public";

/// Configuration describing the site URL, asset sources and bundle versioning.
///
/// `version` and `BASEDIR` are required; the remaining keys default to empty/off.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewConfig {
  /// Explicit base URL of the site. Blank values trigger derivation from the request.
  #[serde(default)]
  pub base_url: String,
  /// Version string embedded in bundle file names. Must be written as a string so that
  /// `2.10` and `2.1` stay distinct.
  pub version: String,
  /// Debug mode disables minification and forces bundle regeneration.
  #[serde(
    default,
    rename = "DEBUG",
    alias = "debug",
    deserialize_with = "deserialize_flag"
  )]
  pub debug: bool,
  /// Application base directory; sources and `public/` are resolved against it.
  #[serde(rename = "BASEDIR", alias = "basedir")]
  pub basedir: PathBuf,
  /// JavaScript sources relative to `basedir`, in bundle order.
  #[serde(default)]
  pub js: Vec<String>,
  /// Stylesheet sources relative to `basedir`, in bundle order.
  #[serde(default)]
  pub css: Vec<String>,
}

/// Errors that can occur while loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
  /// Failed to read the configuration file.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse the configuration file.
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Parser error message.
    message: String,
  },
  /// The file extension does not name a supported format.
  Unsupported {
    /// Path that caused the error.
    path: PathBuf,
  },
}

impl ViewConfig {
  /// Configuration without sources, base URL or debug mode.
  pub fn new(version: impl Into<String>, basedir: impl Into<PathBuf>) -> Self {
    Self {
      base_url: String::new(),
      version: version.into(),
      debug: false,
      basedir: basedir.into(),
      js: Vec::new(),
      css: Vec::new(),
    }
  }

  /// Load `view.config.json` from `dir`. A missing file is an error.
  pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
    Self::load(dir.join(DEFAULT_CONFIG_FILE))
  }

  /// Read configuration from a JSON (`.json`) or YAML (`.yaml`, `.yml`) file.
  ///
  /// A relative `BASEDIR` is resolved against the directory holding the file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::Unsupported {
      path: path.to_path_buf(),
    })?;

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;

    let config = format.parse(&contents).map_err(|message| ConfigError::Parse {
      path: path.to_path_buf(),
      message,
    })?;

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.with_basedir_relative_to(parent))
  }

  /// Returns `true` when a non-blank base URL is configured.
  pub fn has_base_url(&self) -> bool {
    !self.base_url.trim().is_empty()
  }

  /// Directory receiving the generated bundles.
  pub fn public_dir(&self) -> PathBuf {
    self.basedir.join(PUBLIC_DIR)
  }

  /// Resolve a configured source path against the base directory.
  pub fn source_path(&self, relative: &str) -> PathBuf {
    self.basedir.join(relative)
  }

  fn with_basedir_relative_to(mut self, dir: &Path) -> Self {
    if self.basedir.is_relative() {
      self.basedir = dir.join(&self.basedir);
    }
    self
  }
}

#[derive(Debug, Clone, Copy)]
enum ConfigFormat {
  Json,
  Yaml,
}

impl ConfigFormat {
  fn from_path(path: &Path) -> Option<Self> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
      "json" => Some(Self::Json),
      "yaml" | "yml" => Some(Self::Yaml),
      _ => None,
    }
  }

  fn parse(self, contents: &str) -> Result<ViewConfig, String> {
    match self {
      Self::Json => serde_json::from_str(contents).map_err(|err| err.to_string()),
      Self::Yaml => serde_yaml::from_str(contents).map_err(|err| err.to_string()),
    }
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagValue {
  Bool(bool),
  Int(i64),
  Float(f64),
  Text(String),
}

/// Anything that does not compare equal to `0` enables the flag: numbers and numeric
/// strings by value, every other string (including `"false"` and `""`) counts as set.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
  D: Deserializer<'de>,
{
  let value = FlagValue::deserialize(deserializer)?;
  Ok(match value {
    FlagValue::Bool(flag) => flag,
    FlagValue::Int(number) => number != 0,
    FlagValue::Float(number) => number != 0.0,
    FlagValue::Text(text) => match parse_numeric(&text) {
      Some(number) => number != 0.0,
      None => true,
    },
  })
}

/// Parse a numeric string, tolerating surrounding whitespace.
pub(crate) fn parse_numeric(text: &str) -> Option<f64> {
  let number = text.trim().parse::<f64>().ok()?;
  number.is_finite().then_some(number)
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io { path, source } => {
        write!(f, "failed to read {}: {}", path.display(), source)
      }
      Self::Parse { path, message } => {
        write!(f, "failed to parse {}: {}", path.display(), message)
      }
      Self::Unsupported { path } => {
        write!(
          f,
          "unsupported configuration format for {} (expected .json, .yaml or .yml)",
          path.display()
        )
      }
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Parse { .. } | Self::Unsupported { .. } => None,
    }
  }
}
