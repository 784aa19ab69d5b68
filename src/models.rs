//! Data structures shared by the bundle generator and the view helper.

use std::fmt;
use std::path::PathBuf;

/// Kind of static asset combined into a global bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
  /// JavaScript sources.
  Js,
  /// Stylesheet sources.
  Css,
}

impl AssetKind {
  /// File extension used for the bundle of this kind.
  pub fn extension(self) -> &'static str {
    match self {
      Self::Js => "js",
      Self::Css => "css",
    }
  }
}

impl fmt::Display for AssetKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.extension())
  }
}

/// What happened to a single bundle during generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleOutcome {
  /// The bundle was (re)written from its sources.
  Written {
    /// Number of source files combined into the bundle.
    sources: usize,
    /// Size of the written bundle in bytes.
    bytes: usize,
  },
  /// An existing bundle was kept as is.
  Reused,
}

/// Result of generating one bundle.
#[derive(Debug, Clone)]
pub struct BundleRecord {
  /// Asset kind of the bundle.
  pub kind: AssetKind,
  /// Absolute path of the bundle file.
  pub target: PathBuf,
  /// Whether the bundle was written or reused.
  pub outcome: BundleOutcome,
}

impl BundleRecord {
  /// Returns `true` when the bundle file was written during this run.
  pub fn was_written(&self) -> bool {
    matches!(self.outcome, BundleOutcome::Written { .. })
  }
}

/// Summary of a bundle generation pass covering both asset kinds.
#[derive(Debug, Clone)]
pub struct BundleReport {
  /// JavaScript bundle result.
  pub js: BundleRecord,
  /// Stylesheet bundle result.
  pub css: BundleRecord,
}

impl BundleReport {
  /// Number of bundle files written during the pass.
  pub fn written_count(&self) -> usize {
    [&self.js, &self.css]
      .iter()
      .filter(|record| record.was_written())
      .count()
  }
}
