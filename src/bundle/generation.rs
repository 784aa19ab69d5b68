//! Lazy generation of the concatenated, minified bundles.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use same_file::is_same_file;
use tracing::{debug, info};

use crate::bundle::bundle_file_name;
use crate::config::ViewConfig;
use crate::minify::{Minifier, minifier_for};
use crate::models::{AssetKind, BundleOutcome, BundleRecord, BundleReport};

/// Builds the global bundles described by a [`ViewConfig`].
pub struct BundleGenerator<'a> {
  config: &'a ViewConfig,
  minifier: &'a dyn Minifier,
}

impl<'a> BundleGenerator<'a> {
  /// Create a generator using the minifier implied by the debug flag.
  pub fn new(config: &'a ViewConfig) -> Self {
    Self::with_minifier(config, minifier_for(config.debug))
  }

  /// Create a generator with an explicit minifier.
  pub fn with_minifier(config: &'a ViewConfig, minifier: &'a dyn Minifier) -> Self {
    Self { config, minifier }
  }

  /// Absolute path of the bundle for `kind`.
  pub fn target_path(&self, kind: AssetKind) -> PathBuf {
    self
      .config
      .public_dir()
      .join(bundle_file_name(kind, &self.config.version))
  }

  /// Generate the JavaScript bundle, then the stylesheet bundle.
  pub fn generate(&self) -> Result<BundleReport> {
    Ok(BundleReport {
      js: self.generate_kind(AssetKind::Js)?,
      css: self.generate_kind(AssetKind::Css)?,
    })
  }

  /// Regenerate the bundle for `kind` when it is missing or debug mode is enabled.
  ///
  /// Existing bundles are otherwise left untouched. Writes are plain overwrites, so two
  /// requests regenerating at once simply race and the last write wins.
  pub fn generate_kind(&self, kind: AssetKind) -> Result<BundleRecord> {
    let target = self.target_path(kind);

    if target.exists() && !self.config.debug {
      debug!(bundle = %target.display(), "reusing existing {kind} bundle");
      return Ok(BundleRecord {
        kind,
        target,
        outcome: BundleOutcome::Reused,
      });
    }

    let sources = self.sources(kind);
    let contents = self.concatenate(kind, sources, &target)?;

    if let Some(parent) = target.parent() {
      fs::create_dir_all(parent)
        .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&target, &contents)
      .with_context(|| format!("failed to write {}", target.display()))?;

    info!(
      bundle = %target.display(),
      sources = sources.len(),
      bytes = contents.len(),
      "wrote {kind} bundle"
    );

    Ok(BundleRecord {
      kind,
      target,
      outcome: BundleOutcome::Written {
        sources: sources.len(),
        bytes: contents.len(),
      },
    })
  }

  fn sources(&self, kind: AssetKind) -> &'a [String] {
    match kind {
      AssetKind::Js => &self.config.js,
      AssetKind::Css => &self.config.css,
    }
  }

  /// Every chunk is preceded by a newline, so the bundle starts with one when non-empty.
  fn concatenate(&self, kind: AssetKind, sources: &[String], target: &Path) -> Result<String> {
    let mut bundle = String::new();

    for relative in sources {
      let source = self.config.source_path(relative);
      if target.exists()
        && source.exists()
        && is_same_file(&source, target)
          .with_context(|| format!("failed to compare {}", source.display()))?
      {
        bail!(
          "{kind} source {} is the bundle target itself",
          source.display()
        );
      }

      let content = fs::read_to_string(&source)
        .with_context(|| format!("failed to read {kind} source {}", source.display()))?;
      let minified = self
        .minifier
        .minify(kind, &content)
        .with_context(|| format!("failed to minify {}", source.display()))?;

      bundle.push('\n');
      bundle.push_str(&minified);
    }

    Ok(bundle)
  }
}

/// Generate both bundles for `config` using the default minifier selection.
pub fn generate_bundles(config: &ViewConfig) -> Result<BundleReport> {
  BundleGenerator::new(config).generate()
}
