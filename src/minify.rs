//! Minification of JavaScript and stylesheet sources before bundling.

use anyhow::{Result, anyhow};

use crate::models::AssetKind;

/// Transforms a single source file before it is appended to a bundle.
pub trait Minifier {
  /// Return the minified form of `source`.
  fn minify(&self, kind: AssetKind, source: &str) -> Result<String>;
}

/// Minifier backed by the `minifier` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetMinifier;

impl Minifier for AssetMinifier {
  fn minify(&self, kind: AssetKind, source: &str) -> Result<String> {
    match kind {
      AssetKind::Js => Ok(minifier::js::minify(source).to_string()),
      AssetKind::Css => minifier::css::minify(source)
        .map(|minified| minified.to_string())
        .map_err(|err| anyhow!("failed to minify stylesheet: {err}")),
    }
  }
}

/// Leaves sources untouched. Used in debug mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Minifier for Passthrough {
  fn minify(&self, _kind: AssetKind, source: &str) -> Result<String> {
    Ok(source.to_string())
  }
}

/// Pick the minifier matching the debug flag.
pub fn minifier_for(debug: bool) -> &'static dyn Minifier {
  if debug { &Passthrough } else { &AssetMinifier }
}
