//! Template rendering into strings.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use minijinja::Environment;
use serde::Serialize;
use serde_json::Value;

/// Values every template can reference.
#[derive(Debug, Clone, Serialize)]
pub struct ViewContext {
  /// Base URL of the site, always ending with `/`.
  pub base: String,
  /// File name of the global JavaScript bundle.
  pub js_file: String,
  /// File name of the global stylesheet bundle.
  pub css_file: String,
  /// Configured application version.
  pub version: String,
}

/// Render the template at `path` with the view context and return the output.
///
/// Templates are trusted application files; no sandboxing is applied beyond what the
/// template engine provides.
pub fn render_file(path: &Path, view: &ViewContext) -> Result<String> {
  render_file_with(path, view, &Value::Null)
}

/// Render the template at `path` with the view context merged with `extra`.
///
/// `extra` must serialize to a map (or `null`); its keys override the view context.
pub fn render_file_with<T: Serialize + ?Sized>(
  path: &Path,
  view: &ViewContext,
  extra: &T,
) -> Result<String> {
  let source = fs::read_to_string(path)
    .with_context(|| format!("failed to read template {}", path.display()))?;
  let context = merge_context(view, extra)?;

  let env = Environment::new();
  env
    .render_str(&source, &context)
    .with_context(|| format!("failed to render template {}", path.display()))
}

fn merge_context<T: Serialize + ?Sized>(
  view: &ViewContext,
  extra: &T,
) -> Result<BTreeMap<String, Value>> {
  let mut context = match serde_json::to_value(view).context("failed to encode view context")? {
    Value::Object(map) => map.into_iter().collect::<BTreeMap<_, _>>(),
    _ => BTreeMap::new(),
  };

  match serde_json::to_value(extra).context("failed to encode template values")? {
    Value::Null => {}
    Value::Object(map) => context.extend(map),
    other => bail!("template values must be a map, got {other}"),
  }

  Ok(context)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use tempfile::tempdir;

  fn view() -> ViewContext {
    ViewContext {
      base: "https://example.org/".into(),
      js_file: "all-v1.js".into(),
      css_file: "all-v1.css".into(),
      version: "1".into(),
    }
  }

  #[test]
  fn renders_view_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("home.html");
    fs::write(
      &path,
      r#"<base href="{{ base }}"><script src="{{ js_file }}"></script>"#,
    )
    .unwrap();

    let html = render_file(&path, &view()).unwrap();
    assert_eq!(
      html,
      r#"<base href="https://example.org/"><script src="all-v1.js"></script>"#
    );
  }

  #[test]
  fn extra_values_are_available_and_override() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("list.txt");
    fs::write(&path, "{% for item in items %}{{ item }};{% endfor %}{{ version }}").unwrap();

    let output =
      render_file_with(&path, &view(), &json!({ "items": ["a", "b"], "version": "9" })).unwrap();
    assert_eq!(output, "a;b;9");
  }

  #[test]
  fn rejects_non_map_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plain.txt");
    fs::write(&path, "static").unwrap();

    assert!(render_file_with(&path, &view(), &[1, 2, 3]).is_err());
  }

  #[test]
  fn missing_template_is_an_error() {
    let dir = tempdir().unwrap();
    let err = render_file(&dir.path().join("absent.html"), &view()).unwrap_err();
    assert!(err.to_string().contains("absent.html"));
  }
}
