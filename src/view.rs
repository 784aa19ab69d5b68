//! Per-request view helper: base URL, template rendering, responses and bundles.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::bundle::{BundleGenerator, bundle_file_name};
use crate::config::ViewConfig;
use crate::models::{AssetKind, BundleReport};
use crate::request::{RequestContext, with_trailing_slash};
use crate::response::ViewResponse;
use crate::template::{ViewContext, render_file, render_file_with};

/// View helper living for the duration of one request.
#[derive(Debug, Clone)]
pub struct View {
  config: ViewConfig,
  request: RequestContext,
  base: String,
}

impl View {
  /// Make sure the global bundles exist, then resolve the base URL.
  pub fn new(config: ViewConfig, request: RequestContext) -> Result<Self> {
    let mut view = Self {
      config,
      request,
      base: String::new(),
    };
    view.gen_minified_js_and_css()?;
    view.base = view.get_base_url();
    Ok(view)
  }

  /// Base URL computed at construction time.
  pub fn base(&self) -> &str {
    &self.base
  }

  /// Base URL of the site, always ending with `/`.
  ///
  /// A non-blank configured `base_url` wins; otherwise the URL is derived from the request.
  pub fn get_base_url(&self) -> String {
    if self.config.has_base_url() {
      with_trailing_slash(&self.config.base_url)
    } else {
      self.request.derived_base_url()
    }
  }

  /// Render a template file to a string.
  pub fn render(&self, template: impl AsRef<Path>) -> Result<String> {
    render_file(template.as_ref(), &self.context())
  }

  /// Render a template file with additional values.
  pub fn render_with<T: Serialize + ?Sized>(
    &self,
    template: impl AsRef<Path>,
    values: &T,
  ) -> Result<String> {
    render_file_with(template.as_ref(), &self.context(), values)
  }

  /// Terminal `400 Bad Request` response carrying `message`.
  pub fn error(&self, message: impl Into<String>) -> ViewResponse {
    ViewResponse::error(message)
  }

  /// Terminal `400 Bad Request` response with a JSON body.
  pub fn json_error<T: Serialize + ?Sized>(&self, data: &T) -> Result<ViewResponse> {
    ViewResponse::json_error(data)
  }

  /// Terminal `200 OK` response with a JSON body.
  pub fn json_success<T: Serialize + ?Sized>(&self, data: &T) -> Result<ViewResponse> {
    ViewResponse::json_success(data)
  }

  /// `all-v{version}.js`
  pub fn global_js_file_name(config: &ViewConfig) -> String {
    bundle_file_name(AssetKind::Js, &config.version)
  }

  /// `all-v{version}.css`
  pub fn global_css_file_name(config: &ViewConfig) -> String {
    bundle_file_name(AssetKind::Css, &config.version)
  }

  /// Regenerate the bundles that are missing, or all of them in debug mode.
  pub fn gen_minified_js_and_css(&self) -> Result<BundleReport> {
    BundleGenerator::new(&self.config).generate()
  }

  fn context(&self) -> ViewContext {
    ViewContext {
      base: self.base.clone(),
      js_file: Self::global_js_file_name(&self.config),
      css_file: Self::global_css_file_name(&self.config),
      version: self.config.version.clone(),
    }
  }
}
