//! Request context used to derive the site base URL when none is configured.

use std::env;

use crate::config::parse_numeric;

/// Server variables of the current request that influence URL generation.
#[derive(Debug, Clone)]
pub struct RequestContext {
  /// Path of the executing entry script, e.g. `/app/index.php` or `/app/index`.
  pub script_name: String,
  /// Raw HTTPS indicator as reported by the server (`on`, `1`, `off`, ...).
  pub https: Option<String>,
  /// Port the request arrived on.
  pub server_port: String,
  /// Host name of the server.
  pub server_name: String,
}

impl RequestContext {
  /// Build a context from the CGI variables `SCRIPT_NAME`, `HTTPS`, `SERVER_PORT` and
  /// `SERVER_NAME`. Missing variables become empty values.
  pub fn from_env() -> Self {
    Self {
      script_name: env::var("SCRIPT_NAME").unwrap_or_default(),
      https: env::var("HTTPS").ok(),
      server_port: env::var("SERVER_PORT").unwrap_or_default(),
      server_name: env::var("SERVER_NAME").unwrap_or_default(),
    }
  }

  /// Whether the request was served over TLS: the indicator is `on` or numerically `1`
  /// (`1`, `1.0`, ` 1`).
  pub fn is_https(&self) -> bool {
    match self.https.as_deref() {
      Some("on") => true,
      Some(value) => parse_numeric(value) == Some(1.0),
      None => false,
    }
  }

  /// `https` or `http`.
  pub fn protocol(&self) -> &'static str {
    if self.is_https() { "https" } else { "http" }
  }

  /// Directory part of the script path, without a trailing slash.
  pub fn subdir(&self) -> &str {
    match self.script_name.rfind('/') {
      Some(index) => &self.script_name[..index],
      None => "",
    }
  }

  /// `:{port}` when the port is not the default for the protocol, otherwise empty.
  pub fn port_suffix(&self) -> String {
    let default_port = if self.is_https() { "443" } else { "80" };
    if self.server_port == default_port {
      String::new()
    } else {
      format!(":{}", self.server_port)
    }
  }

  /// Base URL derived from the request: `{protocol}://{host}{port}{subdir}/`.
  pub fn derived_base_url(&self) -> String {
    format!(
      "{}://{}{}{}/",
      self.protocol(),
      self.server_name,
      self.port_suffix(),
      self.subdir()
    )
  }
}

/// Append `/` to a configured base URL unless it already ends with one.
pub fn with_trailing_slash(base_url: &str) -> String {
  if base_url.ends_with('/') {
    base_url.to_string()
  } else {
    format!("{base_url}/")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn request(script: &str, https: Option<&str>, port: &str) -> RequestContext {
    RequestContext {
      script_name: script.into(),
      https: https.map(str::to_string),
      server_port: port.into(),
      server_name: "example.org".into(),
    }
  }

  #[test]
  fn plain_http_on_default_port_has_no_port_segment() {
    let ctx = request("/index.php", None, "80");
    assert_eq!(ctx.derived_base_url(), "http://example.org/");
  }

  #[test]
  fn https_on_custom_port_keeps_port_and_subdir() {
    let ctx = request("/reader/index.php", Some("on"), "8443");
    assert_eq!(ctx.derived_base_url(), "https://example.org:8443/reader/");
  }

  #[test]
  fn https_indicator_accepts_one() {
    let ctx = request("/index.php", Some("1"), "443");
    assert!(ctx.is_https());
    assert_eq!(ctx.derived_base_url(), "https://example.org/");
  }

  #[test]
  fn https_indicator_compares_numerically() {
    assert!(request("/index.php", Some("1.0"), "443").is_https());
    assert!(request("/index.php", Some(" 1"), "443").is_https());
    assert!(!request("/index.php", Some("ON"), "443").is_https());
    assert!(!request("/index.php", Some(""), "443").is_https());
    assert!(!request("/index.php", Some("0"), "443").is_https());
  }

  #[test]
  fn https_off_is_plain_http() {
    let ctx = request("/index.php", Some("off"), "443");
    assert_eq!(ctx.protocol(), "http");
    assert_eq!(ctx.derived_base_url(), "http://example.org:443/");
  }

  #[test]
  fn script_without_slash_has_empty_subdir() {
    let ctx = request("index.php", None, "80");
    assert_eq!(ctx.subdir(), "");
  }

  #[test]
  fn trailing_slash_is_appended_once() {
    assert_eq!(with_trailing_slash("https://a.example"), "https://a.example/");
    assert_eq!(with_trailing_slash("https://a.example/"), "https://a.example/");
    assert_eq!(with_trailing_slash("https://a.example/x/"), "https://a.example/x/");
  }
}
