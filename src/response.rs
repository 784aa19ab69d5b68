//! Terminal HTTP responses produced by the view helper.
//!
//! A [`ViewResponse`] is the last thing a request handler does: it sends the value and stops
//! processing the request.

use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

/// Content type used for JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Status, optional content type and body of a finished request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewResponse {
  /// HTTP status code.
  pub status: u16,
  /// Value of the `Content-type` header, when one is set.
  pub content_type: Option<&'static str>,
  /// Complete response body.
  pub body: String,
}

impl ViewResponse {
  /// `400 Bad Request` carrying `message` verbatim.
  pub fn error(message: impl Into<String>) -> Self {
    Self {
      status: 400,
      content_type: None,
      body: message.into(),
    }
  }

  /// `400 Bad Request` with `data` encoded as JSON.
  pub fn json_error<T: Serialize + ?Sized>(data: &T) -> Result<Self> {
    let body = serde_json::to_string(data).context("failed to encode JSON error body")?;
    Ok(Self {
      content_type: Some(JSON_CONTENT_TYPE),
      ..Self::error(body)
    })
  }

  /// `200 OK` with `data` encoded as JSON.
  pub fn json_success<T: Serialize + ?Sized>(data: &T) -> Result<Self> {
    let body = serde_json::to_string(data).context("failed to encode JSON success body")?;
    Ok(Self {
      status: 200,
      content_type: Some(JSON_CONTENT_TYPE),
      body,
    })
  }

  /// HTTP/1.0 status line, e.g. `HTTP/1.0 400 Bad Request`.
  pub fn status_line(&self) -> String {
    format!("HTTP/1.0 {} {}", self.status, reason_phrase(self.status))
  }

  /// Write the full response (status line, headers, body) to `out`.
  pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
    write!(out, "{}\r\n", self.status_line())?;
    if let Some(content_type) = self.content_type {
      write!(out, "Content-type: {content_type}\r\n")?;
    }
    write!(out, "Content-Length: {}\r\n\r\n", self.body.len())?;
    out.write_all(self.body.as_bytes())?;
    out.flush()
  }
}

fn reason_phrase(status: u16) -> &'static str {
  match status {
    200 => "OK",
    400 => "Bad Request",
    _ => "",
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::{Value, json};

  #[test]
  fn error_keeps_message_verbatim() {
    let response = ViewResponse::error("bad input");
    assert_eq!(response.status, 400);
    assert_eq!(response.body, "bad input");
    assert_eq!(response.content_type, None);
  }

  #[test]
  fn json_success_round_trips_payload() {
    let response = ViewResponse::json_success(&json!({ "a": 1 })).unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.content_type, Some("application/json"));
    let parsed: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(parsed, json!({ "a": 1 }));
  }

  #[test]
  fn json_error_is_bad_request() {
    let response = ViewResponse::json_error(&json!({ "title": "missing" })).unwrap();
    assert_eq!(response.status, 400);
    assert_eq!(response.content_type, Some(JSON_CONTENT_TYPE));
    assert_eq!(response.body, r#"{"title":"missing"}"#);
  }

  #[test]
  fn writes_http_response() {
    let mut out = Vec::new();
    ViewResponse::json_success(&[1, 2]).unwrap().write_to(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
      text,
      "HTTP/1.0 200 OK\r\nContent-type: application/json\r\nContent-Length: 5\r\n\r\n[1,2]"
    );
  }

  #[test]
  fn error_status_line() {
    assert_eq!(
      ViewResponse::error("x").status_line(),
      "HTTP/1.0 400 Bad Request"
    );
  }
}
