//! Escaping helpers and loaders shared by the renderer and the assemblers.
use std::{collections::HashMap, fs, path::Path};

use serde_json::Value;

use crate::error::ManpageUrlsError;

/// Escape text content for XML: `&`, `<` and `>`.
#[must_use]
pub fn xml_escape(text: &str) -> String {
  html_escape::encode_text(text).into_owned()
}

/// Quote a value for use as an XML attribute, including the surrounding
/// double quotes.
///
/// Whitespace characters other than the plain space are written as
/// character references so that attribute-value normalization in the
/// consuming parser does not alter them.
#[must_use]
pub fn quote_attr(value: &str) -> String {
  let escaped = html_escape::encode_double_quoted_attribute(value);
  let mut quoted = String::with_capacity(escaped.len() + 2);
  quoted.push('"');
  for ch in escaped.chars() {
    match ch {
      '\n' => quoted.push_str("&#10;"),
      '\r' => quoted.push_str("&#13;"),
      '\t' => quoted.push_str("&#9;"),
      _ => quoted.push(ch),
    }
  }
  quoted.push('"');
  quoted
}

/// Render an attribute list as ` key="value"` pairs, in order.
#[must_use]
pub fn render_attrs(attrs: &[(String, String)]) -> String {
  attrs
    .iter()
    .map(|(key, value)| format!(" {key}={}", quote_attr(value)))
    .collect()
}

/// Load the man page URL mapping: a flat JSON object of string keys to
/// string URLs.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or is
/// not an object whose values are all strings.
pub fn load_manpage_urls(
  path: &Path,
) -> Result<HashMap<String, String>, ManpageUrlsError> {
  let content =
    fs::read_to_string(path).map_err(|source| ManpageUrlsError::Io {
      path: path.to_path_buf(),
      source,
    })?;
  parse_manpage_urls(&content).map_err(|kind| kind.at(path))
}

/// Parse the man page URL mapping from JSON text.
///
/// # Errors
///
/// Returns an error if the text is not a JSON object of strings.
pub fn parse_manpage_urls(
  content: &str,
) -> Result<HashMap<String, String>, ManpageUrlsError> {
  let value: Value = serde_json::from_str(content)?;
  let Value::Object(map) = value else {
    return Err(ManpageUrlsError::NotAnObject);
  };

  map
    .into_iter()
    .map(|(key, value)| {
      match value {
        Value::String(url) => Ok((key, url)),
        _ => Err(ManpageUrlsError::NotAString { key }),
      }
    })
    .collect()
}

/// Create a regex that never matches anything.
///
/// Used as a fallback when a static pattern fails to compile.
///
/// # Errors
///
/// Returns an error if the fallback pattern fails to compile, which should
/// never happen.
pub fn never_matching_regex() -> Result<regex::Regex, regex::Error> {
  regex::Regex::new(r"[^\s\S]")
}
