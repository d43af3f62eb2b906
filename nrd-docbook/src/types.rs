//! Type definitions shared by the renderer and the assemblers.
use std::{fmt, str::FromStr};

/// DocBook 5 namespace.
pub const DOCBOOK_NS: &str = "http://docbook.org/ns/docbook";

/// XLink namespace, used for `xlink:href` on links.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// XInclude namespace, declared on fragment roots so the including document
/// can pull further fragments in.
pub const XINCLUDE_NS: &str = "http://www.w3.org/2001/XInclude";

/// Root element of a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RootTag {
  #[default]
  Chapter,
  Section,
}

impl RootTag {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Chapter => "chapter",
      Self::Section => "section",
    }
  }
}

impl fmt::Display for RootTag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for RootTag {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "chapter" => Ok(Self::Chapter),
      "section" => Ok(Self::Section),
      other => Err(format!("unknown root tag: {other}")),
    }
  }
}

/// How the title heading of a document is promoted to its root element.
///
/// Manual chapters and standalone fragments share every rendering rule
/// except the root tag and whether the XInclude namespace is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitlePolicy {
  pub root_tag: RootTag,
  pub xinclude: bool,
}

impl TitlePolicy {
  /// Chapters assembled into a manual.
  pub const CHAPTER: Self = Self {
    root_tag: RootTag::Chapter,
    xinclude: false,
  };

  /// Standalone fragment with the given root tag.
  #[must_use]
  pub const fn fragment(root_tag: RootTag) -> Self {
    Self {
      root_tag,
      xinclude: true,
    }
  }

  /// Namespace declarations injected on the root element.
  #[must_use]
  pub fn namespace_attrs(self) -> Vec<(String, String)> {
    let mut attrs = vec![
      ("xmlns".to_string(), DOCBOOK_NS.to_string()),
      ("xmlns:xlink".to_string(), XLINK_NS.to_string()),
    ];
    if self.xinclude {
      attrs.push(("xmlns:xi".to_string(), XINCLUDE_NS.to_string()));
    }
    attrs
  }
}

impl Default for TitlePolicy {
  fn default() -> Self {
    Self::CHAPTER
  }
}

/// Source line range of a block, zero-based with an exclusive end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceMap {
  pub start: usize,
  pub end:   usize,
}

impl SourceMap {
  /// Convert comrak's one-based inclusive line positions.
  #[must_use]
  pub const fn from_lines(start_line: usize, end_line: usize) -> Self {
    Self {
      start: start_line.saturating_sub(1),
      end:   end_line,
    }
  }
}

impl fmt::Display for SourceMap {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[{}..{}]", self.start, self.end)
  }
}

/// Per-document render state.
///
/// Lives inside exactly one render call; a fresh value is created for every
/// document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderState {
  pub title_seen: bool,
}

/// A heading element that has been opened and not yet closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenHeading {
  pub tag:   String,
  pub level: u8,
}
