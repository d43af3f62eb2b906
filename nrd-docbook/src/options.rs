//! Renderer configuration.
//!
//! ```
//! use nrd_docbook::DocBookOptions;
//!
//! let options = DocBookOptions::builder()
//!   .gfm(true)
//!   .manpage_url("nix.conf(5)", "https://nixos.org/manual/nix/stable/")
//!   .build();
//! assert!(options.manpage_urls.contains_key("nix.conf(5)"));
//! ```
use std::collections::HashMap;

use comrak::options::Options;

/// Options for the DocBook renderer.
#[derive(Debug, Clone)]
pub struct DocBookOptions {
  /// Enable GitHub Flavored Markdown extensions when tokenizing.
  pub gfm: bool,

  /// Man page reference (e.g. `nix.conf(5)`) to URL, used to hyperlink
  /// `{manpage}` roles.
  pub manpage_urls: HashMap<String, String>,
}

impl Default for DocBookOptions {
  fn default() -> Self {
    Self {
      gfm:          cfg!(feature = "gfm"),
      manpage_urls: HashMap::new(),
    }
  }
}

impl DocBookOptions {
  #[must_use]
  pub fn builder() -> DocBookOptionsBuilder {
    DocBookOptionsBuilder::new()
  }

  /// Options with the given man page URL mapping and default features.
  #[must_use]
  pub fn with_manpage_urls(manpage_urls: HashMap<String, String>) -> Self {
    Self {
      manpage_urls,
      ..Default::default()
    }
  }

  /// Build comrak options for tokenizing chapter sources.
  #[must_use]
  pub fn comrak_options(&self) -> Options<'static> {
    let mut options = Options::default();
    if self.gfm {
      options.extension.strikethrough = true;
      options.extension.autolink = true;
      options.extension.table = true;
      options.extension.tasklist = true;
      options.extension.footnotes = true;
      options.extension.superscript = true;
    }
    options.extension.description_lists = true;
    options.extension.header_ids = None;
    options.render.r#unsafe = true;
    options
  }
}

/// Builder for constructing `DocBookOptions` with method chaining.
#[derive(Debug, Clone, Default)]
pub struct DocBookOptionsBuilder {
  options: DocBookOptions,
}

impl DocBookOptionsBuilder {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Enable or disable GitHub Flavored Markdown.
  #[must_use]
  pub const fn gfm(mut self, enabled: bool) -> Self {
    self.options.gfm = enabled;
    self
  }

  /// Replace the man page URL mapping.
  #[must_use]
  pub fn manpage_urls(mut self, urls: HashMap<String, String>) -> Self {
    self.options.manpage_urls = urls;
    self
  }

  /// Add a single man page URL.
  #[must_use]
  pub fn manpage_url<K: Into<String>, V: Into<String>>(
    mut self,
    page: K,
    url: V,
  ) -> Self {
    self.options.manpage_urls.insert(page.into(), url.into());
    self
  }

  #[must_use]
  pub fn build(self) -> DocBookOptions {
    self.options
  }
}
