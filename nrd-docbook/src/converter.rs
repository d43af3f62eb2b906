//! Markdown to DocBook conversion of a single document.
use std::{fs, path::Path};

use comrak::{Arena, parse_document};
use log::debug;

use crate::{
  error::RenderError,
  options::DocBookOptions,
  renderer::DocBookRenderer,
  types::TitlePolicy,
};

/// Render Markdown text to DocBook with a fresh renderer.
///
/// # Errors
///
/// Returns an error if the document contains more than one title heading.
pub fn render_markdown(
  markdown: &str,
  options: &DocBookOptions,
  policy: TitlePolicy,
) -> Result<String, RenderError> {
  let arena = Arena::new();
  let comrak_options = options.comrak_options();
  let root = parse_document(&arena, markdown, &comrak_options);
  DocBookRenderer::new(options, policy).render(root)
}

/// Renders whole documents with one title policy.
#[derive(Debug, Clone, Default)]
pub struct DocBookConverter {
  options: DocBookOptions,
  policy:  TitlePolicy,
}

impl DocBookConverter {
  #[must_use]
  pub const fn new(options: DocBookOptions, policy: TitlePolicy) -> Self {
    Self { options, policy }
  }

  #[must_use]
  pub const fn options(&self) -> &DocBookOptions {
    &self.options
  }

  #[must_use]
  pub const fn policy(&self) -> TitlePolicy {
    self.policy
  }

  /// Render Markdown text.
  ///
  /// # Errors
  ///
  /// Returns an error if the document contains more than one title heading.
  pub fn render(&self, markdown: &str) -> Result<String, RenderError> {
    render_markdown(markdown, &self.options, self.policy)
  }

  /// Read and render a Markdown file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read as UTF-8 text or the
  /// document contains more than one title heading.
  pub fn render_file(&self, path: &Path) -> Result<String, RenderError> {
    debug!("Rendering {}", path.display());
    let markdown = fs::read_to_string(path)?;
    self.render(&markdown)
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;
  use crate::types::RootTag;

  fn chapter(md: &str) -> Result<String, RenderError> {
    DocBookConverter::new(DocBookOptions::default(), TitlePolicy::CHAPTER)
      .render(md)
  }

  #[test]
  fn test_title_wraps_whole_chapter() {
    let out = chapter("# Intro\n\nHello.\n\n## Details\n\nMore.\n")
      .expect("render");
    assert!(out.starts_with(
      "<chapter xmlns=\"http://docbook.org/ns/docbook\" \
       xmlns:xlink=\"http://www.w3.org/1999/xlink\"><title>Intro</title>"
    ));
    assert!(out.ends_with("</section></chapter>"));
    assert!(out.contains(
      "<section><title>Details</title><para>\n More.\n</para></section>"
    ));
  }

  #[test]
  fn test_sibling_sections_are_closed_in_order() {
    let out = chapter("# T\n\n## A\n\n### A.1\n\n## B\n").expect("render");
    assert_eq!(
      out.matches("<section>").count(),
      out.matches("</section>").count()
    );
    let a1 = out.find("<title>A.1</title>").expect("A.1");
    let b = out.find("<title>B</title>").expect("B");
    let closes_between = out[a1..b].matches("</section>").count();
    assert_eq!(closes_between, 2);
  }

  #[test]
  fn test_heading_anchor_becomes_xml_id() {
    let out = chapter("# Title {#ch-title}\n\n## Part {#sec-part}\n")
      .expect("render");
    assert!(out.starts_with("<chapter xml:id=\"ch-title\" xmlns="));
    assert!(out.contains("<section xml:id=\"sec-part\"><title>Part</title>"));
    assert!(!out.contains("{#"));
  }

  #[test]
  fn test_duplicate_title_is_rejected() {
    let err = chapter("# One\n\ntext\n\n# Two\n").expect_err("two titles");
    assert!(matches!(
      err,
      RenderError::DuplicateTitle { map } if map.start == 4 && map.end == 5
    ));
  }

  #[test]
  fn test_zero_titles_render_plain_sections() {
    let out = chapter("## Only\n\ntext\n").expect("render");
    assert!(out.starts_with("<section><title>Only</title>"));
    assert!(!out.contains("xmlns"));
  }

  #[test]
  fn test_fragment_policy_root() {
    let out = render_markdown(
      "# Frag\n",
      &DocBookOptions::default(),
      TitlePolicy::fragment(RootTag::Section),
    )
    .expect("render");
    assert!(out.starts_with("<section xmlns="));
    assert!(out.contains("xmlns:xi=\"http://www.w3.org/2001/XInclude\""));
    assert!(out.ends_with("</section>"));
  }

  #[test]
  fn test_roles_and_anchors_inline() {
    let options = DocBookOptions::builder()
      .manpage_url("nix.conf(5)", "https://example.org/nix.conf")
      .build();
    let out = render_markdown(
      "# T\n\nRun {command}`nixos-rebuild`, see {manpage}`nix.conf(5)` and \
       []{#anchor-here}.\n",
      &options,
      TitlePolicy::CHAPTER,
    )
    .expect("render");
    assert!(out.contains("Run <command>nixos-rebuild</command>, see "));
    assert!(out.contains(
      "<link xlink:href=\"https://example.org/nix.conf\"><citerefentry>"
    ));
    assert!(out.contains("<anchor xml:id=\"anchor-here\" />"));
    assert!(!out.contains("{command}"));
  }

  #[test]
  fn test_inline_anchor_in_code_span_is_literal() {
    let out = chapter("# T\n\nUse `[]{#x}` syntax.\n").expect("render");
    assert!(out.contains("<literal>[]{#x}</literal>"));
    assert!(!out.contains("anchor"));
  }

  #[test]
  fn test_inline_anchor_in_indented_code_is_literal() {
    let out = chapter("# T\n\ntext\n\n    []{#x}\n").expect("render");
    assert!(out.contains("<programlisting>\n[]{#x}\n</programlisting>"));
    assert!(!out.contains("anchor"));
  }

  #[test]
  fn test_fence_with_info_line_in_body_does_not_hide_anchors() {
    let out =
      chapter("# T\n\n```\n```nix\n```\n\nsee []{#after}\n").expect("render");
    assert!(out.contains("<programlisting>\n```nix\n</programlisting>"));
    assert!(out.contains("see <anchor xml:id=\"after\" />"));
  }

  #[test]
  fn test_inline_anchor_in_quoted_fence_is_literal() {
    let out =
      chapter("# T\n\n> ```\n> []{#x}\n> ```\n").expect("render");
    assert!(out.contains("<blockquote><programlisting>\n[]{#x}\n"));
    assert!(!out.contains("anchor"));
  }

  #[test]
  fn test_lists_and_links() {
    let out = chapter(
      "# T\n\n- [a](#sec-a)\n- [](#sec-b)\n\n3. x\n4. \
       [web](https://nixos.org)\n",
    )
    .expect("render");
    assert!(out.contains(
      "<itemizedlist><listitem><para>\n <link linkend=\"sec-a\">a</link>"
    ));
    assert!(out.contains("<xref linkend=\"sec-b\" />"));
    assert!(out.contains("<orderedlist startingnumber=\"3\">"));
    assert!(out.contains("<link xlink:href=\"https://nixos.org\">web</link>"));
  }

  #[test]
  fn test_rendering_twice_is_identical() {
    let md = "# T {#t}\n\n```nix\n{ a = 1; }\n```\n\n## S\n\ntext & more\n";
    assert_eq!(chapter(md).expect("first"), chapter(md).expect("second"));
  }
}
