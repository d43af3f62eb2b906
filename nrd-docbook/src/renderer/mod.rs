//! DocBook rendering of a comrak AST.
//!
//! A [`DocBookRenderer`] renders exactly one document: it is created with a
//! fresh [`RenderState`] and consumed by [`DocBookRenderer::render`]. Nodes
//! are dispatched by matching on [`NodeValue`]; headings go through the
//! title classifier, code blocks and paragraphs through [`blocks`], inline
//! content through [`inline`].
pub mod blocks;
pub mod heading;
pub mod inline;

use comrak::nodes::{AstNode, ListType, NodeValue};
use log::trace;

use crate::{
  error::RenderError,
  options::DocBookOptions,
  types::{OpenHeading, RenderState, SourceMap, TitlePolicy},
  utils::render_attrs,
};

/// Single-use DocBook renderer.
pub struct DocBookRenderer<'o> {
  options:  &'o DocBookOptions,
  policy:   TitlePolicy,
  state:    RenderState,
  headings: Vec<OpenHeading>,
  out:      String,
}

impl<'o> DocBookRenderer<'o> {
  #[must_use]
  pub fn new(options: &'o DocBookOptions, policy: TitlePolicy) -> Self {
    Self {
      options,
      policy,
      state: RenderState::default(),
      headings: Vec::new(),
      out: String::new(),
    }
  }

  /// Render the document rooted at `root`, closing every heading element
  /// still open at the end.
  ///
  /// # Errors
  ///
  /// Returns an error if the document has more than one title heading.
  pub fn render<'a>(
    mut self,
    root: &'a AstNode<'a>,
  ) -> Result<String, RenderError> {
    self.render_node(root)?;
    self.close_headings(0);
    Ok(self.out)
  }

  fn render_children<'a>(
    &mut self,
    node: &'a AstNode<'a>,
  ) -> Result<(), RenderError> {
    let mut child = node.first_child();
    while let Some(current) = child {
      if matches!(current.data.borrow().value, NodeValue::Text(_)) {
        // Inline anchors may span several adjacent text nodes.
        let (content, last) = inline::text_run(current);
        self.text(&content, last);
        child = last.next_sibling();
      } else {
        self.render_node(current)?;
        child = current.next_sibling();
      }
    }
    Ok(())
  }

  fn text<'a>(&mut self, content: &str, last: &'a AstNode<'a>) {
    let content = if inline::next_is_code(last) {
      inline::split_role_suffix(content).map_or(content, |(rest, _)| rest)
    } else {
      content
    };
    self.out.push_str(&inline::anchored_text(content));
  }

  fn wrap<'a>(
    &mut self,
    node: &'a AstNode<'a>,
    open: &str,
    close: &str,
  ) -> Result<(), RenderError> {
    self.out.push_str(open);
    self.render_children(node)?;
    self.out.push_str(close);
    Ok(())
  }

  fn render_node<'a>(
    &mut self,
    node: &'a AstNode<'a>,
  ) -> Result<(), RenderError> {
    let ast = node.data.borrow();
    match &ast.value {
      NodeValue::Heading(heading) => {
        let map = SourceMap::from_lines(
          ast.sourcepos.start.line,
          ast.sourcepos.end.line,
        );
        self.heading_open(node, heading.level, map)?;
        self.render_children(node)?;
        self.out.push_str("</title>");
      },
      NodeValue::Paragraph => {
        self.wrap(node, blocks::PARAGRAPH_OPEN, blocks::PARAGRAPH_CLOSE)?;
      },
      NodeValue::CodeBlock(block) => {
        let rendered = if block.fenced {
          blocks::fence(&block.info, &block.literal)
        } else {
          blocks::code_block(&block.literal)
        };
        self.out.push_str(&rendered);
      },
      NodeValue::HtmlBlock(block) => self.out.push_str(&block.literal),
      NodeValue::BlockQuote => {
        self.wrap(node, "<blockquote>", "</blockquote>")?;
      },
      NodeValue::List(list) => {
        match list.list_type {
          ListType::Bullet => {
            self.wrap(node, "<itemizedlist>", "</itemizedlist>")?;
          },
          ListType::Ordered if list.start != 1 => {
            let open =
              format!("<orderedlist startingnumber=\"{}\">", list.start);
            self.wrap(node, &open, "</orderedlist>")?;
          },
          ListType::Ordered => {
            self.wrap(node, "<orderedlist>", "</orderedlist>")?;
          },
        }
      },
      NodeValue::Item(_) => self.wrap(node, "<listitem>", "</listitem>")?,
      NodeValue::DescriptionList => {
        self.wrap(node, "<variablelist>", "</variablelist>")?;
      },
      NodeValue::DescriptionItem(_) => {
        self.wrap(node, "<varlistentry>", "</varlistentry>")?;
      },
      NodeValue::DescriptionTerm => {
        // Terms hold inline content only, so their paragraphs are flattened.
        self.out.push_str("<term>");
        for child in node.children() {
          if matches!(child.data.borrow().value, NodeValue::Paragraph) {
            self.render_children(child)?;
          } else {
            self.render_node(child)?;
          }
        }
        self.out.push_str("</term>");
      },
      NodeValue::DescriptionDetails => {
        self.wrap(node, "<listitem>", "</listitem>")?;
      },
      NodeValue::Text(content) => self.text(content, node),
      NodeValue::SoftBreak => self.out.push('\n'),
      NodeValue::LineBreak => {
        self.out.push_str("<literallayout>\n</literallayout>");
      },
      NodeValue::Code(code) => {
        let role = inline::role_of(node);
        self.out.push_str(&inline::code(
          &code.literal,
          role.as_deref(),
          &self.options.manpage_urls,
        ));
      },
      NodeValue::HtmlInline(html) => self.out.push_str(html),
      NodeValue::Emph => self.wrap(node, "<emphasis>", "</emphasis>")?,
      NodeValue::Strong => {
        self.wrap(node, "<emphasis role=\"strong\">", "</emphasis>")?;
      },
      NodeValue::Strikethrough => {
        self.wrap(node, "<emphasis role=\"strikethrough\">", "</emphasis>")?;
      },
      NodeValue::Superscript => {
        self.wrap(node, "<superscript>", "</superscript>")?;
      },
      NodeValue::Link(link) => {
        let (open, close) =
          inline::link_open(&link.url, node.first_child().is_some());
        self.out.push_str(&open);
        if let Some(close) = close {
          self.render_children(node)?;
          self.out.push_str(close);
        }
      },
      NodeValue::Image(link) => self.out.push_str(&inline::image(&link.url)),
      other => {
        trace!("No DocBook element for {other:?}, rendering children only");
        self.render_children(node)?;
      },
    }
    Ok(())
  }

  fn heading_open<'a>(
    &mut self,
    node: &'a AstNode<'a>,
    level: u8,
    map: SourceMap,
  ) -> Result<(), RenderError> {
    let mut attrs = Vec::new();
    if let Some(id) = heading::take_anchor(node) {
      attrs.push(("xml:id".to_string(), id));
    }

    let classified =
      heading::classify(&mut self.state, self.policy, level, map, attrs)?;

    self.close_headings(level);
    self.out.push_str(&format!(
      "<{}{}><title>",
      classified.tag,
      render_attrs(&classified.attrs)
    ));
    self.headings.push(OpenHeading {
      tag: classified.tag,
      level,
    });
    Ok(())
  }

  /// Close open heading elements at `level` or deeper; `0` closes all.
  fn close_headings(&mut self, level: u8) {
    while let Some(open) = self.headings.last() {
      if open.level < level {
        break;
      }
      self.out.push_str(&format!("</{}>", open.tag));
      self.headings.pop();
    }
  }
}
