//! Inline output: inline anchors, role markup, links and images.
use std::{collections::HashMap, sync::LazyLock};

use comrak::nodes::{AstNode, NodeValue};
use regex::Regex;

use crate::utils::{never_matching_regex, quote_attr, xml_escape};

fn compile(name: &str, pattern: &str) -> Regex {
  Regex::new(pattern).unwrap_or_else(|e| {
    log::error!("Failed to compile {name} regex: {e}");
    never_matching_regex().unwrap_or_else(|_| {
      #[allow(
        clippy::expect_used,
        reason = "This pattern is guaranteed to be valid"
      )]
      Regex::new(r"[^\s\S]")
        .expect("regex pattern [^\\s\\S] should always compile")
    })
  })
}

// `[]{#id}`
static INLINE_ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile("INLINE_ANCHOR_RE", r"\[\]\{#([A-Za-z0-9_.:-]+)\}")
});

// `{role}` directly in front of an inline code span
static ROLE_SUFFIX_RE: LazyLock<Regex> =
  LazyLock::new(|| compile("ROLE_SUFFIX_RE", r"\{([a-z]+)\}$"));

// `name(section)`
static MANPAGE_RE: LazyLock<Regex> =
  LazyLock::new(|| compile("MANPAGE_RE", r"^(.+)\(([^()]+)\)$"));

/// Concatenated content of the run of adjacent text nodes starting at
/// `first`, and the last node of that run.
pub fn text_run<'a>(first: &'a AstNode<'a>) -> (String, &'a AstNode<'a>) {
  let mut content = String::new();
  let mut last = first;
  let mut current = Some(first);

  while let Some(node) = current {
    let data = node.data.borrow();
    let NodeValue::Text(ref text) = data.value else {
      break;
    };
    content.push_str(text);
    last = node;
    current = node.next_sibling();
  }

  (content, last)
}

/// Escape plain text, turning inline anchors (`[]{#id}`) into `<anchor>`
/// elements.
#[must_use]
pub fn anchored_text(content: &str) -> String {
  let mut out = String::with_capacity(content.len());
  let mut rest = 0;

  for caps in INLINE_ANCHOR_RE.captures_iter(content) {
    let (Some(whole), Some(id)) = (caps.get(0), caps.get(1)) else {
      continue;
    };
    out.push_str(&xml_escape(&content[rest..whole.start()]));
    out.push_str(&format!("<anchor xml:id={} />", quote_attr(id.as_str())));
    rest = whole.end();
  }

  out.push_str(&xml_escape(&content[rest..]));
  out
}

/// Split a trailing `{role}` off a text run, returning the text before it
/// and the role name.
#[must_use]
pub fn split_role_suffix(content: &str) -> Option<(&str, &str)> {
  let caps = ROLE_SUFFIX_RE.captures(content)?;
  let whole = caps.get(0)?;
  let role = caps.get(1)?;
  Some((&content[..whole.start()], role.as_str()))
}

/// Role attached to a code span through its preceding text sibling.
pub fn role_of<'a>(code: &'a AstNode<'a>) -> Option<String> {
  let previous = code.previous_sibling()?;
  let data = previous.data.borrow();
  let NodeValue::Text(ref content) = data.value else {
    return None;
  };
  split_role_suffix(content).map(|(_, role)| role.to_string())
}

/// Whether the node directly after a text run is an inline code span, in
/// which case a trailing `{role}` belongs to that span.
pub fn next_is_code<'a>(node: &'a AstNode<'a>) -> bool {
  node
    .next_sibling()
    .is_some_and(|next| {
      matches!(next.data.borrow().value, NodeValue::Code(_))
    })
}

/// Inline code, optionally carrying role markup.
#[must_use]
pub fn code(
  literal: &str,
  role: Option<&str>,
  manpage_urls: &HashMap<String, String>,
) -> String {
  let escaped = xml_escape(literal);
  match role {
    Some("command") => format!("<command>{escaped}</command>"),
    Some("env") => format!("<envar>{escaped}</envar>"),
    Some("file") => format!("<filename>{escaped}</filename>"),
    Some("option") => format!("<option>{escaped}</option>"),
    Some("var") => format!("<varname>{escaped}</varname>"),
    Some("manpage") => manpage(literal, manpage_urls),
    _ => format!("<literal>{escaped}</literal>"),
  }
}

/// Man page citation, linked when the URL mapping knows the page.
#[must_use]
pub fn manpage(
  reference: &str,
  manpage_urls: &HashMap<String, String>,
) -> String {
  let citation = MANPAGE_RE.captures(reference).map_or_else(
    || {
      format!(
        "<citerefentry><refentrytitle>{}</refentrytitle></citerefentry>",
        xml_escape(reference)
      )
    },
    |caps| {
      format!(
        "<citerefentry><refentrytitle>{}</refentrytitle><manvolnum>{}</\
         manvolnum></citerefentry>",
        xml_escape(&caps[1]),
        xml_escape(&caps[2])
      )
    },
  );

  match manpage_urls.get(reference) {
    Some(url) => {
      format!("<link xlink:href={}>{citation}</link>", quote_attr(url))
    },
    None => citation,
  }
}

/// Opening tag for a link; `None` means the link has no text and renders
/// as a self-closing cross reference instead.
#[must_use]
pub fn link_open(
  url: &str,
  has_text: bool,
) -> (String, Option<&'static str>) {
  if let Some(anchor) = url.strip_prefix('#') {
    if has_text {
      (format!("<link linkend={}>", quote_attr(anchor)), Some("</link>"))
    } else {
      (format!("<xref linkend={} />", quote_attr(anchor)), None)
    }
  } else {
    (format!("<link xlink:href={}>", quote_attr(url)), Some("</link>"))
  }
}

/// Inline image.
#[must_use]
pub fn image(url: &str) -> String {
  format!(
    "<inlinemediaobject><imageobject><imagedata fileref={} \
     /></imageobject></inlinemediaobject>",
    quote_attr(url)
  )
}
