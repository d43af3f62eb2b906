//! Heading classification: which heading becomes the document's root
//! element, and which stay ordinary sections.
use std::sync::LazyLock;

use comrak::nodes::{AstNode, NodeValue};
use log::trace;
use regex::Regex;

use crate::{
  error::RenderError,
  types::{RenderState, SourceMap, TitlePolicy},
  utils::never_matching_regex,
};

/// Natural tag for every heading that is not the title.
pub const HEADING_TAG: &str = "section";

static HEADING_ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\s*\{#([A-Za-z0-9_.:-]+)\}\s*$").unwrap_or_else(|e| {
    log::error!("Failed to compile HEADING_ANCHOR_RE regex: {e}");
    never_matching_regex().unwrap_or_else(|_| {
      #[allow(
        clippy::expect_used,
        reason = "This pattern is guaranteed to be valid"
      )]
      Regex::new(r"[^\s\S]")
        .expect("regex pattern [^\\s\\S] should always compile")
    })
  })
});

/// Tag and attributes chosen for a heading element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingTag {
  pub tag:   String,
  pub attrs: Vec<(String, String)>,
}

/// Classify a heading.
///
/// The first level-1 heading of a document becomes the root element named
/// by `policy`, with namespace declarations added to its attributes. A
/// second level-1 heading is an error. Every other heading keeps its
/// natural tag and attributes.
///
/// # Errors
///
/// Returns [`RenderError::DuplicateTitle`] for a level-1 heading after the
/// title has been seen.
pub fn classify(
  state: &mut RenderState,
  policy: TitlePolicy,
  level: u8,
  map: SourceMap,
  attrs: Vec<(String, String)>,
) -> Result<HeadingTag, RenderError> {
  if level != 1 {
    return Ok(HeadingTag {
      tag: HEADING_TAG.to_string(),
      attrs,
    });
  }

  if state.title_seen {
    return Err(RenderError::DuplicateTitle { map });
  }

  state.title_seen = true;
  trace!("Promoting title heading at lines {map} to <{}>", policy.root_tag);

  let mut attrs = attrs;
  attrs.extend(policy.namespace_attrs());
  Ok(HeadingTag {
    tag: policy.root_tag.as_str().to_string(),
    attrs,
  })
}

/// Strip a trailing `{#id}` anchor from a heading's last text child and
/// return the anchor.
///
/// The text node is rewritten in place so the title renders without the
/// anchor syntax.
pub fn take_anchor<'a>(heading: &'a AstNode<'a>) -> Option<String> {
  let last = heading.last_child()?;
  let mut data = last.data.borrow_mut();
  let NodeValue::Text(ref mut text) = data.value else {
    return None;
  };

  let current: &str = &*text;
  let caps = HEADING_ANCHOR_RE.captures(current)?;
  let id = caps[1].to_string();
  let whole = caps.get(0)?;
  let stripped = current[..whole.start()].to_string();
  *text = stripped.into();
  Some(id)
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;
  use crate::types::RootTag;

  const MAP: SourceMap = SourceMap { start: 0, end: 1 };

  #[test]
  fn test_first_level_one_heading_becomes_root() {
    let mut state = RenderState::default();
    let heading = classify(&mut state, TitlePolicy::CHAPTER, 1, MAP, vec![])
      .expect("first title");
    assert_eq!(heading.tag, "chapter");
    assert!(state.title_seen);
    assert!(heading.attrs.iter().any(|(k, _)| k == "xmlns"));
    assert!(heading.attrs.iter().any(|(k, _)| k == "xmlns:xlink"));
  }

  #[test]
  fn test_second_level_one_heading_fails() {
    let mut state = RenderState { title_seen: true };
    let map = SourceMap { start: 6, end: 7 };
    let err = classify(&mut state, TitlePolicy::CHAPTER, 1, map, vec![])
      .expect_err("duplicate title");
    assert!(matches!(err, RenderError::DuplicateTitle { map: m } if m == map));
    assert!(err.to_string().contains("lines [6..7]"));
  }

  #[test]
  fn test_lower_levels_keep_natural_tag() {
    let mut state = RenderState::default();
    let attrs = vec![("xml:id".to_string(), "sec-a".to_string())];
    for level in 2..=6 {
      let heading = classify(
        &mut state,
        TitlePolicy::CHAPTER,
        level,
        MAP,
        attrs.clone(),
      )
      .expect("plain heading");
      assert_eq!(heading.tag, HEADING_TAG);
      assert_eq!(heading.attrs, attrs);
    }
    assert!(!state.title_seen);
  }

  #[test]
  fn test_fragment_policy_uses_caller_tag() {
    let mut state = RenderState::default();
    let heading = classify(
      &mut state,
      TitlePolicy::fragment(RootTag::Section),
      1,
      MAP,
      vec![("xml:id".to_string(), "sec-x".to_string())],
    )
    .expect("fragment title");
    assert_eq!(heading.tag, "section");
    assert_eq!(heading.attrs[0].0, "xml:id");
    assert!(heading.attrs.iter().any(|(k, _)| k == "xmlns:xi"));
  }
}
