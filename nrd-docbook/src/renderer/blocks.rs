//! Block-level output: paragraphs and code listings.
//!
//! None of these depend on render state.
use crate::utils::{quote_attr, xml_escape};

/// Info string marking a fenced block as pre-rendered DocBook that is
/// passed through untouched.
pub const RAW_DOCBOOK_INFO: &str = "{=docbook}";

// Paragraph bodies are indented onto their own line to keep output close to
// the shape produced by the previous manual toolchain.
pub const PARAGRAPH_OPEN: &str = "<para>\n ";
pub const PARAGRAPH_CLOSE: &str = "\n</para>";

/// Indented code block.
#[must_use]
pub fn code_block(content: &str) -> String {
  format!("<programlisting>\n{}</programlisting>", xml_escape(content))
}

/// Fenced code block, or raw DocBook for `{=docbook}` fences.
#[must_use]
pub fn fence(info: &str, content: &str) -> String {
  if info == RAW_DOCBOOK_INFO {
    return content.to_string();
  }

  let language = if info.is_empty() {
    String::new()
  } else {
    format!(" language={}", quote_attr(info))
  };
  format!(
    "<programlisting{language}>\n{}</programlisting>",
    xml_escape(content)
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_code_block_escapes_body() {
    assert_eq!(
      code_block("a < b && c > d\n"),
      "<programlisting>\na &lt; b &amp;&amp; c &gt; d\n</programlisting>"
    );
  }

  #[test]
  fn test_fence_with_language() {
    assert_eq!(
      fence("python", "print(1 < 2)\n"),
      "<programlisting language=\"python\">\nprint(1 &lt; 2)\n</programlisting>"
    );
  }

  #[test]
  fn test_fence_without_info_has_no_language() {
    assert_eq!(fence("", "x\n"), "<programlisting>\nx\n</programlisting>");
  }

  #[test]
  fn test_raw_docbook_fence_is_verbatim() {
    let body = "<note><para>a & b</para></note>\n";
    assert_eq!(fence("{=docbook}", body), body);
  }

  #[test]
  fn test_odd_info_string_is_quoted_not_rejected() {
    assert_eq!(
      fence("nix \"x\" <y>", ""),
      "<programlisting language=\"nix &quot;x&quot; &lt;y&gt;\">\n\
       </programlisting>"
    );
  }
}
