//! Small utilities: slugs, excerpts, and regex fallbacks.

use comrak::{
  Arena,
  nodes::{AstNode, NodeValue},
  options::Options,
  parse_document,
};

/// Slugify a string for use as an anchor id.
/// Converts to lowercase, replaces non-alphanumeric characters with dashes,
/// and trims leading/trailing dashes.
#[must_use]
pub fn slugify(text: &str) -> String {
  text
    .to_lowercase()
    .replace(|c: char| !c.is_alphanumeric() && c != '-' && c != '_', "-")
    .trim_matches('-')
    .to_string()
}

/// URL of the first Markdown image in `content`, if any.
///
/// Used for post thumbnails and social-card fallbacks.
#[must_use]
pub fn first_image_url(content: &str) -> Option<String> {
  let arena = Arena::new();
  let root = parse_document(&arena, content, &excerpt_options());

  for node in root.descendants() {
    if let NodeValue::Image(link) = &node.data.borrow().value {
      return Some(link.url.clone());
    }
  }
  None
}

/// The first `count` sentences of `content` with Markdown stripped.
///
/// Code spans and blocks are dropped entirely, not inlined; a sentence
/// ends at `.`, `!` or `?`. Used for post excerpts.
#[must_use]
pub fn leading_sentences(content: &str, count: usize) -> String {
  let text = plain_text(content);
  if count == 0 {
    return String::new();
  }

  let mut seen = 0;
  for (idx, ch) in text.char_indices() {
    if matches!(ch, '.' | '!' | '?') {
      seen += 1;
      if seen == count {
        return text[..idx + ch.len_utf8()].trim().to_string();
      }
    }
  }
  text.trim().to_string()
}

/// Flatten Markdown to whitespace-normalized plain text.
fn plain_text(content: &str) -> String {
  let arena = Arena::new();
  let root = parse_document(&arena, content, &excerpt_options());

  let mut out = String::new();
  collect_plain_text(root, &mut out);
  out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_plain_text<'a>(node: &'a AstNode<'a>, out: &mut String) {
  match &node.data.borrow().value {
    NodeValue::Text(text) => out.push_str(text),
    NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
    // Code and raw HTML never belong in an excerpt
    NodeValue::Code(_)
    | NodeValue::CodeBlock(_)
    | NodeValue::HtmlBlock(_)
    | NodeValue::HtmlInline(_)
    | NodeValue::Image(_) => {},
    _ => {
      for child in node.children() {
        collect_plain_text(child, out);
      }
      if is_block(&node.data.borrow().value) {
        out.push(' ');
      }
    },
  }
}

const fn is_block(value: &NodeValue) -> bool {
  matches!(
    value,
    NodeValue::Paragraph
      | NodeValue::Heading(_)
      | NodeValue::Item(_)
      | NodeValue::BlockQuote
      | NodeValue::List(_)
  )
}

fn excerpt_options() -> Options<'static> {
  let mut options = Options::default();
  options.extension.strikethrough = true;
  options.extension.table = true;
  options.extension.autolink = true;
  options
}

/// Create a regex that never matches anything.
///
/// Used as a fallback when a static regex fails to compile, which is safer
/// than a trivial pattern like `^$` that would match empty strings.
///
/// # Panics
///
/// Panics if the fallback pattern `^\b$` fails to compile, which should
/// never happen.
#[must_use]
pub fn never_matching_regex() -> regex::Regex {
  // Asserts something impossible, so it can never match
  regex::Regex::new(r"[^\s\S]").unwrap_or_else(|_| {
    #[allow(clippy::unwrap_used, reason = "This pattern is guaranteed valid")]
    regex::Regex::new(r"^\b$").unwrap()
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn slugify_basic() {
    assert_eq!(slugify("Section 1"), "section-1");
    assert_eq!(slugify("  Hello, World!  "), "hello--world");
  }

  #[test]
  fn first_image_url_finds_the_first() {
    let md = "intro\n\n![First](https://example.com/first.png)\n\n![Second](https://example.com/second.png)\n";
    assert_eq!(
      first_image_url(md).as_deref(),
      Some("https://example.com/first.png")
    );
  }

  #[test]
  fn first_image_url_none_without_images() {
    assert_eq!(first_image_url("Just a [link](https://example.com)"), None);
  }

  #[test]
  fn leading_sentences_strips_markdown() {
    let md = "# Hello World\nThis is **bold** text. This is a \
              [link](https://example.com).\nHere is the third sentence! And \
              a fourth one.";
    assert_eq!(
      leading_sentences(md, 3),
      "Hello World This is bold text. This is a link. Here is the third \
       sentence!"
    );
  }

  #[test]
  fn leading_sentences_short_input_passes_through() {
    assert_eq!(
      leading_sentences("Just one simple sentence.", 3),
      "Just one simple sentence."
    );
  }

  #[test]
  fn leading_sentences_drops_code_spans() {
    assert_eq!(
      leading_sentences("Hello. `var x = 1;` This is next. Wow.", 3),
      "Hello. This is next. Wow."
    );
  }
}
