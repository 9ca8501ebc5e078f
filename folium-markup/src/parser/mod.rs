//! Document parser: storage-format markup into a tree of nodes.
//!
//! Custom block tags get a hand-written scanner ([`tag`]); everything else
//! is delegated to comrak and lowered by [`lower`]. The parser never fails:
//! malformed or unterminated custom tags stay in the Markdown stream and
//! come out the other end as literal text.

mod lower;
pub mod tag;

use comrak::{Arena, options::Options, parse_document};

use crate::{
  node::{Node, RawTag},
  transform::TagRegistry,
};

/// Parse storage-format source into a document tree.
///
/// The returned node is always a [`Node::Fragment`]. Custom tags are only
/// recognized for names present in `registry`, only at the start of a line,
/// and never inside fenced code blocks; a tag may span multiple lines.
#[must_use]
pub fn parse(source: &str, registry: &TagRegistry, gfm: bool) -> Node {
  let mut children = Vec::new();
  let mut markdown = String::new();

  let mut in_fence = false;
  let mut fence_char = '`';
  let mut fence_len = 0;

  let mut pos = 0;
  while pos < source.len() {
    let line_end = source[pos..]
      .find('\n')
      .map_or(source.len(), |offset| pos + offset + 1);
    let line = &source[pos..line_end];
    let trimmed = line.trim_start();

    if !in_fence && trimmed.starts_with("{%") {
      let tag_start = pos + (line.len() - trimmed.len());
      if let Some(scanned) = tag::scan_tag(&source[tag_start..]) {
        if registry.is_registered(&scanned.name) {
          flush_markdown(&mut markdown, &mut children, gfm);
          children.push(Node::Tag(RawTag {
            name:       scanned.name,
            attributes: scanned
              .attributes
              .iter()
              .map(|attr| (attr.name.clone(), attr.decoded()))
              .collect(),
          }));

          // Swallow the remainder of the closing line when it is blank
          let mut end = tag_start + scanned.len;
          let rest_end = source[end..]
            .find('\n')
            .map_or(source.len(), |offset| end + offset + 1);
          if source[end..rest_end].trim().is_empty() {
            end = rest_end;
          }
          pos = end;
          continue;
        }
      }
      // Unregistered or malformed: fall through as literal Markdown
    }

    if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
      let current = if trimmed.starts_with('`') { '`' } else { '~' };
      let count = trimmed.chars().take_while(|&ch| ch == current).count();
      if count >= 3 {
        if !in_fence {
          in_fence = true;
          fence_char = current;
          fence_len = count;
        } else if fence_char == current && count >= fence_len {
          in_fence = false;
        }
      }
    }

    markdown.push_str(line);
    pos = line_end;
  }

  flush_markdown(&mut markdown, &mut children, gfm);
  Node::Fragment(children)
}

/// Parse a plain Markdown run and append the lowered nodes.
fn flush_markdown(markdown: &mut String, out: &mut Vec<Node>, gfm: bool) {
  if markdown.trim().is_empty() {
    markdown.clear();
    return;
  }

  let arena = Arena::new();
  let root = parse_document(&arena, markdown, &comrak_options(gfm));
  out.extend(lower::lower_document(root));
  markdown.clear();
}

fn comrak_options(gfm: bool) -> Options<'static> {
  let mut options = Options::default();
  if gfm {
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options.extension.superscript = true;
    options.extension.autolink = true;
  }
  options
}
