//! Table-of-contents extraction from rendered HTML.
//!
//! Scans the final HTML (not the document tree) so the outline reflects
//! exactly what post-processing produced, self-link anchors included.

use std::sync::LazyLock;

use regex::Regex;

use crate::{types::TocEntry, utils::never_matching_regex};

/// Matches `<h2 id="...">` / `<h3 id="...">`, with the heading text either
/// wrapped in a self-link anchor or bare.
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r#"(?i)<h([23]) id="([^"]+)"[^>]*>(?:<a[^>]*>([^<]*)</a>|([^<]*))</h[23]>"#,
  )
  .unwrap_or_else(|e| {
    log::error!("Failed to compile HEADING_RE regex: {e}");
    never_matching_regex()
  })
});

/// Collapses any `&...;` entity to a single space. Robustness over
/// fidelity: the outline is navigation text, not content.
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"&[^;]+;").unwrap_or_else(|e| {
    log::error!("Failed to compile ENTITY_RE regex: {e}");
    never_matching_regex()
  })
});

/// Extract the nested h2/h3 outline from rendered HTML.
///
/// h1, h4+ and headings without an id are silently skipped. An h3 with no
/// preceding h2 becomes a root-level entry; that is deliberate, not a
/// missing case.
#[must_use]
pub fn extract_toc(html: &str) -> Vec<TocEntry> {
  let mut flat = Vec::new();

  for caps in HEADING_RE.captures_iter(html) {
    let level: u8 = match caps.get(1).and_then(|m| m.as_str().parse().ok()) {
      Some(level) => level,
      None => continue,
    };
    let slug = caps.get(2).map_or("", |m| m.as_str());
    let raw_text = caps
      .get(3)
      .or_else(|| caps.get(4))
      .map_or("", |m| m.as_str());
    let text = ENTITY_RE.replace_all(raw_text.trim(), " ").to_string();

    if !slug.is_empty() && !text.is_empty() {
      flat.push((level, text, slug.to_string()));
    }
  }

  build_tree(flat)
}

/// Stack-based tree construction over the flat heading list.
fn build_tree(flat: Vec<(u8, String, String)>) -> Vec<TocEntry> {
  let mut root: Vec<TocEntry> = Vec::new();
  // Index path into `root` for the currently open ancestors
  let mut stack: Vec<(u8, usize)> = Vec::new();

  for (level, text, slug) in flat {
    let entry = TocEntry {
      level,
      text,
      slug,
      children: Vec::new(),
    };

    while stack.last().is_some_and(|&(top_level, _)| top_level >= level) {
      stack.pop();
    }

    if stack.is_empty() {
      root.push(entry);
      stack.push((level, root.len() - 1));
    } else {
      let parent = resolve_parent(&mut root, &stack);
      parent.children.push(entry);
      let child_idx = parent.children.len() - 1;
      stack.push((level, child_idx));
    }
  }

  root
}

/// Follow the stack's index path down to the current parent entry.
fn resolve_parent<'a>(
  root: &'a mut Vec<TocEntry>,
  stack: &[(u8, usize)],
) -> &'a mut TocEntry {
  let mut iter = stack.iter();
  let &(_, first) = iter.next().unwrap_or(&(0, 0));
  let mut current = &mut root[first];
  for &(_, idx) in iter {
    current = &mut current.children[idx];
  }
  current
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builds_nested_outline() {
    let html = r##"<h2 id="s1"><a href="#s1">A</a></h2><h3 id="s1-1"><a href="#s1-1">A1</a></h3><h2 id="s2"><a href="#s2">B</a></h2>"##;
    let toc = extract_toc(html);
    assert_eq!(toc.len(), 2);
    assert_eq!(toc[0].text, "A");
    assert_eq!(toc[0].children.len(), 1);
    assert_eq!(toc[0].children[0].text, "A1");
    assert_eq!(toc[1].text, "B");
    assert!(toc[1].children.is_empty());
  }

  #[test]
  fn orphan_h3_becomes_root_entry() {
    let html = r#"<h3 id="a">X</h3><h2 id="b">Y</h2>"#;
    let toc = extract_toc(html);
    assert_eq!(toc.len(), 2);
    assert_eq!(toc[0].level, 3);
    assert_eq!(toc[0].text, "X");
    assert_eq!(toc[1].level, 2);
  }

  #[test]
  fn headings_without_id_and_other_levels_are_skipped() {
    let html = r#"<h2>No id</h2><h1 id="top">Top</h1><h2 id="ok">Ok</h2><h4 id="deep">Deep</h4>"#;
    let toc = extract_toc(html);
    assert_eq!(toc.len(), 1);
    assert_eq!(toc[0].text, "Ok");
  }

  #[test]
  fn anchor_text_wins_over_bare_text() {
    let html = r##"<h2 id="s"><a href="#s">Linked</a></h2>"##;
    let toc = extract_toc(html);
    assert_eq!(toc[0].text, "Linked");
    assert_eq!(toc[0].slug, "s");
  }

  #[test]
  fn entities_collapse_to_spaces() {
    let html = r#"<h2 id="s">A&nbsp;&amp;B</h2>"#;
    let toc = extract_toc(html);
    assert_eq!(toc[0].text, "A  B");
  }
}
