//! HTML post-processing: code highlighting, heading slugs, self-links.
//!
//! Operates on the renderer's output through a DOM so the passes compose:
//! highlighting may replace a block's children entirely, slugs must see
//! the final heading text, and self-links wrap whatever is left. Step
//! order is significant and must not change.

use std::collections::HashSet;

use kuchikikiki::{Attribute, ExpandedName, NodeRef, parse_html};
use log::debug;
use markup5ever::{QualName, local_name, ns};
use tendril::TendrilSink as _;

use crate::{syntax::SyntaxManager, utils::slugify};

/// Run the full post-processing pipeline over an HTML fragment.
///
/// With no syntax manager the highlighting pass is skipped and code blocks
/// keep their escaped fallback form. Both remaining passes are idempotent:
/// re-running the pipeline neither rewrites existing ids nor nests
/// self-link anchors.
#[must_use]
pub fn postprocess(html: &str, syntax: Option<&SyntaxManager>) -> String {
  if html.is_empty() {
    return String::new();
  }

  let document = parse_html().one(html);

  if let Some(manager) = syntax {
    highlight_code_blocks(&document, manager);
  }
  assign_heading_ids(&document);
  wrap_heading_self_links(&document);

  serialize_body_children(&document)
}

/// Replace `pre > code.language-X` blocks with highlighted markup.
///
/// Failure isolation is per block: a language the backend rejects leaves
/// that block escaped and unhighlighted while the rest of the document
/// proceeds.
fn highlight_code_blocks(document: &NodeRef, manager: &SyntaxManager) {
  // Collect first so DOM edits do not disturb the live selection
  let mut blocks = Vec::new();
  if let Ok(selection) = document.select("pre > code") {
    for code_ref in selection {
      let code_node = code_ref.as_node();
      let Some(element) = code_node.as_element() else {
        continue;
      };
      let language = element
        .attributes
        .borrow()
        .get("class")
        .and_then(|class| class.strip_prefix("language-"))
        .unwrap_or_default()
        .to_string();
      if language.is_empty() {
        continue;
      }
      if let Some(pre) = code_node.parent() {
        blocks.push((pre, code_node.text_contents(), language));
      }
    }
  }

  for (pre, code, language) in blocks {
    match manager.highlight_code(&code, &language) {
      Ok(highlighted) => {
        let wrapped = format!(
          "<pre class=\"highlight\"><code class=\"language-{}\">{highlighted}</code></pre>",
          html_escape::encode_double_quoted_attribute(&language),
        );
        for node in parse_fragment_nodes(&wrapped) {
          pre.insert_before(node);
        }
        pre.detach();
      },
      Err(err) => {
        debug!("leaving code block unhighlighted ({language}): {err}");
      },
    }
  }
}

/// Give every heading without an id a slug derived from its text.
///
/// Slugs are unique per document: collisions (with pre-existing ids too)
/// are suffixed `-1`, `-2`, ...
fn assign_heading_ids(document: &NodeRef) {
  let mut used: HashSet<String> = HashSet::new();
  if let Ok(selection) = document.select("[id]") {
    for node_ref in selection {
      if let Some(id) = node_ref.attributes.borrow().get("id") {
        used.insert(id.to_string());
      }
    }
  }

  let Ok(selection) = document.select("h1, h2, h3, h4, h5, h6") else {
    return;
  };
  let headings: Vec<_> = selection.collect();
  for heading in headings {
    let node = heading.as_node();
    let Some(element) = node.as_element() else {
      continue;
    };
    if element.attributes.borrow().get("id").is_some() {
      continue;
    }

    let base = slugify(&node.text_contents());
    if base.is_empty() {
      continue;
    }
    let slug = dedupe_slug(&base, &used);
    element
      .attributes
      .borrow_mut()
      .insert(local_name!("id"), slug.clone());
    used.insert(slug);
  }
}

fn dedupe_slug(base: &str, used: &HashSet<String>) -> String {
  if !used.contains(base) {
    return base.to_string();
  }
  let mut counter = 1_usize;
  loop {
    let candidate = format!("{base}-{counter}");
    if !used.contains(&candidate) {
      return candidate;
    }
    counter += 1;
  }
}

/// Wrap each id-carrying heading's content in a link to its own anchor.
fn wrap_heading_self_links(document: &NodeRef) {
  let Ok(selection) =
    document.select("h1[id], h2[id], h3[id], h4[id], h5[id], h6[id]")
  else {
    return;
  };
  let headings: Vec<_> = selection.collect();

  for heading in headings {
    let node = heading.as_node();
    let Some(element) = node.as_element() else {
      continue;
    };
    let Some(id) = element
      .attributes
      .borrow()
      .get("id")
      .map(std::string::ToString::to_string)
    else {
      continue;
    };
    let href = format!("#{id}");

    let children: Vec<NodeRef> = node.children().collect();

    // Already wrapped by a previous run
    if let [only] = children.as_slice() {
      if let Some(anchor) = only.as_element() {
        if anchor.name.local.as_ref() == "a"
          && anchor.attributes.borrow().get("href") == Some(href.as_str())
        {
          continue;
        }
      }
    }

    let anchor = NodeRef::new_element(
      QualName::new(None, ns!(html), local_name!("a")),
      vec![(ExpandedName::new("", "href"), Attribute {
        prefix: None,
        value:  href,
      })],
    );
    for child in children {
      child.detach();
      anchor.append(child);
    }
    node.append(anchor);
  }
}

/// Parse an HTML fragment and detach its body children for reinsertion.
fn parse_fragment_nodes(html: &str) -> Vec<NodeRef> {
  let document = parse_html().one(html);
  document.select_first("body").map_or_else(
    |()| Vec::new(),
    |body| {
      let children: Vec<NodeRef> = body.as_node().children().collect();
      for child in &children {
        child.detach();
      }
      children
    },
  )
}

/// Serialize the document back to a fragment string (body children only).
fn serialize_body_children(document: &NodeRef) -> String {
  let Ok(body) = document.select_first("body") else {
    return String::new();
  };
  let mut out = Vec::new();
  for child in body.as_node().children() {
    if child.serialize(&mut out).is_err() {
      return String::new();
    }
  }
  String::from_utf8(out).unwrap_or_default()
}
