//! Tree transformer: resolves scanned custom tags into renderable nodes.
//!
//! Each custom tag is validated against its registered schema. A schema
//! violation is scoped to the offending node: it renders as an inert
//! placeholder element and the rest of the document is untouched.

use std::collections::HashMap;

use log::{debug, warn};

use crate::{
  codec,
  node::{AttrValue, Element, EmbedNode, Node, RawTag, TableNode},
  palette::ResolvedColor,
};

/// What a registered tag renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
  /// Video embed (`youtube`).
  Embed,
  /// Colored data table (`folium-table`).
  Table,
}

/// Declared attribute of a custom tag. All attributes are string-typed.
#[derive(Debug, Clone)]
pub struct AttrSpec {
  pub name:     String,
  pub required: bool,
}

impl AttrSpec {
  fn new(name: &str, required: bool) -> Self {
    Self {
      name: name.to_string(),
      required,
    }
  }
}

/// Schema for one custom tag.
#[derive(Debug, Clone)]
pub struct TagSpec {
  pub kind:       TagKind,
  pub attributes: Vec<AttrSpec>,
}

/// Registry of recognized custom tags.
///
/// The default registry knows the two tags of the storage dialect; the
/// parser also consults it so unregistered `{% ... %}` constructs stay
/// literal text.
#[derive(Debug, Clone)]
pub struct TagRegistry {
  tags: HashMap<String, TagSpec>,
}

impl TagRegistry {
  /// An empty registry.
  #[must_use]
  pub fn empty() -> Self {
    Self {
      tags: HashMap::new(),
    }
  }

  /// Register (or replace) a tag schema.
  pub fn register(&mut self, name: &str, spec: TagSpec) {
    self.tags.insert(name.to_string(), spec);
  }

  /// Whether `name` is a recognized custom tag.
  #[must_use]
  pub fn is_registered(&self, name: &str) -> bool {
    self.tags.contains_key(name)
  }

  /// Look up a tag schema.
  #[must_use]
  pub fn get(&self, name: &str) -> Option<&TagSpec> {
    self.tags.get(name)
  }
}

impl Default for TagRegistry {
  fn default() -> Self {
    let mut registry = Self::empty();
    registry.register("youtube", TagSpec {
      kind:       TagKind::Embed,
      attributes: vec![AttrSpec::new("id", true)],
    });
    registry.register("folium-table", TagSpec {
      kind:       TagKind::Table,
      attributes: vec![
        AttrSpec::new("columns", false),
        AttrSpec::new("rows", false),
        AttrSpec::new("columnHeadColors", false),
        AttrSpec::new("columnHeadColorsDark", false),
        AttrSpec::new("rowColors", false),
        AttrSpec::new("rowColorsDark", false),
      ],
    });
    registry
  }
}

/// Resolve custom tags and normalize code fences across the whole tree.
#[must_use]
pub fn transform(node: Node, registry: &TagRegistry) -> Node {
  match node {
    Node::Fragment(children) => Node::Fragment(
      children
        .into_iter()
        .map(|child| transform(child, registry))
        .collect(),
    ),
    Node::Element(mut element) => {
      element.children = element
        .children
        .into_iter()
        .map(|child| transform(child, registry))
        .collect();
      Node::Element(element)
    },
    Node::Tag(raw) => transform_tag(&raw, registry),
    Node::CodeFence { language, content } => {
      Node::CodeFence {
        language: language
          .map(|lang| lang.trim().to_string())
          .filter(|lang| !lang.is_empty()),
        content,
      }
    },
    other @ (Node::Text(_) | Node::Table(_) | Node::Embed(_)) => other,
  }
}

fn transform_tag(raw: &RawTag, registry: &TagRegistry) -> Node {
  let Some(spec) = registry.get(&raw.name) else {
    warn!("custom tag '{}' is not registered", raw.name);
    return placeholder(&raw.name);
  };

  for attr in &spec.attributes {
    if attr.required && raw.attribute(&attr.name).is_none() {
      warn!(
        "custom tag '{}' is missing required attribute '{}'",
        raw.name, attr.name
      );
      return placeholder(&raw.name);
    }
  }
  for (name, _) in &raw.attributes {
    if !spec.attributes.iter().any(|attr| &attr.name == name) {
      debug!("custom tag '{}' has undeclared attribute '{name}'", raw.name);
    }
  }

  match spec.kind {
    TagKind::Embed => {
      Node::Embed(EmbedNode {
        id: raw.attribute("id").unwrap_or_default().to_string(),
      })
    },
    TagKind::Table => Node::Table(build_table(raw)),
  }
}

fn build_table(raw: &RawTag) -> TableNode {
  let decode = |name: &str| {
    raw
      .attribute(name)
      .map(codec::decode_string_array)
      .unwrap_or_default()
  };

  let columns = decode("columns");
  let rows = raw
    .attribute("rows")
    .map(codec::decode_rows)
    .unwrap_or_default();

  let head_light = decode("columnHeadColors");
  let head_dark = decode("columnHeadColorsDark");
  let body_light = decode("rowColors");
  let body_dark = decode("rowColorsDark");

  // Only the light-mode lists decide whether the table is "colored"
  let has_colors = !head_light.is_empty() || !body_light.is_empty();

  TableNode {
    columns,
    rows,
    head_colors: resolve_pairs(&head_light, &head_dark),
    body_colors: resolve_pairs(&body_light, &body_dark),
    has_colors,
  }
}

/// Zip light and dark color-name lists into resolved per-column colors.
/// Empty names count as absent.
fn resolve_pairs(light: &[String], dark: &[String]) -> Vec<ResolvedColor> {
  let len = light.len().max(dark.len());
  (0..len)
    .map(|idx| {
      ResolvedColor::resolve(
        light.get(idx).map(String::as_str).filter(|name| !name.is_empty()),
        dark.get(idx).map(String::as_str).filter(|name| !name.is_empty()),
      )
    })
    .collect()
}

/// Inert element substituted for a tag that failed schema validation.
fn placeholder(name: &str) -> Node {
  Node::Element(Element::with_attrs(
    "div",
    vec![
      ("class".to_string(), AttrValue::str("tag-placeholder")),
      ("data-tag".to_string(), AttrValue::str(name)),
    ],
    Vec::new(),
  ))
}
