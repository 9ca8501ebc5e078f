//! Document tree model shared by the parser, transformer and renderer.

use crate::palette::ResolvedColor;

/// Attribute value on a standard element.
///
/// Boolean attributes serialize as the bare attribute name when `true` and
/// are omitted entirely when `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
  Str(String),
  Bool(bool),
}

impl AttrValue {
  /// Shorthand for a string attribute value.
  pub fn str(value: impl Into<String>) -> Self {
    Self::Str(value.into())
  }
}

/// A standard markup element (paragraph, heading, list, link, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
  pub tag_name:   String,
  pub attributes: Vec<(String, AttrValue)>,
  pub children:   Vec<Node>,
}

impl Element {
  /// Create an element with no attributes.
  pub fn new(tag_name: impl Into<String>, children: Vec<Node>) -> Self {
    Self {
      tag_name: tag_name.into(),
      attributes: Vec::new(),
      children,
    }
  }

  /// Create an element with attributes.
  pub fn with_attrs(
    tag_name: impl Into<String>,
    attributes: Vec<(String, AttrValue)>,
    children: Vec<Node>,
  ) -> Self {
    Self {
      tag_name: tag_name.into(),
      attributes,
      children,
    }
  }
}

/// A scanned custom tag before schema validation.
///
/// Attribute values are stored decoded (escape sequences resolved); source
/// order is preserved so diagnostics can point at what the author wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
  pub name:       String,
  pub attributes: Vec<(String, String)>,
}

impl RawTag {
  /// Look up an attribute by name.
  #[must_use]
  pub fn attribute(&self, name: &str) -> Option<&str> {
    self
      .attributes
      .iter()
      .find(|(key, _)| key == name)
      .map(|(_, value)| value.as_str())
  }
}

/// A resolved table tag, colors already looked up in the palette.
///
/// `rows` may be ragged relative to `columns`; rendering zips by index and
/// simply stops at the shorter side. Color vectors are indexed per column
/// and may likewise be shorter or longer than the column list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableNode {
  pub columns:     Vec<String>,
  pub rows:        Vec<Vec<String>>,
  pub head_colors: Vec<ResolvedColor>,
  pub body_colors: Vec<ResolvedColor>,
  /// Whether any light-mode color list was non-empty; drives the
  /// `has-col-colors` class on the rendered table.
  pub has_colors:  bool,
}

/// A resolved video embed tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedNode {
  pub id: String,
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  /// Literal content; always HTML-escaped on render.
  Text(String),
  /// Standard markup element.
  Element(Element),
  /// Fenced code block. Content is escaped only in the fallback
  /// (non-highlighted) rendering path.
  CodeFence {
    language: Option<String>,
    content:  String,
  },
  /// Custom tag scanned by the parser, not yet validated.
  Tag(RawTag),
  /// Resolved custom table.
  Table(TableNode),
  /// Resolved video embed.
  Embed(EmbedNode),
  /// Root node; serializes as the concatenation of its children with no
  /// wrapping element.
  Fragment(Vec<Node>),
}

impl Node {
  /// Collect the plain text content of this subtree.
  #[must_use]
  pub fn text_content(&self) -> String {
    let mut out = String::new();
    self.collect_text(&mut out);
    out
  }

  fn collect_text(&self, out: &mut String) {
    match self {
      Self::Text(value) => out.push_str(value),
      Self::Element(element) => {
        for child in &element.children {
          child.collect_text(out);
        }
      },
      Self::Fragment(children) => {
        for child in children {
          child.collect_text(out);
        }
      },
      Self::CodeFence { content, .. } => out.push_str(content),
      Self::Tag(_) | Self::Table(_) | Self::Embed(_) => {},
    }
  }
}
