//! Types for the folium-markup public API.
use serde::{Deserialize, Serialize};

/// One entry in a document's table of contents.
///
/// Entries are built fresh from rendered HTML on every call and never
/// mutated in place; `children` only ever holds h3 entries nested under
/// the nearest preceding h2.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TocEntry {
  /// Heading level (2 or 3).
  pub level: u8,
  /// Plain heading text.
  pub text: String,
  /// Anchor id the entry links to.
  pub slug: String,
  /// Nested sub-entries.
  pub children: Vec<TocEntry>,
}

/// Result of rendering a storage-format document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkupResult {
  /// Final HTML output, post-processing applied.
  pub html: String,

  /// Nested h2/h3 outline extracted from the final HTML.
  pub toc: Vec<TocEntry>,

  /// Title of the document, if found (first H1).
  pub title: Option<String>,
}
