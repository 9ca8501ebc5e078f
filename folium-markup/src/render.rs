//! Recursive HTML serialization of the transformed document tree.
//!
//! The renderer is a total function: any tree serializes to a string, and
//! every piece of author-supplied text or attribute value goes through
//! [`esc`]. The custom table and embed nodes produce the exact attribute
//! and class shapes the site's stylesheets and theme-switcher select on.

use crate::{
  node::{AttrValue, Element, EmbedNode, Node, TableNode},
  palette::ResolvedColor,
};

/// Cell text at or below this length gets the `ft-nowrap` styling hint.
const NOWRAP_MAX_CHARS: usize = 15;

/// Elements serialized as a lone open tag, children never emitted.
const VOID_ELEMENTS: &[&str] = &[
  "img", "br", "hr", "input", "meta", "link", "area", "base", "col", "embed",
  "param", "source", "track", "wbr",
];

/// Escape `&`, `<`, `>` and `"` for text content and attribute values.
///
/// This exact four-character set is part of the rendered-HTML contract
/// (the same value must be safe in both positions), so it is spelled out
/// here rather than borrowed from a general-purpose encoder.
fn esc(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  for ch in input.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      _ => out.push(ch),
    }
  }
  out
}

/// Serialize a document tree to an HTML string.
#[must_use]
pub fn render(node: &Node) -> String {
  let mut out = String::new();
  render_node(node, &mut out);
  out
}

fn render_node(node: &Node, out: &mut String) {
  match node {
    Node::Text(value) => out.push_str(&esc(value)),
    Node::Fragment(children) => {
      for child in children {
        render_node(child, out);
      }
    },
    Node::Element(element) => render_element(element, out),
    Node::CodeFence { language, content } => {
      // Fallback shape the highlighter looks for: pre > code.language-X
      out.push_str("<pre><code class=\"language-");
      out.push_str(&esc(language.as_deref().unwrap_or_default()));
      out.push_str("\">");
      out.push_str(&esc(content));
      out.push_str("</code></pre>");
    },
    Node::Table(table) => render_table(table, out),
    Node::Embed(embed) => render_embed(embed, out),
    // An unresolved tag that never went through the transformer
    Node::Tag(_) => {},
  }
}

fn render_element(element: &Element, out: &mut String) {
  out.push('<');
  out.push_str(&element.tag_name);
  for (name, value) in &element.attributes {
    match value {
      AttrValue::Bool(true) => {
        out.push(' ');
        out.push_str(&esc(name));
      },
      AttrValue::Bool(false) => {},
      AttrValue::Str(text) => {
        out.push(' ');
        out.push_str(&esc(name));
        out.push_str("=\"");
        out.push_str(&esc(text));
        out.push('"');
      },
    }
  }
  out.push('>');

  if VOID_ELEMENTS.contains(&element.tag_name.as_str()) {
    return;
  }

  for child in &element.children {
    render_node(child, out);
  }
  out.push_str("</");
  out.push_str(&element.tag_name);
  out.push('>');
}

fn render_table(table: &TableNode, out: &mut String) {
  out.push_str("<div class=\"folium-table-wrapper\"><table class=\"folium-table");
  if table.has_colors {
    out.push_str(" has-col-colors");
  }
  out.push_str("\"><thead><tr>");

  for (idx, heading) in table.columns.iter().enumerate() {
    render_cell(
      "th",
      "pt-head-col",
      "data-pt-head-idx",
      idx,
      heading,
      table.head_colors.get(idx),
      out,
    );
  }
  out.push_str("</tr></thead><tbody>");

  for row in &table.rows {
    out.push_str("<tr>");
    for (idx, cell) in row.iter().enumerate() {
      let text = if cell.is_empty() { "—" } else { cell.as_str() };
      render_cell(
        "td",
        "pt-body-col",
        "data-pt-body-idx",
        idx,
        text,
        table.body_colors.get(idx),
        out,
      );
    }
    out.push_str("</tr>");
  }
  out.push_str("</tbody></table></div>");
}

fn render_cell(
  tag: &str,
  color_class: &str,
  idx_attr: &str,
  idx: usize,
  text: &str,
  color: Option<&ResolvedColor>,
  out: &mut String,
) {
  let styled = color.is_some_and(ResolvedColor::is_styled);

  let mut classes = Vec::with_capacity(2);
  if styled {
    classes.push(color_class);
  }
  if text.chars().count() <= NOWRAP_MAX_CHARS {
    classes.push("ft-nowrap");
  }

  out.push('<');
  out.push_str(tag);
  if !classes.is_empty() {
    out.push_str(" class=\"");
    out.push_str(&classes.join(" "));
    out.push('"');
  }
  if let Some(bg) = color.and_then(|c| c.bg_light.as_deref()) {
    let text_color = color
      .and_then(|c| c.text_light.as_deref())
      .unwrap_or_default();
    out.push_str(" style=\"--pt-bg:");
    out.push_str(&esc(bg));
    out.push_str(";--pt-text:");
    out.push_str(&esc(text_color));
    out.push('"');
  }
  out.push(' ');
  out.push_str(idx_attr);
  out.push_str("=\"");
  out.push_str(&idx.to_string());
  out.push('"');
  if let Some(bg_dark) = color.and_then(|c| c.bg_dark.as_deref()) {
    out.push_str(" data-pt-bg-dark=\"");
    out.push_str(&esc(bg_dark));
    out.push('"');
  }
  if let Some(text_dark) = color.and_then(|c| c.text_dark.as_deref()) {
    out.push_str(" data-pt-text-dark=\"");
    out.push_str(&esc(text_dark));
    out.push('"');
  }
  out.push('>');
  out.push_str(&esc(text));
  out.push_str("</");
  out.push_str(tag);
  out.push('>');
}

fn render_embed(embed: &EmbedNode, out: &mut String) {
  out.push_str(
    "<div class=\"youtube-embed-wrapper\"><iframe \
     src=\"https://www.youtube.com/embed/",
  );
  out.push_str(&esc(&embed.id));
  out.push_str(
    "\" title=\"YouTube video\" allow=\"accelerometer; autoplay; \
     clipboard-write; encrypted-media; gyroscope; picture-in-picture\" \
     allowfullscreen class=\"youtube-embed\"></iframe></div>",
  );
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::node::AttrValue;

  #[test]
  fn text_is_escaped() {
    let html = render(&Node::Text("a < b & \"c\" > d".to_string()));
    assert_eq!(html, "a &lt; b &amp; &quot;c&quot; &gt; d");
  }

  #[test]
  fn void_elements_have_no_close_tag_and_drop_children() {
    let html = render(&Node::Element(Element::with_attrs(
      "img",
      vec![("src".to_string(), AttrValue::str("x.webp"))],
      vec![Node::Text("ignored".to_string())],
    )));
    assert_eq!(html, "<img src=\"x.webp\">");
  }

  #[test]
  fn boolean_attributes_serialize_bare_or_not_at_all() {
    let html = render(&Node::Element(Element::with_attrs(
      "input",
      vec![
        ("type".to_string(), AttrValue::str("checkbox")),
        ("checked".to_string(), AttrValue::Bool(true)),
        ("disabled".to_string(), AttrValue::Bool(false)),
      ],
      Vec::new(),
    )));
    assert_eq!(html, "<input type=\"checkbox\" checked>");
  }

  #[test]
  fn fragment_concatenates_children_without_wrapper() {
    let html = render(&Node::Fragment(vec![
      Node::Text("a".to_string()),
      Node::Element(Element::new("p", vec![Node::Text("b".to_string())])),
    ]));
    assert_eq!(html, "a<p>b</p>");
  }

  #[test]
  fn code_fence_fallback_is_escaped() {
    let html = render(&Node::CodeFence {
      language: Some("rust".to_string()),
      content:  "if a < b {}".to_string(),
    });
    assert_eq!(
      html,
      "<pre><code class=\"language-rust\">if a &lt; b {}</code></pre>"
    );
  }

  #[test]
  fn attribute_values_are_escaped() {
    let html = render(&Node::Element(Element::with_attrs(
      "a",
      vec![("href".to_string(), AttrValue::str("?a=1&b=\"2\""))],
      vec![Node::Text("link".to_string())],
    )));
    assert_eq!(
      html,
      "<a href=\"?a=1&amp;b=&quot;2&quot;\">link</a>"
    );
  }

  #[test]
  fn unresolved_tag_renders_to_nothing() {
    let html = render(&Node::Tag(crate::node::RawTag {
      name:       "youtube".to_string(),
      attributes: Vec::new(),
    }));
    assert_eq!(html, "");
  }
}
