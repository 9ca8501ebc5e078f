//! Lowering from the comrak AST into the document tree.
//!
//! Standard Markdown is delegated to comrak; this module only reshapes its
//! AST into [`Node`]s the renderer understands. Raw HTML blocks and inlines
//! are demoted to plain text on purpose: the pipeline's output is sanitized
//! and nothing author-supplied may reach the page unescaped.

use comrak::nodes::{AstNode, ListType, NodeValue};

use crate::node::{AttrValue, Element, Node};

/// Lower a parsed comrak document into a list of block nodes.
pub fn lower_document<'a>(root: &'a AstNode<'a>) -> Vec<Node> {
  let mut out = Vec::new();
  for child in root.children() {
    lower_block(child, &mut out, false);
  }
  out
}

fn lower_block<'a>(
  node: &'a AstNode<'a>,
  out: &mut Vec<Node>,
  in_tight_item: bool,
) {
  let data = node.data.borrow();
  match &data.value {
    NodeValue::Document => {
      for child in node.children() {
        lower_block(child, out, false);
      }
    },
    NodeValue::FrontMatter(_) => {},
    NodeValue::Heading(heading) => {
      out.push(Node::Element(Element::new(
        format!("h{}", heading.level),
        lower_inline_children(node),
      )));
    },
    NodeValue::Paragraph => {
      let children = lower_inline_children(node);
      // Tight list items drop the paragraph wrapper
      if in_tight_item {
        out.extend(children);
      } else {
        out.push(Node::Element(Element::new("p", children)));
      }
    },
    NodeValue::BlockQuote => {
      let mut children = Vec::new();
      for child in node.children() {
        lower_block(child, &mut children, false);
      }
      out.push(Node::Element(Element::new("blockquote", children)));
    },
    NodeValue::List(list) => {
      let ordered = matches!(list.list_type, ListType::Ordered);
      let tight = list.tight;
      let start = list.start;
      drop(data);

      let mut attributes = Vec::new();
      if ordered && start != 1 {
        attributes.push(("start".to_string(), AttrValue::str(start.to_string())));
      }

      let mut items = Vec::new();
      for item in node.children() {
        lower_list_item(item, &mut items, tight);
      }

      out.push(Node::Element(Element::with_attrs(
        if ordered { "ol" } else { "ul" },
        attributes,
        items,
      )));
    },
    NodeValue::CodeBlock(block) => {
      let language = block
        .info
        .split_whitespace()
        .next()
        .map(std::string::ToString::to_string);
      out.push(Node::CodeFence {
        language,
        content: block.literal.clone(),
      });
    },
    NodeValue::ThematicBreak => {
      out.push(Node::Element(Element::new("hr", Vec::new())));
    },
    NodeValue::Table(_) => {
      drop(data);
      out.push(lower_table(node));
    },
    NodeValue::HtmlBlock(block) => {
      out.push(Node::Text(block.literal.clone()));
    },
    // Inline content appearing at block level (e.g. inside table cells)
    _ => {
      drop(data);
      lower_inline(node, out);
    },
  }
}

fn lower_list_item<'a>(item: &'a AstNode<'a>, out: &mut Vec<Node>, tight: bool) {
  let data = item.data.borrow();
  match &data.value {
    NodeValue::Item(_) => {
      drop(data);
      let mut children = Vec::new();
      for child in item.children() {
        lower_block(child, &mut children, tight);
      }
      out.push(Node::Element(Element::new("li", children)));
    },
    NodeValue::TaskItem(symbol) => {
      let checked = symbol.symbol.is_some();
      drop(data);
      let mut children = vec![
        Node::Element(Element::with_attrs(
          "input",
          vec![
            ("type".to_string(), AttrValue::str("checkbox")),
            ("checked".to_string(), AttrValue::Bool(checked)),
            ("disabled".to_string(), AttrValue::Bool(true)),
          ],
          Vec::new(),
        )),
        Node::Text(" ".to_string()),
      ];
      for child in item.children() {
        lower_block(child, &mut children, tight);
      }
      out.push(Node::Element(Element::with_attrs(
        "li",
        vec![(
          "class".to_string(),
          AttrValue::str("task-list-item"),
        )],
        children,
      )));
    },
    _ => {},
  }
}

fn lower_table<'a>(table: &'a AstNode<'a>) -> Node {
  let mut head_rows = Vec::new();
  let mut body_rows = Vec::new();

  for row in table.children() {
    let row_data = row.data.borrow();
    if let NodeValue::TableRow(header) = &row_data.value {
      let is_header = *header;
      drop(row_data);
      let mut cells = Vec::new();
      for cell in row.children() {
        cells.push(Node::Element(Element::new(
          if is_header { "th" } else { "td" },
          lower_inline_children(cell),
        )));
      }
      let tr = Node::Element(Element::new("tr", cells));
      if is_header {
        head_rows.push(tr);
      } else {
        body_rows.push(tr);
      }
    }
  }

  let mut children = Vec::new();
  if !head_rows.is_empty() {
    children.push(Node::Element(Element::new("thead", head_rows)));
  }
  if !body_rows.is_empty() {
    children.push(Node::Element(Element::new("tbody", body_rows)));
  }
  Node::Element(Element::new("table", children))
}

fn lower_inline_children<'a>(node: &'a AstNode<'a>) -> Vec<Node> {
  let mut out = Vec::new();
  for child in node.children() {
    lower_inline(child, &mut out);
  }
  out
}

fn lower_inline<'a>(node: &'a AstNode<'a>, out: &mut Vec<Node>) {
  let data = node.data.borrow();
  match &data.value {
    NodeValue::Text(text) => out.push(Node::Text(text.to_string())),
    NodeValue::SoftBreak => out.push(Node::Text("\n".to_string())),
    NodeValue::LineBreak => {
      out.push(Node::Element(Element::new("br", Vec::new())));
    },
    NodeValue::Code(code) => {
      out.push(Node::Element(Element::new("code", vec![Node::Text(
        code.literal.clone(),
      )])));
    },
    NodeValue::HtmlInline(html) => out.push(Node::Text(html.clone())),
    NodeValue::Emph => {
      drop(data);
      out.push(Node::Element(Element::new(
        "em",
        lower_inline_children(node),
      )));
    },
    NodeValue::Strong => {
      drop(data);
      out.push(Node::Element(Element::new(
        "strong",
        lower_inline_children(node),
      )));
    },
    NodeValue::Strikethrough => {
      drop(data);
      out.push(Node::Element(Element::new(
        "del",
        lower_inline_children(node),
      )));
    },
    NodeValue::Superscript => {
      drop(data);
      out.push(Node::Element(Element::new(
        "sup",
        lower_inline_children(node),
      )));
    },
    NodeValue::Link(link) => {
      let mut attributes =
        vec![("href".to_string(), AttrValue::str(link.url.clone()))];
      if !link.title.is_empty() {
        attributes
          .push(("title".to_string(), AttrValue::str(link.title.clone())));
      }
      drop(data);
      out.push(Node::Element(Element::with_attrs(
        "a",
        attributes,
        lower_inline_children(node),
      )));
    },
    NodeValue::Image(link) => {
      let mut attributes =
        vec![("src".to_string(), AttrValue::str(link.url.clone()))];
      let title = link.title.clone();
      drop(data);

      let mut alt = String::new();
      collect_text(node, &mut alt);
      attributes.push(("alt".to_string(), AttrValue::str(alt)));
      if !title.is_empty() {
        attributes.push(("title".to_string(), AttrValue::str(title)));
      }
      out.push(Node::Element(Element::with_attrs(
        "img",
        attributes,
        Vec::new(),
      )));
    },
    // Unknown inline containers degrade to their children
    _ => {
      drop(data);
      for child in node.children() {
        lower_inline(child, out);
      }
    },
  }
}

fn collect_text<'a>(node: &'a AstNode<'a>, out: &mut String) {
  for child in node.children() {
    match &child.data.borrow().value {
      NodeValue::Text(text) => out.push_str(text),
      NodeValue::Code(code) => out.push_str(&code.literal),
      NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
      _ => collect_text(child, out),
    }
  }
}
