#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  clippy::panic,
  reason = "Fine in tests"
)]
use folium_markup::{MarkupOptions, MarkupProcessor, extract_toc};

#[test]
fn test_h2_and_h3_build_nested_tree() {
  let html = r##"
    <div>
      <h2 id="section-1">Section 1</h2>
      <p>Some text</p>
      <h3 id="subsection-1-1"><a href="#subsection-1-1">Subsection 1.1</a></h3>
      <h2 id="section-2">Section 2</h2>
    </div>
  "##;

  let toc = extract_toc(html);

  assert_eq!(toc.len(), 2);

  assert_eq!(toc[0].level, 2);
  assert_eq!(toc[0].text, "Section 1");
  assert_eq!(toc[0].slug, "section-1");
  assert_eq!(toc[0].children.len(), 1);

  assert_eq!(toc[0].children[0].level, 3);
  assert_eq!(toc[0].children[0].text, "Subsection 1.1");
  assert_eq!(toc[0].children[0].slug, "subsection-1-1");

  assert_eq!(toc[1].level, 2);
  assert_eq!(toc[1].text, "Section 2");
  assert_eq!(toc[1].slug, "section-2");
  assert!(toc[1].children.is_empty());
}

#[test]
fn test_orphan_h3_becomes_root_level_entry() {
  let html = r#"
    <h3 id="orphan-h3">Orphan H3</h3>
    <h2 id="valid-h2">Valid H2</h2>
  "#;

  let toc = extract_toc(html);

  // With no enclosing h2, both land at root level
  assert_eq!(toc.len(), 2);
  assert_eq!(toc[0].text, "Orphan H3");
  assert_eq!(toc[0].level, 3);
  assert_eq!(toc[1].text, "Valid H2");
  assert_eq!(toc[1].level, 2);
}

#[test]
fn test_headings_without_id_are_skipped() {
  let html = r#"
    <h2>Missing ID but valid HTML</h2>
    <h2 id="has-id">Has ID</h2>
    <h1 id="ignored-h1">H1s are ignored</h1>
  "#;

  let toc = extract_toc(html);

  assert_eq!(toc.len(), 1);
  assert_eq!(toc[0].text, "Has ID");
}

#[test]
fn test_deep_hierarchy_resets_at_each_h2() {
  let html = r#"<h2 id="a">A</h2><h3 id="a1">A1</h3><h3 id="a2">A2</h3><h2 id="b">B</h2><h3 id="b1">B1</h3>"#;
  let toc = extract_toc(html);
  assert_eq!(toc.len(), 2);
  assert_eq!(toc[0].children.len(), 2);
  assert_eq!(toc[1].children.len(), 1);
  assert_eq!(toc[1].children[0].text, "B1");
}

#[test]
fn test_outline_of_rendered_document() {
  let processor = MarkupProcessor::new(MarkupOptions {
    highlight_code: false,
    ..MarkupOptions::default()
  });
  let result = processor.render(
    "### Floating Sub\n\n## Main One\n\n### Nested\n\n## Main Two\n",
  );

  // The h3 with no preceding h2 surfaces at root level, by policy
  assert_eq!(result.toc.len(), 3);
  assert_eq!(result.toc[0].level, 3);
  assert_eq!(result.toc[0].text, "Floating Sub");
  assert_eq!(result.toc[1].text, "Main One");
  assert_eq!(result.toc[1].children.len(), 1);
  assert_eq!(result.toc[2].text, "Main Two");
}

#[test]
fn test_toc_entries_serialize_for_navigation() {
  let toc = extract_toc(r#"<h2 id="x">X</h2>"#);
  let json = serde_json::to_string(&toc).expect("serializable");
  assert!(json.contains("\"slug\":\"x\""));
  assert!(json.contains("\"children\":[]"));
}
