#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  clippy::panic,
  reason = "Fine in tests"
)]
use folium_markup::{MarkupOptions, MarkupProcessor, MarkupResult};

/// Check if HTML output contains all expected substrings.
fn assert_html_contains(html: &str, expected: &[&str]) {
  for &needle in expected {
    assert!(
      html.contains(needle),
      "Expected HTML to contain '{needle}', but it did not.\nFull \
       HTML:\n{html}"
    );
  }
}

fn render_result(source: &str) -> MarkupResult {
  let processor = MarkupProcessor::new(MarkupOptions {
    highlight_code: false,
    ..MarkupOptions::default()
  });
  processor.render(source)
}

fn render_html(source: &str) -> String {
  render_result(source).html
}

#[test]
fn test_standard_markdown_constructs() {
  let html = render_html(
    "## Section\n\nSome **bold** and *italic* text with `inline code` and \
     a [link](https://example.com).\n\n- one\n- two\n",
  );
  assert_html_contains(&html, &[
    "<h2 id=\"section\">",
    "<strong>bold</strong>",
    "<em>italic</em>",
    "<code>inline code</code>",
    "href=\"https://example.com\"",
    "<ul>",
    "<li>one</li>",
  ]);
}

#[test]
fn test_gfm_table_and_strikethrough() {
  let html =
    render_html("|A|B|\n|-|-|\n|1|2|\n\nsome ~~gone~~ text\n");
  assert_html_contains(&html, &[
    "<table>",
    "<th>A</th>",
    "<td>2</td>",
    "<del>gone</del>",
  ]);
}

#[test]
fn test_task_list_booleans_and_void_input() {
  let html = render_html("- [x] done\n- [ ] open\n");
  assert_html_contains(&html, &["task-list-item", "type=\"checkbox\""]);
  assert!(html.contains("checked"));
  // html5ever serializes the bare boolean as an empty-valued attribute
  assert!(!html.contains("</input>"));
}

#[test]
fn test_custom_table_with_light_and_dark_colors() {
  let source = "{% folium-table\n   \
                columns=\"[\\\"Feature\\\",\\\"Status\\\"]\"\n   \
                rows=\"[[\\\"speed\\\",\\\"good\\\"]]\"\n   \
                columnHeadColors=\"[\\\"green-400\\\"]\"\n   \
                columnHeadColorsDark=\"[\\\"green-900\\\"]\"\n/%}\n";
  let html = render_html(source);
  assert_html_contains(&html, &[
    "folium-table-wrapper",
    "has-col-colors",
    "pt-head-col",
    "data-pt-head-idx=\"0\"",
    "--pt-bg:#4ade80",
    "--pt-text:var(--color-foreground)",
    "data-pt-bg-dark=\"#14532d\"",
    "data-pt-text-dark=\"rgba(255,255,255,0.95)\"",
    "<td",
    "data-pt-body-idx=\"0\"",
  ]);
}

#[test]
fn test_dark_shade_light_color_gets_near_white_text() {
  let source = "{% folium-table\n   columns=\"[\\\"A\\\"]\"\n   \
                columnHeadColors=\"[\\\"green-900\\\"]\"\n/%}\n";
  let html = render_html(source);
  assert_html_contains(&html, &[
    "--pt-bg:#14532d",
    "--pt-text:rgba(255,255,255,0.95)",
  ]);
}

#[test]
fn test_uncolored_table_has_no_color_attributes() {
  let source = "{% folium-table\n   columns=\"[\\\"A\\\"]\"\n   \
                rows=\"[[\\\"1\\\"]]\"\n/%}\n";
  let html = render_html(source);
  assert!(!html.contains("has-col-colors"));
  assert!(!html.contains("pt-head-col"));
  assert!(!html.contains("--pt-bg"));
  assert!(!html.contains("data-pt-bg-dark"));
  assert_html_contains(&html, &["data-pt-head-idx=\"0\""]);
}

#[test]
fn test_ragged_rows_render_without_error() {
  let source = "{% folium-table\n   \
                columns=\"[\\\"A\\\",\\\"B\\\",\\\"C\\\"]\"\n   \
                rows=\"[[\\\"only\\\"]]\"\n/%}\n";
  let html = render_html(source);
  assert_eq!(html.matches("<th").count(), 3);
  assert_eq!(html.matches("<td").count(), 1);
}

#[test]
fn test_empty_cell_renders_em_dash() {
  let source = "{% folium-table\n   columns=\"[\\\"A\\\"]\"\n   \
                rows=\"[[\\\"\\\"]]\"\n/%}\n";
  let html = render_html(source);
  assert_html_contains(&html, &["—"]);
}

#[test]
fn test_long_cell_text_wraps_normally() {
  let source = "{% folium-table\n   \
                columns=\"[\\\"short\\\",\\\"a much longer heading \
                cell\\\"]\"\n/%}\n";
  let html = render_html(source);
  // 5 chars gets the nowrap hint, 25 chars does not
  assert_html_contains(&html, &["ft-nowrap"]);
  assert_eq!(html.matches("ft-nowrap").count(), 1);
}

#[test]
fn test_malformed_color_attribute_fails_soft() {
  let source = "{% folium-table\n   columns=\"[\\\"A\\\"]\"\n   \
                columnHeadColors=\"oops not json\"\n/%}\n";
  let html = render_html(source);
  assert_html_contains(&html, &["<th", "data-pt-head-idx=\"0\""]);
  assert!(!html.contains("has-col-colors"));
}

#[test]
fn test_embed_rendering() {
  let html = render_html("{% youtube id=\"dQw4w9WgXcQ\" /%}\n");
  assert_html_contains(&html, &[
    "youtube-embed-wrapper",
    "src=\"https://www.youtube.com/embed/dQw4w9WgXcQ\"",
    "title=\"YouTube video\"",
    "allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; \
     gyroscope; picture-in-picture\"",
    "allowfullscreen",
    "class=\"youtube-embed\"",
  ]);
}

#[test]
fn test_embed_id_is_escaped() {
  let html = render_html("{% youtube id=\"a\\\"b\" /%}\n");
  assert!(!html.contains("embed/a\"b"));
  assert_html_contains(&html, &["embed/a&quot;b"]);
}

#[test]
fn test_embed_missing_id_renders_placeholder_only() {
  let html = render_html("before\n\n{% youtube /%}\n\nafter\n");
  assert_html_contains(&html, &[
    "<p>before</p>",
    "tag-placeholder",
    "data-tag=\"youtube\"",
    "<p>after</p>",
  ]);
  assert!(!html.contains("<iframe"));
}

#[test]
fn test_unterminated_tag_degrades_to_literal_text() {
  let html = render_html("{% youtube id=\"x\"\n\nnext paragraph\n");
  assert_html_contains(&html, &["{% youtube id=", "next paragraph"]);
  assert!(!html.contains("<iframe"));
}

#[test]
fn test_raw_html_is_neutralized() {
  let html = render_html("hello\n\n<script>alert('x')</script>\n");
  assert!(!html.contains("<script>"));
  assert_html_contains(&html, &["&lt;script&gt;"]);
}

#[test]
fn test_code_fence_without_highlighting_stays_escaped() {
  let html = render_html("```rust\nlet x: Vec<u8> = vec![];\n```\n");
  assert_html_contains(&html, &[
    "<pre><code class=\"language-rust\">",
    "Vec&lt;u8&gt;",
  ]);
}

#[test]
fn test_headings_are_slugged_and_self_linked() {
  let html = render_html("## First Part\n\n### Sub Part\n");
  assert_html_contains(&html, &[
    "<h2 id=\"first-part\"><a href=\"#first-part\">First Part</a></h2>",
    "<h3 id=\"sub-part\"><a href=\"#sub-part\">Sub Part</a></h3>",
  ]);
}

#[test]
fn test_duplicate_headings_get_unique_slugs() {
  let html = render_html("## Notes\n\n## Notes\n");
  assert_html_contains(&html, &["id=\"notes\"", "id=\"notes-1\""]);
}

#[test]
fn test_postprocess_is_idempotent_on_rendered_output() {
  let html = render_html("## Stable Section\n");
  let again = folium_markup::postprocess(&html, None);
  assert_eq!(html, again);
}

#[test]
fn test_toc_comes_from_final_html() {
  let result = render_result(
    "# Title\n\n## Alpha\n\n### Alpha One\n\n## Beta\n\ntext\n",
  );
  assert_eq!(result.title.as_deref(), Some("Title"));
  assert_eq!(result.toc.len(), 2);
  assert_eq!(result.toc[0].text, "Alpha");
  assert_eq!(result.toc[0].children.len(), 1);
  assert_eq!(result.toc[0].children[0].text, "Alpha One");
  assert_eq!(result.toc[0].children[0].slug, "alpha-one");
  assert_eq!(result.toc[1].text, "Beta");
  assert!(result.toc[1].children.is_empty());
  // The h1 title never enters the outline
  assert!(!result.toc.iter().any(|entry| entry.text == "Title"));
}

#[test]
fn test_full_document_mixing_everything() {
  let source = "# Post\n\nintro text\n\n{% youtube id=\"abc\" /%}\n\n## \
                Data\n\n{% folium-table\n   columns=\"[\\\"K\\\"]\"\n   \
                rows=\"[[\\\"v\\\"]]\"\n/%}\n\n```js\nconsole.log(1)\n```\n";
  let result = render_result(source);
  assert_eq!(result.title.as_deref(), Some("Post"));
  assert_html_contains(&result.html, &[
    "youtube-embed-wrapper",
    "folium-table-wrapper",
    "<h2 id=\"data\">",
    "language-js",
  ]);
  assert_eq!(result.toc.len(), 1);
}

#[cfg(feature = "syntect")]
#[test]
fn test_code_fence_is_highlighted_when_enabled() {
  let processor = MarkupProcessor::new(MarkupOptions::default());
  let result = processor.render("```rust\nfn main() {}\n```\n");
  assert_html_contains(&result.html, &["class=\"highlight\"", "<span"]);
}

#[cfg(feature = "syntect")]
#[test]
fn test_unknown_language_block_still_renders() {
  let processor = MarkupProcessor::new(MarkupOptions::default());
  let result =
    processor.render("```definitelynotalanguage\nsome <content>\n```\n");
  assert_html_contains(&result.html, &[
    "language-definitelynotalanguage",
    "&lt;content&gt;",
  ]);
}
