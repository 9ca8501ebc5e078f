#![allow(clippy::print_stdout, reason = "Example output goes to stdout")]
use folium_markup::{
  MarkupOptions,
  MarkupProcessor,
  to_editor_syntax,
  to_storage_syntax,
};

fn main() {
  println!("Folium markup pipeline demo");
  println!("===========================\n");

  let storage = r#"# Demo Post

Some intro prose with **bold** text.

## Watch this

{% youtube id="dQw4w9WgXcQ" /%}

## Comparison

{% folium-table
   columns="[\"Feature\",\"Status\"]"
   rows="[[\"tables\",\"yes\"],[\"embeds\",\"yes\"]]"
   columnHeadColors="[\"green-400\",\"green-900\"]"
/%}

```rust
fn main() {
    println!("highlighted");
}
```
"#;

  let processor = MarkupProcessor::new(MarkupOptions::default());
  let result = processor.render(storage);

  println!("Title: {:?}", result.title);
  println!("HTML output length: {} characters", result.html.len());

  println!("\nOutline:");
  for entry in &result.toc {
    println!("  h{} {} -> #{}", entry.level, entry.text, entry.slug);
    for child in &entry.children {
      println!("    h{} {} -> #{}", child.level, child.text, child.slug);
    }
  }

  let editor = to_editor_syntax(storage);
  println!("\nEditor dialect preview:");
  for line in editor.lines().filter(|line| line.starts_with("::")) {
    println!("  {line}");
  }

  let round_trip = to_storage_syntax(&editor);
  println!(
    "\nRound trip exact: {}",
    if round_trip == storage { "yes" } else { "NO" }
  );
}
