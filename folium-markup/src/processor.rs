//! High-level document processor tying the pipeline stages together.

use log::error;

use crate::{
  node::Node,
  parser, postprocess, render,
  syntax::{SyntaxManager, create_default_manager},
  toc,
  transform::{self, TagRegistry},
  types::MarkupResult,
};

/// Options for configuring the markup processor.
#[derive(Debug, Clone)]
pub struct MarkupOptions {
  /// Enable GitHub Flavored Markdown extensions (tables, strikethrough,
  /// task lists, autolinks).
  pub gfm: bool,

  /// Enable syntax highlighting for code blocks.
  pub highlight_code: bool,

  /// Optional: theme name used when generating highlight stylesheets.
  pub highlight_theme: Option<String>,
}

impl Default for MarkupOptions {
  fn default() -> Self {
    Self {
      gfm:             true,
      highlight_code:  cfg!(feature = "syntect"),
      highlight_theme: None,
    }
  }
}

/// Main markup processor.
///
/// Holds the custom-tag registry and the (lazily initialized) syntax
/// highlighting backend. Rendering is a pure function of the input string;
/// a processor can be shared across documents.
pub struct MarkupProcessor {
  options:        MarkupOptions,
  registry:       TagRegistry,
  syntax_manager: Option<SyntaxManager>,
}

impl MarkupProcessor {
  /// Create a processor with the default tag registry.
  #[must_use]
  pub fn new(options: MarkupOptions) -> Self {
    let syntax_manager = if options.highlight_code {
      create_default_manager().ok()
    } else {
      None
    };

    Self {
      options,
      registry: TagRegistry::default(),
      syntax_manager,
    }
  }

  /// Replace the custom-tag registry.
  #[must_use]
  pub fn with_registry(mut self, registry: TagRegistry) -> Self {
    self.registry = registry;
    self
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &MarkupOptions {
    &self.options
  }

  /// Access the custom-tag registry.
  #[must_use]
  pub const fn registry(&self) -> &TagRegistry {
    &self.registry
  }

  /// Render storage-format source to final HTML with outline and title.
  ///
  /// Pipeline order: parse, transform, serialize, post-process (highlight,
  /// slugs, self-links), then extract the outline from the final HTML.
  #[must_use]
  pub fn render(&self, source: &str) -> MarkupResult {
    let tree = parser::parse(source, &self.registry, self.options.gfm);
    let title = first_h1_text(&tree);

    let transformed = transform::transform(tree, &self.registry);
    let html = render::render(&transformed);
    let html = postprocess::postprocess(&html, self.syntax_manager.as_ref());
    let toc = toc::extract_toc(&html);

    MarkupResult {
      html,
      toc,
      title,
    }
  }

  /// Stylesheet for the configured highlight theme, if a backend is
  /// available.
  #[must_use]
  pub fn theme_stylesheet(&self) -> Option<String> {
    self.syntax_manager.as_ref().and_then(|manager| {
      manager
        .theme_stylesheet(self.options.highlight_theme.as_deref())
        .ok()
    })
  }
}

/// First h1 text in the parsed tree, used as the document title.
fn first_h1_text(node: &Node) -> Option<String> {
  match node {
    Node::Fragment(children) => {
      children.iter().find_map(first_h1_text)
    },
    Node::Element(element) if element.tag_name == "h1" => {
      let text: String =
        element.children.iter().map(Node::text_content).collect();
      let trimmed = text.trim();
      (!trimmed.is_empty()).then(|| trimmed.to_string())
    },
    _ => None,
  }
}

/// Process content with panic recovery.
///
/// Falls back to a minimal error document instead of unwinding into the
/// caller; user-visible failure stays at "this page didn't render", never
/// a crash.
#[must_use]
pub fn process_with_recovery(
  processor: &MarkupProcessor,
  content: &str,
) -> MarkupResult {
  match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    processor.render(content)
  })) {
    Ok(result) => result,
    Err(panic_err) => {
      error!("Panic during markup processing: {panic_err:?}");
      MarkupResult {
        html: "<div class=\"error\">Critical error processing document \
               content</div>"
          .to_string(),

        toc:   Vec::new(),
        title: None,
      }
    },
  }
}

/// Safely apply a text-processing function with a fallback.
///
/// Catches panics from `processor_fn`; on failure returns `fallback`, or
/// the input itself when the fallback is empty.
pub fn process_safe<F>(content: &str, processor_fn: F, fallback: &str) -> String
where
  F: FnOnce(&str) -> String,
{
  if content.is_empty() {
    return String::new();
  }

  let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    processor_fn(content)
  }));

  match result {
    Ok(processed) => processed,
    Err(e) => {
      if let Some(message) = e.downcast_ref::<String>() {
        error!("Error processing markup: {message}");
      } else if let Some(message) = e.downcast_ref::<&str>() {
        error!("Error processing markup: {message}");
      } else {
        error!("Unknown error occurred while processing markup");
      }

      if fallback.is_empty() {
        content.to_string()
      } else {
        fallback.to_string()
      }
    },
  }
}
