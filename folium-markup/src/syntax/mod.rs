//! Trait-based syntax highlighting with pluggable backends.
//!
//! The only backend currently shipped is **Syntect** (Sublime Text syntax
//! definitions, extended by two-face). It emits class-annotated spans plus
//! per-theme stylesheets, so one render serves both the light and the dark
//! color scheme.

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{SyntaxError, SyntaxResult};
pub use types::{SyntaxConfig, SyntaxHighlighter, SyntaxManager};

#[cfg(feature = "syntect")] mod syntect;
#[cfg(feature = "syntect")] pub use syntect::*;

/// Create the default syntax manager based on available features.
///
/// # Errors
///
/// Returns [`SyntaxError::NoBackendAvailable`] when the crate is built
/// without a highlighting backend.
pub fn create_default_manager() -> SyntaxResult<SyntaxManager> {
  #[cfg(feature = "syntect")]
  {
    create_syntect_manager()
  }

  #[cfg(not(feature = "syntect"))]
  {
    Err(SyntaxError::NoBackendAvailable)
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn syntax_config_default_has_aliases() {
    let config = SyntaxConfig::default();
    assert!(config.fallback_to_plain);
    assert_eq!(config.language_aliases["js"], "javascript");
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn syntect_highlights_rust_into_classed_spans() {
    let manager = create_default_manager().expect("manager");
    let html = manager
      .highlight_code("fn main() {}", "rust")
      .expect("highlighted");
    assert!(html.contains("<span"));
    assert!(html.contains("hl-"));
    assert!(html.contains("main"));
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn syntect_resolves_language_aliases() {
    let manager = create_default_manager().expect("manager");
    assert_eq!(manager.resolve_language("js"), "javascript");
    assert!(manager.highlight_code("let x = 1;", "js").is_ok());
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn theme_stylesheet_is_generated_for_known_theme() {
    let manager = create_default_manager().expect("manager");
    let css = manager.theme_stylesheet(None).expect("stylesheet");
    assert!(css.contains(".hl-"));
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn unknown_theme_is_an_error() {
    let manager = create_default_manager().expect("manager");
    assert!(matches!(
      manager.theme_stylesheet(Some("NoSuchTheme")),
      Err(SyntaxError::ThemeNotFound(_))
    ));
  }
}
