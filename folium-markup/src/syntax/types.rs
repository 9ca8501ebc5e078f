//! Core types and traits for syntax highlighting.

use std::collections::HashMap;

use super::error::{SyntaxError, SyntaxResult};

/// Trait for syntax highlighting backends.
///
/// Backends emit class-annotated `<span>` runs rather than inline colors:
/// the page themes them through stylesheets built from
/// [`theme_stylesheet`](Self::theme_stylesheet), which is what allows a
/// light and a dark stylesheet to coexist and be switched without touching
/// the rendered HTML.
pub trait SyntaxHighlighter: Send + Sync {
  /// Name of this highlighter backend.
  fn name(&self) -> &'static str;

  /// Languages this backend can highlight (names and file extensions).
  fn supported_languages(&self) -> Vec<String>;

  /// Theme names usable with [`theme_stylesheet`](Self::theme_stylesheet).
  fn available_themes(&self) -> Vec<String>;

  /// Check if a language is supported.
  fn supports_language(&self, language: &str) -> bool {
    self
      .supported_languages()
      .iter()
      .any(|lang| lang.eq_ignore_ascii_case(language))
  }

  /// Highlight code into theme-independent class-annotated HTML.
  ///
  /// # Errors
  ///
  /// Fails when the language is unknown or the grammar rejects the input.
  fn highlight(&self, code: &str, language: &str) -> SyntaxResult<String>;

  /// Build the stylesheet that colors the emitted classes for `theme`.
  ///
  /// # Errors
  ///
  /// Fails when the theme is unknown or the stylesheet cannot be built.
  fn theme_stylesheet(&self, theme: &str) -> SyntaxResult<String>;
}

/// Configuration for syntax highlighting.
#[derive(Debug, Clone)]
pub struct SyntaxConfig {
  /// Theme used when the caller does not name one.
  pub default_theme: Option<String>,

  /// Language aliases for mapping common names to supported languages.
  pub language_aliases: HashMap<String, String>,

  /// Whether to fall back to plain text for unsupported languages.
  pub fallback_to_plain: bool,
}

impl Default for SyntaxConfig {
  fn default() -> Self {
    let mut language_aliases = HashMap::new();

    // Common aliases
    language_aliases.insert("js".to_string(), "javascript".to_string());
    language_aliases.insert("ts".to_string(), "typescript".to_string());
    language_aliases.insert("py".to_string(), "python".to_string());
    language_aliases.insert("rb".to_string(), "ruby".to_string());
    language_aliases.insert("sh".to_string(), "bash".to_string());
    language_aliases.insert("shell".to_string(), "bash".to_string());
    language_aliases.insert("yml".to_string(), "yaml".to_string());
    language_aliases.insert("md".to_string(), "markdown".to_string());

    Self {
      default_theme: None,
      language_aliases,
      fallback_to_plain: true,
    }
  }
}

/// High-level syntax highlighting manager.
///
/// Wraps a backend with language-alias resolution and plain-text fallback.
pub struct SyntaxManager {
  highlighter: Box<dyn SyntaxHighlighter>,
  config:      SyntaxConfig,
}

impl SyntaxManager {
  /// Create a new syntax manager with the given highlighter and config.
  #[must_use]
  pub fn new(
    highlighter: Box<dyn SyntaxHighlighter>,
    config: SyntaxConfig,
  ) -> Self {
    Self {
      highlighter,
      config,
    }
  }

  /// Get the underlying highlighter.
  #[must_use]
  pub fn highlighter(&self) -> &dyn SyntaxHighlighter {
    self.highlighter.as_ref()
  }

  /// Get the configuration.
  #[must_use]
  pub const fn config(&self) -> &SyntaxConfig {
    &self.config
  }

  /// Resolve a language name using aliases.
  #[must_use]
  pub fn resolve_language(&self, language: &str) -> String {
    self
      .config
      .language_aliases
      .get(language)
      .cloned()
      .unwrap_or_else(|| language.to_string())
  }

  /// Highlight code with automatic language resolution and fallback.
  ///
  /// # Errors
  ///
  /// Fails when the language is unsupported and plain-text fallback is
  /// disabled or unavailable.
  pub fn highlight_code(
    &self,
    code: &str,
    language: &str,
  ) -> SyntaxResult<String> {
    let resolved_language = self.resolve_language(language);

    if self.highlighter.supports_language(&resolved_language) {
      return self.highlighter.highlight(code, &resolved_language);
    }

    if self.config.fallback_to_plain {
      if self.highlighter.supports_language("text") {
        return self.highlighter.highlight(code, "text");
      }
      if self.highlighter.supports_language("plain") {
        return self.highlighter.highlight(code, "plain");
      }
    }

    Err(SyntaxError::UnsupportedLanguage(resolved_language))
  }

  /// Build a stylesheet for `theme`, falling back to the configured
  /// default theme.
  ///
  /// # Errors
  ///
  /// Fails when the requested theme does not exist.
  pub fn theme_stylesheet(&self, theme: Option<&str>) -> SyntaxResult<String> {
    let name = theme
      .or(self.config.default_theme.as_deref())
      .unwrap_or("InspiredGitHub");
    self.highlighter.theme_stylesheet(name)
  }
}
