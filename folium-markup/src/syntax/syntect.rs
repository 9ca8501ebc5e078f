//! Syntect-based syntax highlighting backend enhanced with two-face.
//!
//! Highlighting is split in two: [`SyntectHighlighter::highlight`] emits
//! spans whose classes carry the scope (`hl-keyword`, `hl-string`, ...),
//! and [`SyntectHighlighter::theme_stylesheet`] turns a syntect theme into
//! the CSS that colors those classes. A page links one stylesheet per color
//! scheme (the dark one scoped under its theme selector), so switching
//! themes never re-renders a code block.

use std::sync::OnceLock;

use syntect::{
  highlighting::{Theme, ThemeSet},
  html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style},
  parsing::SyntaxSet,
  util::LinesWithEndings,
};
use two_face::theme::{EmbeddedLazyThemeSet, EmbeddedThemeName};

use super::{
  error::{SyntaxError, SyntaxResult},
  types::{SyntaxConfig, SyntaxHighlighter, SyntaxManager},
};

/// Class prefix on every emitted span, kept short to limit payload size.
const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Syntect-based syntax highlighter.
#[derive(Default)]
pub struct SyntectHighlighter;

impl SyntectHighlighter {
  /// Get the syntect `SyntaxSet`, loading it on first use.
  fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(two_face::syntax::extra_newlines)
  }

  /// Get the two-face `ThemeSet` with extended themes.
  fn theme_set() -> &'static EmbeddedLazyThemeSet {
    static THEME_SET: OnceLock<EmbeddedLazyThemeSet> = OnceLock::new();
    THEME_SET.get_or_init(two_face::theme::extra)
  }

  /// Get the default syntect `ThemeSet` for fallback themes.
  fn default_theme_set() -> &'static ThemeSet {
    static DEFAULT_THEME_SET: OnceLock<ThemeSet> = OnceLock::new();
    DEFAULT_THEME_SET.get_or_init(ThemeSet::load_defaults)
  }

  /// Look up a theme by name across both theme sets.
  fn get_theme(name: &str) -> Option<&'static Theme> {
    if let Some(theme) = Self::default_theme_set().themes.get(name) {
      return Some(theme);
    }

    let embedded = match name {
      "Dracula" => Some(EmbeddedThemeName::Dracula),
      "Github" => Some(EmbeddedThemeName::Github),
      "GruvboxDark" => Some(EmbeddedThemeName::GruvboxDark),
      "GruvboxLight" => Some(EmbeddedThemeName::GruvboxLight),
      "InspiredGithub" => Some(EmbeddedThemeName::InspiredGithub),
      "Nord" => Some(EmbeddedThemeName::Nord),
      "OneHalfDark" => Some(EmbeddedThemeName::OneHalfDark),
      "OneHalfLight" => Some(EmbeddedThemeName::OneHalfLight),
      "SolarizedDark" => Some(EmbeddedThemeName::SolarizedDark),
      "SolarizedLight" => Some(EmbeddedThemeName::SolarizedLight),
      "VisualStudioDarkPlus" => Some(EmbeddedThemeName::VisualStudioDarkPlus),
      "Zenburn" => Some(EmbeddedThemeName::Zenburn),
      _ => None,
    };
    embedded.map(|name| Self::theme_set().get(name))
  }
}

impl SyntaxHighlighter for SyntectHighlighter {
  fn name(&self) -> &'static str {
    "Syntect"
  }

  fn supported_languages(&self) -> Vec<String> {
    Self::syntax_set()
      .syntaxes()
      .iter()
      .flat_map(|syntax| {
        std::iter::once(syntax.name.to_lowercase())
          .chain(syntax.file_extensions.iter().map(|ext| ext.to_lowercase()))
      })
      .collect()
  }

  fn available_themes(&self) -> Vec<String> {
    let mut themes: Vec<String> =
      Self::default_theme_set().themes.keys().cloned().collect();
    themes.extend(
      [
        "Dracula",
        "Github",
        "GruvboxDark",
        "GruvboxLight",
        "InspiredGithub",
        "Nord",
        "OneHalfDark",
        "OneHalfLight",
        "SolarizedDark",
        "SolarizedLight",
        "VisualStudioDarkPlus",
        "Zenburn",
      ]
      .map(String::from),
    );
    themes.sort();
    themes.dedup();
    themes
  }

  fn highlight(&self, code: &str, language: &str) -> SyntaxResult<String> {
    let syntax_set = Self::syntax_set();
    let syntax = syntax_set
      .find_syntax_by_token(language)
      .ok_or_else(|| SyntaxError::UnsupportedLanguage(language.to_string()))?;

    let mut generator =
      ClassedHTMLGenerator::new_with_class_style(syntax, syntax_set, CLASS_STYLE);
    for line in LinesWithEndings::from(code) {
      generator
        .parse_html_for_line_which_includes_newline(line)
        .map_err(|err| SyntaxError::HighlightingFailed(err.to_string()))?;
    }
    Ok(generator.finalize())
  }

  fn theme_stylesheet(&self, theme: &str) -> SyntaxResult<String> {
    let theme = Self::get_theme(theme)
      .ok_or_else(|| SyntaxError::ThemeNotFound(theme.to_string()))?;
    css_for_theme_with_class_style(theme, CLASS_STYLE)
      .map_err(|err| SyntaxError::HighlightingFailed(err.to_string()))
  }
}

/// Create a Syntect-based syntax manager with the default configuration.
///
/// # Errors
///
/// Infallible for this backend; kept fallible to match the manager
/// construction contract.
pub fn create_syntect_manager() -> SyntaxResult<SyntaxManager> {
  let highlighter = Box::new(SyntectHighlighter);
  let mut config = SyntaxConfig::default();
  config.default_theme = Some("InspiredGitHub".to_string());
  // An unknown language must surface as an error so the caller keeps the
  // escaped fallback block, rather than re-wrapping it as plain text
  config.fallback_to_plain = false;
  Ok(SyntaxManager::new(highlighter, config))
}
