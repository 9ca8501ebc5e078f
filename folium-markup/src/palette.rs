//! Fixed named-color palette used by table column/row coloring.
//!
//! Names follow the `family-shade` convention (`red-400`, `green-900`).
//! Shades 50-400 count as light backgrounds and keep the page's foreground
//! text color; 500-950 count as dark and get near-white text. Downstream
//! stylesheets rely on this exact threshold, so it is not configurable.

use std::{collections::HashMap, sync::LazyLock};

/// Text color used on light backgrounds.
const TEXT_ON_LIGHT: &str = "var(--color-foreground)";
/// Text color used on dark backgrounds.
const TEXT_ON_DARK: &str = "rgba(255,255,255,0.95)";

static PALETTE: LazyLock<HashMap<&'static str, &'static str>> =
  LazyLock::new(|| {
    HashMap::from([
      ("red", "#ef4444"),
      ("red-50", "#fef2f2"),
      ("red-100", "#fee2e2"),
      ("red-200", "#fecaca"),
      ("red-300", "#fca5a5"),
      ("red-400", "#f87171"),
      ("red-500", "#ef4444"),
      ("red-600", "#dc2626"),
      ("red-700", "#b91c1c"),
      ("red-800", "#991b1b"),
      ("red-900", "#7f1d1d"),
      ("red-950", "#450a0a"),
      ("green", "#22c55e"),
      ("green-50", "#f0fdf4"),
      ("green-100", "#dcfce7"),
      ("green-200", "#bbf7d0"),
      ("green-300", "#86efac"),
      ("green-400", "#4ade80"),
      ("green-500", "#22c55e"),
      ("green-600", "#16a34a"),
      ("green-700", "#15803d"),
      ("green-800", "#166534"),
      ("green-900", "#14532d"),
      ("green-950", "#052e16"),
    ])
  });

/// Resolve a palette name to its hex value.
///
/// Unknown names pass through trimmed and lowercased, so authors can use
/// raw CSS colors in the same attribute slot.
#[must_use]
pub fn color_to_hex(name: &str) -> String {
  let normalized = name.trim().to_lowercase();
  PALETTE
    .get(normalized.as_str())
    .map_or(normalized, |hex| (*hex).to_string())
}

/// Classify a palette name as a light background.
///
/// Names without a numeric shade suffix are treated as light.
#[must_use]
pub fn is_light_background(name: &str) -> bool {
  let Some((_, suffix)) = name.rsplit_once('-') else {
    return true;
  };
  suffix
    .parse::<u32>()
    .map_or(true, |shade| matches!(shade, 50 | 100 | 200 | 300 | 400))
}

/// Pick the contrast text color for a background name.
#[must_use]
pub fn contrast_text(name: &str) -> &'static str {
  if is_light_background(name) {
    TEXT_ON_LIGHT
  } else {
    TEXT_ON_DARK
  }
}

/// A fully resolved cell color, computed once at transform time.
///
/// Light-mode values go into inline CSS custom properties; dark-mode values
/// ride along as data attributes so a stylesheet can apply them on theme
/// switch without re-rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedColor {
  pub bg_light:   Option<String>,
  pub bg_dark:    Option<String>,
  pub text_light: Option<String>,
  pub text_dark:  Option<String>,
}

impl ResolvedColor {
  /// Resolve a (light, dark) pair of palette names.
  ///
  /// With no dark name, the dark text color falls back to the light
  /// name's contrast color so dark mode stays readable on the light
  /// background.
  #[must_use]
  pub fn resolve(light: Option<&str>, dark: Option<&str>) -> Self {
    Self {
      bg_light:   light.map(color_to_hex),
      bg_dark:    dark.map(color_to_hex),
      text_light: light.map(|name| contrast_text(name).to_string()),
      text_dark:  dark
        .map(|name| contrast_text(name).to_string())
        .or_else(|| light.map(|name| contrast_text(name).to_string())),
    }
  }

  /// Whether this cell carries any color at all.
  #[must_use]
  pub const fn is_styled(&self) -> bool {
    self.bg_light.is_some() || self.bg_dark.is_some()
  }
}
