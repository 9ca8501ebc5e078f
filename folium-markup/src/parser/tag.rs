//! Tokenizer for the `{% name attr="value" /%}` custom-tag micro-syntax.
//!
//! A hand-written scanner instead of a regex chain: attribute values may
//! contain escaped quotes and backslashes, attributes may appear in any
//! order, and whitespace (including newlines) between attributes is
//! insignificant. Anything the scanner cannot fully consume is rejected so
//! the caller can fall back to treating the text literally.

/// A scanned attribute.
///
/// `raw` is the value text exactly as written between the quotes, escape
/// sequences intact, so layout-only rewrites (the transcoder) can carry it
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedAttr {
  pub name: String,
  pub raw:  String,
}

impl ScannedAttr {
  /// The attribute value with `\"` and `\\` escapes resolved.
  #[must_use]
  pub fn decoded(&self) -> String {
    unescape_value(&self.raw)
  }
}

/// A successfully scanned self-closing custom tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedTag {
  pub name:       String,
  pub attributes: Vec<ScannedAttr>,
  /// Bytes consumed from the input, `{%` through `/%}` inclusive.
  pub len:        usize,
}

/// Scan a self-closing custom tag at the start of `input`.
///
/// Returns `None` on any malformation (missing terminator, unquoted value,
/// stray characters); a tag with zero attributes is valid.
#[must_use]
pub fn scan_tag(input: &str) -> Option<ScannedTag> {
  let mut pos = input.strip_prefix("{%").map(|_| 2)?;
  pos = skip_whitespace(input, pos);

  let name_start = pos;
  pos = scan_name(input, pos, true)?;
  let name = input[name_start..pos].to_string();

  let mut attributes = Vec::new();
  loop {
    let after_ws = skip_whitespace(input, pos);

    if input[after_ws..].starts_with("/%}") {
      return Some(ScannedTag {
        name,
        attributes,
        len: after_ws + 3,
      });
    }

    // An attribute needs at least one whitespace separator before it
    if after_ws == pos {
      return None;
    }
    pos = after_ws;

    let key_start = pos;
    pos = scan_name(input, pos, false)?;
    let key = input[key_start..pos].to_string();

    pos = skip_whitespace(input, pos);
    pos = expect_char(input, pos, '=')?;
    pos = skip_whitespace(input, pos);

    let (raw, value_len) = scan_quoted(&input[pos..])?;
    pos += value_len;

    attributes.push(ScannedAttr {
      name: key,
      raw:  raw.to_string(),
    });
  }
}

/// Scan a double-quoted value at the start of `s`, honoring `\"` and `\\`.
///
/// Returns the inner raw text (escapes intact) and the total length
/// consumed including both quote characters.
pub(crate) fn scan_quoted(s: &str) -> Option<(&str, usize)> {
  let mut chars = s.char_indices();
  match chars.next() {
    Some((_, '"')) => {},
    _ => return None,
  }

  while let Some((idx, ch)) = chars.next() {
    match ch {
      '"' => return Some((&s[1..idx], idx + 1)),
      '\\' => {
        // Escape consumes the following character unconditionally
        chars.next()?;
      },
      _ => {},
    }
  }
  None
}

/// Resolve backslash escapes in a scanned attribute value.
pub(crate) fn unescape_value(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  let mut chars = raw.chars();
  while let Some(ch) = chars.next() {
    if ch == '\\' {
      match chars.next() {
        Some(next) => out.push(next),
        None => out.push('\\'),
      }
    } else {
      out.push(ch);
    }
  }
  out
}

fn skip_whitespace(input: &str, pos: usize) -> usize {
  input[pos..]
    .char_indices()
    .find(|(_, ch)| !ch.is_whitespace())
    .map_or(input.len(), |(idx, _)| pos + idx)
}

fn expect_char(input: &str, pos: usize, expected: char) -> Option<usize> {
  (input[pos..].starts_with(expected)).then(|| pos + expected.len_utf8())
}

/// Scan an identifier. Tag names additionally allow dashes
/// (`folium-table`); attribute keys stay word-like.
fn scan_name(input: &str, pos: usize, allow_dash: bool) -> Option<usize> {
  let mut chars = input[pos..].char_indices();
  match chars.next() {
    Some((_, ch)) if ch.is_ascii_alphabetic() => {},
    _ => return None,
  }
  for (idx, ch) in chars {
    let valid =
      ch.is_ascii_alphanumeric() || ch == '_' || (allow_dash && ch == '-');
    if !valid {
      return Some(pos + idx);
    }
  }
  Some(input.len())
}
