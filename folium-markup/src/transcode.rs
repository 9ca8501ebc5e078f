//! Bidirectional transcoding between the storage and editor dialects.
//!
//! Storage keeps custom tags in `{% name attr="value" /%}` form (table
//! attributes one per line); the editor wants single-line directives like
//! `::name[]{attr="value"}`. Both converters are layout-only: quoted
//! attribute text travels verbatim, escape sequences included, so a
//! round trip reproduces the input byte for byte. Anything that does not
//! scan cleanly is passed through untouched.

use crate::parser::tag::{scan_quoted, scan_tag};

/// Convert storage-format text to editor-format text.
#[must_use]
pub fn to_editor_syntax(storage: &str) -> String {
  let mut out = String::with_capacity(storage.len());
  let mut rest = storage;

  while !rest.is_empty() {
    if rest.starts_with("{%") {
      if let Some((converted, consumed)) = storage_tag_to_directive(rest) {
        out.push_str(&converted);
        rest = &rest[consumed..];
        continue;
      }
    }
    push_one_char(&mut out, &mut rest);
  }
  out
}

/// Convert editor-format text back to storage-format text.
#[must_use]
pub fn to_storage_syntax(editor: &str) -> String {
  let mut out = String::with_capacity(editor.len());
  let mut rest = editor;

  while !rest.is_empty() {
    if rest.starts_with("::") {
      if let Some((converted, consumed)) = directive_to_storage_tag(rest) {
        out.push_str(&converted);
        rest = &rest[consumed..];
        continue;
      }
    }
    push_one_char(&mut out, &mut rest);
  }
  out
}

fn push_one_char(out: &mut String, rest: &mut &str) {
  if let Some(ch) = rest.chars().next() {
    out.push(ch);
    *rest = &rest[ch.len_utf8()..];
  }
}

/// Convert one `{% ... /%}` tag at the start of `input` to directive form.
fn storage_tag_to_directive(input: &str) -> Option<(String, usize)> {
  let tag = scan_tag(input)?;

  match tag.name.as_str() {
    // The embed collapses only in its canonical single-attribute form;
    // anything else stays as the author wrote it.
    "youtube" => {
      let [id] = tag.attributes.as_slice() else {
        return None;
      };
      if id.name != "id" {
        return None;
      }
      Some((format!("::youtube[]{{id=\"{}\"}}", id.raw), tag.len))
    },
    "folium-table" => {
      let pairs: Vec<String> = tag
        .attributes
        .iter()
        .map(|attr| format!("{}=\"{}\"", attr.name, attr.raw))
        .collect();
      Some((format!("::folium-table[]{{{}}}", pairs.join(" ")), tag.len))
    },
    _ => None,
  }
}

/// Convert one `::name[]{...}` directive at the start of `input` to tag
/// form.
fn directive_to_storage_tag(input: &str) -> Option<(String, usize)> {
  if let Some(rest) = input.strip_prefix("::youtube[]{") {
    let (value, value_len) = scan_directive_value(rest.strip_prefix("id=")?)?;
    let rest_after = &rest["id=".len() + value_len..];
    rest_after.strip_prefix('}')?;
    let consumed = "::youtube[]{id=".len() + value_len + 1;
    return Some((format!("{{% youtube id=\"{value}\" /%}}"), consumed));
  }

  if let Some(rest) = input.strip_prefix("::folium-table[]{") {
    let (attrs, attrs_len) = scan_directive_attrs(rest)?;
    let lines: Vec<String> = attrs
      .iter()
      .map(|(name, value)| format!("   {name}=\"{value}\""))
      .collect();
    let consumed = "::folium-table[]{".len() + attrs_len;
    return Some((
      format!("{{% folium-table\n{}\n/%}}", lines.join("\n")),
      consumed,
    ));
  }

  None
}

/// Scan a directive attribute value: either quoted (raw text kept) or a
/// bare token, which is normalized to quoted form on output.
fn scan_directive_value(s: &str) -> Option<(String, usize)> {
  if s.starts_with('"') {
    let (raw, len) = scan_quoted(s)?;
    return Some((raw.to_string(), len));
  }

  let end = s
    .find(|ch: char| ch.is_whitespace() || ch == '"' || ch == '}')
    .unwrap_or(s.len());
  if end == 0 {
    return None;
  }
  Some((s[..end].to_string(), end))
}

/// Scan a directive's brace-group attribute list up to and including the
/// closing brace. Returns (name, raw value) pairs in source order.
fn scan_directive_attrs(s: &str) -> Option<(Vec<(String, String)>, usize)> {
  let mut attrs = Vec::new();
  let mut pos = 0;

  loop {
    while s[pos..].starts_with(' ') {
      pos += 1;
    }
    if s[pos..].starts_with('}') {
      return Some((attrs, pos + 1));
    }

    let key_len = s[pos..]
      .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
      .unwrap_or(s.len() - pos);
    if key_len == 0 {
      return None;
    }
    let key = s[pos..pos + key_len].to_string();
    pos += key_len;

    if !s[pos..].starts_with('=') {
      return None;
    }
    pos += 1;

    let (value, value_len) = scan_directive_value(&s[pos..])?;
    pos += value_len;

    attrs.push((key, value));
  }
}
