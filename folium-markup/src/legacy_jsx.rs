//! Transcoding for the legacy JSX component dialect.
//!
//! Early documents stored custom elements as JSX components
//! (`<YouTube id="x" />`, `<FoliumTable columns={'...'} />`) rather than
//! storage tags. This module converts between that dialect and the editor
//! directive form so old content can still be opened and saved.
//!
//! The escape pairing is intentionally narrow and mirrors what the legacy
//! documents actually contain: JSX expression values escape single quotes
//! as `\'`; directive values escape double quotes as `\"`. Nothing else is
//! rewritten.

/// Convert legacy JSX component text to editor-format text.
#[must_use]
pub fn jsx_to_directive(content: &str) -> String {
  let mut out = String::with_capacity(content.len());
  let mut rest = content;

  while !rest.is_empty() {
    if rest.starts_with('<') {
      if let Some((converted, consumed)) = jsx_component_to_directive(rest) {
        out.push_str(&converted);
        rest = &rest[consumed..];
        continue;
      }
    }
    push_one_char(&mut out, &mut rest);
  }
  out
}

/// Convert editor-format text back to legacy JSX component text.
#[must_use]
pub fn directive_to_jsx(content: &str) -> String {
  let mut out = String::with_capacity(content.len());
  let mut rest = content;

  while !rest.is_empty() {
    if rest.starts_with("::") {
      if let Some((converted, consumed)) = directive_to_jsx_component(rest) {
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

fn jsx_component_to_directive(input: &str) -> Option<(String, usize)> {
  if let Some(rest) = input.strip_prefix("<YouTube") {
    let mut pos = skip_whitespace(rest, 0);
    if pos == 0 {
      return None;
    }
    pos = expect_str(rest, pos, "id")?;
    pos = skip_whitespace(rest, pos);
    pos = expect_str(rest, pos, "=")?;
    pos = skip_whitespace(rest, pos);
    let (id, id_len) = scan_double_quoted_plain(&rest[pos..])?;
    pos += id_len;
    pos = skip_whitespace(rest, pos);
    pos = expect_str(rest, pos, "/>")?;
    return Some((
      format!("::youtube[]{{id=\"{id}\"}}"),
      "<YouTube".len() + pos,
    ));
  }

  if let Some(rest) = input.strip_prefix("<FoliumTable") {
    let mut pos = skip_whitespace(rest, 0);
    if pos == 0 {
      return None;
    }

    let mut pairs = Vec::new();
    loop {
      if let Some(end) = expect_str(rest, pos, "/>") {
        let body = pairs.join(" ");
        return Some((
          format!("::folium-table[]{{{body}}}"),
          "<FoliumTable".len() + end,
        ));
      }

      let key_len = rest[pos..]
        .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
        .unwrap_or(rest.len() - pos);
      if key_len == 0 {
        return None;
      }
      let key = &rest[pos..pos + key_len];
      pos += key_len;

      pos = skip_whitespace(rest, pos);
      pos = expect_str(rest, pos, "=")?;
      pos = skip_whitespace(rest, pos);

      let (raw, raw_len) = scan_jsx_expression(&rest[pos..])?;
      pos += raw_len;
      pos = skip_whitespace(rest, pos);

      // Legacy pairing: resolve \' then protect " for the directive value
      let value = raw.replace("\\'", "'").replace('"', "\\\"");
      pairs.push(format!("{key}=\"{value}\""));
    }
  }

  None
}

fn directive_to_jsx_component(input: &str) -> Option<(String, usize)> {
  if let Some(rest) = input.strip_prefix("::youtube[]{") {
    let after_key = rest.strip_prefix("id=")?;
    let (id, id_len) = if after_key.starts_with('"') {
      let (raw, len) = scan_double_quoted_plain(after_key)?;
      (raw, len)
    } else {
      let end = after_key
        .find(|ch: char| ch.is_whitespace() || ch == '"' || ch == '}')
        .unwrap_or(after_key.len());
      if end == 0 {
        return None;
      }
      (after_key[..end].to_string(), end)
    };
    let rest_after = &after_key[id_len..];
    rest_after.strip_prefix('}')?;
    let consumed = "::youtube[]{id=".len() + id_len + 1;
    return Some((format!("<YouTube id=\"{id}\" />"), consumed));
  }

  if let Some(rest) = input.strip_prefix("::folium-table[]{") {
    let mut pairs = Vec::new();
    let mut pos = 0;
    loop {
      while rest[pos..].starts_with(' ') {
        pos += 1;
      }
      if rest[pos..].starts_with('}') {
        let body = pairs.join(" ");
        let consumed = "::folium-table[]{".len() + pos + 1;
        return Some((format!("<FoliumTable {body} />"), consumed));
      }

      let key_len = rest[pos..]
        .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
        .unwrap_or(rest.len() - pos);
      if key_len == 0 {
        return None;
      }
      let key = &rest[pos..pos + key_len];
      pos += key_len;

      if !rest[pos..].starts_with('=') {
        return None;
      }
      pos += 1;

      let (raw, raw_len) = if rest[pos..].starts_with('"') {
        // Escape-aware: values carry \" sequences from the editor side
        let (raw, len) = crate::parser::tag::scan_quoted(&rest[pos..])?;
        (raw.to_string(), len)
      } else {
        let end = rest[pos..]
          .find(|ch: char| ch.is_whitespace() || ch == '}')
          .unwrap_or(rest.len() - pos);
        if end == 0 {
          return None;
        }
        (rest[pos..pos + end].to_string(), end)
      };
      pos += raw_len;

      // Legacy pairing: resolve \" then protect ' for the JSX value
      let value = raw.replace("\\\"", "\"").replace('\'', "\\'");
      pairs.push(format!("{key}={{'{value}'}}"));
    }
  }

  None
}

/// Scan a `"..."` value without escape processing (legacy ids never
/// contain quotes). Returns the inner text and total consumed length.
fn scan_double_quoted_plain(s: &str) -> Option<(String, usize)> {
  let inner = s.strip_prefix('"')?;
  let end = inner.find('"')?;
  Some((inner[..end].to_string(), end + 2))
}

/// Scan a JSX `{'...'}` expression value, honoring `\'` escapes. Returns
/// the raw inner text (escapes intact) and total consumed length.
fn scan_jsx_expression(s: &str) -> Option<(String, usize)> {
  let inner = s.strip_prefix("{'")?;
  let mut chars = inner.char_indices();
  while let Some((idx, ch)) = chars.next() {
    match ch {
      '\'' => {
        return inner[idx + 1..]
          .starts_with('}')
          .then(|| (inner[..idx].to_string(), idx + 2 + 2));
      },
      '\\' => {
        chars.next()?;
      },
      _ => {},
    }
  }
  None
}

fn skip_whitespace(s: &str, pos: usize) -> usize {
  s[pos..]
    .char_indices()
    .find(|(_, ch)| !ch.is_whitespace())
    .map_or(s.len(), |(idx, _)| pos + idx)
}

fn expect_str(s: &str, pos: usize, expected: &str) -> Option<usize> {
  s[pos..]
    .starts_with(expected)
    .then(|| pos + expected.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn youtube_component_round_trips() {
    let jsx = r#"<YouTube id="abc123" />"#;
    let directive = jsx_to_directive(jsx);
    assert_eq!(directive, r#"::youtube[]{id="abc123"}"#);
    assert_eq!(directive_to_jsx(&directive), jsx);
  }

  #[test]
  fn table_component_round_trips_with_quotes() {
    let jsx = r#"<FoliumTable columns={'["option", "type"]'} rows={'[["a"]]'} />"#;
    let directive = jsx_to_directive(jsx);
    assert_eq!(
      directive,
      r#"::folium-table[]{columns="[\"option\", \"type\"]" rows="[[\"a\"]]"}"#
    );
    assert_eq!(directive_to_jsx(&directive), jsx);
  }

  #[test]
  fn escaped_single_quotes_resolve_into_directive_values() {
    let jsx = r#"<FoliumTable columns={'["it\'s"]'} />"#;
    let directive = jsx_to_directive(jsx);
    assert_eq!(directive, r#"::folium-table[]{columns="[\"it's\"]"}"#);
    assert_eq!(directive_to_jsx(&directive), jsx);
  }

  #[test]
  fn unquoted_directive_id_becomes_quoted_jsx() {
    assert_eq!(
      directive_to_jsx("::youtube[]{id=abc}"),
      r#"<YouTube id="abc" />"#
    );
  }

  #[test]
  fn unrelated_markup_is_untouched() {
    let text = "# Title\n\n<em>not a component</em>\n";
    assert_eq!(jsx_to_directive(text), text);
    assert_eq!(directive_to_jsx(text), text);
  }
}
