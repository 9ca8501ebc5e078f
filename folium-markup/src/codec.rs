//! Codec for the JSON-array-encoded string attributes of the table tag.
//!
//! Table attributes like `columns` and `rows` arrive as JSON arrays packed
//! into a single string attribute value. Decoding fails soft: anything that
//! is not valid JSON of the expected shape yields an empty vector so a
//! half-edited attribute never takes the whole document down.

use log::debug;

/// Decode a JSON string-array attribute (`["Col1","Col2"]`).
#[must_use]
pub fn decode_string_array(raw: &str) -> Vec<String> {
  match serde_json::from_str::<Vec<String>>(raw) {
    Ok(items) => items,
    Err(err) => {
      debug!("ignoring malformed string-array attribute: {err}");
      Vec::new()
    },
  }
}

/// Decode a JSON array-of-string-arrays attribute (`[["a","b"],["c"]]`).
#[must_use]
pub fn decode_rows(raw: &str) -> Vec<Vec<String>> {
  match serde_json::from_str::<Vec<Vec<String>>>(raw) {
    Ok(rows) => rows,
    Err(err) => {
      debug!("ignoring malformed rows attribute: {err}");
      Vec::new()
    },
  }
}

/// Encode a string array back into its attribute form.
///
/// Inverse of [`decode_string_array`]; used by editor-side tooling when a
/// table is reassembled from structured fields.
#[must_use]
pub fn encode_string_array(items: &[String]) -> String {
  serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

/// Encode rows back into their attribute form.
#[must_use]
pub fn encode_rows(rows: &[Vec<String>]) -> String {
  serde_json::to_string(rows).unwrap_or_else(|_| "[]".to_string())
}
