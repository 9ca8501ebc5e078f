//! # folium-markup - content pipeline for the folium blog engine
//!
//! Converts the storage markup dialect (Markdown plus the `youtube` and
//! `folium-table` custom block tags) into sanitized HTML, and transcodes
//! between the storage dialect and the richer editor directive dialect so
//! the WYSIWYG editor can round-trip documents losslessly.
//!
//! ## Quick Start
//!
//! ```rust
//! use folium_markup::{MarkupOptions, MarkupProcessor};
//!
//! let processor = MarkupProcessor::new(MarkupOptions::default());
//! let result = processor.render("# Hello\n\n## Intro\n\nSome **bold** text.");
//!
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! assert!(result.html.contains("<h2 id=\"intro\">"));
//! assert_eq!(result.toc[0].text, "Intro");
//! ```
//!
//! ## Pipeline
//!
//! - **Parse**: a hand-written scanner recognizes the custom block tags;
//!   standard Markdown is delegated to comrak and lowered into one tree.
//! - **Transform**: custom tags are validated against their registered
//!   schemas; table colors are resolved against the palette once.
//! - **Render**: recursive serialization with strict escaping; total, it
//!   never fails on malformed trees.
//! - **Post-process**: syntax highlighting, heading slug ids, and heading
//!   self-links, applied through a DOM pass.
//! - **Outline**: the h2/h3 table of contents is read back from the final
//!   HTML.
//!
//! ## Transcoding
//!
//! ```rust
//! use folium_markup::{to_editor_syntax, to_storage_syntax};
//!
//! let storage = r#"{% youtube id="abc123" /%}"#;
//! let editor = to_editor_syntax(storage);
//! assert_eq!(editor, r#"::youtube[]{id="abc123"}"#);
//! assert_eq!(to_storage_syntax(&editor), storage);
//! ```

pub mod codec;
pub mod legacy_jsx;
pub mod node;
pub mod palette;
pub mod parser;
pub mod postprocess;
mod processor;
pub mod render;
pub mod syntax;
pub mod toc;
pub mod transcode;
pub mod transform;
mod types;
pub mod utils;

pub use crate::{
  postprocess::postprocess,
  processor::{
    MarkupOptions,
    MarkupProcessor,
    process_safe,
    process_with_recovery,
  },
  render::render,
  toc::extract_toc,
  transcode::{to_editor_syntax, to_storage_syntax},
  types::{MarkupResult, TocEntry},
};
