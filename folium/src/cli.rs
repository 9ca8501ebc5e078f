use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command line interface for folium
#[derive(Parser, Debug)]
#[command(author, version, about = "Folium: blog content pipeline")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,
}

impl Cli {
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

/// Target dialect for transcoding.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
  /// Editor directive dialect (`::tag[]{...}`), used inside the authoring
  /// tool only.
  Editor,
  /// Storage tag dialect (`{% tag ... /%}`), the persisted form.
  Storage,
}

/// All supported subcommands for the folium CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Render storage-format documents to HTML.
  Render {
    /// Markdown file, or a directory to process recursively.
    input: PathBuf,

    /// Output file (single input) or directory (directory input).
    /// Single-file output defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also emit the extracted outline as JSON (`<name>.toc.json`
    /// next to the HTML output, or stdout for single-file runs).
    #[arg(long)]
    toc: bool,

    /// Disable syntax highlighting for code blocks.
    #[arg(long = "no-highlight", action = clap::ArgAction::SetTrue)]
    no_highlight: bool,
  },

  /// Convert a document between the storage and editor dialects.
  Transcode {
    /// Input file.
    input: PathBuf,

    /// Dialect to convert to.
    #[arg(short, long, value_enum)]
    to: Dialect,

    /// Treat the non-editor side as the legacy JSX component dialect
    /// instead of storage tags.
    #[arg(long)]
    jsx: bool,

    /// Output file. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
  },

  /// Print the stylesheet that colors highlighted code for a theme.
  HighlightCss {
    /// Theme name (e.g. "InspiredGitHub", "OneHalfDark").
    #[arg(short, long)]
    theme: Option<String>,
  },
}
