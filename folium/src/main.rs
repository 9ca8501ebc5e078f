use std::{fs, path::Path};

use color_eyre::eyre::{Context as _, Result, bail};
use folium_markup::{
  MarkupOptions,
  MarkupProcessor,
  legacy_jsx,
  process_with_recovery,
  to_editor_syntax,
  to_storage_syntax,
};
use log::{LevelFilter, info};
use walkdir::WalkDir;

mod cli;

use cli::{Cli, Commands, Dialect};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match cli.command {
    Commands::Render {
      input,
      output,
      toc,
      no_highlight,
    } => {
      let processor = MarkupProcessor::new(MarkupOptions {
        highlight_code: !no_highlight,
        ..MarkupOptions::default()
      });
      if input.is_dir() {
        let Some(output_dir) = output else {
          bail!("rendering a directory requires --output");
        };
        render_directory(&processor, &input, &output_dir, toc)
      } else {
        render_file(&processor, &input, output.as_deref(), toc)
      }
    },

    Commands::Transcode {
      input,
      to,
      jsx,
      output,
    } => {
      let content = fs::read_to_string(&input)
        .wrap_err_with(|| format!("Failed to read {}", input.display()))?;
      let converted = match (to, jsx) {
        (Dialect::Editor, false) => to_editor_syntax(&content),
        (Dialect::Storage, false) => to_storage_syntax(&content),
        (Dialect::Editor, true) => legacy_jsx::jsx_to_directive(&content),
        (Dialect::Storage, true) => legacy_jsx::directive_to_jsx(&content),
      };
      write_or_print(output.as_deref(), &converted)
    },

    Commands::HighlightCss { theme } => {
      let processor = MarkupProcessor::new(MarkupOptions {
        highlight_code: true,
        highlight_theme: theme,
        ..MarkupOptions::default()
      });
      match processor.theme_stylesheet() {
        Some(css) => write_or_print(None, &css),
        None => bail!("no highlighting backend or unknown theme"),
      }
    },
  }
}

/// Render a single document; HTML to `output` or stdout, outline alongside.
fn render_file(
  processor: &MarkupProcessor,
  input: &Path,
  output: Option<&Path>,
  toc: bool,
) -> Result<()> {
  let content = fs::read_to_string(input)
    .wrap_err_with(|| format!("Failed to read {}", input.display()))?;
  let result = process_with_recovery(processor, &content);

  match output {
    Some(path) => {
      fs::write(path, &result.html)
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
      if toc {
        let toc_path = path.with_extension("toc.json");
        fs::write(&toc_path, serde_json::to_string_pretty(&result.toc)?)
          .wrap_err_with(|| {
            format!("Failed to write {}", toc_path.display())
          })?;
      }
      info!("Rendered {} -> {}", input.display(), path.display());
    },
    None => {
      write_or_print(None, &result.html)?;
      if toc {
        write_or_print(None, &serde_json::to_string_pretty(&result.toc)?)?;
      }
    },
  }
  Ok(())
}

/// Render every `.md` file under `input_dir`, mirroring names into
/// `output_dir`.
fn render_directory(
  processor: &MarkupProcessor,
  input_dir: &Path,
  output_dir: &Path,
  toc: bool,
) -> Result<()> {
  fs::create_dir_all(output_dir).wrap_err_with(|| {
    format!("Failed to create {}", output_dir.display())
  })?;

  let mut rendered = 0_usize;
  for entry in WalkDir::new(input_dir)
    .follow_links(true)
    .into_iter()
    .filter_map(Result::ok)
  {
    let path = entry.path();
    if !path.is_file() || path.extension().is_none_or(|ext| ext != "md") {
      continue;
    }

    let relative = path.strip_prefix(input_dir).unwrap_or(path);
    let out_path = output_dir.join(relative).with_extension("html");
    if let Some(parent) = out_path.parent() {
      fs::create_dir_all(parent).wrap_err_with(|| {
        format!("Failed to create {}", parent.display())
      })?;
    }
    render_file(processor, path, Some(&out_path), toc)?;
    rendered += 1;
  }

  info!(
    "Rendered {rendered} documents into {}",
    output_dir.display()
  );
  Ok(())
}

#[allow(clippy::print_stdout, reason = "CLI output goes to stdout")]
fn write_or_print(output: Option<&Path>, content: &str) -> Result<()> {
  match output {
    Some(path) => {
      fs::write(path, content)
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    },
    None => println!("{content}"),
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  #![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Fine in tests"
  )]
  use super::*;

  fn test_processor() -> MarkupProcessor {
    MarkupProcessor::new(MarkupOptions {
      highlight_code: false,
      ..MarkupOptions::default()
    })
  }

  #[test]
  fn renders_single_file_with_outline() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("post.md");
    fs::write(&input, "# Title\n\n## Section\n\nbody\n").unwrap();
    let out = dir.path().join("post.html");

    render_file(&test_processor(), &input, Some(&out), true).unwrap();

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("<h2 id=\"section\">"));

    let toc = fs::read_to_string(out.with_extension("toc.json")).unwrap();
    assert!(toc.contains("\"slug\": \"section\""));
  }

  #[test]
  fn renders_directory_recursively() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input_dir = dir.path().join("content");
    fs::create_dir_all(input_dir.join("nested")).unwrap();
    fs::write(input_dir.join("a.md"), "## A\n").unwrap();
    fs::write(input_dir.join("nested/b.md"), "## B\n").unwrap();
    fs::write(input_dir.join("notes.txt"), "ignored").unwrap();

    let out_dir = dir.path().join("site");
    render_directory(&test_processor(), &input_dir, &out_dir, false).unwrap();

    assert!(out_dir.join("a.html").exists());
    assert!(out_dir.join("nested/b.html").exists());
    assert!(!out_dir.join("notes.html").exists());
  }
}
