//! Markdown rendering command

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::output::Output;
use crate::export::{markdown, ModelDocument};

/// Renders the model outline as markdown, to stdout or to a file
pub fn run(output: &Output, path: &Path, out_file: Option<&Path>) -> Result<()> {
    output.verbose_ctx("render", &format!("Loading model from {}", path.display()));

    let registry = ModelDocument::load(path)?
        .into_registry()
        .with_context(|| format!("Invalid model document: {}", path.display()))?;

    let rendered = markdown::render(&registry);
    output.verbose_ctx(
        "render",
        &format!("Rendered {} bytes of markdown", rendered.len()),
    );

    match out_file {
        Some(out_path) => {
            fs::write(out_path, &rendered)
                .with_context(|| format!("Failed to write {}", out_path.display()))?;
            output.success(&format!("Wrote {}", out_path.display()));
        }
        None if output.is_json() => {
            output.data(&serde_json::json!({ "markdown": rendered }));
        }
        None => {
            print!("{}", rendered);
        }
    }

    Ok(())
}
