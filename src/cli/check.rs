//! Model validation command

use std::path::Path;

use anyhow::Result;

use super::output::Output;
use crate::export::{DocumentError, ModelDocument};
use crate::model::{ReferenceGraph, Severity};

/// Validates a model document: registry rebuild plus graph checks
///
/// Registry rebuild failures (duplicates, dangling references, tampered
/// IDs) and graph errors fail the command; warnings are reported but do
/// not affect the exit code.
pub fn run(output: &Output, path: &Path) -> Result<()> {
    output.verbose_ctx("check", &format!("Loading model from {}", path.display()));

    let document = ModelDocument::load(path)?;
    let element_count = document.elements.len();
    output.verbose_ctx("check", &format!("Loaded {} elements", element_count));

    let registry = match document.into_registry() {
        Ok(registry) => registry,
        Err(err @ (DocumentError::Registry(_) | DocumentError::UnsupportedVersion { .. })) => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "valid": false,
                    "errors": [err.to_string()],
                    "warnings": [],
                }));
            } else {
                println!("error: {}", err);
            }
            anyhow::bail!("model is invalid: 1 error");
        }
        Err(err) => return Err(err.into()),
    };

    let graph = ReferenceGraph::from_registry(&registry);
    let issues = graph.validate(&registry);

    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .map(|i| i.to_string())
        .collect();
    let warnings: Vec<String> = issues
        .iter()
        .filter(|i| i.severity() == Severity::Warning)
        .map(|i| i.to_string())
        .collect();

    output.verbose_ctx(
        "check",
        &format!("{} error(s), {} warning(s)", errors.len(), warnings.len()),
    );

    if output.is_json() {
        output.data(&serde_json::json!({
            "valid": errors.is_empty(),
            "elements": registry.len(),
            "errors": errors,
            "warnings": warnings,
        }));
    } else {
        for error in &errors {
            println!("error: {}", error);
        }
        for warning in &warnings {
            println!("warning: {}", warning);
        }
        if errors.is_empty() {
            println!(
                "OK: {} elements, {} warning(s)",
                registry.len(),
                warnings.len()
            );
        }
    }

    if !errors.is_empty() {
        anyhow::bail!("model is invalid: {} error(s)", errors.len());
    }

    Ok(())
}
