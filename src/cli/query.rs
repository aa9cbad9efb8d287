//! Listing, tree and stats queries over a model document

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use super::output::Output;
use crate::export::ModelDocument;
use crate::model::{Element, Kind, Payload, ReferenceGraph};
use crate::registry::Registry;

fn load(output: &Output, context: &str, path: &Path) -> Result<Registry> {
    output.verbose_ctx(context, &format!("Loading model from {}", path.display()));
    let registry = ModelDocument::load(path)?
        .into_registry()
        .with_context(|| format!("Invalid model document: {}", path.display()))?;
    output.verbose_ctx(context, &format!("Loaded {} elements", registry.len()));
    Ok(registry)
}

/// Lists elements, optionally filtered by kind
pub fn show(output: &Output, path: &Path, kind: Option<Kind>) -> Result<()> {
    let registry = load(output, "show", path)?;

    let elements: Vec<&Element> = match kind {
        Some(kind) => registry.by_kind(kind).collect(),
        None => registry.iter().collect(),
    };

    if output.is_json() {
        let items: Vec<_> = elements
            .iter()
            .map(|e| {
                serde_json::json!({
                    "id": e.id.to_string(),
                    "kind": e.kind(),
                    "name": e.name(),
                    "description": e.payload.description(),
                })
            })
            .collect();
        output.data(&items);
    } else if elements.is_empty() {
        println!("No elements found");
    } else {
        println!("{:<12} {:<20} NAME", "ID", "KIND");
        println!("{}", "-".repeat(60));
        for element in &elements {
            println!(
                "{:<12} {:<20} {}",
                element.id.to_string(),
                element.kind().to_string(),
                element.name()
            );
        }
        println!();
        println!("{} element(s)", elements.len());
    }

    Ok(())
}

/// Prints the strategy-rooted hierarchy as an indented tree
pub fn tree(output: &Output, path: &Path) -> Result<()> {
    let registry = load(output, "tree", path)?;

    if output.is_json() {
        let trees: Vec<_> = registry
            .by_kind(Kind::Strategy)
            .map(|e| tree_json(&registry, e))
            .collect();
        output.data(&trees);
        return Ok(());
    }

    let strategies: Vec<&Element> = registry.by_kind(Kind::Strategy).collect();
    if strategies.is_empty() {
        println!("No strategies declared");
        return Ok(());
    }
    for strategy in strategies {
        print_tree(&registry, strategy, 0);
    }

    Ok(())
}

fn children(registry: &Registry, element: &Element) -> Vec<Element> {
    // Only hierarchy edges; catalogue references (personas, metrics,
    // stakeholders, ...) stay out of the tree.
    let ids: Vec<_> = match &element.payload {
        Payload::Strategy(o) => o.initiatives.iter().map(|r| r.id().clone()).collect(),
        Payload::BusinessInitiative(o) => o.journeys.iter().map(|r| r.id().clone()).collect(),
        Payload::Journey(o) => {
            let mut milestones: Vec<_> = o
                .milestones
                .iter()
                .map(|m| (m.order(), m.id().clone()))
                .collect();
            milestones.sort_by_key(|(order, _)| *order);
            milestones.into_iter().map(|(_, id)| id).collect()
        }
        Payload::Milestone(o) => {
            let mut steps: Vec<_> = o.steps.iter().map(|s| (s.order(), s.id().clone())).collect();
            steps.sort_by_key(|(order, _)| *order);
            let mut ids: Vec<_> = steps.into_iter().map(|(_, id)| id).collect();
            ids.extend(o.expectations.iter().map(|r| r.id().clone()));
            ids
        }
        Payload::Expectation(o) => o.behavior.iter().map(|r| r.id().clone()).collect(),
        Payload::Behavior(o) => o.tests.iter().map(|r| r.id().clone()).collect(),
        _ => Vec::new(),
    };
    ids.iter()
        .filter_map(|id| registry.get(id))
        .cloned()
        .collect()
}

fn print_tree(registry: &Registry, element: &Element, depth: usize) {
    println!(
        "{}{} [{}] {}",
        "  ".repeat(depth),
        element.kind(),
        element.id,
        element.name()
    );
    for child in children(registry, element) {
        print_tree(registry, &child, depth + 1);
    }
}

fn tree_json(registry: &Registry, element: &Element) -> serde_json::Value {
    let child_values: Vec<_> = children(registry, element)
        .iter()
        .map(|c| tree_json(registry, c))
        .collect();
    serde_json::json!({
        "id": element.id.to_string(),
        "kind": element.kind(),
        "name": element.name(),
        "children": child_values,
    })
}

/// Prints per-kind element counts and reference totals
pub fn stats(output: &Output, path: &Path) -> Result<()> {
    let registry = load(output, "stats", path)?;
    let graph = ReferenceGraph::from_registry(&registry);

    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for kind in Kind::all() {
        let count = registry.by_kind(*kind).count();
        if count > 0 {
            counts.insert(kind.label(), count);
        }
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "elements": registry.len(),
            "references": graph.reference_count(),
            "by_kind": counts,
        }));
    } else {
        println!("{:<22} COUNT", "KIND");
        println!("{}", "-".repeat(30));
        for (label, count) in &counts {
            println!("{:<22} {}", label, count);
        }
        println!();
        println!(
            "{} element(s), {} reference(s)",
            registry.len(),
            graph.reference_count()
        );
    }

    Ok(())
}
