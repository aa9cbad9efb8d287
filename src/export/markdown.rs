//! Markdown outline renderer
//!
//! Renders a model as a documentation outline: strategies at the top,
//! initiatives, journeys, milestones and steps nested below, expectations
//! with their behaviors and tests inline. Ordered lists are sorted by
//! their order number, ties broken by element name, so duplicate and
//! gapped order values render deterministically.

use std::fmt::Write as _;

use crate::model::{Element, ElementId, Kind, Payload, ServiceQuality};
use crate::registry::Registry;

/// Renders the whole model as a markdown outline
pub fn render(registry: &Registry) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Model outline");
    let _ = writeln!(out);

    let strategies = sorted_by_name(registry.by_kind(Kind::Strategy));
    for strategy in &strategies {
        render_strategy(registry, strategy, &mut out);
    }

    if strategies.is_empty() {
        let _ = writeln!(out, "_No strategies declared._");
        let _ = writeln!(out);
    }

    render_catalogue(registry, &mut out);

    out
}

fn render_strategy(registry: &Registry, strategy: &Element, out: &mut String) {
    let _ = writeln!(out, "## Strategy: {}", strategy.name());
    if let Some(description) = strategy.payload.description() {
        let _ = writeln!(out, "{}", description);
    }
    if let Payload::Strategy(options) = &strategy.payload {
        if let Some(vision) = &options.vision {
            let _ = writeln!(out, "Vision: {}", vision);
        }
        if !options.stakeholders.is_empty() {
            let names = names_of(registry, options.stakeholders.iter().map(|r| r.id()));
            let _ = writeln!(out, "Stakeholders: {}", names.join(", "));
        }
        let _ = writeln!(out);
        for initiative in resolve_sorted(registry, options.initiatives.iter().map(|r| r.id())) {
            render_initiative(registry, initiative, out);
        }
    }
}

fn render_initiative(registry: &Registry, initiative: &Element, out: &mut String) {
    let _ = writeln!(out, "### Initiative: {}", initiative.name());
    if let Some(description) = initiative.payload.description() {
        let _ = writeln!(out, "{}", description);
    }
    if let Payload::BusinessInitiative(options) = &initiative.payload {
        if let Some(objective) = &options.objective {
            let _ = writeln!(out, "Objective: {}", objective);
        }
        if !options.metrics.is_empty() {
            let names = names_of(registry, options.metrics.iter().map(|r| r.id()));
            let _ = writeln!(out, "Metrics: {}", names.join(", "));
        }
        let _ = writeln!(out);
        for journey in resolve_sorted(registry, options.journeys.iter().map(|r| r.id())) {
            render_journey(registry, journey, out);
        }
    }
}

fn render_journey(registry: &Registry, journey: &Element, out: &mut String) {
    let _ = writeln!(out, "#### Journey: {}", journey.name());
    if let Some(description) = journey.payload.description() {
        let _ = writeln!(out, "{}", description);
    }
    if let Payload::Journey(options) = &journey.payload {
        if !options.personas.is_empty() {
            let names = names_of(registry, options.personas.iter().map(|r| r.id()));
            let _ = writeln!(out, "Personas: {}", names.join(", "));
        }
        if let Some(context) = &options.context {
            if let Some(element) = registry.get(context.id()) {
                let _ = writeln!(out, "Context: {}", element.name());
            }
        }
        if !options.entry_actions.is_empty() {
            let names = names_of(registry, options.entry_actions.iter().map(|r| r.id()));
            let _ = writeln!(out, "Entry actions: {}", names.join(", "));
        }
        let _ = writeln!(out);

        let milestones = sorted_ordered(
            registry,
            options.milestones.iter().map(|m| (m.id(), m.order())),
        );
        for (order, milestone) in milestones {
            render_milestone(registry, milestone, order, out);
        }
    }
}

fn render_milestone(registry: &Registry, milestone: &Element, order: u32, out: &mut String) {
    let _ = writeln!(out, "{}. **{}**", order, milestone.name());
    if let Some(description) = milestone.payload.description() {
        let _ = writeln!(out, "   {}", description);
    }
    if let Payload::Milestone(options) = &milestone.payload {
        let steps = sorted_ordered(registry, options.steps.iter().map(|s| (s.id(), s.order())));
        for (step_order, step) in steps {
            let _ = writeln!(out, "   {}. {}", step_order, step.name());
        }
        for expectation in resolve_sorted(registry, options.expectations.iter().map(|r| r.id())) {
            render_expectation(registry, expectation, out);
        }
    }
    let _ = writeln!(out);
}

fn render_expectation(registry: &Registry, expectation: &Element, out: &mut String) {
    if let Payload::Expectation(options) = &expectation.payload {
        let _ = writeln!(
            out,
            "   - Expectation: {} ({})",
            expectation.name(),
            options.verification
        );
        if let Some(quality) = &options.quality {
            if !quality.is_empty() {
                let _ = writeln!(out, "     SLA: {}", format_quality(quality));
            }
        }
        if let Some(behavior) = &options.behavior {
            if let Some(element) = registry.get(behavior.id()) {
                let _ = writeln!(out, "     Behavior: {}", element.name());
                if let Payload::Behavior(behavior_options) = &element.payload {
                    for test in resolve_sorted(
                        registry,
                        behavior_options.tests.iter().map(|r| r.id()),
                    ) {
                        let _ = writeln!(out, "       Test: {}", test.name());
                    }
                }
            }
        }
    }
}

fn render_catalogue(registry: &Registry, out: &mut String) {
    let catalogue_kinds = [
        Kind::Persona,
        Kind::Stakeholder,
        Kind::Metric,
        Kind::Context,
        Kind::Interaction,
        Kind::Attribute,
    ];

    let mut wrote_header = false;
    for kind in catalogue_kinds {
        let elements = sorted_by_name(registry.by_kind(kind));
        if elements.is_empty() {
            continue;
        }
        if !wrote_header {
            let _ = writeln!(out, "## Catalogue");
            let _ = writeln!(out);
            wrote_header = true;
        }
        let _ = writeln!(out, "### {}", heading_for(kind));
        for element in elements {
            match element.payload.description() {
                Some(description) => {
                    let _ = writeln!(out, "- **{}** — {}", element.name(), description);
                }
                None => {
                    let _ = writeln!(out, "- **{}**", element.name());
                }
            }
        }
        let _ = writeln!(out);
    }
}

fn heading_for(kind: Kind) -> &'static str {
    match kind {
        Kind::Persona => "Personas",
        Kind::Stakeholder => "Stakeholders",
        Kind::Metric => "Metrics",
        Kind::Context => "Contexts",
        Kind::Interaction => "Interactions",
        Kind::Attribute => "Attributes",
        _ => "Other",
    }
}

fn format_quality(quality: &ServiceQuality) -> String {
    let mut parts = Vec::new();
    if let Some(availability) = quality.availability_pct {
        parts.push(format!("{availability}% availability"));
    }
    if let Some(latency) = quality.p99_latency_ms {
        parts.push(format!("p99 {latency}ms"));
    }
    if let Some(throughput) = quality.throughput_rps {
        parts.push(format!("{throughput} rps"));
    }
    if let Some(budget) = &quality.error_budget {
        parts.push(format!("error budget {budget}"));
    }
    parts.join(", ")
}

fn names_of<'a>(registry: &Registry, ids: impl Iterator<Item = &'a ElementId>) -> Vec<String> {
    resolve_sorted(registry, ids)
        .iter()
        .map(|e| e.name().to_string())
        .collect()
}

fn sorted_by_name<'a>(elements: impl Iterator<Item = &'a Element>) -> Vec<&'a Element> {
    let mut out: Vec<&Element> = elements.collect();
    out.sort_by(|a, b| a.name().cmp(b.name()));
    out
}

fn resolve_sorted<'a, 'b>(
    registry: &'a Registry,
    ids: impl Iterator<Item = &'b ElementId>,
) -> Vec<&'a Element> {
    sorted_by_name(ids.filter_map(|id| registry.get(id)))
}

fn sorted_ordered<'a, 'b>(
    registry: &'a Registry,
    entries: impl Iterator<Item = (&'b ElementId, u32)>,
) -> Vec<(u32, &'a Element)> {
    let mut out: Vec<(u32, &Element)> = entries
        .filter_map(|(id, order)| registry.get(id).map(|e| (order, e)))
        .collect();
    out.sort_by(|(a_order, a), (b_order, b)| a_order.cmp(b_order).then(a.name().cmp(b.name())));
    out
}
