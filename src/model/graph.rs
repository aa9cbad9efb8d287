//! Reference graph over a registry
//!
//! Directed graph of element references, used by validation and rendering.
//! Edges point from the referencing element to its target. Every reference
//! field points strictly down the hierarchy (Strategy down to Test), so
//! models built through the typed API or loaded from documents are always
//! acyclic; cycle detection stays in validation as a safety net should a
//! same-kind or upward reference field ever be added to the schema.

use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use super::id::ElementId;
use super::kind::Kind;
use crate::registry::Registry;

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("Model contains a reference cycle involving {0}")]
    Cyclic(ElementId),
}

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// A finding produced by [`ReferenceGraph::validate`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Issue {
    #[error("Reference cycle: {}", .path.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(" -> "))]
    Cycle { path: Vec<ElementId> },

    #[error("{kind} '{name}' repeats order {order} in field '{role}'")]
    DuplicateOrder {
        kind: Kind,
        name: String,
        role: &'static str,
        order: u32,
    },

    #[error("{kind} '{name}' ({id}) is not reachable from any strategy")]
    Unreachable {
        kind: Kind,
        name: String,
        id: ElementId,
    },
}

impl Issue {
    /// Returns the severity of this issue
    pub fn severity(&self) -> Severity {
        match self {
            Issue::Cycle { .. } => Severity::Error,
            Issue::DuplicateOrder { .. } | Issue::Unreachable { .. } => Severity::Warning,
        }
    }
}

/// Directed graph of element references
#[derive(Debug, Default)]
pub struct ReferenceGraph {
    graph: DiGraph<ElementId, &'static str>,
    node_map: HashMap<ElementId, NodeIndex>,
}

impl ReferenceGraph {
    /// Builds the reference graph of a registry
    pub fn from_registry(registry: &Registry) -> Self {
        let mut graph = Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        };

        for element in registry.iter() {
            let idx = graph.graph.add_node(element.id.clone());
            graph.node_map.insert(element.id.clone(), idx);
        }

        for element in registry.iter() {
            let from = graph.node_map[&element.id];
            for reference in element.payload.references() {
                // The registry is closed under references, so the target
                // is always present.
                if let Some(&to) = graph.node_map.get(&reference.target) {
                    graph.graph.add_edge(from, to, reference.role);
                }
            }
        }

        graph
    }

    /// Returns the IDs this element references directly
    pub fn references(&self, id: &ElementId) -> Vec<ElementId> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Returns the IDs that reference this element directly
    pub fn referenced_by(&self, id: &ElementId) -> Vec<ElementId> {
        self.neighbors(id, Direction::Incoming)
    }

    fn neighbors(&self, id: &ElementId, direction: Direction) -> Vec<ElementId> {
        let idx = match self.node_map.get(id) {
            Some(idx) => *idx,
            None => return vec![],
        };
        self.graph
            .neighbors_directed(idx, direction)
            .filter_map(|n| self.graph.node_weight(n).cloned())
            .collect()
    }

    /// Returns true if the graph contains a reference cycle
    pub fn is_cyclic(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Returns all element IDs with referenced elements before their
    /// referencers
    pub fn topological_order(&self) -> Result<Vec<ElementId>, GraphError> {
        // Reversed so that leaves (tests, actions) come first.
        match toposort(&self.graph, None) {
            Ok(order) => Ok(order
                .into_iter()
                .rev()
                .filter_map(|idx| self.graph.node_weight(idx).cloned())
                .collect()),
            Err(cycle) => {
                let id = self
                    .graph
                    .node_weight(cycle.node_id())
                    .cloned()
                    .unwrap_or_else(|| ElementId::new(Kind::Strategy, "unknown"));
                Err(GraphError::Cyclic(id))
            }
        }
    }

    /// Returns the number of elements in the graph
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    /// Returns true if the graph has no elements
    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }

    /// Returns the number of reference edges
    pub fn reference_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Extracts one cycle path, if any
    fn find_cycle(&self) -> Option<Vec<ElementId>> {
        // DFS with an explicit color map; gray-node hit means a cycle.
        #[derive(Clone, Copy, PartialEq)]
        enum Color {
            White,
            Gray,
            Black,
        }

        let mut colors: HashMap<NodeIndex, Color> = self
            .graph
            .node_indices()
            .map(|idx| (idx, Color::White))
            .collect();

        for start in self.graph.node_indices() {
            if colors[&start] != Color::White {
                continue;
            }
            let mut stack = vec![(start, self.graph.neighbors(start).collect::<Vec<_>>())];
            colors.insert(start, Color::Gray);
            let mut path = vec![start];

            while let Some((node, pending)) = stack.last_mut() {
                if let Some(next) = pending.pop() {
                    match colors[&next] {
                        Color::Gray => {
                            // Found a cycle: slice the current path from
                            // the repeated node.
                            let from = path.iter().position(|n| *n == next).unwrap_or(0);
                            let mut cycle: Vec<ElementId> = path[from..]
                                .iter()
                                .filter_map(|n| self.graph.node_weight(*n).cloned())
                                .collect();
                            if let Some(weight) = self.graph.node_weight(next) {
                                cycle.push(weight.clone());
                            }
                            return Some(cycle);
                        }
                        Color::White => {
                            colors.insert(next, Color::Gray);
                            path.push(next);
                            stack.push((next, self.graph.neighbors(next).collect()));
                        }
                        Color::Black => {}
                    }
                } else {
                    colors.insert(*node, Color::Black);
                    path.pop();
                    stack.pop();
                }
            }
        }
        None
    }

    /// Validates a registry against its reference graph
    ///
    /// Errors: reference cycles. Warnings: duplicate order values within
    /// one ordered list, and elements unreachable from any strategy (only
    /// reported when the model declares at least one strategy).
    pub fn validate(&self, registry: &Registry) -> Vec<Issue> {
        let mut issues = Vec::new();

        if let Some(path) = self.find_cycle() {
            issues.push(Issue::Cycle { path });
        }

        for element in registry.iter() {
            for (role, entries) in element.payload.ordered_lists() {
                let mut seen = HashSet::new();
                let mut reported = HashSet::new();
                for (_, order) in &entries {
                    if !seen.insert(*order) && reported.insert(*order) {
                        issues.push(Issue::DuplicateOrder {
                            kind: element.kind(),
                            name: element.name().to_string(),
                            role,
                            order: *order,
                        });
                    }
                }
            }
        }

        let strategies: Vec<&ElementId> = registry
            .by_kind(Kind::Strategy)
            .map(|e| &e.id)
            .collect();
        if !strategies.is_empty() {
            let reachable = self.reachable_from(&strategies);
            for element in registry.iter() {
                if element.kind() != Kind::Strategy && !reachable.contains(&element.id) {
                    issues.push(Issue::Unreachable {
                        kind: element.kind(),
                        name: element.name().to_string(),
                        id: element.id.clone(),
                    });
                }
            }
        }

        issues
    }

    fn reachable_from(&self, roots: &[&ElementId]) -> HashSet<ElementId> {
        let mut visited = HashSet::new();
        let mut stack: Vec<NodeIndex> = roots
            .iter()
            .filter_map(|id| self.node_map.get(id).copied())
            .collect();

        while let Some(idx) = stack.pop() {
            let id = match self.graph.node_weight(idx) {
                Some(id) => id.clone(),
                None => continue,
            };
            if !visited.insert(id) {
                continue;
            }
            stack.extend(self.graph.neighbors(idx));
        }

        visited
    }
}
