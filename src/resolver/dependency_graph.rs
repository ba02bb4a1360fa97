//! Table dependency graph for import ordering.
//!
//! Nodes are table names; an edge `dependent → parent` means a row of `parent`
//! must exist before a row of `dependent` can be created. The graph remembers
//! the order in which tables were first recorded (parents ahead of the table
//! that needed them) and derives the import order from it with a depth-first
//! walk, so the order is stable for a given template and schema.
//!
//! Self references and cycles are configuration faults and are reported
//! rather than broken.

use anyhow::Result;
use indexmap::IndexSet;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use crate::core::SimportError;

/// Color states for cycle detection using DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Node has not been visited.
    White,
    /// Node is currently being visited (in the DFS stack).
    Gray,
    /// Node has been fully visited.
    Black,
}

/// Directed graph of table-level requirements.
#[derive(Debug, Default)]
pub struct TableGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
    /// Tables in first-recorded order
    recorded: IndexSet<String>,
}

impl TableGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_node(&mut self, table: &str) -> NodeIndex {
        if let Some(&index) = self.node_map.get(table) {
            index
        } else {
            let index = self.graph.add_node(table.to_string());
            self.node_map.insert(table.to_string(), index);
            index
        }
    }

    /// Note `table` in the seed order unless it is already there.
    pub fn record(&mut self, table: &str) {
        self.ensure_node(table);
        self.recorded.insert(table.to_string());
    }

    /// `dependent` needs a row of `parent`, referenced through `column`.
    ///
    /// The parent is recorded immediately; the dependent is recorded by the
    /// caller once all of its requirements have been seen.
    pub fn add_requirement(&mut self, dependent: &str, parent: &str, column: &str) -> Result<()> {
        if dependent == parent {
            return Err(SimportError::SelfReferencingTable {
                table: dependent.to_string(),
                column: column.to_string(),
            }
            .into());
        }

        self.record(parent);
        let parent_idx = self.ensure_node(parent);
        let dependent_idx = self.ensure_node(dependent);

        if !self.graph.contains_edge(dependent_idx, parent_idx) {
            self.graph.add_edge(dependent_idx, parent_idx, ());
        }
        Ok(())
    }

    /// Parents of `node` in the order their requirements were added.
    fn parents(&self, node: NodeIndex) -> Vec<NodeIndex> {
        // petgraph yields the most recently added edge first
        let mut parents: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        parents.reverse();
        parents
    }

    /// Tables in import order: every table after all the tables it requires.
    ///
    /// Tables are visited in recorded order and each one's parents are placed
    /// first, recursively. When the recorded order already satisfies every
    /// requirement it is returned unchanged.
    pub fn import_order(&self) -> Result<Vec<String>> {
        let mut colors: HashMap<NodeIndex, Color> =
            self.graph.node_indices().map(|n| (n, Color::White)).collect();
        let mut path = Vec::new();
        let mut order = Vec::with_capacity(self.graph.node_count());

        let seeds = self
            .recorded
            .iter()
            .filter_map(|t| self.node_map.get(t).copied())
            .chain(self.graph.node_indices());

        for node in seeds {
            if colors.get(&node) == Some(&Color::White) {
                self.visit(node, &mut colors, &mut path, &mut order)?;
            }
        }

        Ok(order)
    }

    fn visit(
        &self,
        node: NodeIndex,
        colors: &mut HashMap<NodeIndex, Color>,
        path: &mut Vec<NodeIndex>,
        order: &mut Vec<String>,
    ) -> Result<()> {
        colors.insert(node, Color::Gray);
        path.push(node);

        for parent in self.parents(node) {
            match colors.get(&parent) {
                Some(Color::Gray) => {
                    let cycle_start = path.iter().position(|n| *n == parent).unwrap_or(0);
                    let chain = path[cycle_start..]
                        .iter()
                        .chain(std::iter::once(&parent))
                        .map(|n| self.graph[*n].as_str())
                        .collect::<Vec<_>>()
                        .join(" → ");
                    return Err(SimportError::CircularDependency {
                        chain,
                    }
                    .into());
                }
                Some(Color::White) => self.visit(parent, colors, path, order)?,
                _ => {}
            }
        }

        path.pop();
        colors.insert(node, Color::Black);
        order.push(self.graph[node].clone());
        Ok(())
    }
}
