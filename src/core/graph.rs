use petgraph::{graph::NodeIndex, Directed, Direction, Graph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

use super::symbols::SymbolTable;
use crate::config::TreeConfig;
use crate::parsers::ExtractionResult;

/// Where a component is defined.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Origin {
    ProjectFile(PathBuf),
    ExternalPackage(String),
    Unknown,
}

impl Origin {
    pub fn is_project(&self) -> bool {
        matches!(self, Origin::ProjectFile(_))
    }

    pub fn package(&self) -> Option<&str> {
        match self {
            Origin::ExternalPackage(package) => Some(package),
            _ => None,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::ProjectFile(path) => write!(f, "{}", path.display()),
            Origin::ExternalPackage(package) => write!(f, "package:{package}"),
            Origin::Unknown => f.write_str("unknown"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComponentRecord {
    pub name: String,
    pub origin: Origin,
    /// True once a declaration for this name was seen in a scanned file.
    pub defined: bool,
}

impl ComponentRecord {
    pub fn new(name: String, origin: Origin, defined: bool) -> Self {
        Self {
            name,
            origin,
            defined,
        }
    }

    pub fn is_project_defined(&self) -> bool {
        self.defined && self.origin.is_project()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageEdge {
    /// Line of the first usage that produced this edge.
    pub line_number: usize,
}

pub type ComponentGraph = Graph<ComponentRecord, UsageEdge, Directed>;

/// Directed component usage graph. `A -> B` means A's source references B.
///
/// Node indices follow discovery order, which is what root ordering relies on.
#[derive(Debug, Clone, Default)]
pub struct UsageGraph {
    graph: ComponentGraph,
    node_map: HashMap<String, NodeIndex>,
}

impl UsageGraph {
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    pub fn record(&self, index: NodeIndex) -> &ComponentRecord {
        &self.graph[index]
    }

    pub fn name(&self, index: NodeIndex) -> &str {
        &self.graph[index].name
    }

    /// Out-neighbours in first-reference order.
    pub fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        // petgraph walks adjacency lists newest-first
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(index, Direction::Outgoing)
            .collect();
        children.reverse();
        children
    }

    pub fn child_names(&self, name: &str) -> Vec<&str> {
        self.node_index(name)
            .map(|index| {
                self.children(index)
                    .into_iter()
                    .map(|child| self.name(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn in_degree(&self, index: NodeIndex) -> usize {
        self.graph
            .neighbors_directed(index, Direction::Incoming)
            .count()
    }

    pub fn out_degree(&self, index: NodeIndex) -> usize {
        self.graph
            .neighbors_directed(index, Direction::Outgoing)
            .count()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        match (self.node_index(from), self.node_index(to)) {
            (Some(a), Some(b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    pub fn inner(&self) -> &ComponentGraph {
        &self.graph
    }
}

/// Why a reference did not become an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    IgnoredLibrary,
    NotProjectDefined,
}

/// Builds the filtered usage graph from extraction results and the symbol table.
pub struct GraphBuilder<'a> {
    symbols: &'a SymbolTable,
    config: &'a TreeConfig,
    graph: ComponentGraph,
    node_map: HashMap<String, NodeIndex>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(symbols: &'a SymbolTable, config: &'a TreeConfig) -> Self {
        Self {
            symbols,
            config,
            graph: Graph::new(),
            node_map: HashMap::new(),
        }
    }

    pub fn build(mut self, results: &[ExtractionResult]) -> UsageGraph {
        let symbols = self.symbols;

        for record in symbols.iter().filter(|record| record.defined) {
            self.add_node(record.clone());
        }

        for result in results {
            for reference in &result.references {
                let Some(target) = symbols.get(&reference.name) else {
                    debug!(component = %reference.name, "reference without symbol record");
                    continue;
                };
                if let Some(reason) = self.drop_reason(target, &reference.origin_hint) {
                    debug!(
                        from = %reference.from,
                        to = %reference.name,
                        ?reason,
                        "edge.dropped"
                    );
                    continue;
                }

                let (Some(from), Some(to)) = (
                    self.ensure_node(&reference.from),
                    self.ensure_node(&reference.name),
                ) else {
                    continue;
                };
                self.add_edge(from, to, reference.line_number);
            }
        }

        UsageGraph {
            graph: self.graph,
            node_map: self.node_map,
        }
    }

    /// Applies the ignore-libs and project-only policies to one reference.
    pub fn drop_reason(&self, target: &ComponentRecord, hint: &Origin) -> Option<DropReason> {
        let ignored = |origin: &Origin| {
            origin
                .package()
                .is_some_and(|package| self.config.is_ignored_library(package))
        };
        if ignored(&target.origin) || ignored(hint) {
            return Some(DropReason::IgnoredLibrary);
        }
        // an import from a package names that package's component, even when
        // the project defines one with the same name
        if self.config.project_only
            && (!target.is_project_defined() || hint.package().is_some())
        {
            return Some(DropReason::NotProjectDefined);
        }
        None
    }

    fn ensure_node(&mut self, name: &str) -> Option<NodeIndex> {
        if let Some(index) = self.node_map.get(name) {
            return Some(*index);
        }
        let record = self.symbols.get(name)?.clone();
        Some(self.add_node(record))
    }

    fn add_node(&mut self, record: ComponentRecord) -> NodeIndex {
        let name = record.name.clone();
        let index = self.graph.add_node(record);
        self.node_map.insert(name, index);
        index
    }

    fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, line_number: usize) {
        if !self.graph.contains_edge(from, to) {
            self.graph.add_edge(from, to, UsageEdge { line_number });
        }
    }
}
