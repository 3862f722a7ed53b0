use petgraph::graph::NodeIndex;
use petgraph::visit::Dfs;

use super::graph::UsageGraph;

/// Nodes with no surviving incoming edge, in discovery order.
///
/// A zero in-degree node is only a root when it uses something or is itself a
/// project component; bare external leaves never head a section.
pub fn select_roots(graph: &UsageGraph) -> Vec<NodeIndex> {
    graph
        .node_indices()
        .filter(|&index| graph.in_degree(index) == 0)
        .filter(|&index| {
            graph.out_degree(index) > 0 || graph.record(index).is_project_defined()
        })
        .collect()
}

/// Project components not reachable from any root.
///
/// These only occur on usage cycles with no entry point (`A -> B -> A` and
/// nothing else referring to either), so they never get a heading.
pub fn unreachable_components(graph: &UsageGraph, roots: &[NodeIndex]) -> Vec<NodeIndex> {
    let inner = graph.inner();
    let mut reached = vec![false; graph.node_count()];

    for &root in roots {
        let mut dfs = Dfs::new(inner, root);
        while let Some(index) = dfs.next(inner) {
            reached[index.index()] = true;
        }
    }

    graph
        .node_indices()
        .filter(|index| !reached[index.index()])
        .filter(|&index| graph.record(index).is_project_defined())
        .collect()
}
