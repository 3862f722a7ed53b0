use petgraph::graph::NodeIndex;
use std::collections::HashSet;

use super::graph::UsageGraph;

/// One line of a rendered outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineEntry {
    pub node: NodeIndex,
    pub depth: usize,
    /// The node already sits on the current path; it is shown as a leaf.
    pub cycle: bool,
}

struct Frame {
    node: NodeIndex,
    children: Vec<NodeIndex>,
    next: usize,
}

/// Depth-first walk of the usage graph from one root.
///
/// Only the ancestors of the current node are tracked, so a component shared by
/// several parents is repeated under each of them. A child that is already an
/// ancestor is emitted once more as a leaf and not descended into.
pub struct OutlineWalker<'g> {
    graph: &'g UsageGraph,
}

impl<'g> OutlineWalker<'g> {
    pub fn new(graph: &'g UsageGraph) -> Self {
        Self { graph }
    }

    pub fn walk(&self, root: NodeIndex) -> Vec<OutlineEntry> {
        let mut entries = vec![OutlineEntry {
            node: root,
            depth: 0,
            cycle: false,
        }];
        let mut on_path: HashSet<NodeIndex> = HashSet::from([root]);
        let mut stack = vec![Frame {
            node: root,
            children: self.graph.children(root),
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(&child) = frame.children.get(frame.next) else {
                let finished = frame.node;
                stack.pop();
                on_path.remove(&finished);
                continue;
            };
            frame.next += 1;

            let depth = stack.len();
            let cycle = on_path.contains(&child);
            entries.push(OutlineEntry {
                node: child,
                depth,
                cycle,
            });
            if cycle {
                continue;
            }

            on_path.insert(child);
            stack.push(Frame {
                node: child,
                children: self.graph.children(child),
                next: 0,
            });
        }

        entries
    }

    pub fn walk_all(&self, roots: &[NodeIndex]) -> Vec<(NodeIndex, Vec<OutlineEntry>)> {
        roots.iter().map(|&root| (root, self.walk(root))).collect()
    }
}
