use anyhow::Result;
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::Path;

use crate::core::{Analysis, Origin, OutlineEntry, OutlineWalker, UsageGraph};

/// Nested JSON rendering of the same outlines the markmap formatter prints.
pub struct JsonCompactFormatter {
    pretty: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutlineNode {
    pub name: String,
    pub origin: Origin,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cycle: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineNode>,
}

impl JsonCompactFormatter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn format_to_file(&self, analysis: &Analysis, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format(analysis)?)?;
        Ok(())
    }

    pub fn format(&self, analysis: &Analysis) -> Result<String> {
        let walker = OutlineWalker::new(&analysis.graph);
        let roots: Vec<OutlineNode> = walker
            .walk_all(&analysis.roots)
            .into_iter()
            .filter_map(|(_, entries)| nest(&analysis.graph, &entries))
            .collect();

        let output = json!({
            "meta": {
                "components": analysis.graph.node_count(),
                "edges": analysis.graph.edge_count(),
                "roots": roots.len(),
                "skipped": analysis.skipped.len()
            },
            "roots": roots
        });

        let text = if self.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        Ok(text)
    }
}

impl Default for JsonCompactFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Rebuilds the nesting of a depth-first entry list.
pub fn nest(graph: &UsageGraph, entries: &[OutlineEntry]) -> Option<OutlineNode> {
    // stack[i] is the open node at depth i
    let mut stack: Vec<OutlineNode> = Vec::new();

    for entry in entries {
        while stack.len() > entry.depth {
            close_last(&mut stack);
        }
        let record = graph.record(entry.node);
        stack.push(OutlineNode {
            name: record.name.clone(),
            origin: record.origin.clone(),
            cycle: entry.cycle,
            children: Vec::new(),
        });
    }

    while stack.len() > 1 {
        close_last(&mut stack);
    }
    stack.pop()
}

fn close_last(stack: &mut Vec<OutlineNode>) {
    if let Some(done) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(done);
        }
    }
}
