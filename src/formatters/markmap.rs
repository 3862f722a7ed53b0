use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::core::{Analysis, OutlineEntry, OutlineWalker, UsageGraph};

pub const DEFAULT_TITLE: &str = "Component Tree";
pub const DEFAULT_COLOR_FREEZE_LEVEL: u32 = 4;

/// One indentation unit per depth level.
const INDENT: &str = "  ";

/// Markdown outline for markmap: a frontmatter block, then one `## Root`
/// section per root with its nested bullet list.
pub struct MarkmapFormatter {
    title: String,
    color_freeze_level: u32,
}

impl MarkmapFormatter {
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            color_freeze_level: DEFAULT_COLOR_FREEZE_LEVEL,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_color_freeze_level(mut self, level: u32) -> Self {
        self.color_freeze_level = level;
        self
    }

    pub fn format_to_file(&self, analysis: &Analysis, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format(analysis))?;
        Ok(())
    }

    pub fn format(&self, analysis: &Analysis) -> String {
        let mut out = self.header();
        let walker = OutlineWalker::new(&analysis.graph);

        let sections: Vec<String> = walker
            .walk_all(&analysis.roots)
            .into_iter()
            .map(|(root, entries)| {
                let mut section = format!("## {}\n\n", analysis.graph.name(root));
                section.push_str(&self.outline(&analysis.graph, &entries));
                section
            })
            .collect();

        out.push_str(&sections.join("\n"));
        out
    }

    /// Bullet list for one root, newline-terminated.
    pub fn outline(&self, graph: &UsageGraph, entries: &[OutlineEntry]) -> String {
        let mut out = String::new();
        for entry in entries {
            out.push_str(&INDENT.repeat(entry.depth));
            out.push_str("- ");
            out.push_str(graph.name(entry.node));
            out.push('\n');
        }
        out
    }

    fn header(&self) -> String {
        format!(
            "---\ntitle: {}\nmarkmap:\n  colorFreezeLevel: {}\n---\n\n",
            self.title, self.color_freeze_level
        )
    }
}

impl Default for MarkmapFormatter {
    fn default() -> Self {
        Self::new()
    }
}
