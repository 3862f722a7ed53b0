use anyhow::Result;
use petgraph::graph::NodeIndex;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::graph::{GraphBuilder, UsageGraph};
use super::roots::{select_roots, unreachable_components};
use super::scanner::FileScanner;
use super::symbols::SymbolTable;
use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::parsers::{common::read_source, ExtractionResult, ParserFactory};

/// A file left out of the analysis, with the reason shown to the user.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub graph: UsageGraph,
    pub symbols: SymbolTable,
    pub roots: Vec<NodeIndex>,
    pub skipped: Vec<SkippedFile>,
    pub files_analyzed: usize,
}

impl Analysis {
    pub fn root_names(&self) -> Vec<&str> {
        self.roots
            .iter()
            .map(|&root| self.graph.name(root))
            .collect()
    }
}

pub struct ComponentAnalyzer {
    file_scanner: FileScanner,
    parser_factory: ParserFactory,
    config: TreeConfig,
}

impl ComponentAnalyzer {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            file_scanner: FileScanner::new(),
            parser_factory: ParserFactory::new(config.component_pattern.clone()),
            config,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Scans `root_path`, reads every component source and builds the tree.
    ///
    /// Configuration problems abort the run; unreadable or unparseable files
    /// are skipped and reported in [`Analysis::skipped`].
    pub fn analyze(&self, root_path: &Path) -> Result<Analysis> {
        info!(root = %root_path.display(), "scanning files");
        let files = self.file_scanner.scan_directory(root_path, &self.config)?;
        info!(count = files.len(), "component sources found");

        let mut results = Vec::with_capacity(files.len());
        let mut skipped = Vec::new();

        for file_info in &files {
            let extracted = read_source(&file_info.path).and_then(|source| {
                self.extract_file(&file_info.relative_path, &file_info.extension, &source)
            });
            match extracted {
                Ok(result) => results.push(result),
                Err(err) if err.is_per_file() => {
                    skipped.push(skip(&file_info.relative_path, err))
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(self.finish(results, skipped))
    }

    /// Builds the tree from already-loaded `(project-relative path, text)` pairs.
    pub fn analyze_sources<I>(&self, sources: I) -> Analysis
    where
        I: IntoIterator<Item = (PathBuf, String)>,
    {
        let mut results = Vec::new();
        let mut skipped = Vec::new();

        for (path, source) in sources {
            let extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or_default()
                .to_string();
            match self.extract_file(&path, &extension, &source) {
                Ok(result) => results.push(result),
                Err(err) => skipped.push(skip(&path, err)),
            }
        }

        self.finish(results, skipped)
    }

    fn extract_file(
        &self,
        path: &Path,
        extension: &str,
        source: &str,
    ) -> Result<ExtractionResult, TreeError> {
        let parser = self.parser_factory.get_parser(extension)?;
        let result = parser.extract(source, path)?;
        debug!(
            file = %path.display(),
            language = parser.language_name(),
            definitions = result.definitions.len(),
            references = result.references.len(),
            "file.extracted"
        );
        Ok(result)
    }

    fn finish(&self, results: Vec<ExtractionResult>, skipped: Vec<SkippedFile>) -> Analysis {
        info!("building symbol table");
        let symbols = SymbolTable::build(&results, self.config.duplicate_policy);

        info!("building usage graph");
        let graph = GraphBuilder::new(&symbols, &self.config).build(&results);
        let roots = select_roots(&graph);

        for index in unreachable_components(&graph, &roots) {
            warn!(
                component = graph.name(index),
                "component only reachable through a usage cycle; not rendered"
            );
        }
        info!(
            components = graph.node_count(),
            edges = graph.edge_count(),
            roots = roots.len(),
            skipped = skipped.len(),
            "analysis complete"
        );

        Analysis {
            graph,
            symbols,
            roots,
            skipped,
            files_analyzed: results.len(),
        }
    }
}

fn skip(path: &Path, err: TreeError) -> SkippedFile {
    warn!(file = %path.display(), error = %err, "skipping file");
    SkippedFile {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
