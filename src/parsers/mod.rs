pub mod common;
pub mod javascript;
pub mod jsx;
pub mod typescript;

use std::path::{Path, PathBuf};

use crate::config::ComponentPattern;
use crate::core::Origin;
use crate::error::TreeError;

/// A component declared in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub line_number: usize,
    pub default_export: bool,
}

/// A usage of `name` inside the source of component `from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub from: String,
    pub name: String,
    pub origin_hint: Origin,
    pub line_number: usize,
}

/// Definitions and references found in one file, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub file_path: PathBuf,
    pub definitions: Vec<Definition>,
    pub references: Vec<Reference>,
}

impl ExtractionResult {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            definitions: Vec::new(),
            references: Vec::new(),
        }
    }

    pub fn with_definition(mut self, name: &str) -> Self {
        self.define(name, 0, false);
        self
    }

    pub fn with_reference(mut self, from: &str, name: &str, origin_hint: Origin) -> Self {
        self.reference(from, name, origin_hint, 0);
        self
    }

    /// Adds a definition unless the file already declares `name`.
    pub fn define(&mut self, name: &str, line_number: usize, default_export: bool) {
        if let Some(existing) = self.definitions.iter_mut().find(|d| d.name == name) {
            existing.default_export |= default_export;
            return;
        }
        self.definitions.push(Definition {
            name: name.to_string(),
            line_number,
            default_export,
        });
    }

    /// Adds a reference unless the same `from -> name` pair was already seen.
    pub fn reference(&mut self, from: &str, name: &str, origin_hint: Origin, line_number: usize) {
        if self
            .references
            .iter()
            .any(|r| r.from == from && r.name == name)
        {
            return;
        }
        self.references.push(Reference {
            from: from.to_string(),
            name: name.to_string(),
            origin_hint,
            line_number,
        });
    }

    pub fn defines(&self, name: &str) -> bool {
        self.definitions.iter().any(|d| d.name == name)
    }

    pub fn references_of<'a>(&'a self, from: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.references
            .iter()
            .filter(move |r| r.from == from)
            .map(|r| r.name.as_str())
    }
}

/// Extracts component definitions and references from one source text.
///
/// `file_path` is the project-relative path; it names the file in the results
/// and anchors relative imports.
pub trait ComponentParser {
    fn extract(&self, source: &str, file_path: &Path) -> Result<ExtractionResult, TreeError>;
    fn language_name(&self) -> &str;
}

/// File extensions a grammar exists for.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jsx", "js", "mjs", "cjs", "tsx", "ts", "mts", "cts"];

pub struct ParserFactory {
    pattern: ComponentPattern,
}

impl ParserFactory {
    pub fn new(pattern: ComponentPattern) -> Self {
        Self { pattern }
    }

    pub fn get_parser(&self, extension: &str) -> Result<Box<dyn ComponentParser>, TreeError> {
        match extension {
            "jsx" | "js" | "mjs" | "cjs" => Ok(Box::new(javascript::JavaScriptParser::new(
                self.pattern.clone(),
            )?)),
            "tsx" => Ok(Box::new(typescript::TypeScriptParser::tsx(
                self.pattern.clone(),
            )?)),
            "ts" | "mts" | "cts" => Ok(Box::new(typescript::TypeScriptParser::new(
                self.pattern.clone(),
            )?)),
            _ => Err(TreeError::configuration(format!(
                "unsupported source extension: {extension}"
            ))),
        }
    }
}
