use std::path::Path;

use super::common::TreeSitterParser;
use super::jsx::ComponentExtractor;
use super::{ComponentParser, ExtractionResult};
use crate::config::ComponentPattern;
use crate::error::TreeError;

/// `.jsx` / `.js` sources. The JavaScript grammar parses JSX natively.
pub struct JavaScriptParser {
    pattern: ComponentPattern,
}

impl JavaScriptParser {
    pub fn new(pattern: ComponentPattern) -> Result<Self, TreeError> {
        // Fail early if the grammar and runtime versions disagree.
        TreeSitterParser::new(tree_sitter_javascript::language())?;
        Ok(Self { pattern })
    }
}

impl ComponentParser for JavaScriptParser {
    fn extract(&self, source: &str, file_path: &Path) -> Result<ExtractionResult, TreeError> {
        let mut parser = TreeSitterParser::new(tree_sitter_javascript::language())?;
        let tree = parser.parse_source(source, file_path)?;
        Ok(ComponentExtractor::new(&self.pattern).extract(&tree, source, file_path))
    }

    fn language_name(&self) -> &str {
        "javascript"
    }
}
