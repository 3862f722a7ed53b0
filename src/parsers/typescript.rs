use std::path::Path;
use tree_sitter::Language;

use super::common::TreeSitterParser;
use super::jsx::ComponentExtractor;
use super::{ComponentParser, ExtractionResult};
use crate::config::ComponentPattern;
use crate::error::TreeError;

/// TypeScript sources. `.tsx` needs the TSX dialect; plain `.ts` files can
/// still render components through `createElement`.
pub struct TypeScriptParser {
    language: Language,
    language_name: &'static str,
    pattern: ComponentPattern,
}

impl TypeScriptParser {
    pub fn new(pattern: ComponentPattern) -> Result<Self, TreeError> {
        Self::with_language(
            tree_sitter_typescript::language_typescript(),
            "typescript",
            pattern,
        )
    }

    pub fn tsx(pattern: ComponentPattern) -> Result<Self, TreeError> {
        Self::with_language(tree_sitter_typescript::language_tsx(), "tsx", pattern)
    }

    fn with_language(
        language: Language,
        language_name: &'static str,
        pattern: ComponentPattern,
    ) -> Result<Self, TreeError> {
        TreeSitterParser::new(language)?;
        Ok(Self {
            language,
            language_name,
            pattern,
        })
    }
}

impl ComponentParser for TypeScriptParser {
    fn extract(&self, source: &str, file_path: &Path) -> Result<ExtractionResult, TreeError> {
        let mut parser = TreeSitterParser::new(self.language)?;
        let tree = parser.parse_source(source, file_path)?;
        Ok(ComponentExtractor::new(&self.pattern).extract(&tree, source, file_path))
    }

    fn language_name(&self) -> &str {
        self.language_name
    }
}
