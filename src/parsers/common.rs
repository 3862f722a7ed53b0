use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Component, Path, PathBuf};
use tree_sitter::{Language, Node as TSNode, Parser, Tree};

use crate::error::TreeError;

pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    pub fn new(language: Language) -> Result<Self, TreeError> {
        let mut parser = Parser::new();
        parser.set_language(language)?;
        Ok(Self { parser })
    }

    /// Parses `source`, rejecting trees with no recognisable top-level structure.
    pub fn parse_source(&mut self, source: &str, file_path: &Path) -> Result<Tree, TreeError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| TreeError::UnparseableStructure {
                path: file_path.to_path_buf(),
                reason: "parser produced no syntax tree".to_string(),
            })?;

        let root = tree.root_node();
        if root.is_error() {
            return Err(TreeError::UnparseableStructure {
                path: file_path.to_path_buf(),
                reason: "source is not a module".to_string(),
            });
        }
        if root.has_error() {
            let mut cursor = root.walk();
            let recognised = root
                .named_children(&mut cursor)
                .filter(|child| child.kind() != "comment")
                .any(|child| !child.is_error());
            if !recognised {
                return Err(TreeError::UnparseableStructure {
                    path: file_path.to_path_buf(),
                    reason: "no top-level statement could be parsed".to_string(),
                });
            }
        }

        Ok(tree)
    }
}

/// Reads a source file with buffering sized to the file.
pub fn read_source(file_path: &Path) -> Result<String, TreeError> {
    let unreadable = |source| TreeError::UnreadableFile {
        path: file_path.to_path_buf(),
        source,
    };

    let file = File::open(file_path).map_err(unreadable)?;
    let file_size = file.metadata().map_err(unreadable)?.len() as usize;

    let mut reader = BufReader::with_capacity(file_size.clamp(1, 8192), file);
    let mut content = String::with_capacity(file_size);
    reader.read_to_string(&mut content).map_err(unreadable)?;
    Ok(content)
}

pub fn extract_text<'a>(node: &TSNode, source: &'a [u8]) -> &'a str {
    std::str::from_utf8(&source[node.byte_range()]).unwrap_or("")
}

pub fn find_child_by_kind<'a>(node: &TSNode<'a>, kind: &str) -> Option<TSNode<'a>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == kind);
    found
}

pub fn has_child_kind(node: &TSNode, kind: &str) -> bool {
    find_child_by_kind(node, kind).is_some()
}

/// Strips the quotes from a string literal node's text.
pub fn string_literal(node: &TSNode, source: &[u8]) -> String {
    extract_text(node, source)
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .to_string()
}

/// Resolves `.` and `..` without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if normalized.file_name().is_some() {
                    normalized.pop();
                } else {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
