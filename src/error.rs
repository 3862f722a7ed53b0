use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while discovering, reading and extracting component sources.
///
/// Per-file variants (`UnreadableFile`, `UnparseableStructure`) are recovered by
/// the analyzer, which skips the file and keeps going. `Configuration` is fatal
/// and surfaces before any file is read.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The file was discovered but could not be read as UTF-8 text.
    #[error("failed to read {}: {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file text has no recognisable module structure.
    #[error("unparseable component source {}: {reason}", path.display())]
    UnparseableStructure { path: PathBuf, reason: String },

    /// Invalid run configuration (missing directories, bad patterns).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The tree-sitter grammar could not be loaded.
    #[error("grammar error: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
}

impl TreeError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// True for errors that only affect a single file.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            Self::UnreadableFile { .. } | Self::UnparseableStructure { .. }
        )
    }
}
