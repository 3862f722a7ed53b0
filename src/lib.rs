//! # component-tree
//!
//! Maps which UI components use which others in a React codebase.
//!
//! Component sources (`.jsx` / `.tsx` by default) are parsed with tree-sitter,
//! definitions and JSX usages are collected per file, and the resulting usage
//! graph is rendered as one outline per root component.
//!
//! ## Pipeline
//!
//! - **Scanner**: walks the project, honouring `--in` directory scoping
//! - **Parsers**: extract component definitions and references per file
//! - **Symbol table**: resolves every name to a project file or a package
//! - **Usage graph**: applies the ignore-libs and project-only filters
//! - **Outline**: cycle-safe depth-first walk from each root
//!
//! ## Output Formats
//!
//! - **Markmap**: Markdown with frontmatter, ready for markmap viewers
//! - **JSON-Compact**: nested outlines for programmatic consumption

pub mod config;
pub mod core;
pub mod error;
pub mod formatters;
pub mod parsers;

pub use config::{ComponentPattern, DuplicatePolicy, TreeConfig};
pub use error::TreeError;
