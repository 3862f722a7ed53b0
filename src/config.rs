use regex::Regex;
use std::path::{Path, PathBuf};

use crate::error::TreeError;
use crate::parsers::SUPPORTED_EXTENSIONS;

pub const DEFAULT_COMPONENT_PATTERN: &str = r"^[A-Z][A-Za-z0-9_]*$";
pub const DEFAULT_EXTENSIONS: &[&str] = &["jsx", "tsx"];

/// Classification rule deciding which identifiers are UI components.
#[derive(Debug, Clone)]
pub struct ComponentPattern {
    regex: Regex,
}

impl ComponentPattern {
    pub fn new(pattern: &str) -> Result<Self, TreeError> {
        let regex = Regex::new(pattern).map_err(|err| {
            TreeError::configuration(format!("invalid component pattern '{pattern}': {err}"))
        })?;
        Ok(Self { regex })
    }

    pub fn matches(&self, name: &str) -> bool {
        !name.is_empty() && self.regex.is_match(name)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Default for ComponentPattern {
    fn default() -> Self {
        Self {
            regex: Regex::new(DEFAULT_COMPONENT_PATTERN).expect("default pattern is valid"),
        }
    }
}

/// Which project-local definition wins when two files declare the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    #[default]
    FirstSeen,
    LastSeen,
}

/// Options for one analysis run.
#[derive(Debug, Clone)]
pub struct TreeConfig {
    /// Packages whose components are excluded from the tree.
    pub ignore_libraries: Vec<String>,
    /// Only keep components defined inside the scanned project.
    pub project_only: bool,
    /// Restrict discovery to these directories, relative to the project root.
    pub scan_directories: Option<Vec<PathBuf>>,
    /// File extensions treated as component sources.
    pub extensions: Vec<String>,
    pub component_pattern: ComponentPattern,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            ignore_libraries: Vec::new(),
            project_only: false,
            scan_directories: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            component_pattern: ComponentPattern::default(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl TreeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignore_libraries<I, S>(mut self, libraries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_libraries = libraries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_project_only(mut self, project_only: bool) -> Self {
        self.project_only = project_only;
        self
    }

    pub fn with_scan_directories<I, P>(mut self, directories: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.scan_directories = Some(directories.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.into().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();
        self
    }

    pub fn with_component_pattern(mut self, pattern: ComponentPattern) -> Self {
        self.component_pattern = pattern;
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Checks the project root and extensions, then resolves scan directories
    /// against the root.
    ///
    /// Returns `None` when discovery is unrestricted.
    pub fn resolve_scan_directories(&self, root: &Path) -> Result<Option<Vec<PathBuf>>, TreeError> {
        if !root.is_dir() {
            return Err(TreeError::configuration(format!(
                "project directory {} does not exist",
                root.display()
            )));
        }
        if self.extensions.is_empty() {
            return Err(TreeError::configuration("no source file extensions configured"));
        }
        if let Some(extension) = self
            .extensions
            .iter()
            .find(|ext| !SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        {
            return Err(TreeError::configuration(format!(
                "unsupported source extension: {extension}"
            )));
        }

        let Some(directories) = &self.scan_directories else {
            return Ok(None);
        };

        let mut resolved = Vec::with_capacity(directories.len());
        for directory in directories {
            let path = if directory.is_absolute() {
                directory.clone()
            } else {
                root.join(directory)
            };
            if !path.is_dir() {
                return Err(TreeError::configuration(format!(
                    "scan directory {} does not exist",
                    path.display()
                )));
            }
            resolved.push(path);
        }
        Ok(Some(resolved))
    }

    /// Whether components from `package` are excluded.
    ///
    /// A configured name matches the package itself or any package below it,
    /// so `@mui` covers `@mui/material`.
    pub fn is_ignored_library(&self, package: &str) -> bool {
        self.ignore_libraries.iter().any(|library| {
            let library = library.trim_end_matches('/');
            package == library
                || package
                    .strip_prefix(library)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}
