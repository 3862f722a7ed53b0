use component_tree::config::{ComponentPattern, TreeConfig};
use component_tree::TreeError;

#[test]
fn default_pattern_accepts_capitalized_identifiers() {
    let pattern = ComponentPattern::default();
    assert!(pattern.matches("Navbar"));
    assert!(pattern.matches("SlideShow2"));
    assert!(!pattern.matches("div"));
    assert!(!pattern.matches("useState"));
    assert!(!pattern.matches(""));
}

#[test]
fn custom_pattern_is_applied() {
    let pattern = ComponentPattern::new(r"^Ui[A-Z]\w*$").unwrap();
    assert!(pattern.matches("UiButton"));
    assert!(!pattern.matches("Button"));
}

#[test]
fn invalid_pattern_is_configuration_error() {
    let err = ComponentPattern::new("[unclosed").unwrap_err();
    assert!(matches!(err, TreeError::Configuration(_)));
    assert!(!err.is_per_file());
}

#[test]
fn ignored_library_matches_scopes() {
    let config = TreeConfig::new().with_ignore_libraries(["antd", "@mui"]);
    assert!(config.is_ignored_library("antd"));
    assert!(config.is_ignored_library("@mui/material"));
    assert!(!config.is_ignored_library("antdx"));
    assert!(!config.is_ignored_library("react"));
}

#[test]
fn missing_scan_directory_is_fatal() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = TreeConfig::new().with_scan_directories(["src/missing"]);
    let err = config.resolve_scan_directories(dir.path()).unwrap_err();
    assert!(matches!(err, TreeError::Configuration(_)));
}

#[test]
fn missing_project_root_is_fatal() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = TreeConfig::new()
        .resolve_scan_directories(&dir.path().join("nope"))
        .unwrap_err();
    assert!(matches!(err, TreeError::Configuration(_)));
}

#[test]
fn scan_directories_resolve_against_root() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("src/pages")).unwrap();
    let config = TreeConfig::new().with_scan_directories(["src/pages"]);
    let resolved = config.resolve_scan_directories(dir.path()).unwrap().unwrap();
    assert_eq!(resolved, vec![dir.path().join("src/pages")]);
}

#[test]
fn extensions_drop_leading_dots() {
    let config = TreeConfig::new().with_extensions([".jsx", "tsx", ""]);
    assert_eq!(config.extensions, vec!["jsx", "tsx"]);
}

#[test]
fn extension_without_grammar_is_fatal() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = TreeConfig::new().with_extensions(["jsx", "vue"]);
    let err = config.resolve_scan_directories(dir.path()).unwrap_err();
    assert!(matches!(err, TreeError::Configuration(_)));
    assert!(err.to_string().contains("vue"));
}
