use component_tree::config::{DuplicatePolicy, TreeConfig};
use component_tree::core::roots::{select_roots, unreachable_components};
use component_tree::core::{GraphBuilder, Origin, SymbolTable, UsageGraph};
use component_tree::parsers::ExtractionResult;

fn build(results: &[ExtractionResult], config: &TreeConfig) -> UsageGraph {
    let symbols = SymbolTable::build(results, DuplicatePolicy::FirstSeen);
    GraphBuilder::new(&symbols, config).build(results)
}

fn names(graph: &UsageGraph, indices: &[petgraph::graph::NodeIndex]) -> Vec<String> {
    indices.iter().map(|&i| graph.name(i).to_string()).collect()
}

#[test]
fn roots_follow_discovery_order() {
    let results = vec![
        ExtractionResult::new("src/Sidebar.jsx")
            .with_definition("Sidebar")
            .with_reference("Sidebar", "Icon", Origin::Unknown),
        ExtractionResult::new("src/Home.jsx").with_definition("Home"),
        ExtractionResult::new("src/Layout.jsx")
            .with_definition("Layout")
            .with_reference("Layout", "Home", Origin::Unknown),
    ];

    let graph = build(&results, &TreeConfig::new());
    let roots = select_roots(&graph);
    assert_eq!(names(&graph, &roots), vec!["Sidebar", "Layout"]);
}

#[test]
fn unused_project_component_is_its_own_root() {
    let results = vec![ExtractionResult::new("src/Orphan.jsx").with_definition("Orphan")];
    let graph = build(&results, &TreeConfig::new());
    assert_eq!(names(&graph, &select_roots(&graph)), vec!["Orphan"]);
}

#[test]
fn filtering_promotes_components_to_roots() {
    let results = vec![
        ExtractionResult::new("src/Page.jsx")
            .with_definition("Page")
            .with_reference("Page", "Grid", Origin::ExternalPackage("lib-grid".into())),
        ExtractionResult::new("src/Grid.jsx").with_definition("Grid"),
    ];

    let unfiltered = build(&results, &TreeConfig::new());
    assert_eq!(names(&unfiltered, &select_roots(&unfiltered)), vec!["Page"]);

    let config = TreeConfig::new().with_ignore_libraries(["lib-grid"]);
    let filtered = build(&results, &config);
    assert_eq!(names(&filtered, &select_roots(&filtered)), vec!["Page", "Grid"]);
}

#[test]
fn pure_cycles_have_no_root_but_are_reported() {
    let results = vec![
        ExtractionResult::new("src/Ping.jsx")
            .with_definition("Ping")
            .with_reference("Ping", "Pong", Origin::Unknown),
        ExtractionResult::new("src/Pong.jsx")
            .with_definition("Pong")
            .with_reference("Pong", "Ping", Origin::Unknown),
        ExtractionResult::new("src/App.jsx")
            .with_definition("App")
            .with_reference("App", "Label", Origin::Unknown),
    ];

    let graph = build(&results, &TreeConfig::new());
    let roots = select_roots(&graph);
    assert_eq!(names(&graph, &roots), vec!["App"]);
    assert_eq!(
        names(&graph, &unreachable_components(&graph, &roots)),
        vec!["Ping", "Pong"]
    );
}
