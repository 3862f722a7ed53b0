use component_tree::config::TreeConfig;
use component_tree::core::ComponentAnalyzer;
use component_tree::formatters::MarkmapFormatter;
use std::fs;

#[test]
fn analyzer_end_to_end_skips_bad_files() {
    let dir = tempfile::TempDir::new().unwrap();
    let src = dir.path().join("src");
    fs::create_dir_all(&src).unwrap();

    fs::write(
        src.join("App.jsx"),
        "import Panel from './Panel';\nexport default function App() { return <Panel />; }\n",
    )
    .unwrap();
    fs::write(
        src.join("Panel.jsx"),
        "export default function Panel() { return <Chart />; }\n",
    )
    .unwrap();
    // not UTF-8
    fs::write(src.join("Binary.jsx"), [0xff, 0xfe, 0x00, 0x9f]).unwrap();
    fs::write(src.join("Broken.jsx"), "}}}} ))))) ]]]]").unwrap();

    let analyzer = ComponentAnalyzer::new(TreeConfig::new());
    let analysis = analyzer.analyze(dir.path()).unwrap();

    assert_eq!(analysis.files_analyzed, 2);
    let mut skipped: Vec<String> = analysis
        .skipped
        .iter()
        .map(|s| s.path.display().to_string())
        .collect();
    skipped.sort();
    assert_eq!(skipped, vec!["src/Binary.jsx", "src/Broken.jsx"]);

    assert_eq!(analysis.root_names(), vec!["App"]);
    let out = MarkmapFormatter::new().format(&analysis);
    assert!(out.ends_with("## App\n\n- App\n  - Panel\n    - Chart\n"));

    let out_path = dir.path().join("componentsTree.mm.md");
    MarkmapFormatter::new()
        .format_to_file(&analysis, &out_path)
        .unwrap();
    assert_eq!(fs::read_to_string(&out_path).unwrap(), out);
}

#[test]
fn analyzer_rejects_missing_project_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let analyzer = ComponentAnalyzer::new(TreeConfig::new());
    assert!(analyzer.analyze(&dir.path().join("absent")).is_err());
}

#[test]
fn duplicate_definitions_resolve_to_first_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    fs::create_dir_all(&a).unwrap();
    fs::create_dir_all(&b).unwrap();
    fs::write(a.join("Card.jsx"), "export function Card() { return <Body />; }\n").unwrap();
    fs::write(b.join("Card.jsx"), "export function Card() { return <Footer />; }\n").unwrap();

    let analysis = ComponentAnalyzer::new(TreeConfig::new())
        .analyze(dir.path())
        .unwrap();
    let card = analysis.symbols.get("Card").unwrap();
    assert_eq!(
        card.origin,
        component_tree::core::Origin::ProjectFile("a/Card.jsx".into())
    );
    // edges are name-keyed, so usages from both files hang off the one node
    assert_eq!(analysis.graph.child_names("Card"), vec!["Body", "Footer"]);
}
