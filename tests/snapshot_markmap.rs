use component_tree::config::TreeConfig;
use component_tree::core::ComponentAnalyzer;
use component_tree::formatters::MarkmapFormatter;
use std::path::PathBuf;

fn sources(files: &[(&str, &str)]) -> Vec<(PathBuf, String)> {
    files
        .iter()
        .map(|(path, code)| (PathBuf::from(path), code.to_string()))
        .collect()
}

fn render(config: TreeConfig, files: &[(&str, &str)]) -> String {
    let analysis = ComponentAnalyzer::new(config).analyze_sources(sources(files));
    MarkmapFormatter::new().format(&analysis)
}

const LAYOUT_APP: &[(&str, &str)] = &[
    (
        "src/Layout.jsx",
        r#"import Navbar from './Navbar';
import Home from './Home';

export default function Layout() {
  return (
    <div>
      <Navbar />
      <Home />
    </div>
  );
}
"#,
    ),
    (
        "src/Home.jsx",
        r#"import SlideShowA from './SlideShowA';
import SlideShowB from './SlideShowB';

export default function Home() {
  return (
    <section>
      <SlideShowA />
      <SlideShowB />
    </section>
  );
}
"#,
    ),
    (
        "src/Navbar.jsx",
        "export default function Navbar() { return <nav />; }\n",
    ),
    (
        "src/SlideShowA.jsx",
        "export default function SlideShowA() { return <div />; }\n",
    ),
    (
        "src/SlideShowB.jsx",
        "export default function SlideShowB() { return <div />; }\n",
    ),
];

#[test]
fn layout_scenario_renders_single_outline() {
    let out = render(TreeConfig::new(), LAYOUT_APP);

    let expected = "---
title: Component Tree
markmap:
  colorFreezeLevel: 4
---

## Layout

- Layout
  - Navbar
  - Home
    - SlideShowA
    - SlideShowB
";
    assert_eq!(out, expected);
}

#[test]
fn rendering_is_deterministic() {
    let first = render(TreeConfig::new(), LAYOUT_APP);
    let second = render(TreeConfig::new(), LAYOUT_APP);
    assert_eq!(first, second);
}

#[test]
fn sections_are_separated_by_blank_lines() {
    let files = &[
        (
            "src/Header.jsx",
            "export const Header = () => <Logo />;\n",
        ),
        (
            "src/Footer.jsx",
            "export const Footer = () => <Links />;\n",
        ),
    ];
    let out = render(TreeConfig::new(), files);

    assert!(out.starts_with("---\ntitle: Component Tree\n"));
    assert!(out.ends_with(
        "## Header\n\n- Header\n  - Logo\n\n## Footer\n\n- Footer\n  - Links\n"
    ));
}

#[test]
fn custom_title_appears_in_frontmatter() {
    let analysis = ComponentAnalyzer::new(TreeConfig::new()).analyze_sources(sources(LAYOUT_APP));
    let out = MarkmapFormatter::new()
        .with_title("Storefront")
        .with_color_freeze_level(2)
        .format(&analysis);
    assert!(out.starts_with("---\ntitle: Storefront\nmarkmap:\n  colorFreezeLevel: 2\n---\n\n"));
}

#[test]
fn shared_component_appears_under_every_parent() {
    let files = &[
        (
            "src/Pokemon.jsx",
            "export default function Pokemon() { return <><DetailsBody /><Sprites /></>; }\n",
        ),
        (
            "src/DetailsBody.jsx",
            "export default function DetailsBody() { return <Separator />; }\n",
        ),
        (
            "src/Sprites.jsx",
            "export default function Sprites() { return <Separator />; }\n",
        ),
        (
            "src/Separator.jsx",
            "export default function Separator() { return <hr />; }\n",
        ),
    ];
    let out = render(TreeConfig::new(), files);

    assert!(out.contains(
        "- Pokemon\n  - DetailsBody\n    - Separator\n  - Sprites\n    - Separator\n"
    ));
    assert_eq!(out.matches("## ").count(), 1);
}

#[test]
fn cycles_render_the_repeated_component_as_leaf() {
    let files = &[
        (
            "src/App.jsx",
            "export default function App() { return <Menu />; }\n",
        ),
        (
            "src/Menu.jsx",
            "export default function Menu() { return <SubMenu />; }\n",
        ),
        (
            "src/SubMenu.jsx",
            "export default function SubMenu() { return <Menu />; }\n",
        ),
    ];
    let out = render(TreeConfig::new(), files);

    assert!(out.ends_with("## App\n\n- App\n  - Menu\n    - SubMenu\n      - Menu\n"));
}

#[test]
fn ignored_library_components_never_render() {
    let files = &[(
        "src/Toolbar.jsx",
        r#"import { Button } from 'antd';
import Search from './Search';

export default function Toolbar() {
  return <div><Button /><Search /></div>;
}
"#,
    )];
    let config = TreeConfig::new().with_ignore_libraries(["antd"]);
    let out = render(config, files);

    assert!(!out.contains("Button"));
    assert!(out.contains("- Toolbar\n  - Search\n"));
}

#[test]
fn project_only_renders_only_project_components() {
    let files = &[
        (
            "src/Toolbar.jsx",
            r#"import { Button } from 'antd';
import Search from './Search';

export default function Toolbar() {
  return <div><Button /><Search /><Unknown /></div>;
}
"#,
        ),
        (
            "src/Search.jsx",
            "export default function Search() { return <input />; }\n",
        ),
    ];
    let out = render(TreeConfig::new().with_project_only(true), files);

    assert!(out.ends_with("## Toolbar\n\n- Toolbar\n  - Search\n"));
}
