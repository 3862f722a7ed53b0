use criterion::{black_box, criterion_group, criterion_main, Criterion};
use component_tree::config::TreeConfig;
use component_tree::core::ComponentAnalyzer;
use component_tree::formatters::MarkmapFormatter;
use std::path::PathBuf;

/// A layered app: each page renders a band of widgets, and every widget
/// renders the shared primitives, so outlines repeat subtrees heavily.
fn generate_sources(pages: usize, widgets: usize) -> Vec<(PathBuf, String)> {
    let mut sources = Vec::new();

    let page_tags: String = (0..pages).map(|i| format!("<Page{i} />")).collect();
    sources.push((
        PathBuf::from("src/App.jsx"),
        format!("export default function App() {{ return <main>{page_tags}</main>; }}\n"),
    ));

    for i in 0..pages {
        let widget_tags: String = (0..widgets)
            .map(|w| format!("<Widget{} />", (i + w) % widgets))
            .collect();
        sources.push((
            PathBuf::from(format!("src/pages/Page{i}.jsx")),
            format!(
                r#"import {{ Button }} from 'antd';

// <Commented{i} /> should be ignored
export default function Page{i}() {{
  return (
    <section>
      {widget_tags}
      <Button />
    </section>
  );
}}
"#
            ),
        ));
    }

    for w in 0..widgets {
        sources.push((
            PathBuf::from(format!("src/widgets/Widget{w}.tsx")),
            format!(
                r#"import React from 'react';

export const Widget{w}: React.FC = () => (
  <div>
    <Icon />
    <Label />
  </div>
);
"#
            ),
        ));
    }

    sources
}

fn benchmark_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("component_analysis");
    let sources = generate_sources(20, 30);

    group.bench_function("analyze_sources", |b| {
        b.iter(|| {
            let analyzer = ComponentAnalyzer::new(TreeConfig::new());
            black_box(analyzer.analyze_sources(sources.clone()))
        })
    });

    let analysis = ComponentAnalyzer::new(TreeConfig::new().with_ignore_libraries(["antd"]))
        .analyze_sources(sources.clone());
    group.bench_function("render_markmap", |b| {
        b.iter(|| black_box(MarkmapFormatter::new().format(&analysis)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_analysis);
criterion_main!(benches);
