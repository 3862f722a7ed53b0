use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use component_tree::config::{
    ComponentPattern, DuplicatePolicy, TreeConfig, DEFAULT_COMPONENT_PATTERN,
};
use component_tree::core::{Analysis, ComponentAnalyzer};
use component_tree::formatters::{JsonCompactFormatter, MarkmapFormatter};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "component-tree",
    version,
    about = "Generate a component usage tree for a React project"
)]
struct Cli {
    /// Directory of the React project
    #[arg(value_name = "DIRECTORY", default_value = ".")]
    directory: PathBuf,

    /// Library names whose components are left out of the tree
    #[arg(long, value_name = "LIB", num_args = 0.., value_delimiter = ',')]
    ignore_libs: Vec<String>,

    /// Only include components defined in the project
    #[arg(long)]
    project_only: bool,

    /// Only scan these directories (relative to DIRECTORY), e.g. --in ./src/components ./src/pages
    #[arg(long = "in", value_name = "DIR", num_args = 1..)]
    include_dirs: Option<Vec<PathBuf>>,

    /// Output file path, or "-" for stdout
    #[arg(short, long, value_name = "FILE", default_value = "componentsTree.mm.md")]
    output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markmap)]
    format: OutputFormat,

    /// Comma-separated source file extensions to scan
    #[arg(long, value_name = "EXTS", value_delimiter = ',', default_value = "jsx,tsx")]
    extensions: Vec<String>,

    /// Regex deciding which identifiers count as components
    #[arg(long, value_name = "REGEX", default_value = DEFAULT_COMPONENT_PATTERN)]
    component_pattern: String,

    /// Which definition wins when two project files declare the same component
    #[arg(long, value_enum, default_value_t = Duplicates::First)]
    duplicates: Duplicates,

    /// Document title in the markmap frontmatter
    #[arg(long, default_value = component_tree::formatters::markmap::DEFAULT_TITLE)]
    title: String,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Markmap,
    JsonCompact,
}

impl OutputFormat {
    fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Markmap => "markmap",
            OutputFormat::JsonCompact => "json-compact",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum Duplicates {
    First,
    Last,
}

impl From<Duplicates> for DuplicatePolicy {
    fn from(value: Duplicates) -> Self {
        match value {
            Duplicates::First => DuplicatePolicy::FirstSeen,
            Duplicates::Last => DuplicatePolicy::LastSeen,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `-o -` output stays clean.
    let filter = match cli.verbose {
        0 => EnvFilter::new("component_tree=info"),
        1 => EnvFilter::new("component_tree=debug"),
        _ => EnvFilter::new("component_tree=trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let start_time = Instant::now();

    let mut config = TreeConfig::new()
        .with_ignore_libraries(
            cli.ignore_libs
                .iter()
                .map(|lib| lib.trim())
                .filter(|lib| !lib.is_empty()),
        )
        .with_project_only(cli.project_only)
        .with_extensions(cli.extensions.iter().map(|ext| ext.trim()))
        .with_component_pattern(ComponentPattern::new(&cli.component_pattern)?)
        .with_duplicate_policy(cli.duplicates.into());
    if let Some(dirs) = &cli.include_dirs {
        config = config.with_scan_directories(dirs.iter().cloned());
    }

    info!(
        directory = %cli.directory.display(),
        format = cli.format.as_str(),
        ignore_libs = ?config.ignore_libraries,
        project_only = config.project_only,
        "component-tree"
    );

    let analyzer = ComponentAnalyzer::new(config);
    let analysis = analyzer.analyze(&cli.directory)?;

    if !analysis.skipped.is_empty() {
        warn!(count = analysis.skipped.len(), "some files were skipped");
    }

    let rendered = render(&cli, &analysis)?;
    if cli.output.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
    } else {
        std::fs::write(&cli.output, rendered)?;
        info!(output = %cli.output.display(), "generated");
    }

    info!(
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        files = analysis.files_analyzed,
        roots = analysis.roots.len(),
        "done"
    );
    Ok(())
}

fn render(cli: &Cli, analysis: &Analysis) -> Result<String> {
    match cli.format {
        OutputFormat::Markmap => Ok(MarkmapFormatter::new()
            .with_title(cli.title.clone())
            .format(analysis)),
        OutputFormat::JsonCompact => JsonCompactFormatter::new().with_pretty(true).format(analysis),
    }
}
