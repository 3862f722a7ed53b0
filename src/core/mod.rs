pub mod analyzer;
pub mod graph;
pub mod outline;
pub mod roots;
pub mod scanner;
pub mod symbols;

pub use analyzer::{Analysis, ComponentAnalyzer, SkippedFile};
pub use graph::{ComponentRecord, GraphBuilder, Origin, UsageEdge, UsageGraph};
pub use outline::{OutlineEntry, OutlineWalker};
pub use roots::select_roots;
pub use scanner::FileScanner;
pub use symbols::SymbolTable;
