pub mod json_compact;
pub mod markmap;

pub use json_compact::{JsonCompactFormatter, OutlineNode};
pub use markmap::MarkmapFormatter;
