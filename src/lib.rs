pub mod utils;
pub mod schema;
pub mod escapes;
pub mod segment;
pub mod remap;
pub mod config;
pub mod context;
pub mod ruby;
pub mod wrap;
pub mod width;
pub mod encoding;
pub mod string_types;
pub mod batch;
pub mod io;

// 重新导出主要结构
pub use utils::{is_translatable, EscapeError};
pub use schema::{SchemaPair, SchemaTable};
pub use escapes::{EscapeSequenceSet, EscapeSequences, Preset};
pub use segment::{segment, Segment, Segments};
pub use remap::{reinsert, split_translation, SnapDirection, SplitOptions};
pub use config::EscapeConfig;
pub use context::EscapeText;
pub use string_types::ExtractedLine;
pub use batch::{apply_translations, collect_stats, extract_lines, BatchStats};
