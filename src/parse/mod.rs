pub mod line_parser;
pub mod metadata_parser;
pub mod outline_parser;
pub mod outline_serializer;

pub use line_parser::{LineKind, classify};
pub use metadata_parser::{
    ParsedTask, TaskContent, is_valid_key, parse_task_content, parse_task_line,
};
pub use outline_parser::parse_outline;
pub use outline_serializer::{quote_if_needed, serialize_outline, serialize_section, serialize_task};
