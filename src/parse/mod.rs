pub mod block_parser;
pub mod block_serializer;
pub mod document_parser;
pub mod document_serializer;
pub mod filter_parser;
pub mod inline_parser;
pub mod inline_serializer;
pub mod table_parser;
pub mod table_serializer;
pub mod timestamp_parser;
pub mod timestamp_serializer;
pub mod title_parser;

pub use document_parser::{heading_from_title, parse_document, parse_document_with_keyword_sets};
pub use document_serializer::{render_title_line, serialize_document};
pub use filter_parser::{FilterError, parse_filter};
pub use inline_parser::{parse_inline, parse_markup};
pub use inline_serializer::{render_fragments, render_fragments_with_width};
pub use table_serializer::render_table;
pub use timestamp_parser::{parse_timestamp, parse_timestamp_range};
pub use timestamp_serializer::{render_timestamp, render_timestamp_range};
pub use title_parser::{parse_title_line, parse_todo_keyword_config};
