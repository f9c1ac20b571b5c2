//! Source side of the pipeline: reading the raw log file and matching lines
//! against the access-log grammar.

mod grammar;
mod reader;

pub use grammar::parse_line;
pub use reader::{SourceStats, parse_lines, read_log_file};
