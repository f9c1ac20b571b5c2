//! Raw log file reader.
//!
//! Reads the configured input file and applies the line grammar to each line.
//! Malformed lines are skipped and counted, never fatal; a missing input file
//! is fatal at startup.

use std::io::ErrorKind;

use tracing::debug;

use crate::emit;
use crate::error::IngestError;
use crate::metrics::events::{LinesRead, LinesSkipped, RecordsParsed};
use crate::record::ParsedRecord;
use crate::source::grammar::parse_line;

/// Line-level counters from one pass over the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceStats {
    /// Non-blank lines seen.
    pub lines_read: usize,
    /// Lines that failed the grammar match or timestamp parse.
    pub lines_skipped: usize,
}

/// Read the input log file and parse every line.
///
/// Returns the parsed records in input order along with line counters.
/// Invalid UTF-8 byte sequences are replaced lossily so a stray binary blob
/// in the log cannot poison the run.
pub async fn read_log_file(path: &str) -> Result<(Vec<ParsedRecord>, SourceStats), IngestError> {
    let raw = tokio::fs::read(path).await.map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            IngestError::MissingInput {
                path: path.to_string(),
                source,
            }
        } else {
            IngestError::ReadInput {
                path: path.to_string(),
                source,
            }
        }
    })?;

    let text = String::from_utf8_lossy(&raw);
    let (records, stats) = parse_lines(&text);

    debug!(
        path,
        lines = stats.lines_read,
        skipped = stats.lines_skipped,
        records = records.len(),
        "Parsed input file"
    );

    Ok((records, stats))
}

/// Parse every non-blank line of `text` with the access-log grammar.
pub fn parse_lines(text: &str) -> (Vec<ParsedRecord>, SourceStats) {
    let mut records = Vec::new();
    let mut stats = SourceStats::default();

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        stats.lines_read += 1;

        match parse_line(line) {
            Some(record) => records.push(record),
            None => {
                stats.lines_skipped += 1;
                debug!(line, "Skipping malformed line");
            }
        }
    }

    emit!(LinesRead {
        count: stats.lines_read as u64
    });
    emit!(LinesSkipped {
        count: stats.lines_skipped as u64
    });
    emit!(RecordsParsed {
        count: records.len() as u64
    });

    (records, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"127.0.0.1 - - [10/Nov/2025:10:21:34 +0530] "GET /api/v1/users?x=1 HTTP/1.1" 404 512 "-" "curl/8.0""#;

    #[test]
    fn test_parse_lines_skips_malformed() {
        let text = format!("{VALID}\ngarbage line\n\n{VALID}\n");
        let (records, stats) = parse_lines(&text);

        assert_eq!(records.len(), 2);
        assert_eq!(stats.lines_read, 3);
        assert_eq!(stats.lines_skipped, 1);
    }

    #[test]
    fn test_parse_lines_blank_lines_not_counted() {
        let (records, stats) = parse_lines("\n\n\n");
        assert!(records.is_empty());
        assert_eq!(stats.lines_read, 0);
        assert_eq!(stats.lines_skipped, 0);
    }

    #[tokio::test]
    async fn test_missing_file_is_structured_error() {
        let err = read_log_file("/nonexistent/access.log").await.unwrap_err();
        assert!(matches!(err, IngestError::MissingInput { .. }));
    }
}
