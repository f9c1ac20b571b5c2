//! Access-log line grammar.
//!
//! Matches one raw text line against the fixed "combined" log format and
//! extracts typed fields. Parsing is total over strings: a line that does not
//! match the grammar, or whose timestamp is not a valid calendar datetime,
//! yields `None` rather than an error, so noisy logs ingest tolerantly.

use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

use crate::record::ParsedRecord;

/// Combined-format line pattern:
/// `<ip> <ident> <ident> [<ts>] "<method> <path> <proto>" <status> <bytes> "<referrer>" "<ua>"`
static LOG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?x)
        ^(?P<ip>\S+)\s+\S+\s+\S+\s+
        \[(?P<ts>[^\]]+)\]\s+
        "(?P<method>\S+)\s+(?P<path>\S+)\s+(?P<proto>[^"]+)"\s+
        (?P<status>\d{3})\s+
        (?P<bytes>(?:\d+|-))\s+
        "[^"]*"\s+
        "(?P<ua>[^"]*)"$
        "#,
    )
    .expect("Invalid log grammar pattern")
});

/// Timestamp format of the left portion of the bracketed token,
/// e.g. `10/Nov/2025:10:21:34` from `10/Nov/2025:10:21:34 +0530`.
const TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S";

/// Attempt to parse one raw line into a [`ParsedRecord`].
///
/// Returns `None` for any line that does not match the grammar or whose
/// timestamp is not a valid calendar datetime. A bytes field of `-` (no body
/// sent) normalizes to 0.
pub fn parse_line(line: &str) -> Option<ParsedRecord> {
    let caps = LOG_PATTERN.captures(line.trim())?;

    let timestamp = normalize_timestamp(caps.name("ts")?.as_str())?;

    let status: i32 = caps.name("status")?.as_str().parse().ok()?;

    let bytes_field = caps.name("bytes")?.as_str();
    let bytes_sent: i64 = if bytes_field == "-" {
        0
    } else {
        bytes_field.parse().ok()?
    };

    Some(ParsedRecord {
        client_ip: caps.name("ip")?.as_str().to_string(),
        timestamp,
        request_path: caps.name("path")?.as_str().to_string(),
        status,
        bytes_sent,
        user_agent: caps.name("ua")?.as_str().to_string(),
    })
}

/// Normalize the bracketed timestamp token to a civil datetime.
///
/// Splits on the first space and parses only the left portion; the timezone
/// offset is discarded because partitioning needs calendar date and hour,
/// not absolute instants.
fn normalize_timestamp(token: &str) -> Option<NaiveDateTime> {
    let main = token.split(' ').next()?;
    NaiveDateTime::parse_from_str(main, TIMESTAMP_FORMAT).ok()
}
