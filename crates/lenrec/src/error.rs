use std::path::PathBuf;

use thiserror::Error;

/// Errors that may occur while transducing, parsing, or indexing
/// length-indicated record files.
#[derive(Debug, Error)]
pub enum LenrecError {
    #[error("input `{path}` could not be opened: {source}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("output `{path}` could not be created: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read input line {line_number}: {source}")]
    ReadLine {
        line_number: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("input line {line_number} is not valid UTF-8")]
    InvalidUtf8 { line_number: usize },
    #[error("failed to write output record: {0}")]
    WriteRecord(#[source] std::io::Error),
    #[error("failed to flush output: {0}")]
    FlushOutput(#[source] std::io::Error),
    #[error("csv line has {found} fields, expected {expected}: `{line}`")]
    CsvFieldCount {
        expected: usize,
        found: usize,
        line: String,
    },
    #[error("csv field `{field}` is not numeric: `{line}`")]
    CsvField { field: &'static str, line: String },
    #[error("line has no decimal length prefix: `{line}`")]
    MissingLengthPrefix { line: String },
    #[error("length prefix {declared} does not match content of {actual} characters: `{line}`")]
    LengthMismatch {
        declared: usize,
        actual: usize,
        line: String,
    },
    #[error("index `{path}` could not be opened: {source}")]
    OpenIndex {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("index `{path}` could not be written: {source}")]
    WriteIndex {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("index `{path}` is truncated at byte {offset}")]
    TruncatedIndex { path: PathBuf, offset: u64 },
    #[error("key `{key}` exceeds the 255-byte index entry limit")]
    KeyTooLong { key: String },
    #[error("failed to seek data file to offset {offset}: {source}")]
    Seek {
        offset: u64,
        #[source]
        source: std::io::Error,
    },
}

impl LenrecError {
    /// Classifies a `read_line` failure, surfacing invalid UTF-8 as its own
    /// variant so decode errors are distinguishable from transport errors.
    pub(crate) fn from_read(line_number: usize, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::InvalidData {
            LenrecError::InvalidUtf8 { line_number }
        } else {
            LenrecError::ReadLine {
                line_number,
                source,
            }
        }
    }
}
