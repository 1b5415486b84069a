// src/error.rs
//! Error types shared by every stage of the pipeline.

use std::fmt;

use thiserror::Error;

/// Result type for wiki_tables operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Fewer matching tables than the requested ordinal
    #[error("table #{ordinal} not found ({found} matching tables on the page)")]
    NotFound { ordinal: usize, found: usize },

    /// Spans collide or rows do not line up
    #[error("malformed table: {0}")]
    MalformedTable(Malformed),

    /// No header policy matches the grid width
    #[error("header/column mismatch for width {width}: {detail}")]
    SchemaMismatch { width: usize, detail: String },

    /// Non-2xx HTTP status
    #[error("HTTP error {code}: {body}")]
    Status { code: u16, body: String },

    /// Connection, TLS or read failure
    #[error("request failed: {0}")]
    Transport(String),

    /// MediaWiki answered with an `error` object
    #[error("API error {code}: {info}")]
    Api { code: String, info: String },

    /// JSON envelope without `parse.text.*`
    #[error("unexpected API response: {0}")]
    Envelope(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
}

/// Where and how a table failed to normalize. Positions are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Malformed {
    /// Two cells claim the same grid slot
    OverlappingSpan { row: usize, col: usize },
    /// A rowspan lands past the end of a row with a gap before it
    UnreachedSpan { row: usize, col: usize },
    /// Row width differs from the first row
    RaggedRow { row: usize, expected: usize, found: usize },
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Malformed::OverlappingSpan { row, col } => {
                write!(f, "overlapping span claims at row {row}, column {col}")
            }
            Malformed::UnreachedSpan { row, col } => {
                write!(f, "rowspan into row {row}, column {col} is never reached")
            }
            Malformed::RaggedRow { row, expected, found } => {
                write!(f, "row {row} has {found} columns, expected {expected}")
            }
        }
    }
}

impl From<Malformed> for Error {
    fn from(m: Malformed) -> Self {
        Error::MalformedTable(m)
    }
}

impl From<ureq::Error> for Error {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, resp) => {
                let body = resp.into_string().unwrap_or_default();
                Error::Status { code, body }
            }
            ureq::Error::Transport(t) => Error::Transport(t.to_string()),
        }
    }
}
