// src/error.rs
//! Error type shared by the catalog, the record codec and the on-disk store.
//!
//! Parsing problems ([`PairsError::UnknownToken`], [`PairsError::MalformedRecord`])
//! are only surfaced to callers in strict mode; permissive loads skip the
//! offending line. I/O failures are always reported.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PairsError {
    /// A token name that is not part of the catalog.
    #[error("unknown token kind {name:?}")]
    UnknownToken { name: String },

    /// A line that does not split into exactly two token references.
    #[error("malformed record {text:?}")]
    MalformedRecord { text: String },

    /// A qualifier that would make written records unreadable.
    #[error("invalid qualifier {qualifier:?}: must not contain '{{', '}}', ',' or line breaks, nor start or end with whitespace")]
    InvalidQualifier { qualifier: String },

    /// A record-level error tagged with its 1-based line number.
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<PairsError>,
    },

    /// The pairs file exists but could not be read.
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the pairs file failed.
    #[error("failed to write {}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid pairs JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A JSON matrix built against a different token catalog.
    #[error("token catalog mismatch: expected {expected} kinds in catalog order, found {found:?}")]
    CatalogMismatch { expected: usize, found: Vec<String> },
}

impl PairsError {
    /// True for the per-line errors a permissive load skips over.
    pub fn is_record_error(&self) -> bool {
        match self {
            PairsError::UnknownToken { .. } | PairsError::MalformedRecord { .. } => true,
            PairsError::Line { source, .. } => source.is_record_error(),
            _ => false,
        }
    }
}
