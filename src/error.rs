//! Crate-wide error type.
//!
//! The taxonomy separates systemic failures (which abort a run) from
//! per-record input problems (which are counted skips inside
//! [`ScanStats`](crate::source::ScanStats) and never reach this type).

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LexigraphError>;

/// All fatal error conditions a pipeline run can hit.
#[derive(Debug, Error)]
pub enum LexigraphError {
    /// Invalid configuration, rejected before any scan begins.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The lemmatizer could not produce a lemma for a token.
    ///
    /// The lemmatizer is authoritative: a token it cannot handle indicates
    /// a data or dependency problem, so the run aborts rather than
    /// silently skewing the statistics.
    #[error("failed to lemmatize token {token:?}")]
    Lemmatize { token: String },

    /// A collaborator (tagger, lemma dictionary) could not be constructed.
    #[error("collaborator unavailable: {0}")]
    Collaborator(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A persisted artifact exists but could not be parsed.
    #[error("malformed artifact {path}: {source}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Writing an artifact to its final path failed.
    #[error("failed to persist artifact {path}: {message}")]
    Persist { path: PathBuf, message: String },
}
