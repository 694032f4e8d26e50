//! Error types
//!
//! Malformed terminal output is never an error; only failures of the byte
//! source itself are reported.

use thiserror::Error;

/// Errors surfaced by reader-driven ingestion
#[derive(Debug, Error)]
pub enum Error {
    /// The byte source failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The byte source reached end-of-stream
    #[error("stream closed")]
    StreamClosed,
}

pub type Result<T> = std::result::Result<T, Error>;
