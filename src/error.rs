//! Error types for the crmchat library.
//!
//! All fatal failures are represented by the [`ChatError`] enum. Recoverable,
//! user-facing conditions (unrecognized intent, unknown company, empty result
//! sets) are not errors; they are modeled as reply variants in
//! [`crate::lookup::QueryReply`] so the presentation layer can render them.
//!
//! # Examples
//!
//! ```
//! use crmchat::error::{ChatError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ChatError::data("companies file is empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for crmchat operations.
///
/// These are construction-time and I/O failures, the only fatal class: the
/// assistant cannot function without its dataset, template bank, or embedding
/// index.
#[derive(Error, Debug)]
pub enum ChatError {
    /// I/O errors (file operations, stdin, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Dataset errors (missing files, malformed rows, empty tables)
    #[error("Data error: {0}")]
    Data(String),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Template bank errors (unknown phrasing, empty bank)
    #[error("Template error: {0}")]
    Template(String),

    /// Embedding errors (untrained engine, dimension mismatch)
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with ChatError.
pub type Result<T> = std::result::Result<T, ChatError>;

impl ChatError {
    /// Create a new data error.
    pub fn data<S: Into<String>>(msg: S) -> Self {
        ChatError::Data(msg.into())
    }

    /// Create a new template error.
    pub fn template<S: Into<String>>(msg: S) -> Self {
        ChatError::Template(msg.into())
    }

    /// Create a new embedding error.
    pub fn embedding<S: Into<String>>(msg: S) -> Self {
        ChatError::Embedding(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        ChatError::InvalidOperation(msg.into())
    }
}
