//! Error types for document construction and loading.
//!
//! All failures in this crate are synchronous and surfaced to the immediate
//! caller; nothing is retried or recovered locally. Construction either fully
//! succeeds (the root is completely populated) or fails before a [`Node`]
//! is returned.
//!
//! ## Error Categories
//!
//! - **Argument errors**: a declaration hook required an argument that was not
//!   supplied, or a supplied/default value has the wrong kind
//! - **Format errors**: a file path has neither a YAML nor a JSON extension
//! - **Shape errors**: a mapping was required where another value was found
//! - **Parse and I/O errors**: propagated unchanged from the YAML/JSON parsers
//!   and the filesystem
//!
//! [`Node`]: crate::Node

use crate::value::Kind;
use std::path::PathBuf;
use thiserror::Error;

/// Represents all possible errors produced while constructing, loading or
/// merging documents.
#[derive(Debug, Error)]
pub enum Error {
    /// A required constructor argument was not supplied.
    ///
    /// Raised by [`Node::need`](crate::Node::need) from inside a declaration
    /// hook. The message is the hook author's description of what is missing.
    #[error("missing required argument \"{key}\": {msg}")]
    MissingArgument { key: String, msg: String },

    /// A supplied or defaulted argument value has the wrong kind.
    #[error("argument \"{key}\": expected {expected}, found {found}")]
    KindMismatch {
        key: String,
        expected: Kind,
        found: Kind,
    },

    /// A file path has neither a recognized YAML nor JSON extension.
    ///
    /// Detected before the file is read, so no partial state is ever applied.
    #[error("unsupported file format (expected .yaml, .yml or .json): {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A mapping was required but another value was found.
    #[error("expected a mapping, found {0}")]
    NotAMapping(Kind),

    /// Filesystem error while reading a document source file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed YAML content, propagated unchanged from the parser.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Malformed JSON content, propagated unchanged from the parser.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
