//! Error taxonomy shared by the compiler, the store and the binaries.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while compiling or loading dex tables.
#[derive(Debug, Error)]
pub enum Error {
    /// A cross-reference locator did not end in a numeric segment.
    #[error("malformed locator: {0:?}")]
    MalformedLocator(String),

    /// A strict enumeration parse met a name outside its closed set.
    #[error("unknown {domain} value: {value:?}")]
    UnknownEnumValue { domain: &'static str, value: String },

    /// A raw record the run depends on does not exist.
    #[error("missing source file: {}", .0.display())]
    MissingSourceFile(PathBuf),

    /// A raw record exists but is not the expected JSON shape.
    #[error("malformed source document {}: {source}", .path.display())]
    MalformedSourceDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Overlays were not strictly ascending, or a bound left the supported range.
    #[error("overlay order violated: {0}")]
    OverlayOrder(String),

    /// A compiled table listed the same id twice.
    #[error("duplicate {kind} id {id}")]
    DuplicateRecord { kind: &'static str, id: u16 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn unknown(domain: &'static str, value: &str) -> Self {
        Error::UnknownEnumValue {
            domain,
            value: value.to_string(),
        }
    }
}

/// Result type for dex operations.
pub type Result<T> = std::result::Result<T, Error>;
