//! fhtml screen tree
//!
//! Data model for one screen of a design file, plus decoding of the design
//! tool's JSON export into that model.
//!
//! ```text
//! JSON export → decode_document() → Node (screen root)
//! ```
//!
//! # Example
//!
//! ```
//! let json = r#"{"id": "1:1", "name": "Screen", "type": "FRAME",
//!     "absoluteBoundingBox": {"x": 0, "y": 0, "width": 375, "height": 812}}"#;
//! let root = fhtml_tree::decode_document(json).unwrap();
//! assert_eq!(root.count(), 1);
//! ```

pub mod decode;
pub mod node;

pub use decode::{decode_document, decode_document_with, RootSelector};
pub use node::{Node, NodeKind, Rect};

/// Failure to obtain or understand a source description.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    /// The source could not be read or fetched (network, rate limit, missing file).
    #[error("source unavailable ({source_name}): {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    /// The source was read but does not describe a screen.
    #[error("malformed input: {message}")]
    MalformedInput { message: String },
}

impl LoadError {
    pub fn unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        LoadError::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        LoadError::MalformedInput {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::malformed(err.to_string())
    }
}
