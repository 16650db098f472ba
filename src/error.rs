//! Error types for document transformation and ingestion.

use thiserror::Error;

// ============================================================================
// TransformError
// ============================================================================

/// Failure produced by [`inject`](crate::inject).
///
/// There is a single failure kind: the input could not be turned into an
/// adaptive document, either because the markup does not parse or because
/// its root element is not `<svg>`. The caller can always recover by asking
/// for new input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The markup is not a well-formed SVG document.
    #[error("invalid SVG document: {message}")]
    InvalidDocument {
        /// Human-readable cause.
        message: String,
    },
}

impl TransformError {
    /// Creates an `InvalidDocument` error with the given message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    /// Returns the human-readable cause.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidDocument { message } => message,
        }
    }
}

impl From<roxmltree::Error> for TransformError {
    fn from(err: roxmltree::Error) -> Self {
        Self::invalid(err.to_string())
    }
}

// ============================================================================
// IngestError
// ============================================================================

/// Reasons an inbound payload is rejected before reaching the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// Neither the media type nor the file name indicate SVG content.
    #[error("please upload an SVG file")]
    NotSvg,

    /// The payload is empty after trimming whitespace.
    #[error("the SVG content is empty")]
    Empty,

    /// The payload is not valid UTF-8 text.
    #[error("the SVG content is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    /// The payload was accepted but the engine rejected the document.
    #[error(transparent)]
    Transform(#[from] TransformError),
}
