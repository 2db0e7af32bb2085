//! Error handling for ScanKit
//!
//! Provides error types for all layers of the toolkit:
//! - Request errors (map-driven builder input)
//! - Render errors (model to DSL-expression translation)
//! - Parse errors (DSL-expression to model translation)
//! - Submit errors (queue/broker submission)
//!
//! All error types use `thiserror` for ergonomic error handling.
//!
//! Cross-field validation (axis-name checks, model/ROI consistency and the
//! like) deliberately does not live here: the scan-execution service raises
//! those when a request is consumed. This layer only fails on errors it can
//! detect locally, and it fails synchronously.

use thiserror::Error;

/// Scan-request assembly error type
///
/// Raised by the map-driven builder path when an untyped input map cannot be
/// converted into the typed request fields. Surfaces from `build()`, never
/// at map-insertion time.
#[derive(Error, Debug)]
pub enum RequestError {
    /// A recognized key held a value of the wrong runtime type
    #[error("Type mismatch for field '{field}': expected {expected}")]
    TypeMismatch {
        /// The builder field the value was destined for.
        field: &'static str,
        /// A description of the expected type.
        expected: &'static str,
        /// The underlying conversion failure.
        #[source]
        source: serde_json::Error,
    },

    /// The input map contained a key no builder field corresponds to
    #[error("Unrecognized scan request field '{field}'")]
    UnrecognizedField {
        /// The unknown key.
        field: String,
    },
}

/// DSL rendering error type
///
/// Raised by the expression factory when a model cannot be rendered. No
/// partial expression text is ever returned.
#[derive(Error, Debug, Clone)]
pub enum RenderError {
    /// The factory was asked to render a subtype it does not recognize
    #[error("Unsupported type for DSL rendering: {type_name}")]
    UnsupportedType {
        /// The unrecognized type name.
        type_name: String,
    },

    /// A field required by the target call shape was absent
    #[error("Cannot render {call}: missing required field '{field}'")]
    MissingField {
        /// The DSL function being rendered.
        call: &'static str,
        /// The absent field.
        field: &'static str,
    },
}

/// DSL parsing error type
///
/// Raised when DSL source text cannot be read back into typed models.
#[derive(Error, Debug, Clone)]
pub enum ParseError {
    /// Malformed expression text
    #[error("Syntax error at offset {position}: {reason}")]
    Syntax {
        /// Byte offset into the source text.
        position: usize,
        /// The reason the text could not be read.
        reason: String,
    },

    /// A call to a function outside the DSL surface
    #[error("Unknown DSL function '{name}'")]
    UnknownFunction {
        /// The unrecognized function name.
        name: String,
    },

    /// An argument had the wrong shape for the called function
    #[error("Bad argument '{argument}' to {function}(): {reason}")]
    BadArgument {
        /// The called DSL function.
        function: &'static str,
        /// The offending argument name or position.
        argument: String,
        /// The reason the argument was rejected.
        reason: String,
    },

    /// A required argument was not supplied
    #[error("{function}() requires argument '{argument}'")]
    MissingArgument {
        /// The called DSL function.
        function: &'static str,
        /// The missing argument name.
        argument: &'static str,
    },

    /// An argument the function does not accept was supplied
    #[error("{function}() got an unexpected argument '{argument}'")]
    UnexpectedArgument {
        /// The called DSL function.
        function: &'static str,
        /// The unexpected argument name.
        argument: String,
    },
}

/// Queue submission error type
///
/// Represents failures between a finished `ScanRequest` and the broker. The
/// broker runtime itself is an external service; these errors cover the
/// client side of the submit/subscribe contract.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// No connection to the broker
    #[error("Not connected to scan broker at {uri}")]
    NotConnected {
        /// The broker URI.
        uri: String,
    },

    /// The submission queue has shut down
    #[error("Submission queue '{queue}' is closed")]
    QueueClosed {
        /// The queue name.
        queue: String,
    },

    /// The bean could not be marshalled for the wire
    #[error("Failed to marshal scan bean: {0}")]
    MarshalFailed(#[from] serde_json::Error),

    /// The broker refused the submission
    #[error("Submission rejected: {reason}")]
    Rejected {
        /// The reason the broker gave.
        reason: String,
    },
}

/// Main error type for ScanKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Scan-request assembly error
    #[error(transparent)]
    Request(#[from] RequestError),

    /// DSL rendering error
    #[error(transparent)]
    Render(#[from] RenderError),

    /// DSL parsing error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Queue submission error
    #[error(transparent)]
    Submit(#[from] SubmitError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a rendering error
    pub fn is_render_error(&self) -> bool {
        matches!(self, Error::Render(_))
    }

    /// Check if this is a parse error
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    /// Check if this is a submission error
    pub fn is_submit_error(&self) -> bool {
        matches!(self, Error::Submit(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
