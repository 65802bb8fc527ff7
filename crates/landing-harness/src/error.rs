// Error types for landing-harness

use std::time::Duration;
use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving targets or asserting page state
#[derive(Debug, Error)]
pub enum Error {
    /// No candidate strategy produced a visible match before the wait budget ran out
    ///
    /// Carries every candidate selector that was attempted, in priority order,
    /// so a failing scenario can be debugged from its report alone.
    #[error(
        "Resolution timeout after {elapsed:?} for target '{target}'. Candidates tried: {}",
        format_candidates(.candidates)
    )]
    ResolutionTimeout {
        target: String,
        candidates: Vec<String>,
        elapsed: Duration,
    },

    /// An observed value did not satisfy the expected relation
    #[error("Assertion failed: {assertion}. Expected: {expected}, actual: {actual}")]
    AssertionFailure {
        assertion: String,
        expected: String,
        actual: String,
    },

    /// A resolved element was detached from the document before it could be read
    ///
    /// The element must be resolved again; reads are never retried silently.
    #[error("Attribute unavailable: element '{selector}' (index {index}) went stale while reading {probe}")]
    AttributeUnavailable {
        selector: String,
        index: usize,
        probe: String,
    },

    /// Target descriptor is malformed (e.g. no candidates)
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// Invalid argument provided to method
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be built or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure reported by the browser automation runtime
    #[error("Browser runtime error: {0}")]
    Runtime(#[from] playwright_rs::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Builds an [`Error::AssertionFailure`], rendering absent values as `<absent>`.
    pub fn assertion(
        assertion: impl Into<String>,
        expected: impl Into<String>,
        actual: Option<&str>,
    ) -> Self {
        Error::AssertionFailure {
            assertion: assertion.into(),
            expected: expected.into(),
            actual: display_value(actual),
        }
    }

    /// Whether the failure means the element has to be resolved again.
    ///
    /// Stale handles are treated the same as a resolution that never succeeded.
    pub fn is_resolution_failure(&self) -> bool {
        match self {
            Error::ResolutionTimeout { .. } | Error::AttributeUnavailable { .. } => true,
            Error::Context(_, inner) => inner.is_resolution_failure(),
            _ => false,
        }
    }

    /// Candidate selectors attempted before the failure, if any.
    pub fn candidates(&self) -> Option<&[String]> {
        match self {
            Error::ResolutionTimeout { candidates, .. } => Some(candidates),
            Error::Context(_, inner) => inner.candidates(),
            _ => None,
        }
    }
}

/// Renders an optional observed value for diagnostics.
pub(crate) fn display_value(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("{:?}", v),
        None => "<absent>".to_string(),
    }
}

fn format_candidates(candidates: &[String]) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| format!("[{}] {}", i + 1, c))
        .collect::<Vec<_>>()
        .join(", ")
}
