//! Error handling for the crate.
//!
//! Internally, code returns `Res<T>`, which is an `anyhow` result that accumulates context as it
//! propagates. At public boundaries the error is classified with an `ErrorType` so that callers
//! (the CLI, or any other front end) can tell a rejected form apart from a failed request or from a
//! page that cannot be shown at all.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// The internal result type.
pub(crate) type Res<T> = std::result::Result<T, anyhow::Error>;

/// The public result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies an `Error` by where it happened and what the user can do about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Form input was rejected before any request was sent. Fix the input and resubmit.
    Validation,
    /// A request to the API failed in transport or returned a non-success status.
    Request,
    /// The initial load of transactions or totals failed. Nothing that depends on it can be shown.
    DataUnavailable,
    /// A mutation referred to a transaction that is not in the local store.
    NotFound,
    /// A precondition of the transaction store was violated.
    Store,
    /// No user is signed in, or the persisted session could not be read or written.
    Session,
    /// The configuration is missing or invalid.
    Config,
    /// Anything else.
    Internal,
}

serde_plain::derive_display_from_serialize!(ErrorType);

/// The public error type: an `anyhow::Error` carrying its context chain, tagged with an
/// `ErrorType`.
pub struct Error {
    error_type: ErrorType,
    inner: anyhow::Error,
}

impl Error {
    pub fn new(error_type: ErrorType, inner: impl Into<anyhow::Error>) -> Self {
        Self {
            error_type,
            inner: inner.into(),
        }
    }

    /// Creates an error of `error_type` from a plain message.
    pub fn msg<S>(error_type: ErrorType, message: S) -> Self
    where
        S: Display + Debug + Send + Sync + 'static,
    {
        Self::new(error_type, anyhow::Error::msg(message))
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// The outermost message, without the context chain.
    pub fn message(&self) -> String {
        self.inner.to_string()
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:?}", self.error_type, self.inner)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#}", self.inner)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        let inner: &(dyn std::error::Error + 'static) = self.inner.as_ref();
        inner.source()
    }
}

impl From<anyhow::Error> for Error {
    fn from(inner: anyhow::Error) -> Self {
        Self::new(ErrorType::Internal, inner)
    }
}

/// Converts an internal result into a public `Result` with the given `ErrorType`.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| Error::new(error_type, e))
    }
}
