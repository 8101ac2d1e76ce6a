//! Classified errors and the message-prefix wire contract.
//!
//! When the function runs behind a non-proxy integration, API Gateway picks
//! the HTTP status by matching a regex against the `errorMessage` of a failed
//! invocation. The prefixes below are what that mapping is configured with,
//! so they must not change without changing the gateway configuration too.

use lambda_runtime::Diagnostic;
use thiserror::Error;

/// Prefix selecting a 400 response in the gateway's error mapping.
pub const BAD_REQUEST_PREFIX: &str = "BadRequest: ";

/// Prefix selecting a 500 response in the gateway's error mapping.
pub const SERVER_ERROR_PREFIX: &str = "ServerException: ";

/// The fixed set of error classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller sent missing or invalid input.
    BadRequest,
    /// Not a failure: the caller should be sent elsewhere with a 302.
    Redirect,
    /// Anything else.
    ServerError,
}

impl ErrorKind {
    /// Name used as the Lambda `errorType`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BadRequest => "BadRequest",
            Self::Redirect => "Redirect",
            Self::ServerError => "ServerError",
        }
    }

    /// Literal token prepended to the error detail on the wire.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::BadRequest => BAD_REQUEST_PREFIX,
            Self::Redirect => "",
            Self::ServerError => SERVER_ERROR_PREFIX,
        }
    }

    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Redirect => 302,
            Self::ServerError => 500,
        }
    }

    /// Classifies a wire message the way the gateway's selection patterns do.
    ///
    /// Returns `None` for a message no pattern matches. The gateway answers
    /// such failures with its default (successful) status, which is why the
    /// handler never lets one out.
    #[must_use]
    pub fn from_wire_message(message: &str) -> Option<Self> {
        if message.starts_with(BAD_REQUEST_PREFIX) {
            Some(Self::BadRequest)
        } else if message.starts_with(SERVER_ERROR_PREFIX) {
            Some(Self::ServerError)
        } else if message.starts_with("http://") || message.starts_with("https://") {
            Some(Self::Redirect)
        } else {
            None
        }
    }
}

/// An error tagged with its classification.
///
/// The `Display` output is the wire message: prefix followed by the detail,
/// or the bare target URL for a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifiedError {
    #[error("{}{}", BAD_REQUEST_PREFIX, .0)]
    BadRequest(String),
    #[error("{}", .0)]
    Redirect(String),
    #[error("{}{}", SERVER_ERROR_PREFIX, .0)]
    ServerError(String),
}

impl ClassifiedError {
    /// Wraps an arbitrary failure as a `ServerError`.
    ///
    /// Only the outermost context reaches the caller; causes can carry
    /// file paths and other internals, so callers log the chain instead.
    #[must_use]
    pub fn server(error: &anyhow::Error) -> Self {
        Self::ServerError(error.to_string())
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::Redirect(_) => ErrorKind::Redirect,
            Self::ServerError(_) => ErrorKind::ServerError,
        }
    }

    /// The unprefixed detail message.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::BadRequest(detail) | Self::Redirect(detail) | Self::ServerError(detail) => detail,
        }
    }
}

impl From<ClassifiedError> for Diagnostic {
    fn from(error: ClassifiedError) -> Self {
        Self {
            error_type: error.kind().name().to_string(),
            error_message: error.to_string(),
        }
    }
}
