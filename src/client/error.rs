use std::error::Error as StdError;

use crate::domain::{ErrorCode, ErrorKind, ValidationError};

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`Sms24x7Client`](crate::Sms24x7Client).
///
/// Use [`Sms24x7Error::kind`] to branch on the failure category:
/// - transport, HTTP status and malformed-response failures are [`ErrorKind::Interface`],
/// - server error codes keep the kind from the code table,
/// - a session call without login is [`ErrorKind::NoLogin`].
pub enum Sms24x7Error {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body is not valid JSON or lacks a required field.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// sms24x7 answered with a positive `err_code`.
    ///
    /// `message` is the server text when it sent one, the table default otherwise.
    #[error("{message}")]
    Api {
        kind: ErrorKind,
        code: ErrorCode,
        message: String,
    },

    /// A session-authenticated call was made with no active session.
    #[error("must call login before sending with a session")]
    NoSession,

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl Sms24x7Error {
    pub(crate) fn from_error_code(code: ErrorCode, text: Option<String>) -> Self {
        Self::Api {
            kind: code.kind().unwrap_or(ErrorKind::Other),
            message: text.unwrap_or_else(|| code.default_message()),
            code,
        }
    }

    pub(crate) fn parse(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Parse(Box::new(err))
    }

    /// Failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) | Self::HttpStatus { .. } | Self::Parse(_) => ErrorKind::Interface,
            Self::Api { kind, .. } => *kind,
            Self::NoSession => ErrorKind::NoLogin,
            Self::Validation(_) => ErrorKind::Arguments,
        }
    }

    /// Server error code, for errors reported by sms24x7 itself.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
