//! Request error types
//!
//! Every failure a file request can hit maps to exactly one status code.
//! Internal details are logged and never sent to the client.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::io;

use crate::http;
use crate::logger;

/// Terminal failure of a single file request
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// Nothing usable was named, or the named file is absent
    #[error("file not found")]
    NotFound,

    /// Extension is not on the allowlist
    #[error("forbidden file type")]
    ForbiddenType,

    /// Filesystem failure other than absence (permissions, read errors)
    #[error("I/O error: {0}")]
    Io(io::Error),
}

/// Convenience alias for file request results
pub type ServeResult<T> = Result<T, ServeError>;

impl From<io::Error> for ServeError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::NotFound
        } else {
            Self::Io(err)
        }
    }
}

impl ServeError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ForbiddenType => StatusCode::FORBIDDEN,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body text shown to the client
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::NotFound => "file not found",
            Self::ForbiddenType => "forbidden file type",
            Self::Io(_) => "internal server error",
        }
    }

    pub fn into_response(self) -> Response<Full<Bytes>> {
        if let Self::Io(ref err) = self {
            logger::log_error(&format!("File request failed: {err}"));
        }
        http::build_text_response(self.status(), self.public_message())
    }
}
