// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `efesto_lib` library.
//!
//! Every failure of a public operation is reported through [`Error`]. The
//! first four variants mirror the ways a conversation with the control panel
//! can go wrong: the host is unreachable, the request is rejected before the
//! panel sees it, the credentials are refused, or the panel answers with a
//! non-zero status for the requested operation.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The host could not be reached (connection refused, DNS, timeout).
    #[error("connection to {0} not possible")]
    ConnectionFailed(String),

    /// The request was structurally rejected (malformed URL, invalid header,
    /// HTTP error status on the login surface).
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The login round trip completed but no remember token was issued.
    #[error("failed to login, please check credentials")]
    Unauthorized,

    /// The panel reported a non-zero status for an operation.
    ///
    /// For batched parameter writes the message has the form
    /// `"<field>-failed"`.
    #[error("operation failed: {0}")]
    Operation(String),

    /// An input value was rejected before anything was sent.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A success envelope carried a payload of an unexpected shape.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[source] reqwest::Error),
}

impl Error {
    /// Returns the server-supplied message of an [`Error::Operation`].
    #[must_use]
    pub fn operation_message(&self) -> Option<&str> {
        match self {
            Self::Operation(message) => Some(message),
            _ => None,
        }
    }

    /// Classifies a transport failure for the given URL.
    ///
    /// Connectivity problems and timeouts become [`Error::ConnectionFailed`];
    /// everything else the transport refuses becomes [`Error::InvalidEndpoint`].
    pub(crate) fn from_transport(url: &str, err: &reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::ConnectionFailed(url.to_string())
        } else {
            Self::InvalidEndpoint(format!("{url}: {err}"))
        }
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
        /// The actual value that was provided.
        actual: f64,
    },

    /// A temperature was NaN or infinite.
    #[error("value is not a finite number")]
    NotFinite,

    /// An unsupported display language code was provided.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// A required configuration field was not provided.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Errors related to interpreting control panel payloads.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON deserialization failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unexpected payload format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
