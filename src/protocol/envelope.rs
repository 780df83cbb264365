// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The normalized result of a device call.

use serde::Deserialize;
use serde_json::Value;

use crate::protocol::HttpResponse;

/// Message for a 200 response whose body is empty or not an envelope.
pub const UNKNOWN_SERVER_ERROR: &str = "unknown error at server";

/// Message for a redirect, usually a sign the session has expired.
pub const SERVER_REDIRECTED: &str = "server temporarily unavailable (redirect)";

/// Message for any other HTTP status.
pub const SERVER_UNAVAILABLE: &str = "server unavailable";

/// `{status, message}` envelope returned by the AJAX endpoint.
///
/// `status == 0` means success. The shape of `message` depends on the
/// operation: telemetry object for a state read, per-field status map for
/// parameter writes, plain string for errors.
///
/// # Examples
///
/// ```
/// use efesto_lib::protocol::{Envelope, HttpResponse, SERVER_REDIRECTED};
///
/// let ok = Envelope::classify(&HttpResponse::new(200, r#"{"status":0,"message":"ok"}"#));
/// assert!(ok.is_success());
///
/// let moved = Envelope::classify(&HttpResponse::new(302, ""));
/// assert_eq!(moved.status, 1);
/// assert_eq!(moved.message_text(), SERVER_REDIRECTED);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    /// Zero on success.
    pub status: i64,

    /// Operation-dependent payload.
    #[serde(default)]
    pub message: Value,

    /// Idle section of a state read; `None` when absent or `null`.
    #[serde(default)]
    pub idle: Option<Value>,
}

impl Envelope {
    /// Creates a failed envelope with the given message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: 1,
            message: Value::String(message.into()),
            idle: None,
        }
    }

    /// Normalizes a raw HTTP response into an envelope.
    ///
    /// Only a 200 with a well-formed body yields the server's own envelope;
    /// every other outcome becomes a status-1 envelope with a synthesized
    /// message.
    #[must_use]
    pub fn classify(response: &HttpResponse) -> Self {
        match response.status {
            200 => serde_json::from_str(&response.body).unwrap_or_else(|err| {
                tracing::debug!(error = %err, "Unparseable response body");
                Self::failure(UNKNOWN_SERVER_ERROR)
            }),
            302 => Self::failure(SERVER_REDIRECTED),
            _ => Self::failure(SERVER_UNAVAILABLE),
        }
    }

    /// Returns true if the status is not positive.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status <= 0
    }

    /// Returns the message rendered as text.
    ///
    /// Strings are returned verbatim, other JSON values in compact form.
    #[must_use]
    pub fn message_text(&self) -> String {
        match &self.message {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_parses_success_body() {
        let body = r#"{"status":0,"message":{"set-power":0},"idle":null}"#;
        let envelope = Envelope::classify(&HttpResponse::new(200, body));
        assert_eq!(envelope.status, 0);
        assert_eq!(envelope.message["set-power"], 0);
        assert!(envelope.idle.is_none());
    }

    #[test]
    fn classify_keeps_server_error_envelope() {
        let body = r#"{"status":3,"message":"device offline"}"#;
        let envelope = Envelope::classify(&HttpResponse::new(200, body));
        assert_eq!(envelope.status, 3);
        assert_eq!(envelope.message_text(), "device offline");
    }

    #[test]
    fn classify_empty_body() {
        let envelope = Envelope::classify(&HttpResponse::new(200, ""));
        assert_eq!(envelope, Envelope::failure(UNKNOWN_SERVER_ERROR));
    }

    #[test]
    fn classify_null_body() {
        let envelope = Envelope::classify(&HttpResponse::new(200, "null"));
        assert_eq!(envelope.message_text(), UNKNOWN_SERVER_ERROR);
    }

    #[test]
    fn classify_html_body() {
        let envelope = Envelope::classify(&HttpResponse::new(200, "<html>login</html>"));
        assert_eq!(envelope.status, 1);
        assert_eq!(envelope.message_text(), UNKNOWN_SERVER_ERROR);
    }

    #[test]
    fn classify_redirect() {
        let envelope = Envelope::classify(&HttpResponse::new(302, "<html></html>"));
        assert_eq!(envelope, Envelope::failure(SERVER_REDIRECTED));
    }

    #[test]
    fn classify_other_statuses() {
        for status in [201, 301, 404, 500, 503] {
            let envelope = Envelope::classify(&HttpResponse::new(status, "{}"));
            assert_eq!(envelope, Envelope::failure(SERVER_UNAVAILABLE), "{status}");
        }
    }

    #[test]
    fn message_text_renders_non_strings() {
        let envelope = Envelope {
            status: 2,
            message: serde_json::json!({"code": 7}),
            idle: None,
        };
        assert_eq!(envelope.message_text(), r#"{"code":7}"#);
    }
}
