// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport and request/response plumbing for the control panel.
//!
//! - [`Transport`]: the HTTP seam (GET and form POST, no redirects followed)
//! - [`HttpTransport`]: the `reqwest` implementation, configured by [`HttpConfig`]
//! - [`Envelope`]: the normalized `{status, message}` result of a device call
//!
//! The panel serves a self-signed certificate, so [`HttpConfig`] disables
//! certificate verification unless told otherwise.

mod dispatch;
mod envelope;
mod http;

pub use envelope::{Envelope, SERVER_REDIRECTED, SERVER_UNAVAILABLE, UNKNOWN_SERVER_ERROR};
pub use http::{HttpConfig, HttpTransport};

pub(crate) use dispatch::dispatch;

use std::time::SystemTime;

use cookie::Cookie;

use crate::error::Error;

/// Login page: anonymous session acquisition and credential POST.
pub const LOGIN_PATH: &str = "/en/login/";

/// AJAX endpoint shared by all device operations.
pub const AJAX_PATH: &str = "/en/ajax/action/frontend/response/ajax/";

/// Value of the `Accept` header sent with every request.
pub const HEADER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3";

/// Value of the `Content-Type` header sent with every request.
pub const HEADER_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Returns the device management page path, used as `Referer`.
#[must_use]
pub fn device_page_path(device_id: &str) -> String {
    format!(
        "/en/heaters/action/manage/heater/{}/",
        urlencoding::encode(device_id)
    )
}

/// Ordered request headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders(Vec<(&'static str, String)>);

impl RequestHeaders {
    /// Creates an empty header list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header.
    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.0.push((name, value.into()));
        self
    }

    /// Returns the value of the first header with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(n, v)| (*n, v.as_str()))
    }
}

/// A raw HTTP response as seen by the session and dispatch layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw `Set-Cookie` header values.
    pub set_cookies: Vec<String>,
    /// Response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response with the given status and body and no cookies.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            set_cookies: Vec::new(),
            body: body.into(),
        }
    }

    /// Adds a raw `Set-Cookie` header value.
    #[must_use]
    pub fn with_set_cookie(mut self, value: impl Into<String>) -> Self {
        self.set_cookies.push(value.into());
        self
    }

    /// Returns the value of the cookie `name` set by this response.
    ///
    /// The last `Set-Cookie` for the name decides. An empty value or an
    /// expired cookie (`Max-Age <= 0`, or `Expires` in the past) counts as
    /// absent, which is how the panel deletes cookies.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<String> {
        let now = SystemTime::now();
        self.set_cookies
            .iter()
            .rev()
            .filter_map(|header| Cookie::parse(header.as_str()).ok())
            .find(|cookie| cookie.name() == name)
            .filter(|cookie| !cookie.value().is_empty() && !is_expired(cookie, now))
            .map(|cookie| cookie.value().to_string())
    }

    /// Fails with [`Error::InvalidEndpoint`] on a 4xx or 5xx status.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidEndpoint` if the status is a client or server error.
    pub fn error_for_status(self, url: &str) -> Result<Self, Error> {
        if self.status >= 400 {
            return Err(Error::InvalidEndpoint(format!(
                "{url}: HTTP status {}",
                self.status
            )));
        }
        Ok(self)
    }
}

// Max-Age takes precedence over Expires.
fn is_expired(cookie: &Cookie<'_>, now: SystemTime) -> bool {
    match cookie.max_age() {
        Some(max_age) => !max_age.is_positive(),
        None => cookie
            .expires_datetime()
            .is_some_and(|expires| SystemTime::from(expires) <= now),
    }
}

/// Transport used to talk to the control panel.
///
/// Implementations must not follow redirects: the login handshake depends
/// on the cookies of the redirect response itself.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConnectionFailed` when the host cannot be reached and
    /// `Error::InvalidEndpoint` when the request is rejected.
    async fn get(&self, url: &str, headers: &RequestHeaders) -> Result<HttpResponse, Error>;

    /// Sends a form-encoded POST request.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConnectionFailed` when the host cannot be reached and
    /// `Error::InvalidEndpoint` when the request is rejected.
    async fn post_form(
        &self,
        url: &str,
        headers: &RequestHeaders,
        form: &[(&'static str, String)],
    ) -> Result<HttpResponse, Error>;
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted in-memory transport for unit tests.

    use std::collections::VecDeque;

    use parking_lot::Mutex;

    use super::{HttpResponse, RequestHeaders, Transport};
    use crate::error::Error;

    /// A request seen by [`ScriptedTransport`].
    #[derive(Debug, Clone)]
    pub(crate) struct Recorded {
        pub method: &'static str,
        pub url: String,
        pub headers: RequestHeaders,
        pub form: Vec<(&'static str, String)>,
    }

    /// Replays queued responses in order and records every request.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedTransport {
        replies: Mutex<VecDeque<Result<HttpResponse, Error>>>,
        requests: Mutex<Vec<Recorded>>,
    }

    impl ScriptedTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn reply(self, response: HttpResponse) -> Self {
            self.replies.lock().push_back(Ok(response));
            self
        }

        pub(crate) fn fail(self, error: Error) -> Self {
            self.replies.lock().push_back(Err(error));
            self
        }

        pub(crate) fn requests(&self) -> Vec<Recorded> {
            self.requests.lock().clone()
        }

        fn next(&self, recorded: Recorded) -> Result<HttpResponse, Error> {
            let url = recorded.url.clone();
            self.requests.lock().push(recorded);
            self.replies
                .lock()
                .pop_front()
                .unwrap_or_else(|| panic!("no scripted reply left for {url}"))
        }
    }

    impl Transport for ScriptedTransport {
        async fn get(&self, url: &str, headers: &RequestHeaders) -> Result<HttpResponse, Error> {
            self.next(Recorded {
                method: "GET",
                url: url.to_string(),
                headers: headers.clone(),
                form: Vec::new(),
            })
        }

        async fn post_form(
            &self,
            url: &str,
            headers: &RequestHeaders,
            form: &[(&'static str, String)],
        ) -> Result<HttpResponse, Error> {
            self.next(Recorded {
                method: "POST",
                url: url.to_string(),
                headers: headers.clone(),
                form: form.to_vec(),
            })
        }
    }
}
