// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the control panel.

use std::time::Duration;

use reqwest::header::SET_COOKIE;
use reqwest::{Client, RequestBuilder, redirect};

use crate::error::Error;
use crate::protocol::{HttpResponse, RequestHeaders, Transport};

// ============================================================================
// HttpConfig - Transport configuration
// ============================================================================

/// Configuration for the HTTP transport.
///
/// No request timeout is applied unless one is set. Certificate verification
/// is off by default because the panel serves a self-signed certificate.
///
/// # Examples
///
/// ```
/// use efesto_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("https://panel.example.com/")
///     .with_timeout(Duration::from_secs(15))
///     .with_verbose(true);
///
/// assert_eq!(config.base_url(), "https://panel.example.com");
/// assert!(config.accept_invalid_certs());
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    base_url: String,
    timeout: Option<Duration>,
    accept_invalid_certs: bool,
    verbose: bool,
}

impl HttpConfig {
    /// Creates a configuration for the given base URL.
    ///
    /// Trailing slashes are removed so endpoint paths can be appended.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
            accept_invalid_certs: true,
            verbose: false,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enables or disables certificate verification bypass.
    #[must_use]
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Enables logging of request and response bodies at debug level.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns the base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns whether invalid certificates are accepted.
    #[must_use]
    pub fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    /// Returns whether body logging is enabled.
    #[must_use]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Creates an `HttpTransport` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Http` if the HTTP client cannot be created.
    pub fn into_transport(self) -> Result<HttpTransport, Error> {
        let mut builder = Client::builder()
            .redirect(redirect::Policy::none())
            .danger_accept_invalid_certs(self.accept_invalid_certs);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(Error::Http)?;

        Ok(HttpTransport {
            client,
            verbose: self.verbose,
        })
    }
}

// ============================================================================
// HttpTransport - reqwest implementation
// ============================================================================

/// `reqwest`-backed [`Transport`].
///
/// Redirects are never followed.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    verbose: bool,
}

impl HttpTransport {
    async fn execute(&self, url: &str, request: RequestBuilder) -> Result<HttpResponse, Error> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::from_transport(url, &e))?;

        let status = response.status().as_u16();
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_string)
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| Error::from_transport(url, &e))?;

        if self.verbose {
            tracing::debug!(url = %url, status, body = %body, "Received HTTP response");
        } else {
            tracing::trace!(url = %url, status, "Received HTTP response");
        }

        Ok(HttpResponse {
            status,
            set_cookies,
            body,
        })
    }
}

fn apply_headers(request: RequestBuilder, headers: &RequestHeaders) -> RequestBuilder {
    headers
        .iter()
        .fold(request, |request, (name, value)| request.header(name, value))
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str, headers: &RequestHeaders) -> Result<HttpResponse, Error> {
        tracing::trace!(url = %url, "Sending HTTP GET");

        let request = apply_headers(self.client.get(url), headers);
        self.execute(url, request).await
    }

    async fn post_form(
        &self,
        url: &str,
        headers: &RequestHeaders,
        form: &[(&'static str, String)],
    ) -> Result<HttpResponse, Error> {
        if self.verbose {
            let fields: Vec<_> = form
                .iter()
                .filter(|(name, _)| !name.contains("password"))
                .collect();
            tracing::debug!(url = %url, form = ?fields, "Sending HTTP POST");
        } else {
            tracing::trace!(url = %url, "Sending HTTP POST");
        }

        let request = apply_headers(self.client.post(url), headers).form(form);
        self.execute(url, request).await
    }
}
