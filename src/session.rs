// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cookie session with the control panel.
//!
//! Login is a two-step handshake against the login page:
//!
//! 1. An anonymous GET hands out a `PHPSESSID` cookie.
//! 2. A POST of the credentials, bound to that session, answers with a
//!    redirect carrying a `remember` cookie. That cookie is the only signal
//!    of a successful login; the redirect target is never fetched.
//!
//! ```text
//! Unauthenticated --GET /en/login/--> SessionAcquired --POST /en/login/--> Authenticated
//! ```

use std::fmt;

use crate::error::Error;
use crate::protocol::{
    HEADER_ACCEPT, HEADER_CONTENT_TYPE, LOGIN_PATH, RequestHeaders, Transport, device_page_path,
};

/// Name of the anonymous session cookie.
pub const SESSION_COOKIE: &str = "PHPSESSID";

/// Name of the cookie issued on successful login.
pub const REMEMBER_COOKIE: &str = "remember";

/// Progress of the login handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No cookie held yet.
    Unauthenticated,
    /// Anonymous session cookie held.
    SessionAcquired,
    /// Session and remember cookies held.
    Authenticated,
}

/// Session cookies held for the panel.
///
/// A remember token is never stored without a session identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    session_id: Option<String>,
    remember: Option<String>,
}

impl SessionState {
    /// Returns the session identifier, if acquired.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Returns the remember token, if logged in.
    #[must_use]
    pub fn remember(&self) -> Option<&str> {
        self.remember.as_deref()
    }

    /// Returns the current handshake phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match (&self.session_id, &self.remember) {
            (Some(_), Some(_)) => SessionPhase::Authenticated,
            (Some(_), None) => SessionPhase::SessionAcquired,
            (None, _) => SessionPhase::Unauthenticated,
        }
    }

    /// Returns the `Cookie` header value for the current phase.
    ///
    /// Empty before a session exists; the remember segment appears only once
    /// authenticated.
    #[must_use]
    pub fn cookie_header(&self) -> String {
        match (&self.session_id, &self.remember) {
            (None, _) => String::new(),
            (Some(session), None) => format!("{SESSION_COOKIE}={session}"),
            (Some(session), Some(remember)) => {
                format!("{SESSION_COOKIE}={session}; {REMEMBER_COOKIE}={remember}")
            }
        }
    }
}

/// Owns the session state and performs the login handshake.
#[derive(Clone)]
pub struct SessionManager {
    base_url: String,
    username: String,
    password: String,
    device_id: String,
    state: SessionState,
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("device_id", &self.device_id)
            .field("phase", &self.state.phase())
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a manager in the `Unauthenticated` phase.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            device_id: device_id.into(),
            state: SessionState::default(),
        }
    }

    /// Returns the session state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns the current handshake phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    /// Builds the headers for the next request from the session state.
    #[must_use]
    pub fn headers(&self) -> RequestHeaders {
        RequestHeaders::new()
            .with("Accept", HEADER_ACCEPT)
            .with("Cookie", self.state.cookie_header())
            .with("Content-Type", HEADER_CONTENT_TYPE)
            .with("Origin", self.base_url.as_str())
            .with(
                "Referer",
                format!("{}{}", self.base_url, device_page_path(&self.device_id)),
            )
    }

    fn login_url(&self) -> String {
        format!("{}{LOGIN_PATH}", self.base_url)
    }

    /// Fetches the login page anonymously and stores the session cookie.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConnectionFailed` if the host is unreachable and
    /// `Error::InvalidEndpoint` on request rejection, an HTTP error status,
    /// or a response without a session cookie.
    pub async fn acquire_session_identifier<T: Transport>(
        &mut self,
        transport: &T,
    ) -> Result<&str, Error> {
        let url = self.login_url();
        let response = transport
            .get(&url, &self.headers())
            .await?
            .error_for_status(&url)?;

        let Some(session_id) = response.cookie(SESSION_COOKIE) else {
            return Err(Error::InvalidEndpoint(format!(
                "{url}: no {SESSION_COOKIE} cookie issued"
            )));
        };

        tracing::debug!(url = %url, "Acquired session identifier");

        self.state = SessionState {
            session_id: Some(session_id),
            remember: None,
        };
        Ok(self.state.session_id().unwrap_or_default())
    }

    /// Posts the credentials and stores the remember cookie.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unauthorized` if no session was acquired first or no
    /// remember cookie is issued, plus the transport failures of
    /// [`acquire_session_identifier`](Self::acquire_session_identifier).
    pub async fn authenticate<T: Transport>(&mut self, transport: &T) -> Result<&str, Error> {
        if self.state.session_id.is_none() {
            return Err(Error::Unauthorized);
        }

        let url = self.login_url();
        let form = [
            ("login[username]", self.username.clone()),
            ("login[password]", self.password.clone()),
        ];
        let response = transport
            .post_form(&url, &self.headers(), &form)
            .await?
            .error_for_status(&url)?;

        let Some(remember) = response.cookie(REMEMBER_COOKIE) else {
            tracing::warn!(url = %url, username = %self.username, "Login rejected");
            return Err(Error::Unauthorized);
        };

        tracing::debug!(url = %url, username = %self.username, "Logged in");

        self.state.remember = Some(remember);
        Ok(self.state.remember().unwrap_or_default())
    }

    /// Runs the full handshake: session acquisition, then authentication.
    ///
    /// Any previous session state is discarded first.
    ///
    /// # Errors
    ///
    /// Returns the first failure of either step.
    pub async fn login<T: Transport>(&mut self, transport: &T) -> Result<(), Error> {
        self.state = SessionState::default();
        self.acquire_session_identifier(transport).await?;
        self.authenticate(transport).await?;
        Ok(())
    }
}
