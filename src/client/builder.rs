// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client builder.

use std::fmt;
use std::time::Duration;

use crate::client::{ClientConfig, EfestoClient};
use crate::error::{Error, ValueError};
use crate::labels::Labels;
use crate::protocol::{HttpConfig, HttpTransport, Transport};
use crate::session::SessionManager;
use crate::types::Language;

/// Builder for an [`EfestoClient`].
///
/// Building is two-phase: the builder only collects configuration, and
/// [`connect`](Self::connect) performs the login. A client value exists
/// only once the login has succeeded.
///
/// # Examples
///
/// ```no_run
/// use efesto_lib::EfestoClient;
/// use efesto_lib::types::Language;
///
/// # async fn example() -> efesto_lib::Result<()> {
/// let client = EfestoClient::builder("https://evastampaggi.efesto.web2app.it")
///     .credentials("me@example.com", "secret")
///     .device("ABCDEF123456")
///     .language(Language::It)
///     .connect()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct EfestoClientBuilder {
    http: HttpConfig,
    username: Option<String>,
    password: Option<String>,
    device_id: Option<String>,
    language: Language,
    labels: Labels,
}

impl EfestoClientBuilder {
    /// Creates a builder for the panel at `base_url`.
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpConfig::new(base_url),
            username: None,
            password: None,
            device_id: None,
            language: Language::default(),
            labels: Labels::default(),
        }
    }

    /// Sets the login credentials.
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Sets the identifier of the controlled heater.
    #[must_use]
    pub fn device(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// Sets the display language for status and alarm labels.
    #[must_use]
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Replaces the label tables.
    #[must_use]
    pub fn labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Enables logging of request and response bodies at debug level.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.http = self.http.with_verbose(verbose);
        self
    }

    /// Sets a request timeout. No timeout applies by default.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    /// Enables or disables acceptance of invalid TLS certificates.
    ///
    /// Enabled by default since the panel uses a self-signed certificate.
    #[must_use]
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.http = self.http.with_accept_invalid_certs(accept);
        self
    }

    /// Validates the collected settings.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::MissingField` if credentials or the device are unset.
    pub fn build_config(self) -> Result<(ClientConfig, HttpConfig), Error> {
        let username = self.username.ok_or(ValueError::MissingField("username"))?;
        let password = self.password.ok_or(ValueError::MissingField("password"))?;
        let device_id = self
            .device_id
            .filter(|id| !id.is_empty())
            .ok_or(ValueError::MissingField("device"))?;

        let config = ClientConfig {
            base_url: self.http.base_url().to_string(),
            username,
            password,
            device_id,
            language: self.language,
            verbose: self.http.verbose(),
            labels: self.labels,
        };
        Ok((config, self.http))
    }

    /// Logs in over HTTP and returns a ready client.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Configuration is incomplete
    /// - The panel cannot be reached
    /// - The credentials are rejected
    pub async fn connect(self) -> Result<EfestoClient<HttpTransport>, Error> {
        let (config, http) = self.build_config()?;
        let transport = http.into_transport()?;
        login(config, transport).await
    }

    /// Logs in over a custom transport and returns a ready client.
    ///
    /// # Errors
    ///
    /// Same as [`connect`](Self::connect).
    pub async fn connect_with<T: Transport>(self, transport: T) -> Result<EfestoClient<T>, Error> {
        let (config, _) = self.build_config()?;
        login(config, transport).await
    }
}

impl fmt::Debug for EfestoClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EfestoClientBuilder")
            .field("http", &self.http)
            .field("username", &self.username)
            .field("device_id", &self.device_id)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

async fn login<T: Transport>(
    config: ClientConfig,
    transport: T,
) -> Result<EfestoClient<T>, Error> {
    let mut session = SessionManager::new(
        config.base_url.as_str(),
        config.username.as_str(),
        config.password.as_str(),
        config.device_id.as_str(),
    );
    session.login(&transport).await?;

    tracing::debug!(device = %config.device_id, "Client ready");

    Ok(EfestoClient::new(transport, session, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> EfestoClientBuilder {
        EfestoClientBuilder::new("https://panel/")
            .credentials("user", "pw")
            .device("DEV1")
    }

    #[test]
    fn builder_defaults() {
        let builder = EfestoClientBuilder::new("https://panel");
        assert_eq!(builder.language, Language::En);
        assert!(builder.username.is_none());
        assert!(builder.http.accept_invalid_certs());
        assert!(builder.http.timeout().is_none());
    }

    #[test]
    fn build_config_complete() {
        let (config, http) = complete()
            .language(Language::Fr)
            .verbose(true)
            .timeout(Duration::from_secs(3))
            .build_config()
            .unwrap();
        assert_eq!(config.base_url(), "https://panel");
        assert_eq!(config.username(), "user");
        assert_eq!(config.device_id(), "DEV1");
        assert_eq!(config.language(), Language::Fr);
        assert!(config.verbose());
        assert_eq!(http.timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn build_config_missing_credentials() {
        let err = EfestoClientBuilder::new("https://panel")
            .device("DEV1")
            .build_config()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Value(ValueError::MissingField("username"))
        ));
    }

    #[test]
    fn build_config_missing_device() {
        let err = EfestoClientBuilder::new("https://panel")
            .credentials("u", "p")
            .device("")
            .build_config()
            .unwrap_err();
        assert!(matches!(err, Error::Value(ValueError::MissingField("device"))));
    }

    #[test]
    fn config_debug_redacts_password() {
        let (config, _) = complete().build_config().unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("\"pw\""));
    }
}
