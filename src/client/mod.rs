// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level client for one heater on the control panel.
//!
//! Every operation takes the session headers, sends one command through
//! the dispatcher and interprets the resulting envelope.
//!
//! ```no_run
//! use efesto_lib::EfestoClient;
//! use efesto_lib::types::{AirTemperature, PowerLevel};
//!
//! # async fn example() -> efesto_lib::Result<()> {
//! let client = EfestoClient::builder("https://panel.example.com")
//!     .credentials("me@example.com", "secret")
//!     .device("ABCDEF123456")
//!     .connect()
//!     .await?;
//!
//! let snapshot = client.status().await?;
//! println!("{} at {} C", snapshot.status_label(), snapshot.air_temperature());
//!
//! client.turn_on().await?;
//! client.set_temperature(AirTemperature::new(21.0)?).await?;
//! client.set_power(PowerLevel::new(3)?).await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod config;

pub use builder::EfestoClientBuilder;
pub use config::ClientConfig;

use crate::command::{Command, HeaterCommand, StateCommand, WriteParameterCommand};
use crate::error::Error;
use crate::protocol::{Envelope, HttpTransport, Transport, dispatch};
use crate::response::{DeviceSnapshot, ensure_fields_accepted, ensure_success};
use crate::session::{SessionManager, SessionPhase, SessionState};
use crate::types::{AirTemperature, PowerLevel};

/// An authenticated client for one heater.
///
/// Only obtainable through [`EfestoClientBuilder::connect`], so every
/// instance holds a logged-in session. The session is never modified after
/// login; operations only read it, so `&self` methods may be called from
/// several tasks.
#[derive(Debug)]
pub struct EfestoClient<T: Transport = HttpTransport> {
    transport: T,
    session: SessionManager,
    config: ClientConfig,
}

impl EfestoClient<HttpTransport> {
    /// Starts building a client for the panel at `base_url`.
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> EfestoClientBuilder {
        EfestoClientBuilder::new(base_url)
    }
}

impl<T: Transport> EfestoClient<T> {
    pub(crate) fn new(transport: T, session: SessionManager, config: ClientConfig) -> Self {
        Self {
            transport,
            session,
            config,
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the session cookies.
    #[must_use]
    pub fn session(&self) -> &SessionState {
        self.session.state()
    }

    /// Returns the handshake phase; always `Authenticated` for a built client.
    #[must_use]
    pub fn session_phase(&self) -> SessionPhase {
        self.session.phase()
    }

    /// Sends a command and returns the normalized envelope.
    ///
    /// The envelope is not interpreted: a failed envelope is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConnectionFailed` or `Error::InvalidEndpoint` on
    /// transport failure.
    pub async fn send_command<C: Command + Sync>(&self, command: &C) -> Result<Envelope, Error> {
        let form = command.to_form(&self.config.device_id);
        dispatch(
            &self.transport,
            &self.config.ajax_url(),
            &self.session.headers(),
            &form,
        )
        .await
    }

    /// Reads the current heater state.
    ///
    /// # Errors
    ///
    /// Returns `Error::Operation` if the panel reports a failure, `Error::Parse`
    /// on malformed telemetry, or a transport error.
    pub async fn status(&self) -> Result<DeviceSnapshot, Error> {
        let envelope = self.send_command(&StateCommand).await?;
        DeviceSnapshot::from_envelope(
            &envelope,
            &self.config.device_id,
            &self.config.labels,
            self.config.language,
        )
    }

    /// Turns the heater on.
    ///
    /// # Errors
    ///
    /// Returns `Error::Operation` if the panel reports a failure, or a
    /// transport error.
    pub async fn turn_on(&self) -> Result<(), Error> {
        let envelope = self.send_command(&HeaterCommand::On).await?;
        ensure_success(&envelope)
    }

    /// Turns the heater off.
    ///
    /// # Errors
    ///
    /// Returns `Error::Operation` if the panel reports a failure, or a
    /// transport error.
    pub async fn turn_off(&self) -> Result<(), Error> {
        let envelope = self.send_command(&HeaterCommand::Off).await?;
        ensure_success(&envelope)
    }

    /// Sets the target room temperature.
    ///
    /// # Errors
    ///
    /// Returns `Error::Operation` if the panel or any queued field reports a
    /// failure, or a transport error.
    pub async fn set_temperature(&self, temperature: AirTemperature) -> Result<(), Error> {
        self.write_parameter(WriteParameterCommand::AirTemperature(temperature)).await
    }

    /// Sets the target power level.
    ///
    /// # Errors
    ///
    /// Returns `Error::Operation` if the panel or any queued field reports a
    /// failure, or a transport error.
    pub async fn set_power(&self, power: PowerLevel) -> Result<(), Error> {
        self.write_parameter(WriteParameterCommand::Power(power)).await
    }

    async fn write_parameter(&self, command: WriteParameterCommand) -> Result<(), Error> {
        let envelope = self.send_command(&command).await?;
        ensure_fields_accepted(&envelope)
    }

    /// Lists the status labels of the configured language, ordered by code.
    #[must_use]
    pub fn system_modes(&self) -> Vec<&str> {
        self.config.labels.status_labels(self.config.language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::HttpResponse;
    use crate::protocol::mock::ScriptedTransport;

    fn logged_in() -> ScriptedTransport {
        ScriptedTransport::new()
            .reply(HttpResponse::new(200, "").with_set_cookie("PHPSESSID=s1"))
            .reply(HttpResponse::new(302, "").with_set_cookie("remember=r1"))
    }

    async fn connect(
        transport: ScriptedTransport,
    ) -> Result<EfestoClient<ScriptedTransport>, Error> {
        EfestoClient::builder("https://panel")
            .credentials("user", "pw")
            .device("DEV")
            .connect_with(transport)
            .await
    }

    #[tokio::test]
    async fn connect_reaches_authenticated() {
        let client = connect(logged_in()).await.unwrap();
        assert_eq!(client.session_phase(), SessionPhase::Authenticated);
        assert_eq!(client.session().remember(), Some("r1"));
    }

    #[tokio::test]
    async fn connect_fails_without_remember() {
        let transport = ScriptedTransport::new()
            .reply(HttpResponse::new(200, "").with_set_cookie("PHPSESSID=s1"))
            .reply(HttpResponse::new(200, "login form"));
        let result = connect(transport).await;
        assert!(matches!(result, Err(Error::Unauthorized)));
    }

    #[tokio::test]
    async fn turn_on_sends_method_and_cookies() {
        let transport = logged_in().reply(HttpResponse::new(200, r#"{"status":0,"message":""}"#));
        let client = connect(transport).await.unwrap();

        client.turn_on().await.unwrap();

        let request = client.transport.requests().pop().unwrap();
        assert_eq!(request.url, "https://panel/en/ajax/action/frontend/response/ajax/");
        assert_eq!(request.headers.get("Cookie"), Some("PHPSESSID=s1; remember=r1"));
        assert_eq!(request.form[0], ("method", "heater-on".to_string()));
        assert_eq!(request.form[2], ("device", "DEV".to_string()));
    }

    #[tokio::test]
    async fn turn_off_surfaces_redirect() {
        let transport = logged_in().reply(HttpResponse::new(302, ""));
        let client = connect(transport).await.unwrap();

        let err = client.turn_off().await.unwrap_err();

        assert!(err.operation_message().unwrap().contains("temporarily unavailable"));
    }

    #[tokio::test]
    async fn set_power_checks_fields() {
        let transport = logged_in().reply(HttpResponse::new(
            200,
            r#"{"status":0,"message":{"set-power":2}}"#,
        ));
        let client = connect(transport).await.unwrap();

        let err = client.set_power(PowerLevel::new(2).unwrap()).await.unwrap_err();

        assert_eq!(err.operation_message(), Some("set-power-failed"));
        let request = client.transport.requests().pop().unwrap();
        assert_eq!(request.form[1], ("params", "set-power=2".to_string()));
    }

    #[tokio::test]
    async fn system_modes_follow_language() {
        let client = EfestoClient::builder("https://panel")
            .credentials("user", "pw")
            .device("DEV")
            .language(crate::types::Language::It)
            .connect_with(logged_in())
            .await
            .unwrap();
        let modes = client.system_modes();
        assert_eq!(modes.first(), Some(&"SPENTA"));
        assert_eq!(modes.len(), 10);
    }
}
