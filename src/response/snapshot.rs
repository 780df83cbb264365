// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heater telemetry snapshot.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, ParseError};
use crate::labels::Labels;
use crate::protocol::Envelope;
use crate::response::ensure_success;
use crate::types::Language;

/// Telemetry object carried in the `message` of a `get-state` envelope.
///
/// Older firmware omits the alarm field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateMessage {
    device_status: i64,
    #[serde(default)]
    is_device_in_alarm: Option<i64>,
    air_temperature: f64,
    smoke_temperature: f64,
    real_power: f64,
    last_set_air_temperature: f64,
    last_set_power: f64,
}

/// Point-in-time heater state returned by a status read.
///
/// Values are reported exactly as the panel sends them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSnapshot {
    device_id: String,
    status_code: i64,
    status_label: String,
    error_code: Option<i64>,
    error_label: Option<String>,
    air_temperature: f64,
    smoke_temperature: f64,
    real_power: f64,
    last_set_air_temperature: f64,
    last_set_power: f64,
    idle_reason: Option<String>,
}

impl DeviceSnapshot {
    /// Builds a snapshot from a `get-state` envelope.
    ///
    /// Codes are translated with `labels` in `language`; unmapped codes
    /// render as [`UNKNOWN_LABEL`](crate::labels::UNKNOWN_LABEL).
    ///
    /// # Errors
    ///
    /// Returns `Error::Operation` if the envelope reports a failure and
    /// `Error::Parse` if the telemetry object is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use efesto_lib::labels::Labels;
    /// use efesto_lib::protocol::Envelope;
    /// use efesto_lib::response::DeviceSnapshot;
    /// use efesto_lib::types::Language;
    ///
    /// let envelope: Envelope = serde_json::from_str(r#"{
    ///     "status": 0,
    ///     "message": {
    ///         "deviceStatus": 4, "isDeviceInAlarm": 0,
    ///         "airTemperature": 20.5, "smokeTemperature": 112,
    ///         "realPower": 3, "lastSetAirTemperature": 21, "lastSetPower": 3
    ///     },
    ///     "idle": null
    /// }"#).unwrap();
    ///
    /// let snapshot = DeviceSnapshot::from_envelope(
    ///     &envelope, "HEATER1", &Labels::default(), Language::En,
    /// ).unwrap();
    /// assert_eq!(snapshot.status_label(), "WORKING");
    /// assert_eq!(snapshot.air_temperature(), 20.5);
    /// assert!(snapshot.idle_reason().is_none());
    /// ```
    pub fn from_envelope(
        envelope: &Envelope,
        device_id: &str,
        labels: &Labels,
        language: Language,
    ) -> Result<Self, Error> {
        ensure_success(envelope)?;

        let message = StateMessage::deserialize(&envelope.message).map_err(ParseError::Json)?;
        let idle_reason = envelope.idle.as_ref().map(idle_label).transpose()?;

        Ok(Self {
            device_id: device_id.to_string(),
            status_code: message.device_status,
            status_label: labels.status(language, message.device_status).to_string(),
            error_code: message.is_device_in_alarm,
            error_label: message
                .is_device_in_alarm
                .map(|code| labels.error(language, code).to_string()),
            air_temperature: message.air_temperature,
            smoke_temperature: message.smoke_temperature,
            real_power: message.real_power,
            last_set_air_temperature: message.last_set_air_temperature,
            last_set_power: message.last_set_power,
            idle_reason,
        })
    }

    /// Returns the device identifier.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the raw status code.
    #[must_use]
    pub fn status_code(&self) -> i64 {
        self.status_code
    }

    /// Returns the translated status label.
    #[must_use]
    pub fn status_label(&self) -> &str {
        &self.status_label
    }

    /// Returns the raw alarm code, if the firmware reports one.
    #[must_use]
    pub fn error_code(&self) -> Option<i64> {
        self.error_code
    }

    /// Returns the translated alarm label, if the firmware reports one.
    #[must_use]
    pub fn error_label(&self) -> Option<&str> {
        self.error_label.as_deref()
    }

    /// Returns the room temperature.
    #[must_use]
    pub fn air_temperature(&self) -> f64 {
        self.air_temperature
    }

    /// Returns the flue gas temperature.
    #[must_use]
    pub fn smoke_temperature(&self) -> f64 {
        self.smoke_temperature
    }

    /// Returns the current burner power.
    #[must_use]
    pub fn real_power(&self) -> f64 {
        self.real_power
    }

    /// Returns the last requested room temperature.
    #[must_use]
    pub fn last_set_air_temperature(&self) -> f64 {
        self.last_set_air_temperature
    }

    /// Returns the last requested power level.
    #[must_use]
    pub fn last_set_power(&self) -> f64 {
        self.last_set_power
    }

    /// Returns why the heater is idle, if it is.
    #[must_use]
    pub fn idle_reason(&self) -> Option<&str> {
        self.idle_reason.as_deref()
    }

    /// Returns true if the heater reports an active alarm.
    #[must_use]
    pub fn is_in_alarm(&self) -> bool {
        self.error_code.is_some_and(|code| code != 0)
    }
}

fn idle_label(idle: &Value) -> Result<String, Error> {
    idle.get("idle_label")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            ParseError::UnexpectedFormat(format!("idle section without idle_label: {idle}")).into()
        })
}
