// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interpretation of control panel envelopes.
//!
//! Each operation turns its [`Envelope`] into a typed result:
//!
//! - state reads become a [`DeviceSnapshot`]
//! - on/off commands succeed or fail on the top-level status alone
//! - parameter writes additionally check the status of every queued field
//!
//! A positive top-level status always fails with [`Error::Operation`]
//! carrying the envelope message.

mod snapshot;

pub use snapshot::DeviceSnapshot;

use serde_json::Value;

use crate::error::{Error, ParseError};
use crate::protocol::Envelope;

/// Fails with [`Error::Operation`] if the envelope reports a failure.
///
/// # Errors
///
/// Returns `Error::Operation` with the envelope message if `status > 0`.
///
/// # Examples
///
/// ```
/// use efesto_lib::protocol::Envelope;
/// use efesto_lib::response::ensure_success;
///
/// let failed = Envelope::failure("server unavailable");
/// let err = ensure_success(&failed).unwrap_err();
/// assert_eq!(err.operation_message(), Some("server unavailable"));
/// ```
pub fn ensure_success(envelope: &Envelope) -> Result<(), Error> {
    if envelope.is_success() {
        Ok(())
    } else {
        Err(Error::Operation(envelope.message_text()))
    }
}

/// Validates the acknowledgement of a batched parameter write.
///
/// The message maps each queued parameter to its own status. The first
/// field with a positive status, in payload order, fails the write with
/// `"<field>-failed"`.
///
/// # Errors
///
/// Returns `Error::Operation` on a failed envelope or a failed field, and
/// `Error::Parse` if the message is neither an object nor `null` or a field
/// status is not numeric.
///
/// # Examples
///
/// ```
/// use efesto_lib::protocol::Envelope;
/// use efesto_lib::response::ensure_fields_accepted;
///
/// let ack: Envelope = serde_json::from_str(
///     r#"{"status":0,"message":{"set-air-temperature":0,"set-power":5}}"#,
/// ).unwrap();
/// let err = ensure_fields_accepted(&ack).unwrap_err();
/// assert_eq!(err.operation_message(), Some("set-power-failed"));
/// ```
pub fn ensure_fields_accepted(envelope: &Envelope) -> Result<(), Error> {
    ensure_success(envelope)?;

    let fields = match &envelope.message {
        Value::Object(fields) => fields,
        Value::Null => return Ok(()),
        other => {
            return Err(ParseError::UnexpectedFormat(format!(
                "write acknowledgement is not a field map: {other}"
            ))
            .into());
        }
    };

    for (field, status) in fields {
        if field_failed(field, status)? {
            return Err(Error::Operation(format!("{field}-failed")));
        }
    }
    Ok(())
}

/// Returns whether a per-field status reports a failure.
///
/// Numbers, numeric strings and booleans (`true` counts as 1) are accepted
/// shapes; anything else is a malformed acknowledgement.
fn field_failed(field: &str, status: &Value) -> Result<bool, Error> {
    let code = match status {
        Value::Number(number) => number.as_f64(),
        Value::Bool(flag) => Some(f64::from(u8::from(*flag))),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    };

    match code.filter(|code| code.is_finite()) {
        Some(code) => Ok(code > 0.0),
        None => Err(ParseError::UnexpectedFormat(format!(
            "status of {field} is not numeric: {status}"
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(status: i64, message: Value) -> Envelope {
        Envelope {
            status,
            message,
            idle: None,
        }
    }

    #[test]
    fn ensure_success_accepts_zero() {
        assert!(ensure_success(&envelope(0, json!("ok"))).is_ok());
    }

    #[test]
    fn ensure_success_rejects_positive() {
        let err = ensure_success(&envelope(2, json!("heater busy"))).unwrap_err();
        assert!(matches!(err, Error::Operation(ref m) if m == "heater busy"));
    }

    #[test]
    fn fields_all_zero_accepted() {
        let ack = envelope(0, json!({"set-air-temperature": 0, "set-power": 0}));
        assert!(ensure_fields_accepted(&ack).is_ok());
    }

    #[test]
    fn first_failed_field_wins_in_payload_order() {
        let ack: Envelope = serde_json::from_str(
            r#"{"status":0,"message":{"zeta":0,"beta":5,"alpha":9}}"#,
        )
        .unwrap();
        let err = ensure_fields_accepted(&ack).unwrap_err();
        assert_eq!(err.operation_message(), Some("beta-failed"));
    }

    #[test]
    fn top_level_failure_checked_first() {
        let ack = envelope(1, json!({"set-power": 3}));
        let err = ensure_fields_accepted(&ack).unwrap_err();
        assert_eq!(err.operation_message(), Some(r#"{"set-power":3}"#));
    }

    #[test]
    fn string_field_status_is_parsed() {
        let ack = envelope(0, json!({"set-power": "1"}));
        let err = ensure_fields_accepted(&ack).unwrap_err();
        assert_eq!(err.operation_message(), Some("set-power-failed"));
    }

    #[test]
    fn true_field_status_is_failure() {
        let ack = envelope(0, json!({"set-power": true}));
        let err = ensure_fields_accepted(&ack).unwrap_err();
        assert_eq!(err.operation_message(), Some("set-power-failed"));
    }

    #[test]
    fn false_field_status_is_accepted() {
        let ack = envelope(0, json!({"set-power": false}));
        assert!(ensure_fields_accepted(&ack).is_ok());
    }

    #[test]
    fn non_numeric_field_status_is_parse_error() {
        for status in [json!(null), json!("error"), json!({"code": 3}), json!([1])] {
            let ack = envelope(0, json!({"set-power": status.clone()}));
            let err = ensure_fields_accepted(&ack).unwrap_err();
            assert!(
                matches!(err, Error::Parse(ParseError::UnexpectedFormat(_))),
                "{status} should be rejected"
            );
        }
    }

    #[test]
    fn malformed_field_before_failed_field_is_parse_error() {
        let ack: Envelope = serde_json::from_str(
            r#"{"status":0,"message":{"set-chrono":"n/a","set-power":4}}"#,
        )
        .unwrap();
        let err = ensure_fields_accepted(&ack).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn null_message_is_vacuous_ack() {
        assert!(ensure_fields_accepted(&envelope(0, Value::Null)).is_ok());
    }

    #[test]
    fn non_object_message_is_parse_error() {
        let err = ensure_fields_accepted(&envelope(0, json!("done"))).unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::UnexpectedFormat(_))));
    }
}
