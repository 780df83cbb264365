// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control panel command definitions.
//!
//! Every device operation is a form POST to the same AJAX endpoint, told
//! apart only by its `method` field.
//!
//! # Available Commands
//!
//! | Command Type | `method` | `params` |
//! |-------------|----------|----------|
//! | [`StateCommand`] | `get-state` | `1` |
//! | [`HeaterCommand::On`] | `heater-on` | `1` |
//! | [`HeaterCommand::Off`] | `heater-off` | `1` |
//! | [`WriteParameterCommand`] | `write-parameters-queue` | `set-air-temperature=21` |
//!
//! # Examples
//!
//! ```
//! use efesto_lib::command::{Command, HeaterCommand, WriteParameterCommand};
//! use efesto_lib::types::PowerLevel;
//!
//! let on = HeaterCommand::On;
//! assert_eq!(on.method(), "heater-on");
//! assert_eq!(on.params(), "1");
//!
//! let power = WriteParameterCommand::Power(PowerLevel::new(4).unwrap());
//! assert_eq!(power.method(), "write-parameters-queue");
//! assert_eq!(power.params(), "set-power=4");
//! ```

mod heater;
mod parameters;

pub use heater::{HeaterCommand, StateCommand};
pub use parameters::WriteParameterCommand;

/// Placeholder `params` value for commands without arguments.
pub(crate) const NO_PARAMS: &str = "1";

/// A command that can be sent to the control panel for one device.
pub trait Command {
    /// Returns the value of the `method` form field.
    fn method(&self) -> &'static str;

    /// Returns the value of the `params` form field.
    fn params(&self) -> String;

    /// Returns the complete form body addressed to `device`.
    fn to_form(&self, device: &str) -> [(&'static str, String); 3] {
        [
            ("method", self.method().to_string()),
            ("params", self.params()),
            ("device", device.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_contains_all_fields() {
        let form = StateCommand.to_form("A1B2C3");
        assert_eq!(
            form,
            [
                ("method", "get-state".to_string()),
                ("params", "1".to_string()),
                ("device", "A1B2C3".to_string()),
            ]
        );
    }

    #[test]
    fn form_field_order_is_stable() {
        let form = HeaterCommand::Off.to_form("dev");
        let keys: Vec<_> = form.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["method", "params", "device"]);
    }
}
