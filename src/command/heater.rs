// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State query and on/off commands.

use crate::command::{Command, NO_PARAMS};

/// Command to read the current heater telemetry.
///
/// # Examples
///
/// ```
/// use efesto_lib::command::{Command, StateCommand};
///
/// assert_eq!(StateCommand.method(), "get-state");
/// assert_eq!(StateCommand.params(), "1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateCommand;

impl Command for StateCommand {
    fn method(&self) -> &'static str {
        "get-state"
    }

    fn params(&self) -> String {
        NO_PARAMS.to_string()
    }
}

/// Command to switch the heater on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaterCommand {
    /// Start the ignition sequence.
    On,
    /// Start the shutdown sequence.
    Off,
}

impl Command for HeaterCommand {
    fn method(&self) -> &'static str {
        match self {
            Self::On => "heater-on",
            Self::Off => "heater-off",
        }
    }

    fn params(&self) -> String {
        NO_PARAMS.to_string()
    }
}

impl From<bool> for HeaterCommand {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heater_methods() {
        assert_eq!(HeaterCommand::On.method(), "heater-on");
        assert_eq!(HeaterCommand::Off.method(), "heater-off");
        assert_eq!(HeaterCommand::Off.params(), "1");
    }

    #[test]
    fn heater_from_bool() {
        assert_eq!(HeaterCommand::from(true), HeaterCommand::On);
        assert_eq!(HeaterCommand::from(false), HeaterCommand::Off);
    }
}
