// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parameter write commands.
//!
//! Writes go through the panel's parameter queue. The acknowledgement lists
//! a status per queued parameter, see
//! [`ensure_fields_accepted`](crate::response::ensure_fields_accepted).

use crate::command::Command;
use crate::types::{AirTemperature, PowerLevel};

/// Command to queue a parameter write on the heater.
///
/// # Examples
///
/// ```
/// use efesto_lib::command::{Command, WriteParameterCommand};
/// use efesto_lib::types::AirTemperature;
///
/// let cmd = WriteParameterCommand::AirTemperature(AirTemperature::new(21.5).unwrap());
/// assert_eq!(cmd.params(), "set-air-temperature=21.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WriteParameterCommand {
    /// Set the target room temperature.
    AirTemperature(AirTemperature),
    /// Set the target burner power level.
    Power(PowerLevel),
}

impl WriteParameterCommand {
    /// Returns the parameter name used in the queue.
    #[must_use]
    pub const fn parameter(&self) -> &'static str {
        match self {
            Self::AirTemperature(_) => "set-air-temperature",
            Self::Power(_) => "set-power",
        }
    }
}

impl Command for WriteParameterCommand {
    fn method(&self) -> &'static str {
        "write-parameters-queue"
    }

    fn params(&self) -> String {
        match self {
            Self::AirTemperature(t) => format!("{}={t}", self.parameter()),
            Self::Power(p) => format!("{}={p}", self.parameter()),
        }
    }
}

impl From<AirTemperature> for WriteParameterCommand {
    fn from(value: AirTemperature) -> Self {
        Self::AirTemperature(value)
    }
}

impl From<PowerLevel> for WriteParameterCommand {
    fn from(value: PowerLevel) -> Self {
        Self::Power(value)
    }
}
