// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for heater control.
//!
//! Setter inputs are validated when the value is constructed, so a request
//! carrying an out-of-range value is never sent to the control panel.
//!
//! # Types
//!
//! - [`AirTemperature`] - Target room temperature in degrees Celsius (0-50)
//! - [`PowerLevel`] - Target burner power level (1-5)
//! - [`Language`] - Display language for status and alarm labels

mod language;
mod power_level;
mod temperature;

pub use language::Language;
pub use power_level::PowerLevel;
pub use temperature::AirTemperature;
