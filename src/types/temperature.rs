// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Target air temperature type.

use std::fmt;

use crate::error::ValueError;

/// Target room temperature in degrees Celsius.
///
/// The value is rendered the way the control panel expects it in a
/// `set-air-temperature=<value>` parameter: whole numbers without a
/// fractional part, half degrees with one decimal.
///
/// # Examples
///
/// ```
/// use efesto_lib::types::AirTemperature;
///
/// assert_eq!(AirTemperature::new(21.0).unwrap().to_string(), "21");
/// assert_eq!(AirTemperature::new(20.5).unwrap().to_string(), "20.5");
/// assert!(AirTemperature::new(f64::NAN).is_err());
/// assert!(AirTemperature::new(80.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct AirTemperature(f64);

impl AirTemperature {
    /// Lowest accepted temperature.
    pub const MIN: f64 = 0.0;

    /// Highest accepted temperature.
    pub const MAX: f64 = 50.0;

    /// Creates a new target temperature.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotFinite` for NaN or infinite input and
    /// `ValueError::OutOfRange` outside 0-50.
    pub fn new(celsius: f64) -> Result<Self, ValueError> {
        if !celsius.is_finite() {
            return Err(ValueError::NotFinite);
        }
        if !(Self::MIN..=Self::MAX).contains(&celsius) {
            return Err(ValueError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: celsius,
            });
        }
        Ok(Self(celsius))
    }

    /// Returns the temperature in degrees Celsius.
    #[must_use]
    pub const fn celsius(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for AirTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64's Display already drops a zero fraction ("21", not "21.0")
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for AirTemperature {
    type Error = ValueError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<u8> for AirTemperature {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(f64::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_display() {
        assert_eq!(AirTemperature::new(19.0).unwrap().to_string(), "19");
        assert_eq!(AirTemperature::new(22.5).unwrap().to_string(), "22.5");
    }

    #[test]
    fn temperature_rejects_non_finite() {
        assert_eq!(
            AirTemperature::new(f64::INFINITY).unwrap_err(),
            ValueError::NotFinite
        );
    }

    #[test]
    fn temperature_rejects_out_of_range() {
        assert!(AirTemperature::new(-1.0).is_err());
        assert!(AirTemperature::new(50.5).is_err());
        assert!(AirTemperature::try_from(20_u8).is_ok());
    }

    #[test]
    fn temperature_bounds_inclusive() {
        assert!(AirTemperature::new(AirTemperature::MIN).is_ok());
        assert!(AirTemperature::new(AirTemperature::MAX).is_ok());
    }
}
