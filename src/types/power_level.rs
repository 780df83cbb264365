// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power level type for burner control.

use std::fmt;

use crate::error::ValueError;

/// Burner power level (1-5).
///
/// # Examples
///
/// ```
/// use efesto_lib::types::PowerLevel;
///
/// let level = PowerLevel::new(3).unwrap();
/// assert_eq!(level.value(), 3);
/// assert_eq!(level.to_string(), "3");
///
/// assert!(PowerLevel::new(0).is_err());
/// assert!(PowerLevel::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PowerLevel(u8);

impl PowerLevel {
    /// Lowest power level.
    pub const MIN: Self = Self(1);

    /// Highest power level.
    pub const MAX: Self = Self(5);

    /// Creates a new power level.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside 1-5.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&value) {
            return Err(ValueError::OutOfRange {
                min: f64::from(Self::MIN.0),
                max: f64::from(Self::MAX.0),
                actual: f64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Returns the power level value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for PowerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for PowerLevel {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_level_valid_values() {
        for v in 1..=5 {
            assert_eq!(PowerLevel::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn power_level_out_of_range() {
        let err = PowerLevel::new(9).unwrap_err();
        assert_eq!(
            err,
            ValueError::OutOfRange {
                min: 1.0,
                max: 5.0,
                actual: 9.0
            }
        );
        assert!(PowerLevel::try_from(0).is_err());
    }

    #[test]
    fn power_level_ordering() {
        assert!(PowerLevel::MIN < PowerLevel::MAX);
    }
}
