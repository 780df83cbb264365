// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Display language for translated labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Language used to render status and alarm labels.
///
/// # Examples
///
/// ```
/// use efesto_lib::types::Language;
///
/// let lang: Language = "IT".parse().unwrap();
/// assert_eq!(lang, Language::It);
/// assert_eq!(lang.code(), "it");
/// assert_eq!(Language::default(), Language::En);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// German.
    De,
    /// English.
    #[default]
    En,
    /// French.
    Fr,
    /// Italian.
    It,
    /// Spanish.
    Es,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Self; 5] = [Self::De, Self::En, Self::Fr, Self::It, Self::Es];

    /// Returns the two-letter language code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::De => "de",
            Self::En => "en",
            Self::Fr => "fr",
            Self::It => "it",
            Self::Es => "es",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "de" => Ok(Self::De),
            "en" => Ok(Self::En),
            "fr" => Ok(Self::Fr),
            "it" => Ok(Self::It),
            "es" => Ok(Self::Es),
            _ => Err(ValueError::UnsupportedLanguage(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_codes() {
        for lang in Language::ALL {
            assert_eq!(lang.code().parse::<Language>().unwrap(), lang);
        }
    }

    #[test]
    fn parse_unsupported() {
        assert_eq!(
            "nl".parse::<Language>().unwrap_err(),
            ValueError::UnsupportedLanguage("nl".to_string())
        );
    }

    #[test]
    fn serde_lowercase() {
        let json = serde_json::to_string(&Language::Fr).unwrap();
        assert_eq!(json, "\"fr\"");
        let lang: Language = serde_json::from_str("\"es\"").unwrap();
        assert_eq!(lang, Language::Es);
    }
}
