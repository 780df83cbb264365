// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Translated labels for heater status and alarm codes.
//!
//! The control panel reports raw numeric codes. [`Labels`] maps a
//! `(language, code)` pair to the text shown to users. Lookups never fail:
//! a language without a table falls back to English, and a code that is not
//! in the table renders as [`UNKNOWN_LABEL`], since firmware may report codes
//! newer than the table.

use std::collections::{BTreeMap, HashMap};

use crate::types::Language;

/// Label returned for codes absent from the tables.
pub const UNKNOWN_LABEL: &str = "UNKNOWN";

const STATUS_DE: [&str; 10] = [
    "AUSGESCHALTET",
    "PELLET LAST",
    "WARTET FLAMME",
    "ZUNDUNG",
    "ARBEITEN",
    "ASCHKASTEN REINIGUNG",
    "ENDREINIGUNG",
    "BEREITHALTEN",
    "ALARM",
    "ALARMSPEICHER",
];

const STATUS_EN: [&str; 10] = [
    "OFF",
    "PELLET LOAD",
    "AWAITING FLAME",
    "LIGHTING",
    "WORKING",
    "ASHPAN CLEANING",
    "FINAL CLEANING",
    "STANDBY",
    "ALARM",
    "ALARM MEMORY",
];

const STATUS_FR: [&str; 10] = [
    "ETEINT",
    "CHARGE GRANULE DE BOIS",
    "FLAMME DANS L'ATTENTE",
    "ALLUMAGE",
    "TRAVAIL",
    "NETTOYAGE BRASERO",
    "NETTOYAGE FINAL",
    "ETRE PRET",
    "ALARME",
    "MEMOIRE D'ALARME",
];

const STATUS_IT: [&str; 10] = [
    "SPENTA",
    "CARICO PELLET",
    "ATTESA FIAMMA",
    "ACCENSIONE",
    "LAVORO",
    "PULIZIA BRACIERE",
    "PULIZIA FINALE",
    "STAND-BY",
    "ALLARME",
    "MEMORIA ALLARME",
];

const STATUS_ES: [&str; 10] = [
    "APAGADA",
    "PELLETS DE CARGA",
    "LLAMA A LA ESPERA",
    "IGNICION",
    "TRABAJANDO",
    "LA LIMPIEZA DEL CENICERO",
    "LIMPIEZA FINAL",
    "EN ENSPERA",
    "ALARMA",
    "MEMORIA DE ALARMA",
];

/// Alarm codes whose label is the same in every language.
const ALARM_CODES: [(i64, &str); 12] = [
    (0, "None"),
    (1, "E8"),
    (2, "E4"),
    (8, "E7"),
    (16, "E3"),
    (32, "E1"),
    (48, "E6"),
    (64, "E2"),
    (72, "E14"),
    (129, "E12"),
    (132, "E19"),
    (136, "E13"),
];

/// Alarm code 4 (missing pellet) carries a translated description.
const MISSING_PELLET: i64 = 4;

const fn status_table(language: Language) -> &'static [&'static str; 10] {
    match language {
        Language::De => &STATUS_DE,
        Language::En => &STATUS_EN,
        Language::Fr => &STATUS_FR,
        Language::It => &STATUS_IT,
        Language::Es => &STATUS_ES,
    }
}

const fn missing_pellet_label(language: Language) -> &'static str {
    match language {
        Language::De => "E9 - Fehlendes Pellet",
        Language::En => "E9 - Missing pellet",
        Language::Fr => "E9 - Granule manquant",
        Language::It => "E9 - Mancanza pellet",
        Language::Es => "E9 - Perdida de pellet",
    }
}

type Table = BTreeMap<i64, String>;

/// Immutable `(language, code) -> label` tables for status and alarm codes.
///
/// # Examples
///
/// ```
/// use efesto_lib::labels::{Labels, UNKNOWN_LABEL};
/// use efesto_lib::types::Language;
///
/// let labels = Labels::default();
/// assert_eq!(labels.status(Language::En, 4), "WORKING");
/// assert_eq!(labels.status(Language::It, 0), "SPENTA");
/// assert_eq!(labels.error(Language::Fr, 4), "E9 - Granule manquant");
/// assert_eq!(labels.status(Language::En, 42), UNKNOWN_LABEL);
///
/// let labels = Labels::empty().with_status_label(Language::En, 4, "RUNNING");
/// assert_eq!(labels.status(Language::De, 4), "RUNNING");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    status: HashMap<Language, Table>,
    error: HashMap<Language, Table>,
}

impl Labels {
    /// Creates empty tables. Every lookup yields [`UNKNOWN_LABEL`].
    #[must_use]
    pub fn empty() -> Self {
        Self {
            status: HashMap::new(),
            error: HashMap::new(),
        }
    }

    /// Adds or replaces a status label.
    #[must_use]
    pub fn with_status_label(
        mut self,
        language: Language,
        code: i64,
        label: impl Into<String>,
    ) -> Self {
        self.status
            .entry(language)
            .or_default()
            .insert(code, label.into());
        self
    }

    /// Adds or replaces an alarm label.
    #[must_use]
    pub fn with_error_label(
        mut self,
        language: Language,
        code: i64,
        label: impl Into<String>,
    ) -> Self {
        self.error
            .entry(language)
            .or_default()
            .insert(code, label.into());
        self
    }

    /// Returns the label for a heater status code.
    #[must_use]
    pub fn status(&self, language: Language, code: i64) -> &str {
        Self::lookup(&self.status, language, code)
    }

    /// Returns the label for an alarm code.
    #[must_use]
    pub fn error(&self, language: Language, code: i64) -> &str {
        Self::lookup(&self.error, language, code)
    }

    /// Returns the status labels of a language, ordered by code.
    #[must_use]
    pub fn status_labels(&self, language: Language) -> Vec<&str> {
        Self::table(&self.status, language)
            .map(|table| table.values().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn table(tables: &HashMap<Language, Table>, language: Language) -> Option<&Table> {
        tables
            .get(&language)
            .or_else(|| tables.get(&Language::En))
    }

    fn lookup(tables: &HashMap<Language, Table>, language: Language, code: i64) -> &str {
        Self::table(tables, language)
            .and_then(|table| table.get(&code))
            .map_or(UNKNOWN_LABEL, String::as_str)
    }
}

impl Default for Labels {
    /// The vendor tables for all supported languages.
    fn default() -> Self {
        let mut labels = Self::empty();
        for language in Language::ALL {
            for (code, label) in (0_i64..).zip(status_table(language)) {
                labels = labels.with_status_label(language, code, *label);
            }
            for (code, label) in ALARM_CODES {
                labels = labels.with_error_label(language, code, label);
            }
            labels = labels.with_error_label(
                language,
                MISSING_PELLET,
                missing_pellet_label(language),
            );
        }
        labels
    }
}
