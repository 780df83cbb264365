// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Immutable client configuration.

use std::fmt;

use crate::labels::Labels;
use crate::protocol::AJAX_PATH;
use crate::types::Language;

/// Settings fixed for the lifetime of an [`EfestoClient`](crate::EfestoClient).
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) base_url: String,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) device_id: String,
    pub(crate) language: Language,
    pub(crate) verbose: bool,
    pub(crate) labels: Labels,
}

impl ClientConfig {
    /// Returns the base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the controlled device identifier.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the display language.
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Returns whether body logging is enabled.
    #[must_use]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Returns the label tables.
    #[must_use]
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub(crate) fn ajax_url(&self) -> String {
        format!("{}{AJAX_PATH}", self.base_url)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("device_id", &self.device_id)
            .field("language", &self.language)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}
