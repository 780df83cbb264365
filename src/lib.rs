// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `efesto_lib` - A Rust library to control Efesto pellet heaters.
//!
//! The heaters are managed through the vendor's web control panel. This
//! library logs in to the panel with a cookie session and drives one heater
//! through the panel's AJAX endpoint.
//!
//! # Supported Features
//!
//! - **Status**: Operating phase, alarm code, room and flue temperatures, power
//! - **Power control**: Turn the heater on and off
//! - **Setpoints**: Target room temperature and burner power level
//! - **Labels**: Status and alarm labels in German, English, French, Italian, Spanish
//!
//! # Quick Start
//!
//! ```no_run
//! use efesto_lib::EfestoClient;
//! use efesto_lib::types::{AirTemperature, Language};
//!
//! #[tokio::main]
//! async fn main() -> efesto_lib::Result<()> {
//!     // Logs in before returning; a client always holds a valid session
//!     let client = EfestoClient::builder("https://panel.example.com")
//!         .credentials("me@example.com", "secret")
//!         .device("ABCDEF123456")
//!         .language(Language::De)
//!         .connect()
//!         .await?;
//!
//!     let snapshot = client.status().await?;
//!     println!("{}: {}", snapshot.device_id(), snapshot.status_label());
//!
//!     client.set_temperature(AirTemperature::new(21.5)?).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! All operations return [`Result`]. Server-side refusals, redirects and
//! unreadable responses all surface as [`Error::Operation`]; transport
//! problems as [`Error::ConnectionFailed`] or [`Error::InvalidEndpoint`].
//!
//! # Logging
//!
//! The library emits [`tracing`] events and installs no subscriber.
//! With [`EfestoClientBuilder::verbose`] request and response bodies are
//! logged at debug level.

mod client;
pub mod command;
pub mod error;
pub mod labels;
pub mod protocol;
pub mod response;
pub mod session;
pub mod types;

pub use client::{ClientConfig, EfestoClient, EfestoClientBuilder};
pub use command::{Command, HeaterCommand, StateCommand, WriteParameterCommand};
pub use error::{Error, ParseError, Result, ValueError};
pub use labels::{Labels, UNKNOWN_LABEL};
pub use protocol::{Envelope, HttpConfig, HttpResponse, HttpTransport, RequestHeaders, Transport};
pub use response::DeviceSnapshot;
pub use session::{SessionManager, SessionPhase, SessionState};
pub use types::{AirTemperature, Language, PowerLevel};
