// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Alpha2 Lib - A Rust library to query and control Möhlenhoff Alpha2
//! underfloor heating base stations.
//!
//! The base station publishes its complete state as one XML document over
//! plain HTTP and accepts changes as small XML documents. This library reads
//! that document into typed structures and builds the change documents.
//!
//! # Supported Features
//!
//! - **Status**: base station id, name, clock and cooling mode
//! - **Heat areas**: temperatures, modes and every other zone setting
//! - **Heat controls and IO devices**: valve channels, room units, sensors,
//!   each linked to the heat area it serves
//! - **Changes**: heat area settings, clock, cooling mode, raw fragments
//!
//! # Quick Start
//!
//! ```no_run
//! use alpha2_lib::{Base, HeatAreaSettings};
//!
//! #[tokio::main]
//! async fn main() -> alpha2_lib::Result<()> {
//!     let base = Base::new("192.168.1.11")?;
//!     base.update_data().await?;
//!
//!     let area = &base.heat_areas()[0];
//!     println!("{:?} is at {:?} °C", area.name, area.t_actual);
//!
//!     base.update_heat_area(area.id.clone(), HeatAreaSettings::new().t_target(21.5))
//!         .await?;
//!
//!     // Changes become visible after the next fetch
//!     base.update_data().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Custom Timeouts
//!
//! ```no_run
//! use std::time::Duration;
//! use alpha2_lib::{Base, HttpConfig};
//!
//! # async fn example() -> alpha2_lib::Result<()> {
//! let base = Base::with_config(
//!     HttpConfig::new("alpha2.lan").with_timeout(Duration::from_secs(3)),
//! )?
//! .with_command_timeout(Duration::from_secs(30));
//!
//! base.update_data().await?;
//! base.set_cooling(true).await?;
//! # Ok(())
//! # }
//! ```

mod base;
pub mod command;
pub mod error;
pub mod protocol;
pub mod state;
pub mod types;
pub mod xml;

pub use base::Base;
pub use command::{
    Command, CoolingCommand, DateTimeCommand, HeatAreaCommand, HeatAreaSettings, RawCommand,
};
pub use error::{Error, ParseError, ProtocolError, Result, ValidationError};
pub use protocol::{HttpClient, HttpConfig, Protocol};
pub use state::{BaseState, HeatArea, HeatControl, IoDevice};
pub use types::{EntityKind, FieldType, FieldValue, HeatAreaId};
