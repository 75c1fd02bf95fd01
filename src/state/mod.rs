// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Base station state.
//!
//! [`BaseState`] holds one complete status document fetched from the base
//! station, together with typed views of the entities it contains. A state
//! is never modified after parsing; every fetch produces a new one.
//!
//! # Examples
//!
//! ```
//! use alpha2_lib::state::BaseState;
//!
//! let state = BaseState::parse(
//!     r#"<Devices><Device>
//!          <ID>EZR012345</ID><NAME>Home</NAME>
//!          <HEATAREA nr="1"><T_ACTUAL>20.5</T_ACTUAL><T_TARGET>21.0</T_TARGET></HEATAREA>
//!        </Device></Devices>"#,
//! )
//! .unwrap();
//!
//! assert_eq!(state.id(), "EZR012345");
//! let area = &state.heat_areas()[0];
//! assert_eq!(area.id.to_string(), "EZR012345:1");
//! assert_eq!(area.t_target, Some(21.0));
//! ```

mod base_state;
mod entities;

pub(crate) use base_state::DATETIME_FORMAT;
pub use base_state::BaseState;
pub use entities::{HeatArea, HeatControl, IoDevice};
