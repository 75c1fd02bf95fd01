// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Change commands for Alpha2 base stations.
//!
//! A change is an XML fragment placed inside the `<Device>` element of a
//! change document, next to the `<ID>` of the base station it targets:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <Devices><Device><ID>EZR012345</ID>{fragment}</Device></Devices>
//! ```
//!
//! # Available Commands
//!
//! | Command Type | Purpose | Fragment |
//! |-------------|---------|---------|
//! | [`HeatAreaCommand`] | Change heat area settings | `<HEATAREA nr="1"><T_TARGET>21.5</T_TARGET></HEATAREA>` |
//! | [`DateTimeCommand`] | Set the base station clock | `<DATETIME>2024-01-15T10:30:00</DATETIME>` |
//! | [`CoolingCommand`] | Switch cooling mode | `<COOLING>1</COOLING>` |
//! | [`RawCommand`] | Any caller-built fragment | as given |
//!
//! # Examples
//!
//! ```
//! use alpha2_lib::command::{Command, HeatAreaCommand, HeatAreaSettings, changes_document};
//!
//! let cmd = HeatAreaCommand::new(1, HeatAreaSettings::new().t_target(21.5)).unwrap();
//! assert_eq!(cmd.to_fragment(), r#"<HEATAREA nr="1"><T_TARGET>21.5</T_TARGET></HEATAREA>"#);
//!
//! let body = changes_document("EZR012345", &cmd.to_fragment());
//! assert!(body.contains("<ID>EZR012345</ID><HEATAREA nr=\"1\">"));
//! ```

mod heat_area;
mod system;

pub use heat_area::{HeatAreaCommand, HeatAreaSettings};
pub use system::{CoolingCommand, DateTimeCommand, RawCommand};

use crate::xml::escape;

/// A change that can be sent to a base station.
pub trait Command {
    /// Returns the XML fragment placed inside `<Device>`.
    fn to_fragment(&self) -> String;
}

/// Wraps a fragment into a complete change document for one base station.
#[must_use]
pub fn changes_document(device_id: &str, fragment: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <Devices><Device><ID>{}</ID>{fragment}</Device></Devices>",
        escape(device_id)
    )
}
