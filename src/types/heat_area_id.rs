// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heat area identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifier of a heat area.
///
/// The full form is `"<device id>:<nr>"`, e.g. `"EZR012345:3"`. A bare
/// number is accepted too; the device id is then taken from the most recent
/// data fetched from the base station.
///
/// # Examples
///
/// ```
/// use alpha2_lib::types::HeatAreaId;
///
/// let id: HeatAreaId = "EZR012345:3".parse().unwrap();
/// assert_eq!(id.device_id(), Some("EZR012345"));
/// assert_eq!(id.nr(), 3);
///
/// let id = HeatAreaId::from(4);
/// assert_eq!(id.device_id(), None);
/// assert_eq!(id.to_string(), "4");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeatAreaId {
    device_id: Option<String>,
    nr: u32,
}

impl HeatAreaId {
    /// Creates a fully qualified heat area id.
    #[must_use]
    pub fn new(device_id: impl Into<String>, nr: u32) -> Self {
        Self {
            device_id: Some(device_id.into()),
            nr,
        }
    }

    /// Returns the device id part, if present.
    #[must_use]
    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    /// Returns the heat area number on its base station.
    #[must_use]
    pub fn nr(&self) -> u32 {
        self.nr
    }
}

impl From<u32> for HeatAreaId {
    fn from(nr: u32) -> Self {
        Self {
            device_id: None,
            nr,
        }
    }
}

impl FromStr for HeatAreaId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidHeatAreaId(s.to_string());

        let (device_id, nr) = match s.rsplit_once(':') {
            Some((device, nr)) if !device.is_empty() => (Some(device.to_string()), nr),
            Some(_) => return Err(invalid()),
            None => (None, s),
        };
        let nr = nr.trim().parse().map_err(|_| invalid())?;

        Ok(Self { device_id, nr })
    }
}

impl fmt::Display for HeatAreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.device_id {
            Some(device) => write!(f, "{device}:{}", self.nr),
            None => write!(f, "{}", self.nr),
        }
    }
}
