// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsed status document of a base station.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::types::EntityKind;
use crate::xml::XmlElement;

use super::{HeatArea, HeatControl, IoDevice};

/// Date/time format used by the base station, e.g. `2021-05-24T10:13:30`.
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Base-level elements with a typed accessor.
const BASE_FIELDS: &[&str] = &["ID", "NAME", "TYPE", "DATETIME", "COOLING"];

/// One complete status document of a base station.
///
/// The raw element tree is kept alongside the typed views so that fields
/// without a typed accessor stay reachable through [`document`](Self::document).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseState {
    document: XmlElement,
    id: String,
    name: Option<String>,
    device_type: Option<String>,
    datetime: Option<NaiveDateTime>,
    cooling: Option<bool>,
    heat_areas: Vec<HeatArea>,
    heat_controls: Vec<HeatControl>,
    io_devices: Vec<IoDevice>,
    extra: BTreeMap<String, String>,
}

impl BaseState {
    /// Parses a status document (`/data/static.xml`).
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the text is not well-formed XML, lacks the
    /// `Devices/Device/ID` structure or carries malformed entity fields.
    pub fn parse(xml: &str) -> Result<Self, ParseError> {
        Self::from_document(XmlElement::parse(xml)?)
    }

    /// Builds the typed views from an already parsed document.
    ///
    /// # Errors
    ///
    /// Same as [`parse`](Self::parse), minus XML syntax errors.
    pub fn from_document(document: XmlElement) -> Result<Self, ParseError> {
        if document.name() != "Devices" {
            return Err(ParseError::MissingElement("Devices".to_string()));
        }
        let device = document
            .child("Device")
            .ok_or_else(|| ParseError::MissingElement("Devices/Device".to_string()))?;
        let id = device
            .child_text("ID")
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ParseError::MissingElement("Devices/Device/ID".to_string()))?
            .to_string();

        let datetime = device.child_text("DATETIME").and_then(|raw| {
            NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
                .inspect_err(|e| {
                    tracing::warn!(value = %raw, error = %e, "Ignoring unparseable DATETIME");
                })
                .ok()
        });

        let heat_areas = device
            .children_named(EntityKind::HeatArea.element_name())
            .map(|e| HeatArea::from_element(&id, e))
            .collect::<Result<Vec<_>, _>>()?;
        let heat_controls = device
            .children_named(EntityKind::HeatControl.element_name())
            .map(|e| HeatControl::from_element(&id, e))
            .collect::<Result<Vec<_>, _>>()?;
        let io_devices = device
            .children_named(EntityKind::IoDevice.element_name())
            .map(|e| IoDevice::from_element(&id, e))
            .collect::<Result<Vec<_>, _>>()?;

        let extra = device
            .children()
            .iter()
            .filter(|c| c.is_leaf() && !BASE_FIELDS.contains(&c.name()))
            .map(|c| (c.name().to_string(), c.text().to_string()))
            .collect();

        Ok(Self {
            name: device.child_text("NAME").map(str::to_string),
            device_type: device.child_text("TYPE").map(str::to_string),
            cooling: device.child_text("COOLING").map(|c| c == "1"),
            datetime,
            heat_areas,
            heat_controls,
            io_devices,
            extra,
            id,
            document,
        })
    }

    /// Returns the raw document.
    #[must_use]
    pub fn document(&self) -> &XmlElement {
        &self.document
    }

    /// Returns the base station id (`ID`).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the base station name (`NAME`).
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the base station type (`TYPE`).
    #[must_use]
    pub fn device_type(&self) -> Option<&str> {
        self.device_type.as_deref()
    }

    /// Returns the base station clock (`DATETIME`).
    #[must_use]
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        self.datetime
    }

    /// Returns whether cooling mode is active (`COOLING`).
    #[must_use]
    pub fn cooling(&self) -> Option<bool> {
        self.cooling
    }

    /// Returns all heat areas in document order.
    #[must_use]
    pub fn heat_areas(&self) -> &[HeatArea] {
        &self.heat_areas
    }

    /// Returns the heat area with the given number.
    #[must_use]
    pub fn heat_area(&self, nr: u32) -> Option<&HeatArea> {
        self.heat_areas.iter().find(|a| a.nr == nr)
    }

    /// Returns all heat controls in document order.
    #[must_use]
    pub fn heat_controls(&self) -> &[HeatControl] {
        &self.heat_controls
    }

    /// Returns all IO devices in document order.
    #[must_use]
    pub fn io_devices(&self) -> &[IoDevice] {
        &self.io_devices
    }

    /// Returns base-level leaf fields without a typed accessor.
    #[must_use]
    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }
}
