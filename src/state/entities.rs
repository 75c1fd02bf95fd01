// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed views of heat areas, heat controls and IO devices.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::types::{EntityKind, FieldValue, HeatAreaId, convert_from_xml};
use crate::xml::XmlElement;

/// Reads the `nr` attribute every entity element carries.
fn parse_nr(kind: EntityKind, element: &XmlElement) -> Result<u32, ParseError> {
    let raw = element
        .attribute("nr")
        .ok_or_else(|| ParseError::MissingElement(format!("{kind}@nr")))?;
    raw.trim().parse().map_err(|e| ParseError::InvalidValue {
        field: format!("{kind}@nr"),
        message: format!("'{raw}': {e}"),
    })
}

/// Yields `(name, value, raw text)` for every leaf child of an entity.
fn leaf_fields(
    kind: EntityKind,
    element: &XmlElement,
) -> impl Iterator<Item = Result<(&str, Option<FieldValue>, &str), ParseError>> {
    element
        .children()
        .iter()
        .filter(|child| child.is_leaf())
        .map(move |child| {
            convert_from_xml(kind, child.name(), child.text())
                .map(|value| (child.name(), value, child.text()))
        })
}

/// A heating zone of the base station.
///
/// Every known vendor field has a typed slot; fields this library does not
/// know are kept verbatim in [`extra`](Self::extra).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatArea {
    /// Identifier of the form `"<device id>:<nr>"`.
    pub id: HeatAreaId,
    /// Number of the heat area on its base station.
    pub nr: u32,
    /// `HEATAREA_NAME`.
    pub name: Option<String>,
    /// `HEATAREA_MODE`: 0 auto, 1 day, 2 night.
    pub mode: Option<i64>,
    /// `HEATAREA_STATE`.
    pub state: Option<i64>,
    /// `HEATINGSYSTEM`: 0 standard floor heating, 1 low-energy floor heating,
    /// 2 radiator, 3 passive convector, 4 active convector.
    pub heating_system: Option<i64>,
    /// `BLOCK_HC`.
    pub block_hc: Option<bool>,
    /// `ISLOCKED`.
    pub is_locked: Option<bool>,
    /// `LIGHT`.
    pub light: Option<i64>,
    /// `LOCK_AVAILABLE`.
    pub lock_available: Option<bool>,
    /// `LOCK_CODE`.
    pub lock_code: Option<String>,
    /// `OFFSET`.
    pub offset: Option<f64>,
    /// `PARTY`.
    pub party: Option<bool>,
    /// `PARTY_REMAININGTIME`.
    pub party_remaining_time: Option<i64>,
    /// `PRESENCE`.
    pub presence: Option<bool>,
    /// `PROGRAM_SOURCE`.
    pub program_source: Option<i64>,
    /// `PROGRAM_WEEK`.
    pub program_week: Option<i64>,
    /// `PROGRAM_WEEKEND`.
    pub program_weekend: Option<i64>,
    /// `RPM_MOTOR`.
    pub rpm_motor: Option<i64>,
    /// `SENSOR_EXT`: 0 none, 1 dew point, 2 floor, 3 room.
    pub sensor_ext: Option<i64>,
    /// `T_ACTUAL`: measured temperature.
    pub t_actual: Option<f64>,
    /// `T_ACTUAL_EXT`: temperature of the external sensor.
    pub t_actual_ext: Option<f64>,
    /// `T_COOL_DAY`.
    pub t_cool_day: Option<f64>,
    /// `T_COOL_NIGHT`.
    pub t_cool_night: Option<f64>,
    /// `T_FLOOR_DAY`.
    pub t_floor_day: Option<f64>,
    /// `T_HEAT_DAY`.
    pub t_heat_day: Option<f64>,
    /// `T_HEAT_NIGHT`.
    pub t_heat_night: Option<f64>,
    /// `T_TARGET`: target temperature.
    pub t_target: Option<f64>,
    /// `T_TARGET_ADJUSTABLE`.
    pub t_target_adjustable: Option<bool>,
    /// `T_TARGET_BASE`.
    pub t_target_base: Option<f64>,
    /// `T_TARGET_MIN`.
    pub t_target_min: Option<f64>,
    /// `T_TARGET_MAX`.
    pub t_target_max: Option<f64>,
    /// Fields not known to this library, as received.
    pub extra: BTreeMap<String, String>,
}

impl HeatArea {
    /// Builds a heat area from its `<HEATAREA>` element.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the `nr` attribute is missing or a known field
    /// holds a malformed value.
    pub fn from_element(device_id: &str, element: &XmlElement) -> Result<Self, ParseError> {
        let nr = parse_nr(EntityKind::HeatArea, element)?;
        let mut area = Self {
            id: HeatAreaId::new(device_id, nr),
            nr,
            ..Self::default()
        };

        for field in leaf_fields(EntityKind::HeatArea, element) {
            let (name, value, raw) = field?;
            match (name, value) {
                ("HEATAREA_NAME", Some(FieldValue::Text(v))) => area.name = Some(v),
                ("HEATAREA_MODE", v) => area.mode = v.and_then(|v| v.as_i64()),
                ("HEATAREA_STATE", v) => area.state = v.and_then(|v| v.as_i64()),
                ("HEATINGSYSTEM", v) => area.heating_system = v.and_then(|v| v.as_i64()),
                ("BLOCK_HC", v) => area.block_hc = v.and_then(|v| v.as_bool()),
                ("ISLOCKED", v) => area.is_locked = v.and_then(|v| v.as_bool()),
                ("LIGHT", v) => area.light = v.and_then(|v| v.as_i64()),
                ("LOCK_AVAILABLE", v) => area.lock_available = v.and_then(|v| v.as_bool()),
                ("LOCK_CODE", Some(FieldValue::Text(v))) => area.lock_code = Some(v),
                ("OFFSET", v) => area.offset = v.and_then(|v| v.as_f64()),
                ("PARTY", v) => area.party = v.and_then(|v| v.as_bool()),
                ("PARTY_REMAININGTIME", v) => {
                    area.party_remaining_time = v.and_then(|v| v.as_i64());
                }
                ("PRESENCE", v) => area.presence = v.and_then(|v| v.as_bool()),
                ("PROGRAM_SOURCE", v) => area.program_source = v.and_then(|v| v.as_i64()),
                ("PROGRAM_WEEK", v) => area.program_week = v.and_then(|v| v.as_i64()),
                ("PROGRAM_WEEKEND", v) => area.program_weekend = v.and_then(|v| v.as_i64()),
                ("RPM_MOTOR", v) => area.rpm_motor = v.and_then(|v| v.as_i64()),
                ("SENSOR_EXT", v) => area.sensor_ext = v.and_then(|v| v.as_i64()),
                ("T_ACTUAL", v) => area.t_actual = v.and_then(|v| v.as_f64()),
                ("T_ACTUAL_EXT", v) => area.t_actual_ext = v.and_then(|v| v.as_f64()),
                ("T_COOL_DAY", v) => area.t_cool_day = v.and_then(|v| v.as_f64()),
                ("T_COOL_NIGHT", v) => area.t_cool_night = v.and_then(|v| v.as_f64()),
                ("T_FLOOR_DAY", v) => area.t_floor_day = v.and_then(|v| v.as_f64()),
                ("T_HEAT_DAY", v) => area.t_heat_day = v.and_then(|v| v.as_f64()),
                ("T_HEAT_NIGHT", v) => area.t_heat_night = v.and_then(|v| v.as_f64()),
                ("T_TARGET", v) => area.t_target = v.and_then(|v| v.as_f64()),
                ("T_TARGET_ADJUSTABLE", v) => {
                    area.t_target_adjustable = v.and_then(|v| v.as_bool());
                }
                ("T_TARGET_BASE", v) => area.t_target_base = v.and_then(|v| v.as_f64()),
                ("T_TARGET_MIN", v) => area.t_target_min = v.and_then(|v| v.as_f64()),
                ("T_TARGET_MAX", v) => area.t_target_max = v.and_then(|v| v.as_f64()),
                _ => {
                    area.extra.insert(name.to_string(), raw.to_string());
                }
            }
        }

        Ok(area)
    }
}

/// A valve output channel of the base station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatControl {
    /// Channel number on the base station.
    pub nr: u32,
    /// `INUSE`.
    pub in_use: Option<bool>,
    /// `HEATAREA_NR`: number of the heat area this channel serves.
    pub heat_area_nr: Option<i64>,
    /// `ACTOR`.
    pub actor: Option<i64>,
    /// `ACTOR_PERCENT`.
    pub actor_percent: Option<i64>,
    /// The heat area this channel serves, if it is in use and assigned.
    pub heat_area_id: Option<HeatAreaId>,
    /// Fields not known to this library, as received.
    pub extra: BTreeMap<String, String>,
}

impl HeatControl {
    /// Builds a heat control from its `<HEATCTRL>` element.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the `nr` attribute is missing or a known field
    /// holds a malformed value.
    pub fn from_element(device_id: &str, element: &XmlElement) -> Result<Self, ParseError> {
        let mut control = Self {
            nr: parse_nr(EntityKind::HeatControl, element)?,
            ..Self::default()
        };

        for field in leaf_fields(EntityKind::HeatControl, element) {
            let (name, value, raw) = field?;
            match name {
                "INUSE" => control.in_use = value.and_then(|v| v.as_bool()),
                "HEATAREA_NR" => control.heat_area_nr = value.and_then(|v| v.as_i64()),
                "ACTOR" => control.actor = value.and_then(|v| v.as_i64()),
                "ACTOR_PERCENT" => control.actor_percent = value.and_then(|v| v.as_i64()),
                _ => {
                    control.extra.insert(name.to_string(), raw.to_string());
                }
            }
        }

        if control.in_use == Some(true) {
            control.heat_area_id = linked_heat_area(device_id, control.heat_area_nr);
        }
        Ok(control)
    }
}

/// A room control unit or sensor paired with the base station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IoDevice {
    /// Device number on the base station.
    pub nr: u32,
    /// `IODEVICE_ID`.
    pub io_device_id: Option<i64>,
    /// `IODEVICE_TYPE`.
    pub device_type: Option<i64>,
    /// `IODEVICE_STATE`.
    pub state: Option<i64>,
    /// `IODEVICE_COMERROR`.
    pub com_error: Option<i64>,
    /// `IODEVICE_VERS_HW`.
    pub hardware_version: Option<String>,
    /// `IODEVICE_VERS_SW`.
    pub software_version: Option<String>,
    /// `BATTERY`.
    pub battery: Option<i64>,
    /// `SIGNALSTRENGTH`.
    pub signal_strength: Option<i64>,
    /// `ISON`.
    pub is_on: Option<bool>,
    /// `HEATAREA_NR`: number of the heat area this device belongs to.
    pub heat_area_nr: Option<i64>,
    /// The heat area this device belongs to, if assigned.
    pub heat_area_id: Option<HeatAreaId>,
    /// Fields not known to this library, as received.
    pub extra: BTreeMap<String, String>,
}

impl IoDevice {
    /// Builds an IO device from its `<IODEVICE>` element.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the `nr` attribute is missing or a known field
    /// holds a malformed value.
    pub fn from_element(device_id: &str, element: &XmlElement) -> Result<Self, ParseError> {
        let mut device = Self {
            nr: parse_nr(EntityKind::IoDevice, element)?,
            ..Self::default()
        };

        for field in leaf_fields(EntityKind::IoDevice, element) {
            let (name, value, raw) = field?;
            match (name, value) {
                ("IODEVICE_ID", v) => device.io_device_id = v.and_then(|v| v.as_i64()),
                ("IODEVICE_TYPE", v) => device.device_type = v.and_then(|v| v.as_i64()),
                ("IODEVICE_STATE", v) => device.state = v.and_then(|v| v.as_i64()),
                ("IODEVICE_COMERROR", v) => device.com_error = v.and_then(|v| v.as_i64()),
                ("IODEVICE_VERS_HW", Some(FieldValue::Text(v))) => {
                    device.hardware_version = Some(v);
                }
                ("IODEVICE_VERS_SW", Some(FieldValue::Text(v))) => {
                    device.software_version = Some(v);
                }
                ("BATTERY", v) => device.battery = v.and_then(|v| v.as_i64()),
                ("SIGNALSTRENGTH", v) => device.signal_strength = v.and_then(|v| v.as_i64()),
                ("ISON", v) => device.is_on = v.and_then(|v| v.as_bool()),
                ("HEATAREA_NR", v) => device.heat_area_nr = v.and_then(|v| v.as_i64()),
                _ => {
                    device.extra.insert(name.to_string(), raw.to_string());
                }
            }
        }

        device.heat_area_id = linked_heat_area(device_id, device.heat_area_nr);
        Ok(device)
    }
}

/// Heat area numbers start at 1; 0 means "not assigned".
fn linked_heat_area(device_id: &str, heat_area_nr: Option<i64>) -> Option<HeatAreaId> {
    heat_area_nr
        .and_then(|nr| u32::try_from(nr).ok())
        .filter(|nr| *nr > 0)
        .map(|nr| HeatAreaId::new(device_id, nr))
}
