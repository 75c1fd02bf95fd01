// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Field typing for base station entities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ValidationError};

/// The kind of entity a field belongs to.
///
/// # Examples
///
/// ```
/// use alpha2_lib::types::EntityKind;
///
/// let kind: EntityKind = "HEATAREA".parse().unwrap();
/// assert_eq!(kind, EntityKind::HeatArea);
/// assert!("INVALID".parse::<EntityKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A heating zone (`<HEATAREA>`).
    HeatArea,
    /// A valve output channel (`<HEATCTRL>`).
    HeatControl,
    /// A room control unit or sensor (`<IODEVICE>`).
    IoDevice,
}

impl EntityKind {
    /// Returns the element name used on the wire.
    #[must_use]
    pub const fn element_name(self) -> &'static str {
        match self {
            Self::HeatArea => "HEATAREA",
            Self::HeatControl => "HEATCTRL",
            Self::IoDevice => "IODEVICE",
        }
    }

    /// Returns the known fields of this entity kind and their types.
    #[must_use]
    pub const fn fields(self) -> &'static [(&'static str, FieldType)] {
        match self {
            Self::HeatArea => HEATAREA_FIELDS,
            Self::HeatControl => HEATCTRL_FIELDS,
            Self::IoDevice => IODEVICE_FIELDS,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

impl FromStr for EntityKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HEATAREA" => Ok(Self::HeatArea),
            "HEATCTRL" => Ok(Self::HeatControl),
            "IODEVICE" => Ok(Self::IoDevice),
            other => Err(ValidationError::UnknownEntityKind(other.to_string())),
        }
    }
}

/// Wire type of a known field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// `"1"` or `"0"`.
    Bool,
    /// Decimal integer.
    Int,
    /// Decimal number, written with one fractional digit.
    Float,
    /// Free text.
    Text,
}

use FieldType::{Bool, Float, Int, Text};

const HEATAREA_FIELDS: &[(&str, FieldType)] = &[
    ("BLOCK_HC", Bool),
    ("HEATAREA_NAME", Text),
    ("HEATAREA_MODE", Int),
    ("HEATAREA_STATE", Int),
    ("HEATINGSYSTEM", Int),
    ("ISLOCKED", Bool),
    ("LIGHT", Int),
    ("LOCK_AVAILABLE", Bool),
    ("LOCK_CODE", Text),
    ("OFFSET", Float),
    ("PARTY", Bool),
    ("PARTY_REMAININGTIME", Int),
    ("PRESENCE", Bool),
    ("PROGRAM_SOURCE", Int),
    ("PROGRAM_WEEK", Int),
    ("PROGRAM_WEEKEND", Int),
    ("RPM_MOTOR", Int),
    ("SENSOR_EXT", Int),
    ("T_ACTUAL", Float),
    ("T_ACTUAL_EXT", Float),
    ("T_COOL_DAY", Float),
    ("T_COOL_NIGHT", Float),
    ("T_FLOOR_DAY", Float),
    ("T_HEAT_DAY", Float),
    ("T_HEAT_NIGHT", Float),
    ("T_TARGET", Float),
    ("T_TARGET_ADJUSTABLE", Bool),
    ("T_TARGET_BASE", Float),
    ("T_TARGET_MIN", Float),
    ("T_TARGET_MAX", Float),
];

const HEATCTRL_FIELDS: &[(&str, FieldType)] = &[
    ("ACTOR", Int),
    ("ACTOR_PERCENT", Int),
    ("HEATAREA_NR", Int),
    ("INUSE", Bool),
];

const IODEVICE_FIELDS: &[(&str, FieldType)] = &[
    ("BATTERY", Int),
    ("HEATAREA_NR", Int),
    ("IODEVICE_COMERROR", Int),
    ("IODEVICE_ID", Int),
    ("IODEVICE_STATE", Int),
    ("IODEVICE_TYPE", Int),
    ("IODEVICE_VERS_HW", Text),
    ("IODEVICE_VERS_SW", Text),
    ("ISON", Bool),
    ("SIGNALSTRENGTH", Int),
];

/// Returns the type of a known field, or `None` for unrecognized fields.
#[must_use]
pub fn field_type(kind: EntityKind, name: &str) -> Option<FieldType> {
    kind.fields()
        .iter()
        .find(|(field, _)| *field == name)
        .map(|(_, ty)| *ty)
}

/// A typed field value.
///
/// # Examples
///
/// ```
/// use alpha2_lib::types::FieldValue;
///
/// assert_eq!(FieldValue::from(21.5).as_f64(), Some(21.5));
/// assert_eq!(FieldValue::from(true).as_bool(), Some(true));
/// assert_eq!(FieldValue::from("Bad").as_str(), Some("Bad"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A flag.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A decimal number.
    Float(f64),
    /// Free text.
    Text(String),
}

impl FieldValue {
    /// Returns the value as a bool, if it is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as an integer, if it is one.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float. Integers are widened.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the value as text, if it is text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => f.write_str(if *b { "1" } else { "0" }),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Converts element text received from the base station to a typed value.
///
/// Unknown fields are kept as text. Numeric fields with empty text yield
/// `None`.
///
/// # Errors
///
/// Returns `ParseError::InvalidValue` if a numeric field holds something
/// that is not a number.
///
/// # Examples
///
/// ```
/// use alpha2_lib::types::{EntityKind, FieldValue, convert_from_xml};
///
/// let value = convert_from_xml(EntityKind::HeatArea, "T_ACTUAL", "19.2").unwrap();
/// assert_eq!(value, Some(FieldValue::Float(19.2)));
///
/// let value = convert_from_xml(EntityKind::HeatControl, "INUSE", "0").unwrap();
/// assert_eq!(value, Some(FieldValue::Bool(false)));
/// ```
pub fn convert_from_xml(
    kind: EntityKind,
    name: &str,
    text: &str,
) -> Result<Option<FieldValue>, ParseError> {
    let invalid = |message: String| ParseError::InvalidValue {
        field: format!("{kind}.{name}"),
        message,
    };

    match field_type(kind, name).unwrap_or(FieldType::Text) {
        FieldType::Bool => Ok(Some(FieldValue::Bool(text == "1"))),
        FieldType::Text => Ok(Some(FieldValue::Text(text.to_string()))),
        FieldType::Int if text.is_empty() => Ok(None),
        FieldType::Float if text.is_empty() => Ok(None),
        FieldType::Int => text
            .parse()
            .map(|i| Some(FieldValue::Int(i)))
            .map_err(|e| invalid(format!("'{text}': {e}"))),
        FieldType::Float => text
            .parse()
            .map(|f| Some(FieldValue::Float(f)))
            .map_err(|e| invalid(format!("'{text}': {e}"))),
    }
}

/// Converts a typed value to element text for the base station.
///
/// Float fields are always written with one fractional digit, so an integer
/// given for a float field is widened.
///
/// # Examples
///
/// ```
/// use alpha2_lib::types::{EntityKind, FieldValue, convert_for_xml};
///
/// let text = convert_for_xml(EntityKind::HeatArea, "T_TARGET", &FieldValue::Float(19.2122312));
/// assert_eq!(text, "19.2");
///
/// let text = convert_for_xml(EntityKind::HeatArea, "BLOCK_HC", &FieldValue::Bool(true));
/// assert_eq!(text, "1");
/// ```
#[must_use]
pub fn convert_for_xml(kind: EntityKind, name: &str, value: &FieldValue) -> String {
    match (field_type(kind, name), value) {
        (Some(FieldType::Float), FieldValue::Float(_) | FieldValue::Int(_)) => {
            format!("{:.1}", value.as_f64().unwrap_or_default())
        }
        _ => value.to_string(),
    }
}
