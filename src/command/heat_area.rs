// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heat area change command.

use std::fmt::Write as _;

use crate::error::ValidationError;
use crate::types::{EntityKind, FieldValue, convert_for_xml};
use crate::xml::{escape, is_valid_element_name};

use super::Command;

/// Ordered set of heat area fields to change.
///
/// Typed helpers cover the commonly written fields; [`set`](Self::set)
/// accepts any vendor field name. Setting a field twice keeps the last value.
///
/// # Examples
///
/// ```
/// use alpha2_lib::command::HeatAreaSettings;
///
/// let settings = HeatAreaSettings::new()
///     .t_target(21.5)
///     .set("T_HEAT_NIGHT", 18.0);
/// assert_eq!(settings.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatAreaSettings {
    fields: Vec<(String, FieldValue)>,
}

impl HeatAreaSettings {
    /// Creates an empty set of changes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets any field by its vendor name.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    /// Sets the target temperature (`T_TARGET`).
    #[must_use]
    pub fn t_target(self, celsius: f64) -> Self {
        self.set("T_TARGET", celsius)
    }

    /// Sets the day heating temperature (`T_HEAT_DAY`).
    #[must_use]
    pub fn t_heat_day(self, celsius: f64) -> Self {
        self.set("T_HEAT_DAY", celsius)
    }

    /// Sets the night heating temperature (`T_HEAT_NIGHT`).
    #[must_use]
    pub fn t_heat_night(self, celsius: f64) -> Self {
        self.set("T_HEAT_NIGHT", celsius)
    }

    /// Sets the operating mode (`HEATAREA_MODE`): 0 auto, 1 day, 2 night.
    #[must_use]
    pub fn mode(self, mode: i64) -> Self {
        self.set("HEATAREA_MODE", mode)
    }

    /// Sets the heat area name (`HEATAREA_NAME`).
    #[must_use]
    pub fn name(self, name: impl Into<String>) -> Self {
        self.set("HEATAREA_NAME", FieldValue::Text(name.into()))
    }

    /// Enables or disables party mode (`PARTY`).
    #[must_use]
    pub fn party(self, enabled: bool) -> Self {
        self.set("PARTY", enabled)
    }

    /// Sets the temperature offset (`OFFSET`).
    #[must_use]
    pub fn offset(self, kelvin: f64) -> Self {
        self.set("OFFSET", kelvin)
    }

    /// Returns the number of fields to change.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Changes settings of one heat area.
///
/// Only syntax is checked locally; whether a field exists or a value is in
/// range is decided by the base station.
///
/// # Examples
///
/// ```
/// use alpha2_lib::command::{Command, HeatAreaCommand, HeatAreaSettings};
///
/// let cmd = HeatAreaCommand::new(
///     2,
///     HeatAreaSettings::new().set("T_TARGET", 20).party(true),
/// )
/// .unwrap();
/// assert_eq!(
///     cmd.to_fragment(),
///     r#"<HEATAREA nr="2"><T_TARGET>20.0</T_TARGET><PARTY>1</PARTY></HEATAREA>"#
/// );
///
/// assert!(HeatAreaCommand::new(2, HeatAreaSettings::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HeatAreaCommand {
    nr: u32,
    settings: HeatAreaSettings,
}

impl HeatAreaCommand {
    /// Creates a command for heat area `nr`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptySettings` if nothing is set and
    /// `ValidationError::InvalidFieldName` for names that are not valid
    /// element names.
    pub fn new(nr: u32, settings: HeatAreaSettings) -> Result<Self, ValidationError> {
        if settings.is_empty() {
            return Err(ValidationError::EmptySettings);
        }
        if let Some((name, _)) = settings.iter().find(|(name, _)| !is_valid_element_name(name)) {
            return Err(ValidationError::InvalidFieldName(name.to_string()));
        }
        Ok(Self { nr, settings })
    }

    /// Returns the heat area number.
    #[must_use]
    pub fn nr(&self) -> u32 {
        self.nr
    }

    /// Returns the fields to change.
    #[must_use]
    pub fn settings(&self) -> &HeatAreaSettings {
        &self.settings
    }
}

impl Command for HeatAreaCommand {
    fn to_fragment(&self) -> String {
        let mut xml = format!(r#"<HEATAREA nr="{}">"#, self.nr);
        for (name, value) in self.settings.iter() {
            let text = convert_for_xml(EntityKind::HeatArea, name, value);
            let _ = write!(xml, "<{name}>{}</{name}>", escape(&text));
        }
        xml.push_str("</HEATAREA>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_contains_target_temperature() {
        let cmd = HeatAreaCommand::new(3, HeatAreaSettings::new().t_target(21.5)).unwrap();
        assert_eq!(
            cmd.to_fragment(),
            r#"<HEATAREA nr="3"><T_TARGET>21.5</T_TARGET></HEATAREA>"#
        );
    }

    #[test]
    fn float_fields_are_rounded_to_one_decimal() {
        let cmd = HeatAreaCommand::new(1, HeatAreaSettings::new().t_target(19.212_231_2)).unwrap();
        assert!(cmd.to_fragment().contains("<T_TARGET>19.2</T_TARGET>"));
    }

    #[test]
    fn fields_keep_insertion_order() {
        let settings = HeatAreaSettings::new()
            .mode(1)
            .t_heat_day(22.0)
            .name("Bad")
            .set("ISLOCKED", false);
        let cmd = HeatAreaCommand::new(1, settings).unwrap();
        assert_eq!(
            cmd.to_fragment(),
            "<HEATAREA nr=\"1\"><HEATAREA_MODE>1</HEATAREA_MODE>\
             <T_HEAT_DAY>22.0</T_HEAT_DAY><HEATAREA_NAME>Bad</HEATAREA_NAME>\
             <ISLOCKED>0</ISLOCKED></HEATAREA>"
        );
    }

    #[test]
    fn setting_twice_keeps_last_value() {
        let settings = HeatAreaSettings::new().t_target(20.0).t_target(22.0);
        assert_eq!(settings.len(), 1);
        assert_eq!(settings.iter().next(), Some(("T_TARGET", &FieldValue::Float(22.0))));
    }

    #[test]
    fn text_values_are_escaped() {
        let cmd = HeatAreaCommand::new(1, HeatAreaSettings::new().name("Bad & WC")).unwrap();
        assert!(cmd.to_fragment().contains("<HEATAREA_NAME>Bad &amp; WC</HEATAREA_NAME>"));
    }

    #[test]
    fn empty_settings_rejected() {
        let err = HeatAreaCommand::new(1, HeatAreaSettings::new()).unwrap_err();
        assert_eq!(err, ValidationError::EmptySettings);
    }

    #[test]
    fn invalid_field_name_rejected() {
        let err = HeatAreaCommand::new(1, HeatAreaSettings::new().set("T TARGET", 1)).unwrap_err();
        assert_eq!(err, ValidationError::InvalidFieldName("T TARGET".to_string()));
    }
}
