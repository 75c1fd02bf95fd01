// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Base-level change commands.

use chrono::{Local, NaiveDateTime};

use crate::state::DATETIME_FORMAT;

use super::Command;

/// Sets the clock of the base station.
///
/// # Examples
///
/// ```
/// use alpha2_lib::command::{Command, DateTimeCommand};
/// use chrono::NaiveDate;
///
/// let value = NaiveDate::from_ymd_opt(2010, 1, 1)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap();
/// let cmd = DateTimeCommand::new(value);
/// assert_eq!(cmd.to_fragment(), "<DATETIME>2010-01-01T00:00:00</DATETIME>");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeCommand(NaiveDateTime);

impl DateTimeCommand {
    /// Creates a command setting the given local time.
    #[must_use]
    pub fn new(value: NaiveDateTime) -> Self {
        Self(value)
    }

    /// Creates a command setting the current local time.
    #[must_use]
    pub fn now() -> Self {
        Self(Local::now().naive_local())
    }

    /// Returns the time to set.
    #[must_use]
    pub fn value(&self) -> NaiveDateTime {
        self.0
    }
}

impl Command for DateTimeCommand {
    fn to_fragment(&self) -> String {
        format!("<DATETIME>{}</DATETIME>", self.0.format(DATETIME_FORMAT))
    }
}

/// Switches cooling mode of the base station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoolingCommand(pub bool);

impl Command for CoolingCommand {
    fn to_fragment(&self) -> String {
        format!("<COOLING>{}</COOLING>", u8::from(self.0))
    }
}

/// A caller-built fragment, sent as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommand(String);

impl RawCommand {
    /// Wraps a fragment.
    #[must_use]
    pub fn new(fragment: impl Into<String>) -> Self {
        Self(fragment.into())
    }
}

impl Command for RawCommand {
    fn to_fragment(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetime_now_is_current() {
        let before = Local::now().naive_local();
        let cmd = DateTimeCommand::now();
        let after = Local::now().naive_local();
        assert!(cmd.value() >= before && cmd.value() <= after);
    }

    #[test]
    fn cooling_fragments() {
        assert_eq!(CoolingCommand(true).to_fragment(), "<COOLING>1</COOLING>");
        assert_eq!(CoolingCommand(false).to_fragment(), "<COOLING>0</COOLING>");
    }

    #[test]
    fn raw_fragment_passthrough() {
        let cmd = RawCommand::new("<COOLING>1</COOLING>");
        assert_eq!(cmd.to_fragment(), "<COOLING>1</COOLING>");
    }
}
