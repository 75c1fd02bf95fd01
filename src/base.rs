// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Base station client.
//!
//! [`Base`] caches the last status document fetched from a base station and
//! sends changes to it. Reads never touch the network; call
//! [`update_data`](Base::update_data) to refresh them. Writes never refresh
//! the cache either, so a change becomes visible only after the next
//! `update_data`.
//!
//! ```no_run
//! use alpha2_lib::{Base, HeatAreaId, HeatAreaSettings};
//!
//! # async fn example() -> alpha2_lib::Result<()> {
//! let base = Base::new("192.168.1.11")?;
//! base.update_data().await?;
//!
//! for area in base.heat_areas() {
//!     println!("{}: {:?} -> {:?}", area.id, area.t_actual, area.t_target);
//! }
//!
//! base.update_heat_area(HeatAreaId::from(1), HeatAreaSettings::new().t_target(21.5))
//!     .await?;
//! base.set_datetime(None).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use parking_lot::RwLock;
use tokio::time::Instant;

use crate::command::{
    Command, CoolingCommand, DateTimeCommand, HeatAreaCommand, HeatAreaSettings, RawCommand,
    changes_document,
};
use crate::error::{Error, Result, ValidationError};
use crate::protocol::{HttpClient, HttpConfig, Protocol};
use crate::state::{BaseState, HeatArea, HeatControl, IoDevice};
use crate::types::HeatAreaId;

/// Client for one Alpha2 base station.
///
/// The state is replaced as a whole on every successful
/// [`update_data`](Self::update_data); readers holding a snapshot from
/// [`state`](Self::state) keep a consistent view. Concurrent `update_data`
/// calls on the same client run one after another.
#[derive(Debug)]
pub struct Base<P = HttpClient> {
    protocol: P,
    state: RwLock<Option<Arc<BaseState>>>,
    update_lock: tokio::sync::Mutex<()>,
    command_timeout: Duration,
    poll_interval: Duration,
}

impl Base<HttpClient> {
    /// Creates a client for the base station at `host`.
    ///
    /// `host` may be a hostname, an IP address or a URL. No request is made.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(host: impl AsRef<str>) -> Result<Self> {
        Self::with_config(HttpConfig::new(host))
    }

    /// Creates a client from an HTTP configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn with_config(config: HttpConfig) -> Result<Self> {
        Ok(Self::with_protocol(config.into_client()?))
    }
}

impl<P: Protocol> Base<P> {
    /// Default time to wait for a change to show up in the status document.
    pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(15);
    /// Default interval between status fetches while waiting for a change.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

    /// Creates a client using the given transport.
    #[must_use]
    pub fn with_protocol(protocol: P) -> Self {
        Self {
            protocol,
            state: RwLock::new(None),
            update_lock: tokio::sync::Mutex::new(()),
            command_timeout: Self::DEFAULT_COMMAND_TIMEOUT,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets how long [`set_cooling`](Self::set_cooling) waits for confirmation.
    #[must_use]
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Sets how often [`set_cooling`](Self::set_cooling) re-reads the status.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    /// Fetches the status document and replaces the cached state.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the request fails and `Error::Parse` if
    /// the document cannot be parsed. The cached state is unchanged in both
    /// cases.
    pub async fn update_data(&self) -> Result<()> {
        let _guard = self.update_lock.lock().await;

        let xml = self.protocol.fetch_status().await?;
        let state = BaseState::parse(&xml)?;

        tracing::debug!(
            id = %state.id(),
            name = state.name().unwrap_or_default(),
            heat_areas = state.heat_areas().len(),
            "Base station data updated"
        );

        *self.state.write() = Some(Arc::new(state));
        Ok(())
    }

    /// Returns a snapshot of the cached state, if any data was fetched yet.
    #[must_use]
    pub fn state(&self) -> Option<Arc<BaseState>> {
        self.state.read().clone()
    }

    /// Returns the base station id.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.state().map(|s| s.id().to_string())
    }

    /// Returns the base station name.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.state().and_then(|s| s.name().map(str::to_string))
    }

    /// Returns whether cooling mode is active.
    #[must_use]
    pub fn cooling(&self) -> Option<bool> {
        self.state().and_then(|s| s.cooling())
    }

    /// Returns the base station clock as of the last fetch.
    #[must_use]
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        self.state().and_then(|s| s.datetime())
    }

    /// Returns the cached heat areas.
    ///
    /// Empty before the first successful [`update_data`](Self::update_data).
    #[must_use]
    pub fn heat_areas(&self) -> Vec<HeatArea> {
        self.state()
            .map(|s| s.heat_areas().to_vec())
            .unwrap_or_default()
    }

    /// Returns the cached heat controls.
    #[must_use]
    pub fn heat_controls(&self) -> Vec<HeatControl> {
        self.state()
            .map(|s| s.heat_controls().to_vec())
            .unwrap_or_default()
    }

    /// Returns the cached IO devices.
    #[must_use]
    pub fn io_devices(&self) -> Vec<IoDevice> {
        self.state()
            .map(|s| s.io_devices().to_vec())
            .unwrap_or_default()
    }

    /// Changes settings of a heat area.
    ///
    /// `id` is either fully qualified (`"EZR012345:1"`) or a bare heat area
    /// number, which needs a previous [`update_data`](Self::update_data) to
    /// know the base station id. The cached state is not refreshed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` for empty settings, invalid field names or
    /// an unknown base station id, and `Error::Protocol` if the request fails.
    pub async fn update_heat_area(
        &self,
        id: impl Into<HeatAreaId>,
        settings: HeatAreaSettings,
    ) -> Result<()> {
        let id = id.into();
        let command = HeatAreaCommand::new(id.nr(), settings)?;
        let device_id = match id.device_id() {
            Some(device) => device.to_string(),
            None => self.require_id()?,
        };

        tracing::debug!(heat_area = %id, "Updating heat area");

        self.send_to(&device_id, &command).await?;
        Ok(())
    }

    /// Sets the base station clock, to the current local time if `value` is
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if no data was fetched yet and
    /// `Error::Protocol` if the request fails.
    pub async fn set_datetime(&self, value: Option<NaiveDateTime>) -> Result<()> {
        let command = value.map_or_else(DateTimeCommand::now, DateTimeCommand::new);
        self.send(&command).await?;
        Ok(())
    }

    /// Switches cooling mode and waits until the base station reports it.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfirmationTimeout` if the status document does not
    /// reflect the change within the command timeout, plus the errors of
    /// [`update_data`](Self::update_data).
    pub async fn set_cooling(&self, enabled: bool) -> Result<()> {
        self.send(&CoolingCommand(enabled)).await?;

        let deadline = Instant::now() + self.command_timeout;
        loop {
            self.update_data().await?;
            if self.cooling() == Some(enabled) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::ConfirmationTimeout(
                    u64::try_from(self.command_timeout.as_millis()).unwrap_or(u64::MAX),
                ));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Sends a raw fragment inside the change document and returns the reply.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if no data was fetched yet and
    /// `Error::Protocol` if the request fails.
    pub async fn send_command(&self, fragment: &str) -> Result<String> {
        self.send(&RawCommand::new(fragment)).await
    }

    /// Sends any command to the cached base station.
    ///
    /// # Errors
    ///
    /// Same as [`send_command`](Self::send_command).
    pub async fn send<C: Command>(&self, command: &C) -> Result<String> {
        let device_id = self.require_id()?;
        self.send_to(&device_id, command).await
    }

    async fn send_to<C: Command>(&self, device_id: &str, command: &C) -> Result<String> {
        let body = changes_document(device_id, &command.to_fragment());
        self.protocol.send_changes(body).await.map_err(Error::from)
    }

    fn require_id(&self) -> Result<String> {
        self.id()
            .ok_or(Error::Validation(ValidationError::MissingDeviceId))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseError, ProtocolError};
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    const STATUS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Devices><Device>
  <ID>EZR012345</ID><NAME>Alpha2Test</NAME><COOLING>0</COOLING>
  <HEATAREA nr="1"><HEATAREA_NAME>Bad</HEATAREA_NAME><T_TARGET>21.0</T_TARGET></HEATAREA>
  <HEATAREA nr="2"><HEATAREA_NAME>Flur</HEATAREA_NAME><T_TARGET>19.5</T_TARGET></HEATAREA>
</Device></Devices>"#;

    /// Transport answering from a queue and recording posted bodies.
    #[derive(Debug, Default)]
    struct FakeProtocol {
        replies: Mutex<VecDeque<std::result::Result<String, ProtocolError>>>,
        sent: Mutex<Vec<String>>,
    }

    impl FakeProtocol {
        fn with_replies(replies: Vec<std::result::Result<String, ProtocolError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                sent: Mutex::default(),
            }
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().clone()
        }
    }

    impl Protocol for FakeProtocol {
        async fn fetch_status(&self) -> std::result::Result<String, ProtocolError> {
            self.replies
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(ProtocolError::ConnectionFailed("no reply".to_string())))
        }

        async fn send_changes(&self, body: String) -> std::result::Result<String, ProtocolError> {
            self.sent.lock().push(body);
            Ok(String::new())
        }
    }

    fn base(replies: Vec<std::result::Result<String, ProtocolError>>) -> Base<FakeProtocol> {
        Base::with_protocol(FakeProtocol::with_replies(replies))
    }

    #[test]
    fn empty_before_update() {
        let base = base(vec![]);
        assert!(base.heat_areas().is_empty());
        assert!(base.heat_controls().is_empty());
        assert!(base.state().is_none());
        assert!(base.id().is_none());
    }

    #[tokio::test]
    async fn update_populates_state() {
        let base = base(vec![Ok(STATUS.to_string())]);
        base.update_data().await.unwrap();

        assert_eq!(base.id().as_deref(), Some("EZR012345"));
        assert_eq!(base.name().as_deref(), Some("Alpha2Test"));
        assert_eq!(base.cooling(), Some(false));

        let areas = base.heat_areas();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].id.to_string(), "EZR012345:1");
        assert_eq!(areas[1].t_target, Some(19.5));
    }

    #[tokio::test]
    async fn parse_error_keeps_previous_state() {
        let base = base(vec![
            Ok(STATUS.to_string()),
            Ok("<Devices><Device><ID>EZR".to_string()),
        ]);
        base.update_data().await.unwrap();

        let err = base.update_data().await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert_eq!(base.heat_areas().len(), 2);
    }

    #[tokio::test]
    async fn protocol_error_keeps_previous_state() {
        let base = base(vec![Ok(STATUS.to_string()), Err(ProtocolError::Timeout(10))]);
        base.update_data().await.unwrap();

        let err = base.update_data().await.unwrap_err();
        assert!(matches!(err, Error::Protocol(ProtocolError::Timeout(10))));
        assert_eq!(base.name().as_deref(), Some("Alpha2Test"));
    }

    #[tokio::test]
    async fn wrong_document_is_parse_error() {
        let base = base(vec![Ok("<html><body>Login</body></html>".to_string())]);
        let err = base.update_data().await.unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::MissingElement(_))));
        assert!(base.state().is_none());
    }

    #[tokio::test]
    async fn update_heat_area_with_full_id_needs_no_state() {
        let base = base(vec![]);
        let id: HeatAreaId = "EZR999:4".parse().unwrap();
        base.update_heat_area(id, HeatAreaSettings::new().t_target(22.5))
            .await
            .unwrap();

        let sent = base.protocol().sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains(
            r#"<ID>EZR999</ID><HEATAREA nr="4"><T_TARGET>22.5</T_TARGET></HEATAREA>"#
        ));
    }

    #[tokio::test]
    async fn update_heat_area_with_number_uses_cached_id() {
        let base = base(vec![Ok(STATUS.to_string())]);
        base.update_data().await.unwrap();
        base.update_heat_area(HeatAreaId::from(2), HeatAreaSettings::new().t_target(20.0))
            .await
            .unwrap();

        assert!(base.protocol().sent()[0].contains("<ID>EZR012345</ID><HEATAREA nr=\"2\">"));
    }

    #[tokio::test]
    async fn update_heat_area_with_number_without_state_fails() {
        let base = base(vec![]);
        let err = base
            .update_heat_area(HeatAreaId::from(1), HeatAreaSettings::new().t_target(20.0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingDeviceId)
        ));
        assert!(base.protocol().sent().is_empty());
    }

    #[tokio::test]
    async fn update_heat_area_rejects_empty_settings() {
        let base = base(vec![]);
        let err = base
            .update_heat_area(HeatAreaId::new("EZR", 1), HeatAreaSettings::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::EmptySettings)));
    }

    #[tokio::test]
    async fn set_datetime_explicit_value() {
        let base = base(vec![Ok(STATUS.to_string())]);
        base.update_data().await.unwrap();

        let value = chrono::NaiveDate::from_ymd_opt(2010, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        base.set_datetime(Some(value)).await.unwrap();

        assert!(base.protocol().sent()[0]
            .ends_with("<ID>EZR012345</ID><DATETIME>2010-01-01T00:00:00</DATETIME></Device></Devices>"));
    }

    #[tokio::test]
    async fn set_cooling_waits_for_confirmation() {
        let cooling_on = STATUS.replace("<COOLING>0</COOLING>", "<COOLING>1</COOLING>");
        let base = base(vec![
            Ok(STATUS.to_string()),
            Ok(STATUS.to_string()),
            Ok(cooling_on),
        ])
        .with_poll_interval(Duration::from_millis(1));
        base.update_data().await.unwrap();

        base.set_cooling(true).await.unwrap();
        assert_eq!(base.cooling(), Some(true));
        assert!(base.protocol().sent()[0].contains("<COOLING>1</COOLING>"));
    }

    #[tokio::test]
    async fn set_cooling_times_out() {
        let replies = (0..10).map(|_| Ok(STATUS.to_string())).collect();
        let base = base(replies)
            .with_command_timeout(Duration::from_millis(20))
            .with_poll_interval(Duration::from_millis(5));
        base.update_data().await.unwrap();

        let err = base.set_cooling(true).await.unwrap_err();
        assert!(matches!(err, Error::ConfirmationTimeout(20)));
    }

    #[tokio::test]
    async fn send_command_wraps_fragment() {
        let base = base(vec![Ok(STATUS.to_string())]);
        base.update_data().await.unwrap();
        base.send_command("<COOLING>1</COOLING>").await.unwrap();

        assert_eq!(
            base.protocol().sent()[0],
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <Devices><Device><ID>EZR012345</ID><COOLING>1</COOLING></Device></Devices>"
        );
    }
}
