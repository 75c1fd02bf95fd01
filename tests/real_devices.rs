// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests against a real Alpha2 base station.
//!
//! These tests change settings on the device and are ignored by default.
//! Run with: `cargo test --test real_devices -- --ignored --test-threads=1`
//!
//! # Environment Variables
//!
//! - `ALPHA2_BASE_ADDRESS` - Hostname or IP address of the base station
//!
//! # Example
//!
//! ```bash
//! export ALPHA2_BASE_ADDRESS=192.168.1.11
//! cargo test --test real_devices -- --ignored --test-threads=1
//! ```

use std::env;
use std::time::Duration;

use alpha2_lib::{Base, Error, HeatAreaSettings};
use chrono::NaiveDate;
use tokio::time::sleep;

fn base() -> Base {
    let address = env::var("ALPHA2_BASE_ADDRESS").expect("ALPHA2_BASE_ADDRESS not set");
    Base::new(address).expect("Failed to create client")
}

#[tokio::test]
#[ignore = "requires a real base station"]
async fn get_heat_areas() {
    let base = base();
    base.update_data().await.expect("Failed to fetch data");

    let areas = base.heat_areas();
    assert!(!areas.is_empty());
    for area in areas {
        assert!(area.nr > 0);
        assert!(area.id.to_string().ends_with(&format!(":{}", area.nr)));
    }
}

#[tokio::test]
#[ignore = "requires a real base station"]
async fn update_heat_area_round_trip() {
    let base = base();
    base.update_data().await.expect("Failed to fetch data");

    let area = base.heat_areas().remove(0);
    let original = area.t_target.expect("heat area without T_TARGET");
    let raised = ((original + 0.2) * 10.0).round() / 10.0;

    base.update_heat_area(area.id.clone(), HeatAreaSettings::new().t_target(raised))
        .await
        .expect("Failed to update heat area");
    base.update_data().await.expect("Failed to fetch data");
    assert_eq!(base.heat_areas()[0].t_target, Some(raised));

    // Bare number form, restoring the original value
    base.update_heat_area(area.nr, HeatAreaSettings::new().t_target(original))
        .await
        .expect("Failed to update heat area");
    base.update_data().await.expect("Failed to fetch data");
    assert_eq!(base.heat_areas()[0].t_target, Some(original));
}

#[tokio::test]
#[ignore = "requires a real base station"]
async fn get_set_cooling() {
    let base = base();
    base.update_data().await.expect("Failed to fetch data");

    base.set_cooling(true).await.expect("Failed to enable cooling");
    assert_eq!(base.cooling(), Some(true));

    base.set_cooling(false).await.expect("Failed to disable cooling");
    assert_eq!(base.cooling(), Some(false));
}

#[tokio::test]
#[ignore = "requires a real base station"]
async fn set_cooling_timeout() {
    let base = base()
        .with_command_timeout(Duration::from_millis(100))
        .with_poll_interval(Duration::from_millis(100));
    base.update_data().await.expect("Failed to fetch data");

    let result = async {
        base.set_cooling(true).await?;
        base.set_cooling(false).await
    }
    .await;
    assert!(matches!(result, Err(Error::ConfirmationTimeout(_))));
}

#[tokio::test]
#[ignore = "requires a real base station"]
async fn raw_command() {
    let base = base();
    base.update_data().await.expect("Failed to fetch data");

    base.send_command("<COOLING>1</COOLING>")
        .await
        .expect("Failed to send command");
    sleep(Duration::from_secs(3)).await;
    base.send_command("<COOLING>0</COOLING>")
        .await
        .expect("Failed to send command");
}

#[tokio::test]
#[ignore = "requires a real base station"]
async fn concurrent_operations() {
    let base = base();
    base.update_data().await.expect("Failed to fetch data");

    let (a, b, c) = tokio::join!(
        base.update_data(),
        base.send_command("<COOLING>0</COOLING>"),
        base.update_data()
    );
    a.expect("update_data failed");
    b.expect("send_command failed");
    c.expect("update_data failed");
}

#[tokio::test]
#[ignore = "requires a real base station"]
async fn set_datetime() {
    let base = base();
    base.update_data().await.expect("Failed to fetch data");

    let value = NaiveDate::from_ymd_opt(2010, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid date");
    base.set_datetime(Some(value)).await.expect("Failed to set datetime");

    base.set_datetime(None).await.expect("Failed to restore datetime");
}
