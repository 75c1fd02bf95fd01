// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport to the base station.
//!
//! The base station exposes two endpoints: a status document read with GET
//! and a changes endpoint accepting XML documents via POST. [`Protocol`]
//! abstracts both so that [`Base`](crate::Base) can run against any
//! transport; [`HttpClient`] is the one used with real hardware.

mod http;

pub use http::{HttpClient, HttpConfig};

use crate::error::ProtocolError;

/// Path of the status document.
pub const STATUS_PATH: &str = "/data/static.xml";

/// Path accepting change documents.
pub const CHANGES_PATH: &str = "/data/changes.xml";

/// Trait for transports that can reach a base station.
#[allow(async_fn_in_trait)]
pub trait Protocol {
    /// Fetches the raw status document.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the base station
    /// answers with a non-success status.
    async fn fetch_status(&self) -> Result<String, ProtocolError>;

    /// Posts a complete change document and returns the raw reply.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the base station
    /// answers with a non-success status.
    async fn send_changes(&self, body: String) -> Result<String, ProtocolError>;
}
