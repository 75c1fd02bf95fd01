// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Alpha2 base stations.
//!
//! The base station transfers every value as element text. This module maps
//! those strings to typed values and back, using a fixed field table per
//! entity kind.
//!
//! # Types
//!
//! - [`EntityKind`] - The kind of element a field belongs to
//! - [`FieldType`] - Wire type of a known field
//! - [`FieldValue`] - A typed field value
//! - [`HeatAreaId`] - Identifier of a heat area (`"<device>:<nr>"`)

mod field;
mod heat_area_id;

pub use field::{
    EntityKind, FieldType, FieldValue, convert_for_xml, convert_from_xml, field_type,
};
pub use heat_area_id::HeatAreaId;
