// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Alpha2 library.
//!
//! Failures fall into three groups: network errors while talking to the base
//! station ([`ProtocolError`]), malformed or unexpected XML documents
//! ([`ParseError`]), and invalid caller input rejected before anything is
//! sent ([`ValidationError`]).

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller input was rejected locally.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Error occurred during communication with the base station.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a document from the base station.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A change was sent but the base station never reported it back.
    #[error("change not confirmed by the base station within {0} ms")]
    ConfirmationTimeout(u64),
}

/// Errors related to caller input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A heat area identifier could not be parsed.
    #[error("invalid heat area id: {0}")]
    InvalidHeatAreaId(String),

    /// A field name is not a valid element name.
    #[error("invalid field name: {0}")]
    InvalidFieldName(String),

    /// An update was requested without any field to change.
    #[error("no fields to update")]
    EmptySettings,

    /// The entity kind is not one of `HEATAREA`, `HEATCTRL` or `IODEVICE`.
    #[error("unknown entity kind: {0}")]
    UnknownEntityKind(String),

    /// The base station id is needed but no data has been fetched yet.
    #[error("base station id unknown, call update_data first")]
    MissingDeviceId,
}

/// Errors related to HTTP communication with the base station.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the base station failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The base station answered with a non-success status.
    #[error("HTTP {status} - {reason}")]
    Status {
        /// Numeric status code.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
    },
}

/// Errors related to parsing base station documents.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document is not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document ended before all elements were closed.
    #[error("unexpected end of document inside <{0}>")]
    Truncated(String),

    /// Expected element is missing from the document.
    #[error("missing element: {0}")]
    MissingElement(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = ValidationError::InvalidHeatAreaId("abc:x".to_string());
        assert_eq!(err.to_string(), "invalid heat area id: abc:x");
    }

    #[test]
    fn error_from_validation_error() {
        let err: Error = ValidationError::EmptySettings.into();
        assert!(matches!(err, Error::Validation(ValidationError::EmptySettings)));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::MissingElement("Devices/Device".to_string());
        assert_eq!(err.to_string(), "missing element: Devices/Device");
    }

    #[test]
    fn status_error_display() {
        let err = ProtocolError::Status {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404 - Not Found");
    }
}
