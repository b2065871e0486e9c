// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Errors raised by the protocol layer itself.
//!
//! These are the client-side faults: a descriptor that cannot be built, a
//! signature that cannot be computed, or a response whose shape does not match
//! the record it should decode into. Server-reported failures are a separate
//! taxonomy, see [`crate::classify::ClassifiedError`].

use thiserror::Error;

/// Client-side protocol faults. None of these are retried internally.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// A descriptor is missing a field its variant requires. Raised before
    /// any network activity.
    #[error("{field} is required for {operation} operation")]
    MissingField {
        /// The descriptor kind, e.g. `create`.
        operation: &'static str,
        /// Wire name of the missing field.
        field: &'static str,
    },

    /// A descriptor could not be constructed from the supplied JSON.
    #[error("Invalid {operation} descriptor: {reason}")]
    Construction {
        /// The descriptor kind, e.g. `create`.
        operation: &'static str,
        /// What was wrong with the input.
        reason: String,
    },

    /// The request digest could not be computed. Fatal to the call.
    #[error("Failed to generate signature: {0}")]
    Signing(String),

    /// A descriptor could not be serialized into its wire form.
    #[error("Failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body does not match the expected record shape.
    #[error("Malformed {record} response: {reason}")]
    Decode {
        /// The record type that was being decoded.
        record: &'static str,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Crate-level result alias using [`ProtocolError`].
pub type Result<T> = std::result::Result<T, ProtocolError>;
