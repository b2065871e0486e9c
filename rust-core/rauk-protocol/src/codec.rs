// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Canonical JSON encoding and response decoding.
//!
//! Descriptors carry their omission rules in their serde attributes, so one
//! generic encoder covers every record: absent fields are skipped at every
//! depth, present fields always appear (an all-absent sub-record becomes
//! `{}`), and keys keep declaration order. The same descriptor therefore
//! always produces the same text, which the signer relies on.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ProtocolError, Result};

/// Encode a descriptor into its wire JSON value.
pub fn encode<T: Serialize + ?Sized>(descriptor: &T) -> Result<Value> {
    serde_json::to_value(descriptor).map_err(ProtocolError::Encode)
}

/// Render a value as the exact compact text that is signed and transmitted.
pub fn canonical_text<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(ProtocolError::Encode)
}

/// Decode a response value into a typed record.
///
/// Missing required fields, wrong types and unparsable dates all surface as
/// [`ProtocolError::Decode`].
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| decode_fault::<T>(e))
}

/// Decode raw response bytes into a typed record.
pub fn decode_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| decode_fault::<T>(e))
}

fn decode_fault<T>(err: serde_json::Error) -> ProtocolError {
    let full = std::any::type_name::<T>();
    let record = full.rsplit("::").next().unwrap_or(full);
    ProtocolError::Decode {
        record,
        reason: err.to_string(),
    }
}
