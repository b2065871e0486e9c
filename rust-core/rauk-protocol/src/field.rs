// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Tri-state field wrapper for free-form mapping fields.
//!
//! `Option<Value>` cannot tell "not provided" apart from "explicitly null"
//! once `null` is a legal value. [`Nullable`] keeps the three states apart so
//! the encoder can drop an absent field while still sending an explicit
//! `null` the caller asked for.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field that is either absent, explicitly null, or carries a value.
///
/// Use with `#[serde(default, skip_serializing_if = "Nullable::is_absent")]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nullable<T> {
    /// Not provided; never appears on the wire.
    Absent,
    /// Provided as an explicit `null`.
    Null,
    /// Provided with a value.
    Value(T),
}

impl<T> Nullable<T> {
    /// True when the field was not provided.
    pub fn is_absent(&self) -> bool {
        matches!(self, Nullable::Absent)
    }

    /// True when the field was explicitly set to null.
    pub fn is_null(&self) -> bool {
        matches!(self, Nullable::Null)
    }

    /// Borrow the carried value, if any.
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Nullable::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Nullable::Absent
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    /// `None` maps to an explicit null, not to absence.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Nullable::Value(v),
            None => Nullable::Null,
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Only reachable when a container forgets `skip_serializing_if`.
            Nullable::Absent | Nullable::Null => serializer.serialize_none(),
            Nullable::Value(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A missing key never reaches here; `#[serde(default)]` yields Absent.
        Option::<T>::deserialize(deserializer).map(Nullable::from)
    }
}
