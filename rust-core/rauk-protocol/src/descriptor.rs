// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Operation descriptors: the partially-populated records a caller hands to
//! the operation builder.
//!
//! Every field that may be left out is an `Option` (or a [`Nullable`] for
//! free-form mappings) and is dropped from the wire when absent. Field order
//! in each struct is the order keys appear in the encoded JSON.
//!
//! Wire names follow the inventory item the service returns:
//! `currentLocation` and `packageQuantity`.

use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{ProtocolError, Result};
use crate::field::Nullable;
use crate::item::ItemDeleted;

// ---------------------------------------------------------------------------
// Sub-records
// ---------------------------------------------------------------------------

/// Colour reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Soft-deletion marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deleted {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_date: Option<DateTime<Utc>>,
}

impl Deleted {
    /// The `{status: true}` marker used by soft delete.
    pub fn marked() -> Self {
        Self {
            status: Some(true),
            deletion_date: None,
        }
    }
}

/// Owning entity identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factory_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<String>,
}

/// A physical location. `details` is free-form and tri-state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub details: Nullable<Map<String, Value>>,
}

impl Location {
    /// Location with an id and display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            details: Nullable::Absent,
        }
    }
}

/// Transit destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitTo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
}

/// Brand reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
}

/// Factory reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactoryDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
}

/// Details of one availability state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

/// Availability states of an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub produced: Option<StatusDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved: Option<StatusDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sold: Option<StatusDetails>,
}

/// One entry of an item's location history. All fields required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationHistoryEntry {
    pub id: String,
    pub name: String,
    pub date: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// CreateItem
// ---------------------------------------------------------------------------

/// Payload for `insertOne`.
///
/// The required fields are plain struct fields, so a `CreateItem` built in
/// Rust is complete by construction. [`CreateItem::from_json`] enforces the
/// same rule for loosely-typed input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Entities>,
    pub current_location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transit_to: Option<TransitTo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
    pub sku: String,
    pub package_quantity: i64,
    pub color: Color,
    pub brand_details: BrandDetails,
    pub factory_details: FactoryDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<ItemDeleted>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_history: Option<Vec<LocationHistoryEntry>>,
}

impl CreateItem {
    /// Wire names of the fields `insertOne` cannot do without, in the order
    /// they are checked.
    pub const REQUIRED_FIELDS: [&'static str; 6] = [
        "currentLocation",
        "sku",
        "packageQuantity",
        "color",
        "brandDetails",
        "factoryDetails",
    ];

    /// Build a create payload from its required fields. Optional fields can be
    /// set afterwards through the public fields.
    pub fn new(
        sku: impl Into<String>,
        package_quantity: i64,
        color: Color,
        brand_details: BrandDetails,
        factory_details: FactoryDetails,
        current_location: Location,
    ) -> Self {
        Self {
            hardcode: None,
            entities: None,
            current_location,
            transit_to: None,
            availability: None,
            sku: sku.into(),
            package_quantity,
            color,
            brand_details,
            factory_details,
            deleted: None,
            location_history: None,
        }
    }

    /// Build a create payload from untyped JSON.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::MissingField`] naming the first required field that is
    /// missing or null, or [`ProtocolError::Construction`] when the value is
    /// not an object or a field has the wrong shape.
    pub fn from_json(value: Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| ProtocolError::Construction {
            operation: "create",
            reason: "expected a JSON object".to_owned(),
        })?;

        for field in Self::REQUIRED_FIELDS {
            if object.get(field).map_or(true, Value::is_null) {
                return Err(ProtocolError::MissingField {
                    operation: "create",
                    field,
                });
            }
        }

        serde_json::from_value(value).map_err(|e| ProtocolError::Construction {
            operation: "create",
            reason: e.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Query / UpdateItem
// ---------------------------------------------------------------------------

/// Filter for find, update and delete verbs. Every field is optional; an
/// empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<Deleted>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Entities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transit_to: Option<TransitTo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_details: Option<BrandDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factory_details: Option<FactoryDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Query {
    /// Match on SKU.
    pub fn by_sku(sku: impl Into<String>) -> Self {
        Self {
            sku: Some(sku.into()),
            ..Self::default()
        }
    }

    /// Match on item id.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

/// Update document for `findOneAndUpdate` and `updateMany`.
///
/// Top-level fields replace the matching item fields; `set` is passed through
/// verbatim as `$set`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<Deleted>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Entities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transit_to: Option<TransitTo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_details: Option<BrandDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factory_details: Option<FactoryDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "$set", default, skip_serializing_if = "Nullable::is_absent")]
    pub set: Nullable<Map<String, Value>>,
}

impl UpdateItem {
    /// An update that only carries a `$set` document.
    pub fn set(fields: Map<String, Value>) -> Self {
        Self {
            set: Nullable::Value(fields),
            ..Self::default()
        }
    }

    /// The `{deleted: {status: true}}` update behind soft delete.
    pub fn soft_delete() -> Self {
        Self {
            deleted: Some(Deleted::marked()),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Request options
// ---------------------------------------------------------------------------

/// An ordered `field -> value` mapping. Keys are emitted in insertion order,
/// which matters for sort specifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldList<V>(Vec<(String, V)>);

impl<V> FieldList<V> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a field, keeping earlier fields first.
    pub fn with(mut self, field: impl Into<String>, value: V) -> Self {
        self.0.push((field.into(), value));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> Default for FieldList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for FieldList<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<V: Serialize> Serialize for FieldList<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for FieldList<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct FieldListVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for FieldListVisitor<V> {
            type Value = FieldList<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(FieldList(entries))
            }
        }

        deserializer.deserialize_map(FieldListVisitor(PhantomData))
    }
}

/// Projection flag for `select`: `1` includes a field, `0` excludes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Projection {
    Exclude,
    Include,
}

impl From<Projection> for u8 {
    fn from(p: Projection) -> u8 {
        match p {
            Projection::Exclude => 0,
            Projection::Include => 1,
        }
    }
}

impl TryFrom<u8> for Projection {
    type Error = String;

    fn try_from(v: u8) -> std::result::Result<Self, Self::Error> {
        match v {
            0 => Ok(Projection::Exclude),
            1 => Ok(Projection::Include),
            other => Err(format!("projection must be 0 or 1, got {other}")),
        }
    }
}

/// Sort direction: `1` ascending, `-1` descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl From<SortOrder> for i8 {
    fn from(o: SortOrder) -> i8 {
        match o {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }
}

impl TryFrom<i8> for SortOrder {
    type Error = String;

    fn try_from(v: i8) -> std::result::Result<Self, Self::Error> {
        match v {
            1 => Ok(SortOrder::Ascending),
            -1 => Ok(SortOrder::Descending),
            other => Err(format!("sort order must be 1 or -1, got {other}")),
        }
    }
}

/// Per-request options; always the last wire argument when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<FieldList<Projection>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<FieldList<SortOrder>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_deleted: Option<bool>,
}

impl RequestOptions {
    /// Options carrying only a result limit.
    pub fn limit(limit: u64) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Copy of these options with the limit forced to `limit`.
    pub fn with_limit(&self, limit: u64) -> Self {
        Self {
            limit: Some(limit),
            ..self.clone()
        }
    }
}

/// Options subset accepted by verbs that only honour `includeDeleted`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludeDeletedOnly {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_deleted: Option<bool>,
}

impl From<IncludeDeletedOnly> for RequestOptions {
    fn from(o: IncludeDeletedOnly) -> Self {
        Self {
            include_deleted: o.include_deleted,
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation and bulk writes
// ---------------------------------------------------------------------------

/// `$unwind` accepts either a field path or a full options document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Unwind {
    Path(String),
    Document(Map<String, Value>),
}

/// A single aggregation pipeline stage. Encodes as a one-key mapping such as
/// `{"$limit": 10}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AggregateStage {
    #[serde(rename = "$match")]
    Match(Query),
    #[serde(rename = "$group")]
    Group(Map<String, Value>),
    #[serde(rename = "$sort")]
    Sort(FieldList<SortOrder>),
    #[serde(rename = "$project")]
    Project(Map<String, Value>),
    #[serde(rename = "$limit")]
    Limit(u64),
    #[serde(rename = "$skip")]
    Skip(u64),
    #[serde(rename = "$unwind")]
    Unwind(Unwind),
    #[serde(rename = "$addFields")]
    AddFields(Map<String, Value>),
    #[serde(rename = "$count")]
    Count(String),
}

/// One element of a `bulkWrite` list. Encodes as a one-key mapping whose key
/// is the sub-operation name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BulkOperation {
    UpdateOne { filter: Query, update: UpdateItem },
    InsertOne { document: CreateItem },
    DeleteOne { filter: Query },
    ReplaceOne { filter: Query, replacement: CreateItem },
}
