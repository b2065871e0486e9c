// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Response records returned by the inventory service.
//!
//! Required scalars are plain fields, so a response missing one fails to
//! decode. Optional fields decode to `None`. List fields default to empty when
//! the key is missing or `null`. Dates are RFC 3339 text on the wire.
//!
//! [`ItemEntities`], [`ItemColor`] and [`ItemDeleted`] are the stored forms
//! of the query-side [`descriptor::Entities`](crate::descriptor::Entities),
//! [`descriptor::Color`](crate::descriptor::Color) and
//! [`descriptor::Deleted`](crate::descriptor::Deleted); the stored forms have
//! required fields where the query forms have none.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub use crate::descriptor::{
    Availability, BrandDetails, FactoryDetails, Location, LocationHistoryEntry, StatusDetails,
    TransitTo,
};

/// Owning entity identifiers, all present on stored items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemEntities {
    pub api_id: String,
    pub entity_id: String,
    pub factory_id: String,
    pub brand_id: String,
}

/// Colour of a stored item; the name is always set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemColor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// Deletion state of a stored item. Also the `deleted` field of
/// [`CreateItem`](crate::descriptor::CreateItem), where `status` is required too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDeleted {
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_date: Option<DateTime<Utc>>,
}

/// An inventory item as stored by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardcode: Option<String>,
    pub entities: ItemEntities,
    pub current_location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transit_to: Option<TransitTo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
    pub sku: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_details: Option<BrandDetails>,
    pub package_quantity: i64,
    pub color: ItemColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factory_details: Option<FactoryDetails>,
    pub deleted: ItemDeleted,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location_history: Vec<LocationHistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub id: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Outcome of `findOneAndUpdate` / `updateMany`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,
    pub acknowledged: bool,
}

/// Outcome of soft delete, `deleteOne` and `deleteMany`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub deleted_count: u64,
}

/// Acknowledgement of a single insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: String,
}
