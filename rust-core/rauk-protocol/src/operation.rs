// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Operation builder: turns a verb plus its descriptors into the positional
//! wire request `[verb, arg1, arg2, ..., options?]`.
//!
//! Argument order is fixed per verb. A trailing `options` argument is left
//! out entirely when absent, never sent as `null`.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::codec::{canonical_text, encode};
use crate::descriptor::{AggregateStage, BulkOperation, CreateItem, Query, RequestOptions, UpdateItem};
use crate::error::Result;

/// API verbs understood by the inventory service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    InsertOne,
    Find,
    FindOneAndUpdate,
    UpdateMany,
    DeleteOne,
    DeleteMany,
    Aggregate,
    BulkWrite,
}

impl Verb {
    /// Wire name of the verb.
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::InsertOne => "insertOne",
            Verb::Find => "find",
            Verb::FindOneAndUpdate => "findOneAndUpdate",
            Verb::UpdateMany => "updateMany",
            Verb::DeleteOne => "deleteOne",
            Verb::DeleteMany => "deleteMany",
            Verb::Aggregate => "aggregate",
            Verb::BulkWrite => "bulkWrite",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One API call, with its typed arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    InsertOne {
        document: CreateItem,
        options: Option<RequestOptions>,
    },
    Find {
        query: Query,
        options: Option<RequestOptions>,
    },
    FindOneAndUpdate {
        query: Query,
        update: UpdateItem,
        options: Option<RequestOptions>,
    },
    UpdateMany {
        query: Query,
        update: UpdateItem,
        options: Option<RequestOptions>,
    },
    DeleteOne {
        query: Query,
        options: Option<RequestOptions>,
    },
    DeleteMany {
        query: Query,
        options: Option<RequestOptions>,
    },
    Aggregate {
        pipeline: Vec<AggregateStage>,
        options: Option<RequestOptions>,
    },
    BulkWrite {
        operations: Vec<BulkOperation>,
        options: Option<RequestOptions>,
    },
}

impl Operation {
    /// Soft delete. The service has no verb for it, so this is a
    /// `findOneAndUpdate` setting `{deleted: {status: true}}`.
    pub fn soft_delete(query: Query, options: Option<RequestOptions>) -> Self {
        Operation::FindOneAndUpdate {
            query,
            update: UpdateItem::soft_delete(),
            options,
        }
    }

    /// A `bulkWrite` of `updateOne` elements, one per `(filter, update)` pair,
    /// in the given order.
    pub fn update_batch<I>(updates: I, options: Option<RequestOptions>) -> Self
    where
        I: IntoIterator<Item = (Query, UpdateItem)>,
    {
        let operations = updates
            .into_iter()
            .map(|(filter, update)| BulkOperation::UpdateOne { filter, update })
            .collect();
        Operation::BulkWrite { operations, options }
    }

    pub fn verb(&self) -> Verb {
        match self {
            Operation::InsertOne { .. } => Verb::InsertOne,
            Operation::Find { .. } => Verb::Find,
            Operation::FindOneAndUpdate { .. } => Verb::FindOneAndUpdate,
            Operation::UpdateMany { .. } => Verb::UpdateMany,
            Operation::DeleteOne { .. } => Verb::DeleteOne,
            Operation::DeleteMany { .. } => Verb::DeleteMany,
            Operation::Aggregate { .. } => Verb::Aggregate,
            Operation::BulkWrite { .. } => Verb::BulkWrite,
        }
    }

    /// Build the positional wire request.
    pub fn to_wire(&self) -> Result<WireRequest> {
        let mut parts = vec![Value::String(self.verb().as_str().to_owned())];

        let options = match self {
            Operation::InsertOne { document, options } => {
                parts.push(encode(document)?);
                options
            }
            Operation::Find { query, options }
            | Operation::DeleteOne { query, options }
            | Operation::DeleteMany { query, options } => {
                parts.push(encode(query)?);
                options
            }
            Operation::FindOneAndUpdate { query, update, options }
            | Operation::UpdateMany { query, update, options } => {
                parts.push(encode(query)?);
                parts.push(encode(update)?);
                options
            }
            Operation::Aggregate { pipeline, options } => {
                parts.push(encode(pipeline)?);
                options
            }
            Operation::BulkWrite { operations, options } => {
                parts.push(encode(operations)?);
                options
            }
        };

        if let Some(options) = options {
            parts.push(encode(options)?);
        }

        Ok(WireRequest(parts))
    }
}

/// The encoded request body: `[verb, ...args]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WireRequest(Vec<Value>);

impl WireRequest {
    /// The verb in position zero.
    pub fn verb(&self) -> Option<&str> {
        self.0.first().and_then(Value::as_str)
    }

    /// Encoded arguments after the verb.
    pub fn args(&self) -> &[Value] {
        self.0.get(1..).unwrap_or(&[])
    }

    /// Compact JSON text, the form that is signed and sent.
    pub fn to_text(&self) -> Result<String> {
        canonical_text(self)
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }
}

impl From<WireRequest> for Value {
    fn from(w: WireRequest) -> Value {
        Value::Array(w.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Deleted, FieldList, SortOrder};
    use serde_json::json;

    #[test]
    fn test_find_without_options_has_no_trailing_null() {
        let wire = Operation::Find {
            query: Query::by_sku("ITEM-001"),
            options: None,
        }
        .to_wire()
        .unwrap();

        assert_eq!(Value::from(wire.clone()), json!(["find", { "sku": "ITEM-001" }]));
        assert_eq!(wire.to_text().unwrap(), r#"["find",{"sku":"ITEM-001"}]"#);
    }

    #[test]
    fn test_find_with_options_appends_them_last() {
        let wire = Operation::Find {
            query: Query::by_sku("ITEM-001"),
            options: Some(RequestOptions::limit(1)),
        }
        .to_wire()
        .unwrap();

        assert_eq!(
            Value::from(wire),
            json!(["find", { "sku": "ITEM-001" }, { "limit": 1 }])
        );
    }

    #[test]
    fn test_soft_delete_matches_explicit_update() {
        let query = Query::by_id("item-42");
        let sugar = Operation::soft_delete(query.clone(), None).to_wire().unwrap();
        let explicit = Operation::FindOneAndUpdate {
            query,
            update: UpdateItem {
                deleted: Some(Deleted {
                    status: Some(true),
                    deletion_date: None,
                }),
                ..UpdateItem::default()
            },
            options: None,
        }
        .to_wire()
        .unwrap();

        assert_eq!(sugar, explicit);
        assert_eq!(
            Value::from(sugar),
            json!(["findOneAndUpdate", { "id": "item-42" }, { "deleted": { "status": true } }])
        );
    }

    #[test]
    fn test_update_many_argument_order() {
        let wire = Operation::UpdateMany {
            query: Query::by_sku("A"),
            update: UpdateItem {
                package_quantity: Some(3),
                ..UpdateItem::default()
            },
            options: Some(RequestOptions {
                include_deleted: Some(false),
                ..RequestOptions::default()
            }),
        }
        .to_wire()
        .unwrap();

        assert_eq!(wire.verb(), Some("updateMany"));
        assert_eq!(
            wire.args(),
            &[
                json!({ "sku": "A" }),
                json!({ "packageQuantity": 3 }),
                json!({ "includeDeleted": false })
            ]
        );
    }

    #[test]
    fn test_delete_verbs() {
        let one = Operation::DeleteOne {
            query: Query::by_id("x"),
            options: None,
        };
        let many = Operation::DeleteMany {
            query: Query::default(),
            options: None,
        };
        assert_eq!(Value::from(one.to_wire().unwrap()), json!(["deleteOne", { "id": "x" }]));
        assert_eq!(Value::from(many.to_wire().unwrap()), json!(["deleteMany", {}]));
    }

    #[test]
    fn test_aggregate_pipeline_is_one_argument() {
        let wire = Operation::Aggregate {
            pipeline: vec![
                AggregateStage::Match(Query::by_sku("A")),
                AggregateStage::Sort(FieldList::new().with("packageQuantity", SortOrder::Descending)),
                AggregateStage::Skip(2),
            ],
            options: None,
        }
        .to_wire()
        .unwrap();

        assert_eq!(
            Value::from(wire),
            json!([
                "aggregate",
                [
                    { "$match": { "sku": "A" } },
                    { "$sort": { "packageQuantity": -1 } },
                    { "$skip": 2 }
                ]
            ])
        );
    }

    #[test]
    fn test_update_batch_keeps_order() {
        let wire = Operation::update_batch(
            vec![
                (Query::by_sku("B"), UpdateItem::soft_delete()),
                (Query::by_sku("A"), UpdateItem::default()),
            ],
            None,
        )
        .to_wire()
        .unwrap();

        assert_eq!(
            Value::from(wire),
            json!([
                "bulkWrite",
                [
                    { "updateOne": { "filter": { "sku": "B" }, "update": { "deleted": { "status": true } } } },
                    { "updateOne": { "filter": { "sku": "A" }, "update": {} } }
                ]
            ])
        );
    }
}
