// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Inventory operations.
//!
//! One method per service verb, plus the convenience forms `find_one`,
//! soft `delete` and `update_batch`. Each builds an [`Operation`], runs it
//! through [`RaukInventoryClient::execute`] and decodes the typed result.

use rauk_protocol::{
    AggregateStage, BulkOperation, CreateItem, DeleteResult, InventoryItem, Operation, Query,
    RequestOptions, UpdateItem, UpdateResult,
};
use serde_json::Value;

use crate::client::RaukInventoryClient;
use crate::error::Result;
use crate::transport::NetworkSender;

impl<S: NetworkSender> RaukInventoryClient<S> {
    /// Insert a new item (`insertOne`) and return the stored record.
    ///
    /// Required fields are already guaranteed by [`CreateItem`]'s
    /// constructor; nothing is sent for an incomplete item.
    pub async fn create(
        &self,
        item: CreateItem,
        options: Option<RequestOptions>,
    ) -> Result<InventoryItem> {
        self.execute_as(&Operation::InsertOne {
            document: item,
            options,
        })
        .await
    }

    /// All items matching `query`.
    pub async fn find(
        &self,
        query: Query,
        options: Option<RequestOptions>,
    ) -> Result<Vec<InventoryItem>> {
        self.execute_as(&Operation::Find { query, options }).await
    }

    /// The first item matching `query`, if any.
    ///
    /// Sends a `find` with `limit` forced to 1; `select`, `sort` and
    /// `includeDeleted` from `options` are kept.
    pub async fn find_one(
        &self,
        query: Query,
        options: Option<RequestOptions>,
    ) -> Result<Option<InventoryItem>> {
        let options = options.unwrap_or_default().with_limit(1);
        let items = self.find(query, Some(options)).await?;
        Ok(items.into_iter().next())
    }

    /// Apply `update` to the first item matching `query` (`findOneAndUpdate`).
    pub async fn update(
        &self,
        query: Query,
        update: UpdateItem,
        options: Option<RequestOptions>,
    ) -> Result<UpdateResult> {
        self.execute_as(&Operation::FindOneAndUpdate {
            query,
            update,
            options,
        })
        .await
    }

    /// Soft delete: mark the first match as deleted without removing it.
    pub async fn delete(
        &self,
        query: Query,
        options: Option<RequestOptions>,
    ) -> Result<DeleteResult> {
        self.execute_as(&Operation::soft_delete(query, options)).await
    }

    /// Run an aggregation pipeline. Stages are sent in the given order.
    pub async fn aggregate(
        &self,
        pipeline: Vec<AggregateStage>,
        options: Option<RequestOptions>,
    ) -> Result<Vec<Value>> {
        self.execute_as(&Operation::Aggregate { pipeline, options })
            .await
    }

    /// Execute several write operations in one request.
    ///
    /// The server's summary is returned undecoded.
    pub async fn bulk_write(
        &self,
        operations: Vec<BulkOperation>,
        options: Option<RequestOptions>,
    ) -> Result<Value> {
        self.execute(&Operation::BulkWrite {
            operations,
            options,
        })
        .await
    }

    pub async fn update_many(
        &self,
        query: Query,
        update: UpdateItem,
        options: Option<RequestOptions>,
    ) -> Result<UpdateResult> {
        self.execute_as(&Operation::UpdateMany {
            query,
            update,
            options,
        })
        .await
    }

    /// Permanently remove the first item matching `query`.
    pub async fn delete_one(
        &self,
        query: Query,
        options: Option<RequestOptions>,
    ) -> Result<DeleteResult> {
        self.execute_as(&Operation::DeleteOne { query, options })
            .await
    }

    /// Permanently remove every item matching `query`.
    pub async fn delete_many(
        &self,
        query: Query,
        options: Option<RequestOptions>,
    ) -> Result<DeleteResult> {
        self.execute_as(&Operation::DeleteMany { query, options })
            .await
    }

    /// A `bulkWrite` of one `updateOne` per `(filter, update)` pair.
    pub async fn update_batch<I>(&self, updates: I, options: Option<RequestOptions>) -> Result<Value>
    where
        I: IntoIterator<Item = (Query, UpdateItem)>,
    {
        self.execute(&Operation::update_batch(updates, options))
            .await
    }
}
