// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Client pipeline tests against an in-memory sender.

use std::sync::Mutex;

use async_trait::async_trait;
use rauk_inventory_client::error::TRANSPORT_FAILURE_MESSAGE;
use rauk_inventory_client::{
    ClientConfig, NetworkSender, RaukError, RaukInventoryClient, RawResponse,
};
use rauk_protocol::descriptor::{BrandDetails, Color, FactoryDetails, Location};
use rauk_protocol::{
    BulkOperation, ClassifiedError, CreateItem, ErrorKind, ProtocolError, Query, RequestOptions,
    Signature, Signer, UpdateItem,
};
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};
use url::Url;

#[derive(Debug, Clone)]
struct Sent {
    endpoint: String,
    body: String,
    signature: String,
}

/// Records every request and answers with a canned response.
struct RecordingSender {
    reply: Option<RawResponse>,
    sent: Mutex<Vec<Sent>>,
}

impl RecordingSender {
    fn replying(status: u16, body: &str) -> Self {
        Self {
            reply: Some(RawResponse::new(status, body.as_bytes().to_vec())),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn json(status: u16, body: Value) -> Self {
        Self::replying(status, &body.to_string())
    }

    /// A sender that never gets a response.
    fn unreachable() -> Self {
        Self {
            reply: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    fn only_request(&self) -> Sent {
        let sent = self.sent.lock().unwrap();
        assert_eq!(sent.len(), 1, "expected exactly one request");
        sent[0].clone()
    }
}

#[async_trait]
impl NetworkSender for RecordingSender {
    async fn send(
        &self,
        endpoint: &Url,
        body: String,
        signature: &str,
    ) -> rauk_inventory_client::Result<RawResponse> {
        self.sent.lock().unwrap().push(Sent {
            endpoint: endpoint.to_string(),
            body,
            signature: signature.to_owned(),
        });
        self.reply.clone().ok_or_else(|| RaukError::Transport {
            message: TRANSPORT_FAILURE_MESSAGE.to_owned(),
            source: None,
        })
    }
}

fn config() -> ClientConfig {
    ClientConfig::new("test-key-id", "test-secret", "test-public-key")
        .unwrap()
        .with_base_url("https://test-api.example.com/")
}

fn client(sender: RecordingSender) -> RaukInventoryClient<RecordingSender> {
    RaukInventoryClient::with_sender(config(), sender).unwrap()
}

fn item_json(sku: &str) -> Value {
    json!({
        "entities": { "apiId": "a", "entityId": "e", "factoryId": "f", "brandId": "b" },
        "currentLocation": { "id": "loc-1", "name": "Warehouse" },
        "sku": sku,
        "packageQuantity": 10,
        "color": { "id": "c-1", "name": "Red" },
        "deleted": { "status": false },
        "id": format!("id-{sku}")
    })
}

#[tokio::test]
async fn test_find_posts_signed_wire_body() {
    let client = client(RecordingSender::json(200, json!([item_json("ITEM-001")])));

    let items = client.find(Query::by_sku("ITEM-001"), None).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].sku, "ITEM-001");

    let sent = client.sender().only_request();
    assert_eq!(sent.endpoint, "https://test-api.example.com/query");
    assert_eq!(sent.body, r#"["find",{"sku":"ITEM-001"}]"#);

    // The header must verify against exactly the bytes that were sent.
    let signature = Signature::parse(&sent.signature).unwrap();
    assert_eq!(signature.key_id(), "test-key-id");
    assert_eq!(signature.public_key(), "test-public-key");

    let time: i64 = signature.time().parse().unwrap();
    let expected = Signer::new("test-key-id", "test-secret", "test-public-key")
        .sign_at(&sent.body, time)
        .unwrap();
    assert_eq!(expected.token(), sent.signature);
}

#[tokio::test]
async fn test_find_one_forces_limit_and_keeps_other_options() {
    let client = client(RecordingSender::json(200, json!([item_json("A"), item_json("B")])));
    let options = RequestOptions {
        limit: Some(50),
        include_deleted: Some(true),
        ..RequestOptions::default()
    };

    let item = client.find_one(Query::default(), Some(options)).await.unwrap();
    assert_eq!(item.map(|i| i.sku), Some("A".to_owned()));
    assert_eq!(
        client.sender().only_request().body,
        r#"["find",{},{"limit":1,"includeDeleted":true}]"#
    );
}

#[tokio::test]
async fn test_find_one_without_match_is_none() {
    let client = client(RecordingSender::json(200, json!([])));
    let item = assert_ok!(client.find_one(Query::by_sku("GONE"), None).await);
    assert!(item.is_none());
}

#[tokio::test]
async fn test_soft_delete_sends_find_one_and_update() {
    let client = client(RecordingSender::json(200, json!({ "deletedCount": 1 })));

    let result = client.delete(Query::by_id("item-1"), None).await.unwrap();
    assert_eq!(result.deleted_count, 1);
    assert_eq!(
        client.sender().only_request().body,
        r#"["findOneAndUpdate",{"id":"item-1"},{"deleted":{"status":true}}]"#
    );
}

#[tokio::test]
async fn test_create_sends_insert_one_and_decodes_item() {
    let client = client(RecordingSender::json(201, item_json("NEW-1")));
    let item = CreateItem::new(
        "NEW-1",
        10,
        Color {
            id: Some("c-1".into()),
            name: Some("Red".into()),
        },
        BrandDetails::default(),
        FactoryDetails::default(),
        Location::new("loc-1", "Warehouse"),
    );

    let created = client.create(item, None).await.unwrap();
    assert_eq!(created.id, "id-NEW-1");

    let body = client.sender().only_request().body;
    assert!(body.starts_with(r#"["insertOne",{"currentLocation":{"id":"loc-1","name":"Warehouse"},"sku":"NEW-1""#));
}

#[tokio::test]
async fn test_update_batch_sends_bulk_write() {
    let client = client(RecordingSender::json(200, json!({ "ok": 1 })));
    let updates = vec![
        (Query::by_sku("A"), UpdateItem::soft_delete()),
        (Query::by_sku("B"), UpdateItem::soft_delete()),
    ];

    let summary = client.update_batch(updates, None).await.unwrap();
    assert_eq!(summary, json!({ "ok": 1 }));

    let body: Value = serde_json::from_str(&client.sender().only_request().body).unwrap();
    assert_eq!(body[0], "bulkWrite");
    assert_eq!(body[1][0]["updateOne"]["filter"], json!({ "sku": "A" }));
    assert_eq!(body[1][1]["updateOne"]["filter"], json!({ "sku": "B" }));
}

#[tokio::test]
async fn test_bulk_write_keeps_element_order() {
    let client = client(RecordingSender::json(200, json!({ "insertedCount": 0, "deletedCount": 1 })));
    let operations = vec![
        BulkOperation::DeleteOne {
            filter: Query::by_sku("OLD"),
        },
        BulkOperation::UpdateOne {
            filter: Query::by_sku("KEEP"),
            update: UpdateItem::soft_delete(),
        },
    ];

    let summary = client.bulk_write(operations, None).await.unwrap();
    assert_eq!(summary["deletedCount"], 1);
    assert_eq!(
        client.sender().only_request().body,
        r#"["bulkWrite",[{"deleteOne":{"filter":{"sku":"OLD"}}},{"updateOne":{"filter":{"sku":"KEEP"},"update":{"deleted":{"status":true}}}}]]"#
    );
}

#[tokio::test]
async fn test_validation_failure_is_classified() {
    let client = client(RecordingSender::json(
        400,
        json!({
            "success": false,
            "error": {
                "errors": [{
                    "property": "sku",
                    "constraints": { "isString": "sku must be a string" },
                    "children": []
                }]
            }
        }),
    ));

    let err = client.find(Query::default(), None).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.status_code(), Some(400));

    let classified = err.classified().unwrap();
    assert_eq!(classified.message(), "sku must be a string");
    assert_eq!(classified.errors_for_property("sku").len(), 1);
    assert_eq!(classified.context(), Some(&json!({ "operation": "find" })));
}

#[tokio::test]
async fn test_status_classes_map_to_kinds() {
    let cases = [
        (401, ErrorKind::Authentication),
        (403, ErrorKind::Authentication),
        (404, ErrorKind::Api),
        (503, ErrorKind::Network),
    ];

    for (status, kind) in cases {
        let client = client(RecordingSender::json(
            status,
            json!({ "success": false, "error": { "message": "nope" } }),
        ));
        match client.delete_many(Query::default(), None).await {
            Err(RaukError::Api(e)) => {
                assert_eq!(e.kind(), kind, "status {status}");
                assert_eq!(e.message(), "nope");
            }
            other => panic!("status {status}: unexpected {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_non_json_error_body_uses_default_message() {
    let client = client(RecordingSender::replying(502, "<html>Bad Gateway</html>"));

    let err = client.delete_one(Query::default(), None).await.unwrap_err();
    assert!(err.is_network());
    match err {
        RaukError::Api(ClassifiedError::Network(details)) => {
            assert_eq!(details.message, "Server error occurred");
            assert_eq!(details.status_code, Some(502));
            assert!(details.response.is_none());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let client = client(RecordingSender::unreachable());

    let err = assert_err!(client.aggregate(Vec::new(), None).await);
    assert!(err.is_network());
    assert_eq!(err.to_string(), TRANSPORT_FAILURE_MESSAGE);
    assert_eq!(client.sender().only_request().body, r#"["aggregate",[]]"#);
}

#[tokio::test]
async fn test_non_json_success_body_is_decode_fault() {
    let client = client(RecordingSender::replying(200, "OK"));

    let err = client.update_many(Query::default(), UpdateItem::default(), None).await.unwrap_err();
    assert!(matches!(err, RaukError::Protocol(ProtocolError::Decode { .. })));
}

#[tokio::test]
async fn test_wrong_success_shape_is_decode_fault() {
    let client = client(RecordingSender::json(200, json!({ "matchedCount": "two" })));

    let err = client
        .update(Query::by_sku("A"), UpdateItem::default(), None)
        .await
        .unwrap_err();
    match err {
        RaukError::Protocol(ProtocolError::Decode { record, .. }) => {
            assert_eq!(record, "UpdateResult");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_invalid_base_url_rejected_at_construction() {
    let config = config().with_base_url("::not a url::");
    let result = RaukInventoryClient::with_sender(config, RecordingSender::unreachable());
    assert!(matches!(result, Err(RaukError::Config(_))));
}
