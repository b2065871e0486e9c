// SPDX-License-Identifier: PMPL-1.0-or-later
//! Property-based tests for encoding, signing and response decoding

use base64::engine::general_purpose::STANDARD as Base64;
use base64::Engine;
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rauk_protocol::descriptor::{Color, Entities, Location, StatusDetails};
use rauk_protocol::item::{self, Availability, LocationHistoryEntry};
use rauk_protocol::{decode, encode, InventoryItem, Nullable, Operation, Query, RequestOptions, Signer};
use serde_json::{json, Map, Value};

/// Generate optional short identifiers
fn arb_opt_id() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[A-Z]{3}-[0-9]{1,4}")
}

/// Generate arbitrary queries with any subset of fields present
fn arb_query() -> impl Strategy<Value = Query> {
    (
        arb_opt_id(),
        arb_opt_id(),
        arb_opt_id(),
        prop::option::of(any::<i64>()),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(sku, hardcode, id, qty, with_color, with_entities)| Query {
            sku,
            hardcode,
            id,
            package_quantity: qty,
            color: with_color.then(Color::default),
            entities: with_entities.then(Entities::default),
            ..Query::default()
        })
}

fn full_item() -> InventoryItem {
    let at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
    let mut details = Map::new();
    details.insert("rack".into(), json!("R-12"));

    InventoryItem {
        hardcode: Some("HC-1".into()),
        entities: item::ItemEntities {
            api_id: "api-123".into(),
            entity_id: "entity-456".into(),
            factory_id: "factory-789".into(),
            brand_id: "brand-101".into(),
        },
        current_location: Location {
            id: Some("warehouse-1".into()),
            name: Some("Main Warehouse".into()),
            details: Nullable::Value(details),
        },
        transit_to: Some(item::TransitTo {
            id: Some("t-1".into()),
            client: Some("ACME".into()),
        }),
        availability: Some(Availability {
            reserved: Some(StatusDetails {
                order_id: Some("order-7".into()),
                date: Some(at),
                temporary: Some(true),
                expiration: Some(at + chrono::Duration::days(2)),
            }),
            ..Availability::default()
        }),
        sku: "ITEM-001".into(),
        brand_details: Some(item::BrandDetails {
            id: Some("brand-101".into()),
            name: Some("Premium Brand".into()),
            kind: Some("luxury".into()),
            sub_type: Some("watches".into()),
        }),
        package_quantity: 10,
        color: item::ItemColor {
            id: Some("color-123".into()),
            name: "Red".into(),
        },
        factory_details: Some(item::FactoryDetails {
            id: Some("factory-789".into()),
            name: Some("Main Factory".into()),
            kind: Some("manufacturing".into()),
            sub_type: None,
        }),
        deleted: item::ItemDeleted {
            status: true,
            deletion_date: Some(at),
        },
        location_history: vec![LocationHistoryEntry {
            id: "warehouse-0".into(),
            name: "Dock".into(),
            date: at,
        }],
        created_at: Some(at),
        updated_at: Some(at + chrono::Duration::hours(1)),
        id: "item-1".into(),
    }
}

fn sparse_item() -> InventoryItem {
    InventoryItem {
        hardcode: None,
        current_location: Location::default(),
        transit_to: None,
        availability: None,
        brand_details: None,
        factory_details: None,
        deleted: item::ItemDeleted {
            status: false,
            deletion_date: None,
        },
        location_history: Vec::new(),
        created_at: None,
        updated_at: None,
        color: item::ItemColor {
            id: None,
            name: "Red".into(),
        },
        ..full_item()
    }
}

#[test]
fn test_full_item_survives_encode_decode() {
    let original = full_item();
    let decoded: InventoryItem = decode(encode(&original).unwrap()).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn test_sparse_item_survives_encode_decode() {
    let original = sparse_item();
    let encoded = encode(&original).unwrap();

    assert!(encoded.get("createdAt").is_none());
    assert!(encoded.get("transitTo").is_none());
    assert_eq!(encoded["currentLocation"], json!({}));

    let decoded: InventoryItem = decode(encoded).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn test_find_end_to_end_wire_shapes() {
    let bare = Operation::Find {
        query: Query::by_sku("ITEM-001"),
        options: None,
    };
    let limited = Operation::Find {
        query: Query::by_sku("ITEM-001"),
        options: Some(RequestOptions::limit(1)),
    };

    assert_eq!(Value::from(bare.to_wire().unwrap()), json!(["find", { "sku": "ITEM-001" }]));
    assert_eq!(
        Value::from(limited.to_wire().unwrap()),
        json!(["find", { "sku": "ITEM-001" }, { "limit": 1 }])
    );
}

proptest! {
    #[test]
    fn test_present_fields_appear_and_absent_fields_do_not(query in arb_query()) {
        let encoded = encode(&query).unwrap();
        let object = encoded.as_object().unwrap();

        let expected = [
            ("sku", query.sku.is_some()),
            ("hardcode", query.hardcode.is_some()),
            ("id", query.id.is_some()),
            ("packageQuantity", query.package_quantity.is_some()),
            ("color", query.color.is_some()),
            ("entities", query.entities.is_some()),
        ];
        for (key, present) in expected {
            prop_assert_eq!(object.contains_key(key), present, "key {}", key);
        }
        prop_assert!(object.values().all(|v| !v.is_null()));
        if query.color.is_some() {
            prop_assert_eq!(&object["color"], &json!({}));
        }
    }

    #[test]
    fn test_encoding_text_is_deterministic(query in arb_query()) {
        let wire = Operation::Find { query, options: None }.to_wire().unwrap();
        prop_assert_eq!(wire.to_text().unwrap(), wire.clone().to_text().unwrap());
    }

    #[test]
    fn test_signature_structure(
        body in "[ -~]{0,64}",
        at in 0i64..=4_102_444_800_000,
    ) {
        let token = Signer::new("kid", "secret", "pub").sign_at(&body, at).unwrap().token();
        let parts: Vec<&str> = token.split('.').collect();

        prop_assert_eq!(parts.len(), 4);
        prop_assert_eq!(parts[2].len(), 64);
        prop_assert!(parts[2].bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));

        let time = String::from_utf8(Base64.decode(parts[3]).unwrap()).unwrap();
        prop_assert!(time.bytes().all(|b| b.is_ascii_digit()));
        prop_assert_eq!(time, at.to_string());
    }

    #[test]
    fn test_signature_is_deterministic_and_sensitive(
        body in "[a-z]{1,32}",
        at in 1i64..=4_102_444_800_000,
    ) {
        let signer = Signer::new("kid", "secret", "pub");
        let a = signer.sign_at(&body, at).unwrap();
        let b = signer.sign_at(&body, at).unwrap();
        prop_assert_eq!(&a, &b);

        let later = signer.sign_at(&body, at + 1).unwrap();
        let longer = signer.sign_at(&format!("{body}!"), at).unwrap();
        let rekeyed = Signer::new("kid", "secret2", "pub").sign_at(&body, at).unwrap();
        prop_assert_ne!(a.digest(), later.digest());
        prop_assert_ne!(a.digest(), longer.digest());
        prop_assert_ne!(a.digest(), rekeyed.digest());
    }
}
