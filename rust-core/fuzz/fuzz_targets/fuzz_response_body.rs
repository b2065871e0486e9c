// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Fuzz target for response handling: arbitrary bodies go through both the
// error classifier and the success decoder.
// Run with: cargo +nightly fuzz run fuzz_response_body

#![no_main]

use libfuzzer_sys::fuzz_target;
use rauk_protocol::{classify, codec, InventoryItem};
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 || data.len() > 8192 {
        return;
    }
    let status = 400 + u16::from(data[0]) % 200;
    let body = &data[1..];

    let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
    let error = classify(status, &value);
    let _ = error.all_messages();
    let _ = error.to_json();

    let _ = codec::decode_slice::<Vec<InventoryItem>>(body);
});
