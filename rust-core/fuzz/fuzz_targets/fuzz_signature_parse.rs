// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Fuzz target for signature header parsing.
// Run with: cargo +nightly fuzz run fuzz_signature_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use rauk_protocol::Signature;

fuzz_target!(|data: &[u8]| {
    if let Ok(token) = std::str::from_utf8(data) {
        if token.len() <= 4096 {
            // Anything that parses must render back to the same token.
            if let Ok(signature) = Signature::parse(token) {
                assert_eq!(signature.token(), token);
            }
        }
    }
});
