// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! # Rauk Protocol
//!
//! The signed-request protocol layer of the Rauk inventory SDK. Pure and
//! synchronous: nothing here performs I/O, and the only side effect is the
//! clock read made when a request is signed.
//!
//! ## Pipeline
//!
//! ```text
//! descriptor ──encode──▶ WireRequest ──seal──▶ (body text, Rai-Signature)
//!                                                   │
//!                         network sender (external) ▼
//! typed record ◀──decode── 2xx body     ClassifiedError ◀──classify── 4xx/5xx
//! ```
//!
//! ## Modules
//!
//! - [`descriptor`]: Operation arguments: create/query/update records,
//!   request options, aggregation stages, bulk operations.
//! - [`field`]: The tri-state [`field::Nullable`] wrapper.
//! - [`codec`]: Canonical encoder and response decoder.
//! - [`operation`]: Verb table and positional wire request builder.
//! - [`signer`]: HMAC-SHA256 request signatures.
//! - [`item`]: Response records.
//! - [`classify`]: Server error classification and validation trees.
//! - [`error`]: Client-side protocol faults.
//!
//! ## Example
//!
//! ```rust
//! use rauk_protocol::{Operation, Query, RequestOptions, Signer};
//!
//! let wire = Operation::Find {
//!     query: Query::by_sku("ITEM-001"),
//!     options: Some(RequestOptions::limit(1)),
//! }
//! .to_wire()?;
//! assert_eq!(wire.to_text()?, r#"["find",{"sku":"ITEM-001"},{"limit":1}]"#);
//!
//! let sealed = Signer::new("key-id", "secret", "public-key").seal(&wire)?;
//! assert_eq!(sealed.signature.token().split('.').count(), 4);
//! # Ok::<(), rauk_protocol::ProtocolError>(())
//! ```

pub mod classify;
pub mod codec;
pub mod descriptor;
pub mod error;
pub mod field;
pub mod item;
pub mod operation;
pub mod signer;

pub use classify::{classify, ClassifiedError, ErrorDetails, ErrorKind, ValidationErrorDetail};
pub use codec::{decode, encode};
pub use descriptor::{
    AggregateStage, BulkOperation, CreateItem, FieldList, Projection, Query, RequestOptions,
    SortOrder, UpdateItem,
};
pub use error::{ProtocolError, Result};
pub use field::Nullable;
pub use item::{DeleteResult, InsertResult, InventoryItem, UpdateResult};
pub use operation::{Operation, Verb, WireRequest};
pub use signer::{Signature, SignedRequest, Signer, SIGNATURE_HEADER};
