// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! # Rauk Inventory Client SDK
//!
//! An async Rust client for the Rauk inventory service. Every call is a single
//! signed `POST /query` carrying a positional `[verb, ...args]` body; the
//! request shapes, signing and error classification live in
//! [`rauk_protocol`], this crate adds configuration and HTTP.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rauk_inventory_client::{ClientConfig, RaukInventoryClient};
//! use rauk_protocol::{Query, RequestOptions};
//!
//! #[tokio::main]
//! async fn main() -> rauk_inventory_client::Result<()> {
//!     let client = RaukInventoryClient::new(ClientConfig::from_env()?)?;
//!     let item = client
//!         .find_one(Query::by_sku("ITEM-001"), Some(RequestOptions::default()))
//!         .await?;
//!     println!("found: {}", item.is_some());
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Credentials, base URL, timeout; environment loading.
//! - [`client`]: The client and its sign-send-classify pipeline.
//! - [`inventory`]: One method per inventory verb.
//! - [`transport`]: The [`NetworkSender`] seam and its `reqwest` implementation.
//! - [`error`]: Error types and the crate-level `Result` alias.

pub mod client;
pub mod config;
pub mod error;
pub mod inventory;
pub mod transport;

pub use client::RaukInventoryClient;
pub use config::ClientConfig;
pub use error::{RaukError, Result};
pub use transport::{HttpSender, NetworkSender, RawResponse};
