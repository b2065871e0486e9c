// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! The Rauk inventory client and its request pipeline.
//!
//! [`RaukInventoryClient`] owns the configuration, signer, endpoint and
//! transport. Every call goes through [`RaukInventoryClient::execute`]:
//! operation → wire request → signed body → `POST /query` → decoded JSON or a
//! classified error. The per-verb methods live in [`crate::inventory`].

use rauk_protocol::{classify, codec, Operation, Signer};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::transport::{HttpSender, NetworkSender};

/// Client for the Rauk inventory service.
///
/// # Examples
///
/// ```rust,no_run
/// use rauk_inventory_client::{ClientConfig, RaukInventoryClient};
/// use rauk_protocol::Query;
///
/// # #[tokio::main]
/// # async fn main() -> rauk_inventory_client::Result<()> {
/// let config = ClientConfig::new("key-id", "secret", "public-key")?;
/// let client = RaukInventoryClient::new(config)?;
/// let items = client.find(Query::by_sku("SKU-001"), None).await?;
/// println!("{} items", items.len());
/// # Ok(())
/// # }
/// ```
pub struct RaukInventoryClient<S = HttpSender> {
    config: ClientConfig,
    endpoint: Url,
    signer: Signer,
    sender: S,
}

impl RaukInventoryClient<HttpSender> {
    /// Client that talks HTTP through `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns [`RaukError::Config`](crate::RaukError::Config) if the base URL
    /// is invalid.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let sender = HttpSender::new(config.timeout())?;
        Self::with_sender(config, sender)
    }
}

impl<S: NetworkSender> RaukInventoryClient<S> {
    /// Client that delivers requests through `sender`.
    pub fn with_sender(config: ClientConfig, sender: S) -> Result<Self> {
        let endpoint = config.endpoint()?;
        let signer = config.signer();
        Ok(Self {
            config,
            endpoint,
            signer,
            sender,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Sign and send `operation`, returning the decoded success body.
    ///
    /// # Errors
    ///
    /// - [`RaukError::Protocol`](crate::RaukError::Protocol) if the request
    ///   cannot be encoded or signed, or the success body is not JSON.
    /// - [`RaukError::Transport`](crate::RaukError::Transport) /
    ///   [`RaukError::Timeout`](crate::RaukError::Timeout) if no response
    ///   arrived.
    /// - [`RaukError::Api`](crate::RaukError::Api) for status >= 400.
    #[instrument(skip(self, operation), fields(verb = %operation.verb()))]
    pub async fn execute(&self, operation: &Operation) -> Result<Value> {
        let wire = operation.to_wire()?;
        let sealed = self.signer.seal(&wire)?;
        debug!(bytes = sealed.body.len(), "sending signed request");

        let response = self
            .sender
            .send(&self.endpoint, sealed.body, &sealed.signature.token())
            .await?;

        if response.is_error() {
            let body: Value = serde_json::from_slice(&response.body).unwrap_or(Value::Null);
            let error = classify(response.status, &body)
                .with_context(json!({ "operation": operation.verb().as_str() }));
            warn!(
                status = response.status,
                kind = error.kind().name(),
                message = error.message(),
                "request rejected"
            );
            return Err(error.into());
        }

        debug!(status = response.status, "request succeeded");
        Ok(codec::decode_slice::<Value>(&response.body)?)
    }

    /// [`execute`](Self::execute), then decode the body into `T`.
    pub(crate) async fn execute_as<T: DeserializeOwned>(&self, operation: &Operation) -> Result<T> {
        let value = self.execute(operation).await?;
        Ok(codec::decode(value)?)
    }
}
