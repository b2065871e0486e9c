// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! HTTP transport for signed requests.
//!
//! [`NetworkSender`] is the seam between the client and the network: it
//! delivers one signed body to the endpoint and hands back the raw status and
//! bytes, whatever they are. Interpreting the response is the client's job.

use std::time::Duration;

use async_trait::async_trait;
use rauk_protocol::SIGNATURE_HEADER;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::error::{RaukError, Result};

/// Status and body of an HTTP response, uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

/// Delivers a signed request body to the inventory endpoint.
#[async_trait]
pub trait NetworkSender: Send + Sync {
    /// `POST` `body` to `endpoint` with `signature` in the signature header.
    ///
    /// Any HTTP response, success or failure, is returned as `Ok`. `Err` means
    /// no response was obtained.
    async fn send(&self, endpoint: &Url, body: String, signature: &str) -> Result<RawResponse>;
}

/// [`NetworkSender`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpSender {
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpSender {
    /// # Errors
    ///
    /// Returns [`RaukError::Transport`] if the TLS backend cannot initialise.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RaukError::transport)?;
        Ok(Self { http, timeout })
    }

    fn map_send_error(&self, e: reqwest::Error) -> RaukError {
        if e.is_timeout() {
            RaukError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
        } else {
            RaukError::transport(e)
        }
    }
}

#[async_trait]
impl NetworkSender for HttpSender {
    async fn send(&self, endpoint: &Url, body: String, signature: &str) -> Result<RawResponse> {
        let response = self
            .http
            .post(endpoint.clone())
            .header(SIGNATURE_HEADER, signature)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_send_error(e))?;

        Ok(RawResponse::new(status, bytes.to_vec()))
    }
}
