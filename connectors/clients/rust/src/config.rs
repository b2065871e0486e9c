// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Client configuration: credentials, base URL and timeout.
//!
//! A [`ClientConfig`] is built once and handed to
//! [`RaukInventoryClient::new`](crate::client::RaukInventoryClient::new).
//! There is no process-wide client; several differently-configured clients can
//! coexist.

use std::fmt;
use std::time::Duration;

use rauk_protocol::Signer;
use url::Url;

use crate::error::{RaukError, Result};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://inventory.rauk.app";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the API key id.
pub const ENV_API_KEY_ID: &str = "RAUK_API_KEY_ID";
/// Environment variable holding the API secret.
pub const ENV_API_SECRET: &str = "RAUK_API_SECRET";
/// Environment variable holding the API public key.
pub const ENV_API_PUBLIC_KEY: &str = "RAUK_API_PUBLIC_KEY";
/// Optional environment variable overriding the base URL.
pub const ENV_API_BASE_URL: &str = "RAUK_API_BASE_URL";
/// Optional environment variable overriding the timeout, in whole seconds.
pub const ENV_API_TIMEOUT_SECS: &str = "RAUK_API_TIMEOUT_SECS";

/// Credentials and connection settings for one client.
#[derive(Clone)]
pub struct ClientConfig {
    api_key_id: String,
    api_secret: String,
    api_public_key: String,
    base_url: String,
    timeout: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key_id", &self.api_key_id)
            .field("api_secret", &"<redacted>")
            .field("api_public_key", &self.api_public_key)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Configuration with the default base URL and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RaukError::Config`] if any credential is empty.
    pub fn new(
        api_key_id: impl Into<String>,
        api_secret: impl Into<String>,
        api_public_key: impl Into<String>,
    ) -> Result<Self> {
        let config = Self {
            api_key_id: api_key_id.into(),
            api_secret: api_secret.into(),
            api_public_key: api_public_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        };

        if config.api_key_id.is_empty()
            || config.api_secret.is_empty()
            || config.api_public_key.is_empty()
        {
            return Err(RaukError::Config(
                "apiKeyId, apiSecret and apiPublicKey are required".to_owned(),
            ));
        }
        Ok(config)
    }

    /// Load configuration from `RAUK_API_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| RaukError::Config(format!("{name} is not set")))
        };

        let mut config = Self::new(
            required(ENV_API_KEY_ID)?,
            required(ENV_API_SECRET)?,
            required(ENV_API_PUBLIC_KEY)?,
        )?;

        if let Some(base_url) = lookup(ENV_API_BASE_URL).filter(|v| !v.is_empty()) {
            config.base_url = base_url;
        }
        if let Some(raw) = lookup(ENV_API_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                RaukError::Config(format!("{ENV_API_TIMEOUT_SECS} must be whole seconds, got {raw:?}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_key_id(&self) -> &str {
        &self.api_key_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The single `POST` endpoint: `{base_url}/query`.
    ///
    /// # Errors
    ///
    /// Returns [`RaukError::Config`] if the base URL cannot be parsed.
    pub fn endpoint(&self) -> Result<Url> {
        let raw = format!("{}/query", self.base_url.trim_end_matches('/'));
        Url::parse(&raw).map_err(|e| RaukError::Config(format!("Invalid base URL: {e}")))
    }

    /// A request signer holding these credentials.
    pub fn signer(&self) -> Signer {
        Signer::new(&self.api_key_id, &self.api_secret, &self.api_public_key)
    }
}
