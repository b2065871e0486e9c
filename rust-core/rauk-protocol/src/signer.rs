// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Request signing.
//!
//! Every request carries a `Rai-Signature` header of the form
//! `keyId.publicKey.hmac.base64Time`:
//!
//! - `time` is the signing instant in milliseconds since the Unix epoch,
//!   rendered as decimal text;
//! - `hmac` is the lowercase hex HMAC-SHA256 of `body + time`, keyed by the
//!   API secret;
//! - `base64Time` is the same `time` text, base64-encoded.
//!
//! The body hashed must be byte-for-byte the body sent. [`Signer::seal`]
//! produces both from a single serialization so they cannot drift apart.

use std::fmt;

use base64::engine::general_purpose::STANDARD as Base64;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{ProtocolError, Result};
use crate::operation::WireRequest;

type HmacSha256 = Hmac<Sha256>;

/// Header the signature token travels in.
pub const SIGNATURE_HEADER: &str = "Rai-Signature";

/// Holds the API credentials and signs request bodies.
#[derive(Clone)]
pub struct Signer {
    key_id: String,
    secret: String,
    public_key: String,
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("key_id", &self.key_id)
            .field("secret", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}

impl Signer {
    pub fn new(
        key_id: impl Into<String>,
        secret: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            secret: secret.into(),
            public_key: public_key.into(),
        }
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Sign `body` at the current wall-clock time.
    pub fn sign(&self, body: &str) -> Result<Signature> {
        self.sign_at(body, Utc::now().timestamp_millis())
    }

    /// Sign `body` as if at `timestamp_ms`.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::Signing`] if the MAC cannot be keyed.
    pub fn sign_at(&self, body: &str, timestamp_ms: i64) -> Result<Signature> {
        let time = timestamp_ms.to_string();

        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| ProtocolError::Signing(e.to_string()))?;
        mac.update(body.as_bytes());
        mac.update(time.as_bytes());
        let digest = hex::encode(mac.finalize().into_bytes());

        Ok(Signature {
            key_id: self.key_id.clone(),
            public_key: self.public_key.clone(),
            digest,
            time,
        })
    }

    /// Serialize `wire` once and sign that exact text.
    pub fn seal(&self, wire: &WireRequest) -> Result<SignedRequest> {
        let body = wire.to_text()?;
        let signature = self.sign(&body)?;
        Ok(SignedRequest { body, signature })
    }
}

/// A request body paired with the signature computed over it.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// Compact JSON text to transmit unchanged.
    pub body: String,
    pub signature: Signature,
}

/// A parsed or freshly computed signature token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    key_id: String,
    public_key: String,
    digest: String,
    time: String,
}

impl Signature {
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Lowercase hex HMAC-SHA256, 64 characters.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// The decimal millisecond timestamp that was hashed.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Header value `keyId.publicKey.hmac.base64Time`.
    pub fn token(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.key_id,
            self.public_key,
            self.digest,
            Base64.encode(self.time.as_bytes())
        )
    }

    /// Split a header value back into its parts.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::Signing`] if the token does not have four parts, the
    /// digest is not 64 hex characters, or the time part is not base64 of a
    /// decimal number.
    pub fn parse(token: &str) -> Result<Self> {
        let parts: Vec<&str> = token.split('.').collect();
        let [key_id, public_key, digest, encoded_time] = parts.as_slice() else {
            return Err(malformed(format!("expected 4 parts, found {}", parts.len())));
        };

        if digest.len() != 64 || !digest.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(malformed("digest is not 64 lowercase hex characters"));
        }

        let time = Base64
            .decode(encoded_time)
            .ok()
            .and_then(|raw| String::from_utf8(raw).ok())
            .filter(|t| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| malformed("time part is not base64 of a decimal timestamp"))?;

        Ok(Self {
            key_id: (*key_id).to_owned(),
            public_key: (*public_key).to_owned(),
            digest: (*digest).to_owned(),
            time,
        })
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

fn malformed(reason: impl Into<String>) -> ProtocolError {
    ProtocolError::Signing(format!("malformed signature token: {}", reason.into()))
}
