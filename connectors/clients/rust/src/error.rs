// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Error types for the Rauk inventory client SDK.
//!
//! All fallible operations in this crate return [`Result<T>`], an alias for
//! `std::result::Result<T, RaukError>`. [`RaukError`] separates faults that
//! happen before a request leaves the process (configuration, descriptor
//! construction, signing), failures to get any response at all (transport,
//! timeout), malformed responses, and failures the server reported.

use rauk_protocol::{ClassifiedError, ErrorKind, ProtocolError};
use thiserror::Error;

/// Message used for every transport-level failure.
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Network request failed - check your internet connection and API endpoint";

/// Comprehensive error type for Rauk inventory client operations.
///
/// Nothing is retried internally; each variant carries enough structure for
/// the caller to decide whether to retry, fix input, or escalate.
#[derive(Error, Debug)]
pub enum RaukError {
    /// Credentials or base URL are missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No HTTP response was obtained (DNS, TLS, connection reset, ...).
    #[error("{message}")]
    Transport {
        /// Human-readable summary.
        message: String,
        /// The underlying `reqwest` error, when there is one.
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The request exceeded the configured timeout duration.
    #[error("Timeout after {0}ms")]
    Timeout(u64),

    /// Descriptor construction, signing, encoding or response decoding fault.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The server answered with status >= 400.
    #[error(transparent)]
    Api(#[from] ClassifiedError),
}

impl RaukError {
    /// Wrap a `reqwest` failure as a transport error.
    pub(crate) fn transport(source: reqwest::Error) -> Self {
        RaukError::Transport {
            message: TRANSPORT_FAILURE_MESSAGE.to_owned(),
            source: Some(source),
        }
    }

    /// The classified server error, if this is one.
    pub fn classified(&self) -> Option<&ClassifiedError> {
        match self {
            RaukError::Api(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status of a server-reported failure.
    pub fn status_code(&self) -> Option<u16> {
        self.classified().and_then(ClassifiedError::status_code)
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == Some(ErrorKind::Validation)
    }

    pub fn is_authentication(&self) -> bool {
        self.kind() == Some(ErrorKind::Authentication)
    }

    /// True for transport failures, timeouts and 5xx responses.
    pub fn is_network(&self) -> bool {
        matches!(self, RaukError::Transport { .. } | RaukError::Timeout(_))
            || self.kind() == Some(ErrorKind::Network)
    }

    fn kind(&self) -> Option<ErrorKind> {
        self.classified().map(ClassifiedError::kind)
    }
}

/// Crate-level result alias using [`RaukError`].
pub type Result<T> = std::result::Result<T, RaukError>;
