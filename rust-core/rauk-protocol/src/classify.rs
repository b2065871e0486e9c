// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Classification of server-reported failures.
//!
//! Any response with status >= 400 is turned into exactly one
//! [`ClassifiedError`]. The decision order is fixed, first match wins:
//!
//! 1. `error.errors` is a list: **validation** (regardless of status).
//! 2. status 401 or 403: **authentication**.
//! 3. status >= 500: **network** (a server-side fault; a transport failure
//!    never reaches this module).
//! 4. anything else: **api**.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::warn;

// ---------------------------------------------------------------------------
// Validation trees
// ---------------------------------------------------------------------------

/// One node of a validation-error tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    #[serde(default)]
    pub property: String,
    #[serde(default, deserialize_with = "constraint_messages")]
    pub constraints: Vec<String>,
    #[serde(default, deserialize_with = "lenient_children")]
    pub children: Vec<ValidationErrorDetail>,
}

impl ValidationErrorDetail {
    /// Constraint messages of this node and all descendants, depth-first,
    /// parent before children.
    pub fn all_messages(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_messages(&mut out);
        out
    }

    fn collect_messages(&self, out: &mut Vec<String>) {
        out.extend(self.constraints.iter().cloned());
        for child in &self.children {
            child.collect_messages(out);
        }
    }

    /// Every node in this subtree whose `property` equals `property`.
    pub fn errors_for_property<'a>(&'a self, property: &str) -> Vec<&'a ValidationErrorDetail> {
        let mut out = Vec::new();
        self.collect_property(property, &mut out);
        out
    }

    fn collect_property<'a>(&'a self, property: &str, out: &mut Vec<&'a ValidationErrorDetail>) {
        if self.property == property {
            out.push(self);
        }
        for child in &self.children {
            child.collect_property(property, out);
        }
    }
}

/// Constraints arrive either as a list of messages or as a
/// `{rule: message}` object; both flatten to messages in order.
fn constraint_messages<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    let items: Vec<Value> = match raw {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(Value::Object(map)) => map.into_iter().map(|(_, v)| v).collect(),
        Some(other) => {
            return Err(D::Error::custom(format!(
                "constraints must be a list or an object, got {other}"
            )))
        }
    };
    Ok(items
        .into_iter()
        .map(|v| match v {
            Value::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}

/// A malformed child is dropped on its own; its parent and siblings stay.
fn lenient_children<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<ValidationErrorDetail>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(entries)) => Ok(parse_validation_errors(&entries)),
        Some(other) => {
            warn!(children = %other, "Ignoring validation children that are not a list");
            Ok(Vec::new())
        }
    }
}

fn parse_validation_errors(entries: &[Value]) -> Vec<ValidationErrorDetail> {
    entries
        .iter()
        .filter_map(|entry| match ValidationErrorDetail::deserialize(entry) {
            Ok(detail) => Some(detail),
            Err(e) => {
                warn!(error = %e, "Skipping malformed validation error entry");
                None
            }
        })
        .collect()
}

fn flatten(errors: &[ValidationErrorDetail]) -> Vec<String> {
    errors.iter().flat_map(ValidationErrorDetail::all_messages).collect()
}

// ---------------------------------------------------------------------------
// Error payloads
// ---------------------------------------------------------------------------

/// The `{success, error}` envelope of a failed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Map<String, Value>,
}

impl ApiErrorResponse {
    fn from_body(body: &Value) -> Self {
        Self {
            success: body.get("success").and_then(Value::as_bool).unwrap_or(false),
            error: body
                .get("error")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
        }
    }
}

/// Fields shared by every classified error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    pub message: String,
    pub status_code: Option<u16>,
    pub request_id: Option<String>,
    /// Server-supplied time when available, else when the error was built.
    pub timestamp: DateTime<Utc>,
    /// Free-form diagnostics attached by the caller or transport.
    pub context: Option<Value>,
    /// The raw envelope, when the body had an `error` key.
    pub response: Option<ApiErrorResponse>,
}

impl ErrorDetails {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            request_id: None,
            timestamp: Utc::now(),
            context: None,
            response: None,
        }
    }
}

/// Which of the four classified categories an error falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Authentication,
    Network,
    Api,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Validation => "RaukValidationError",
            ErrorKind::Authentication => "RaukAuthenticationError",
            ErrorKind::Network => "RaukNetworkError",
            ErrorKind::Api => "RaukApiError",
        }
    }
}

/// A failure reported by the server.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifiedError {
    /// Request rejected by the service's validation rules.
    #[error("Validation error: {}", .details.message)]
    Validation {
        details: ErrorDetails,
        errors: Vec<ValidationErrorDetail>,
    },

    /// Credentials or signature rejected (401 / 403).
    #[error("Authentication error: {}", .0.message)]
    Authentication(ErrorDetails),

    /// The service failed while handling the request (5xx).
    #[error("Server error: {}", .0.message)]
    Network(ErrorDetails),

    /// Any other client-side HTTP failure.
    #[error("API error: {}", .0.message)]
    Api(ErrorDetails),
}

impl ClassifiedError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClassifiedError::Validation { .. } => ErrorKind::Validation,
            ClassifiedError::Authentication(_) => ErrorKind::Authentication,
            ClassifiedError::Network(_) => ErrorKind::Network,
            ClassifiedError::Api(_) => ErrorKind::Api,
        }
    }

    pub fn details(&self) -> &ErrorDetails {
        match self {
            ClassifiedError::Validation { details, .. }
            | ClassifiedError::Authentication(details)
            | ClassifiedError::Network(details)
            | ClassifiedError::Api(details) => details,
        }
    }

    fn details_mut(&mut self) -> &mut ErrorDetails {
        match self {
            ClassifiedError::Validation { details, .. }
            | ClassifiedError::Authentication(details)
            | ClassifiedError::Network(details)
            | ClassifiedError::Api(details) => details,
        }
    }

    /// The human-readable message without the category prefix.
    pub fn message(&self) -> &str {
        &self.details().message
    }

    pub fn status_code(&self) -> Option<u16> {
        self.details().status_code
    }

    pub fn request_id(&self) -> Option<&str> {
        self.details().request_id.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.details().timestamp
    }

    pub fn context(&self) -> Option<&Value> {
        self.details().context.as_ref()
    }

    pub fn response(&self) -> Option<&ApiErrorResponse> {
        self.details().response.as_ref()
    }

    /// Attach free-form diagnostics.
    pub fn with_context(mut self, context: Value) -> Self {
        self.details_mut().context = Some(context);
        self
    }

    /// Validation trees; empty for the other categories.
    pub fn validation_errors(&self) -> &[ValidationErrorDetail] {
        match self {
            ClassifiedError::Validation { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Every constraint message across all validation trees.
    pub fn all_messages(&self) -> Vec<String> {
        flatten(self.validation_errors())
    }

    /// Validation nodes, at any depth, for `property`.
    pub fn errors_for_property(&self, property: &str) -> Vec<&ValidationErrorDetail> {
        self.validation_errors()
            .iter()
            .flat_map(|e| e.errors_for_property(property))
            .collect()
    }

    /// Structured rendering for logs and diagnostics.
    pub fn to_json(&self) -> Value {
        let d = self.details();
        let mut out = json!({
            "name": self.kind().name(),
            "message": d.message,
            "statusCode": d.status_code,
            "requestId": d.request_id,
            "timestamp": d.timestamp.to_rfc3339(),
            "context": d.context,
            "originalError": d.response,
        });
        if let ClassifiedError::Validation { errors, .. } = self {
            out["validationErrors"] = json!(errors);
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Classify a failed response. `body` is the decoded response JSON, or
/// `Value::Null` when the body was not JSON.
pub fn classify(status: u16, body: &Value) -> ClassifiedError {
    let error = body.get("error");
    let field = |name: &str| error.and_then(|e| e.get(name));
    let server_message = field("message").and_then(Value::as_str).map(str::to_owned);

    let timestamp = field("timestamp")
        .and_then(Value::as_str)
        .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    let mut details = ErrorDetails {
        message: String::new(),
        status_code: Some(status),
        request_id: field("requestId").and_then(Value::as_str).map(str::to_owned),
        timestamp,
        context: None,
        response: error.map(|_| ApiErrorResponse::from_body(body)),
    };

    if let Some(entries) = field("errors").and_then(Value::as_array) {
        let errors = parse_validation_errors(entries);
        details.message = server_message.unwrap_or_else(|| flatten(&errors).join("; "));
        return ClassifiedError::Validation { details, errors };
    }

    match status {
        401 | 403 => {
            details.message = server_message.unwrap_or_else(|| "Authentication failed".to_owned());
            ClassifiedError::Authentication(details)
        }
        s if s >= 500 => {
            details.message = server_message.unwrap_or_else(|| "Server error occurred".to_owned());
            ClassifiedError::Network(details)
        }
        s => {
            details.message =
                server_message.unwrap_or_else(|| format!("API request failed with status {s}"));
            ClassifiedError::Api(details)
        }
    }
}
