//! Error bodies returned by OpenSearch with a non-success status.

use crate::builder::{push_all, require, MissingRequiredProperty, ObjectBuilder};
use crate::codec::{json_object, serialize_optional, ObjectDeserializer, SerializeFields};
use once_cell::sync::Lazy;
use serde::ser::SerializeMap;
use serde_json::Value;
use std::collections::BTreeMap;

/// Top-level error body: `{"error": {...}, "status": 404}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    error: ErrorCause,
    status: i32,
}

impl ErrorResponse {
    /// Create a new builder.
    pub fn builder() -> ErrorResponseBuilder {
        ErrorResponseBuilder::default()
    }

    /// The root error.
    pub fn error(&self) -> &ErrorCause {
        &self.error
    }

    /// HTTP status echoed in the body.
    pub fn status(&self) -> i32 {
        self.status
    }
}

impl SerializeFields for ErrorResponse {
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        map.serialize_entry("error", &self.error)?;
        map.serialize_entry("status", &self.status)?;
        Ok(())
    }
}

/// Builder for [`ErrorResponse`].
#[derive(Debug, Default)]
pub struct ErrorResponseBuilder {
    error: Option<ErrorCause>,
    status: Option<i32>,
}

impl ErrorResponseBuilder {
    /// Set the root error.
    pub fn error(mut self, error: ErrorCause) -> Self {
        self.error = Some(error);
        self
    }

    /// Set the status.
    pub fn status(mut self, status: i32) -> Self {
        self.status = Some(status);
        self
    }
}

impl ObjectBuilder for ErrorResponseBuilder {
    type Value = ErrorResponse;

    fn build(self) -> Result<ErrorResponse, MissingRequiredProperty> {
        Ok(ErrorResponse {
            error: require("ErrorResponse", "error", self.error)?,
            status: require("ErrorResponse", "status", self.status)?,
        })
    }
}

static ERROR_RESPONSE: Lazy<ObjectDeserializer<ErrorResponseBuilder>> = Lazy::new(|| {
    let mut op = ObjectDeserializer::<ErrorResponseBuilder>::new("ErrorResponse");
    op.add("error", |b, v: ErrorCause| b.error = Some(v));
    op.add("status", |b, v: i32| b.status = Some(v));
    op
});

json_object!(ErrorResponse, ERROR_RESPONSE);

/// Cause of a failure, possibly nested.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorCause {
    kind: String,
    reason: Option<String>,
    stack_trace: Option<String>,
    caused_by: Option<Box<ErrorCause>>,
    root_cause: Option<Vec<ErrorCause>>,
    suppressed: Option<Vec<ErrorCause>>,
    metadata: BTreeMap<String, Value>,
}

impl ErrorCause {
    /// Create a new builder.
    pub fn builder() -> ErrorCauseBuilder {
        ErrorCauseBuilder::default()
    }

    /// Error type, e.g. `index_not_found_exception` (wire name `type`).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Human-readable explanation.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Server-side stack trace, when requested.
    pub fn stack_trace(&self) -> Option<&str> {
        self.stack_trace.as_deref()
    }

    /// Underlying cause.
    pub fn caused_by(&self) -> Option<&ErrorCause> {
        self.caused_by.as_deref()
    }

    /// Root causes.
    pub fn root_cause(&self) -> &[ErrorCause] {
        self.root_cause.as_deref().unwrap_or_default()
    }

    /// Suppressed causes.
    pub fn suppressed(&self) -> &[ErrorCause] {
        self.suppressed.as_deref().unwrap_or_default()
    }

    /// Additional fields the server attached, e.g. `index` and `index_uuid`.
    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    /// A single additional field.
    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }
}

impl SerializeFields for ErrorCause {
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        map.serialize_entry("type", &self.kind)?;
        serialize_optional(map, "reason", self.reason.as_ref())?;
        serialize_optional(map, "stack_trace", self.stack_trace.as_ref())?;
        serialize_optional(map, "caused_by", self.caused_by.as_ref())?;
        serialize_optional(map, "root_cause", self.root_cause.as_ref())?;
        serialize_optional(map, "suppressed", self.suppressed.as_ref())?;
        for (key, value) in &self.metadata {
            map.serialize_entry(key, value)?;
        }
        Ok(())
    }
}

/// Builder for [`ErrorCause`].
#[derive(Debug, Default)]
pub struct ErrorCauseBuilder {
    kind: Option<String>,
    reason: Option<String>,
    stack_trace: Option<String>,
    caused_by: Option<Box<ErrorCause>>,
    root_cause: Option<Vec<ErrorCause>>,
    suppressed: Option<Vec<ErrorCause>>,
    metadata: BTreeMap<String, Value>,
}

impl ErrorCauseBuilder {
    /// Set the error type.
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the reason.
    pub fn reason(mut self, reason: impl Into<Option<String>>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Set the stack trace.
    pub fn stack_trace(mut self, stack_trace: impl Into<Option<String>>) -> Self {
        self.stack_trace = stack_trace.into();
        self
    }

    /// Set the underlying cause.
    pub fn caused_by(mut self, cause: impl Into<Option<ErrorCause>>) -> Self {
        self.caused_by = cause.into().map(Box::new);
        self
    }

    /// Add a root cause.
    pub fn root_cause(mut self, cause: ErrorCause) -> Self {
        push_all(&mut self.root_cause, [cause]);
        self
    }

    /// Add a suppressed cause.
    pub fn suppressed(mut self, cause: ErrorCause) -> Self {
        push_all(&mut self.suppressed, [cause]);
        self
    }

    /// Add an additional field.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Add several additional fields.
    pub fn metadata_entries<K: Into<String>>(
        mut self,
        entries: impl IntoIterator<Item = (K, Value)>,
    ) -> Self {
        self.metadata
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v)));
        self
    }
}

impl ObjectBuilder for ErrorCauseBuilder {
    type Value = ErrorCause;

    fn build(self) -> Result<ErrorCause, MissingRequiredProperty> {
        Ok(ErrorCause {
            kind: require("ErrorCause", "type", self.kind)?,
            reason: self.reason,
            stack_trace: self.stack_trace,
            caused_by: self.caused_by,
            root_cause: self.root_cause,
            suppressed: self.suppressed,
            metadata: self.metadata,
        })
    }
}

static ERROR_CAUSE: Lazy<ObjectDeserializer<ErrorCauseBuilder>> = Lazy::new(|| {
    let mut op = ObjectDeserializer::<ErrorCauseBuilder>::new("ErrorCause");
    op.add("type", |b, v: String| b.kind = Some(v));
    op.add("reason", |b, v: String| b.reason = Some(v));
    op.add("stack_trace", |b, v: String| b.stack_trace = Some(v));
    op.add("caused_by", |b, v: ErrorCause| b.caused_by = Some(Box::new(v)));
    op.add("root_cause", |b, v: Vec<ErrorCause>| b.root_cause = Some(v));
    op.add("suppressed", |b, v: Vec<ErrorCause>| b.suppressed = Some(v));
    op.add_additional(|b, key, value| {
        b.metadata.insert(key, value);
    });
    op
});

json_object!(ErrorCause, ERROR_CAUSE);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn not_found_body() -> serde_json::Value {
        json!({
            "error": {
                "root_cause": [{
                    "type": "index_not_found_exception",
                    "reason": "no such index [missing]",
                    "index": "missing",
                    "index_uuid": "_na_"
                }],
                "type": "index_not_found_exception",
                "reason": "no such index [missing]",
                "index": "missing"
            },
            "status": 404
        })
    }

    #[test]
    fn test_decode_not_found() {
        let response: ErrorResponse = serde_json::from_value(not_found_body()).unwrap();
        assert_eq!(response.status(), 404);
        assert_eq!(response.error().kind(), "index_not_found_exception");
        assert_eq!(response.error().reason(), Some("no such index [missing]"));
        assert_eq!(response.error().root_cause().len(), 1);
        assert!(response.error().caused_by().is_none());
        assert!(response.error().suppressed().is_empty());
    }

    #[test]
    fn test_unknown_fields_kept_as_metadata() {
        let response: ErrorResponse = serde_json::from_value(not_found_body()).unwrap();
        assert_eq!(
            response.error().metadata_value("index"),
            Some(&json!("missing"))
        );
        assert_eq!(
            response.error().root_cause()[0].metadata_value("index_uuid"),
            Some(&json!("_na_"))
        );
        assert_eq!(serde_json::to_value(&response).unwrap(), not_found_body());
    }

    #[test]
    fn test_metadata_serialized_after_declared_fields() {
        let cause = ErrorCause::builder()
            .kind("resource_not_found_exception")
            .metadata("resource.type", "index_template")
            .metadata_entries([("resource.id", json!("logs"))])
            .reason("missing".to_string())
            .build()
            .unwrap();

        assert_eq!(
            serde_json::to_string(&cause).unwrap(),
            r#"{"type":"resource_not_found_exception","reason":"missing","resource.id":"logs","resource.type":"index_template"}"#
        );
    }

    #[test]
    fn test_nested_cause_round_trip() {
        let cause = ErrorCause::builder()
            .kind("search_phase_execution_exception")
            .caused_by(
                ErrorCause::builder()
                    .kind("illegal_argument_exception")
                    .reason("bad field".to_string())
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let response = ErrorResponse::builder()
            .error(cause)
            .status(400)
            .build()
            .unwrap();

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "error": {
                    "type": "search_phase_execution_exception",
                    "caused_by": {"type": "illegal_argument_exception", "reason": "bad field"}
                },
                "status": 400
            })
        );
        let back: ErrorResponse = serde_json::from_value(value).unwrap();
        assert_eq!(back, response);
    }

    #[test]
    fn test_missing_type_rejected() {
        let err = serde_json::from_value::<ErrorResponse>(json!({
            "error": {"reason": "x"},
            "status": 500
        }))
        .unwrap_err();
        assert!(err.to_string().contains("ErrorCause.type"), "{err}");
    }

    #[test]
    fn test_missing_status_rejected() {
        let err = ErrorResponse::builder()
            .error(ErrorCause::builder().kind("x").build().unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err.property(), "status");
    }
}
