//! Error types for OpenSearch API operations.

use crate::builder::MissingRequiredProperty;
use crate::types::ErrorResponse;
use thiserror::Error;

/// OpenSearch API error type.
#[derive(Error, Debug)]
pub enum OpenSearchError {
    /// A required property was not set when building a value object.
    #[error(transparent)]
    MissingRequiredProperty(#[from] MissingRequiredProperty),

    /// No path template matched the path fields present on the request.
    ///
    /// This signals a defect in an endpoint definition or a request that
    /// cannot be expressed as a URL; it is never retried.
    #[error("No path template found for endpoint '{endpoint}'")]
    NoPathTemplateFound {
        /// Endpoint identifier, e.g. `indices.get_settings`.
        endpoint: &'static str,
    },

    /// A JSON body could not be decoded into the target type.
    #[error("Failed to decode {type_name}: {source}")]
    Decode {
        /// Rust type the body was decoded into.
        type_name: &'static str,
        /// Underlying parse error (names field and expected type).
        source: serde_json::Error,
    },

    /// A request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The server answered with an error status and a decodable error body.
    #[error("Request failed with status {status}: [{}] {}", .response.error().kind(), .response.error().reason().unwrap_or("no reason"))]
    Api {
        /// HTTP status code.
        status: u16,
        /// Decoded error body.
        response: ErrorResponse,
    },

    /// Transport-level failure or an unusable response.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the failure.
        message: String,
        /// HTTP status, when a response was received.
        status: Option<u16>,
        /// Error that made the response unusable.
        #[source]
        source: Option<Box<OpenSearchError>>,
    },

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client error from the opensearch crate.
    #[error("Client error: {0}")]
    Client(#[from] opensearch::Error),
}

impl OpenSearchError {
    /// Create a path template failure for the given endpoint.
    pub fn no_path_template(endpoint: &'static str) -> Self {
        Self::NoPathTemplateFound { endpoint }
    }

    /// Create a decode failure for type `T`.
    pub fn decode<T>(source: serde_json::Error) -> Self {
        Self::Decode {
            type_name: short_type_name::<T>(),
            source,
        }
    }

    /// Create a transport failure.
    pub fn transport(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Transport {
            message: message.into(),
            status,
            source: None,
        }
    }

    /// Create a transport failure caused by another error.
    pub fn transport_caused_by(
        message: impl Into<String>,
        status: Option<u16>,
        source: OpenSearchError,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            status,
            source: Some(Box::new(source)),
        }
    }

    /// Whether this is a missing required property, raised either by a
    /// builder or while decoding a body.
    pub fn is_missing_property(&self) -> bool {
        matches!(self, Self::MissingRequiredProperty(_))
    }

    /// Whether the error indicates a defect rather than a runtime condition.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NoPathTemplateFound { .. })
    }

    /// HTTP status code of the failed request, if one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport { status, .. } => *status,
            Self::Client(e) => e.status_code().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The decoded error body, for [`OpenSearchError::Api`].
    pub fn error_response(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Api { response, .. } => Some(response),
            _ => None,
        }
    }
}

/// Last path segment of a type name (`CloneIndexResponse` rather than the
/// fully qualified path).
pub(crate) fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Type name with module paths stripped from every component, keeping
/// generic arguments (`Vec<DataStreamInfo>`).
pub(crate) fn readable_type_name<T: ?Sized>() -> String {
    trim_type_paths(std::any::type_name::<T>())
}

fn trim_type_paths(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut token = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            token.push(c);
            continue;
        }
        out.push_str(token.rsplit("::").next().unwrap_or_default());
        token.clear();
        out.push(c);
    }
    out.push_str(token.rsplit("::").next().unwrap_or_default());
    out
}

/// Result type alias for OpenSearch API operations.
pub type Result<T> = std::result::Result<T, OpenSearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<String>(), "String");
        assert_eq!(short_type_name::<Vec<u8>>(), "Vec");
        assert_eq!(short_type_name::<u16>(), "u16");
    }

    #[test]
    fn test_readable_type_name_keeps_generics() {
        assert_eq!(readable_type_name::<bool>(), "bool");
        assert_eq!(readable_type_name::<Vec<String>>(), "Vec<String>");
        assert_eq!(
            readable_type_name::<std::collections::BTreeMap<String, Option<serde_json::Value>>>(),
            "BTreeMap<String, Option<Value>>"
        );
        assert_eq!(
            readable_type_name::<Vec<crate::indices::DataStreamInfo>>(),
            "Vec<DataStreamInfo>"
        );
    }

    #[test]
    fn test_transport_keeps_cause() {
        let cause = OpenSearchError::Config("bad".into());
        let err = OpenSearchError::transport_caused_by("unusable response", Some(400), cause);
        assert_eq!(err.status_code(), Some(400));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "Configuration error: bad");
    }

    #[test]
    fn test_path_template_error_is_fatal() {
        let err = OpenSearchError::no_path_template("indices.get_settings");
        assert!(err.is_fatal());
        assert_eq!(
            err.to_string(),
            "No path template found for endpoint 'indices.get_settings'"
        );
    }

    #[test]
    fn test_missing_property_converts() {
        let err: OpenSearchError = MissingRequiredProperty::new("CloneIndexRequest", "target").into();
        assert!(!err.is_fatal());
        assert_eq!(
            err.to_string(),
            "Missing required property 'CloneIndexRequest.target'"
        );
    }

    #[test]
    fn test_transport_status_code() {
        let err = OpenSearchError::transport("no body", Some(502));
        assert_eq!(err.status_code(), Some(502));
        assert!(err.error_response().is_none());
    }
}
