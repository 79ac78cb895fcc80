use std::fmt;

use crate::envelope::{ErrorBody, TRANSPORT_ORIGIN};

/// Something went wrong below the envelope: the request never reached the
/// backend, or what came back could not be read as an envelope.
///
/// These never leave [`RpcClient::call`][crate::RpcClient::call]. They are
/// turned into an [`ErrorBody`] so callers have a single failure path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportError {
    /// Could not connect to the endpoint.
    Connect(String),

    /// The transport gave up waiting.
    Timeout(String),

    /// A non-2xx status whose body was not an envelope.
    Status(u16, String),

    /// A reply body that is not a valid envelope.
    Decode(String),

    /// The request envelope could not be built or serialized.
    Encode(String),

    Other(String),
}

impl TransportError {
    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::Connect(_) => "connect",
            TransportError::Timeout(_) => "timeout",
            TransportError::Status(_, _) => "status",
            TransportError::Decode(_) => "decode",
            TransportError::Encode(_) => "encode",
            TransportError::Other(_) => "other",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status(code, _) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Connect(s) => write!(f, "backend unreachable: {s}"),
            TransportError::Timeout(s) => write!(f, "request timed out: {s}"),
            TransportError::Status(code, s) => write!(f, "unexpected status {code}: {s}"),
            TransportError::Decode(s) => write!(f, "malformed response: {s}"),
            TransportError::Encode(s) => write!(f, "could not build request: {s}"),
            TransportError::Other(s) => write!(f, "transport error: {s}"),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<TransportError> for ErrorBody {
    fn from(value: TransportError) -> Self {
        let body = ErrorBody::new(value.to_string())
            .with_detail("origin", TRANSPORT_ORIGIN)
            .with_detail("kind", value.kind());
        match value.status() {
            Some(code) => body.with_detail("status", code),
            None => body,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        let origin = match value.url() {
            Some(u) => u.origin().ascii_serialization(),
            None => "(unknown)".to_owned(),
        };
        if value.is_timeout() {
            TransportError::Timeout(format!("http timeout at {origin}"))
        } else if value.is_connect() {
            TransportError::Connect(format!("{origin}: {value}"))
        } else if value.is_decode() {
            TransportError::Decode(format!("{value}"))
        } else {
            TransportError::Other(format!("http error: {value}"))
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(value: serde_json::Error) -> Self {
        TransportError::Decode(format!("json error: {value}"))
    }
}

impl From<crate::error::Error> for TransportError {
    fn from(value: crate::error::Error) -> Self {
        TransportError::Encode(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn becomes_a_tagged_error_body() {
        let body: ErrorBody = TransportError::Status(502, "Bad Gateway".to_owned()).into();
        assert!(body.is_transport());
        assert!(!body.message.is_empty());
        assert_eq!(body.detail("kind"), Some(&json!("status")));
        assert_eq!(body.detail("status"), Some(&json!(502)));

        let body: ErrorBody = TransportError::Connect("refused".to_owned()).into();
        assert_eq!(body.detail("status"), None);
        assert_eq!(body.message, "backend unreachable: refused");
    }
}
