//! Request and response envelopes.
//!
//! On the wire a request looks like
//!
//! ```json
//! { "req": { "auth": { "token": "abc" }, "body": { "id": 4 } } }
//! ```
//!
//! and a response is either `{ "success": true, "data": ... }` or
//! `{ "success": false, "error": { "message": "...", ... } }`.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{DeserializeOwned, Error as _},
    ser::SerializeStruct,
};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope<T> {
    pub req: Request<T>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Request<T> {
    pub auth: Auth,
    pub body: Option<T>,
}

/// Always serialized with a `token` key, `null` when unauthenticated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auth {
    pub token: Option<String>,
}

impl<T> RequestEnvelope<T> {
    pub fn new(token: Option<&str>, body: Option<T>) -> RequestEnvelope<T> {
        RequestEnvelope {
            req: Request {
                auth: Auth {
                    token: token.map(str::to_owned),
                },
                body,
            },
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.req.auth.token.as_deref()
    }

    pub fn body(&self) -> Option<&T> {
        self.req.body.as_ref()
    }
}

/// The `error` object of a failed call.
///
/// Fields other than `message` are kept as-is in `details`, so a failure
/// produced by the backend reaches the caller exactly as it was sent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Marks an [`ErrorBody`] that the client made up itself.
pub const TRANSPORT_ORIGIN: &str = "transport";

impl ErrorBody {
    pub fn new<S: Into<String>>(message: S) -> ErrorBody {
        ErrorBody {
            message: message.into(),
            details: Map::new(),
        }
    }

    pub fn with_detail<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> ErrorBody {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }

    /// True when the failure never reached the backend's business logic:
    /// unreachable host, timeout, garbage reply and so on.
    pub fn is_transport(&self) -> bool {
        self.detail("origin").and_then(Value::as_str) == Some(TRANSPORT_ORIGIN)
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The result of a call. Exactly one of `data` or `error` exists, which the
/// enum makes impossible to get wrong.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseEnvelope<R> {
    Success(R),
    Failure(ErrorBody),
}

impl<R> ResponseEnvelope<R> {
    pub fn is_success(&self) -> bool {
        matches!(self, ResponseEnvelope::Success(_))
    }

    pub fn data(&self) -> Option<&R> {
        match self {
            ResponseEnvelope::Success(x) => Some(x),
            ResponseEnvelope::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorBody> {
        match self {
            ResponseEnvelope::Success(_) => None,
            ResponseEnvelope::Failure(e) => Some(e),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error().map(|e| e.message.as_str())
    }

    pub fn map<S, F: FnOnce(R) -> S>(self, f: F) -> ResponseEnvelope<S> {
        match self {
            ResponseEnvelope::Success(x) => ResponseEnvelope::Success(f(x)),
            ResponseEnvelope::Failure(e) => ResponseEnvelope::Failure(e),
        }
    }

    pub fn into_result(self) -> Result<R, ErrorBody> {
        self.into()
    }
}

impl<R> From<ResponseEnvelope<R>> for Result<R, ErrorBody> {
    fn from(value: ResponseEnvelope<R>) -> Self {
        match value {
            ResponseEnvelope::Success(x) => Ok(x),
            ResponseEnvelope::Failure(e) => Err(e),
        }
    }
}

impl<R> From<Result<R, ErrorBody>> for ResponseEnvelope<R> {
    fn from(value: Result<R, ErrorBody>) -> Self {
        match value {
            Ok(x) => ResponseEnvelope::Success(x),
            Err(e) => ResponseEnvelope::Failure(e),
        }
    }
}

impl<R: Serialize> Serialize for ResponseEnvelope<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("ResponseEnvelope", 2)?;
        match self {
            ResponseEnvelope::Success(x) => {
                st.serialize_field("success", &true)?;
                st.serialize_field("data", x)?;
            }
            ResponseEnvelope::Failure(e) => {
                st.serialize_field("success", &false)?;
                st.serialize_field("error", e)?;
            }
        }
        st.end()
    }
}

#[derive(Deserialize)]
struct RawResponse {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

impl<'de, R: DeserializeOwned> Deserialize<'de> for ResponseEnvelope<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawResponse::deserialize(deserializer)?;
        if raw.success {
            let data = raw.data.unwrap_or(Value::Null);
            let data = serde_json::from_value(data).map_err(D::Error::custom)?;
            Ok(ResponseEnvelope::Success(data))
        } else {
            match raw.error {
                Some(e) => Ok(ResponseEnvelope::Failure(e)),
                None => Err(D::Error::missing_field("error")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn token_key_is_always_present() {
        let q: RequestEnvelope<()> = RequestEnvelope::new(None, None);
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({ "req": { "auth": { "token": null }, "body": null } })
        );

        let q = RequestEnvelope::new(Some("abc"), Some(json!({ "id": 3 })));
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({ "req": { "auth": { "token": "abc" }, "body": { "id": 3 } } })
        );
        assert_eq!(q.token(), Some("abc"));
    }

    #[test]
    fn success_branch() {
        let raw = json!({ "success": true, "data": [{ "id": 1, "title": "Midterm" }] });
        let res: ResponseEnvelope<Value> = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(
            res,
            ResponseEnvelope::Success(json!([{ "id": 1, "title": "Midterm" }]))
        );
        assert_eq!(serde_json::to_value(&res).unwrap(), raw);
    }

    #[test]
    fn success_with_null_data() {
        let res: ResponseEnvelope<()> =
            serde_json::from_value(json!({ "success": true, "data": null })).unwrap();
        assert!(res.is_success());

        let res: ResponseEnvelope<Option<u32>> =
            serde_json::from_value(json!({ "success": true })).unwrap();
        assert_eq!(res, ResponseEnvelope::Success(None));
    }

    #[test]
    fn failure_keeps_extra_fields() {
        let raw = json!({
            "success": false,
            "error": { "message": "unauthorized", "code": 401, "hint": "log in again" }
        });
        let res: ResponseEnvelope<Value> = serde_json::from_value(raw.clone()).unwrap();
        let err = res.error().unwrap();
        assert_eq!(err.message, "unauthorized");
        assert_eq!(err.detail("code"), Some(&json!(401)));
        assert!(!err.is_transport());
        assert_eq!(serde_json::to_value(&res).unwrap(), raw);
    }

    #[test]
    fn failure_without_error_is_rejected() {
        let res = serde_json::from_value::<ResponseEnvelope<Value>>(json!({ "success": false }));
        assert!(res.is_err());
    }

    #[test]
    fn mismatched_data_is_rejected() {
        let res =
            serde_json::from_value::<ResponseEnvelope<u32>>(json!({ "success": true, "data": "x" }));
        assert!(res.is_err());
    }

    #[test]
    fn conversions() {
        let ok: ResponseEnvelope<u32> = ResponseEnvelope::Success(2);
        assert_eq!(ok.clone().map(|x| x * 2).into_result(), Ok(4));

        let failed: ResponseEnvelope<u32> = Err(ErrorBody::new("nope")).into();
        assert_eq!(failed.error_message(), Some("nope"));
        assert_eq!(failed.data(), None);
    }
}
