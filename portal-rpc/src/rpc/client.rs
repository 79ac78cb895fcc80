use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    config::ClientConfig,
    envelope::{RequestEnvelope, ResponseEnvelope},
    error::Result,
    operation::{Operation, OperationName},
    rpc::{HttpTransport, Transport, TransportError},
};

/// A client for calling operations on the portal backend.
///
/// Every call returns a [`ResponseEnvelope`], whether the failure came from
/// the backend or from the network. The client holds no session: the auth
/// token travels in each request envelope. It does not retry, cache or
/// reorder anything.
///
/// Cloning values of this type will result in clients that share the
/// underlying transport.
pub struct RpcClient<X = HttpTransport> {
    transport: Arc<X>,
}

impl<X> Clone for RpcClient<X> {
    fn clone(&self) -> Self {
        RpcClient {
            transport: self.transport.clone(),
        }
    }
}

impl RpcClient<HttpTransport> {
    pub fn new(cf: &ClientConfig) -> Result<RpcClient<HttpTransport>> {
        Ok(RpcClient::with_transport(HttpTransport::new(cf)?))
    }
}

impl<X: Transport> RpcClient<X> {
    pub fn with_transport(transport: X) -> RpcClient<X> {
        RpcClient {
            transport: Arc::new(transport),
        }
    }

    pub fn transport(&self) -> &X {
        &self.transport
    }

    /// Perform one remote operation.
    ///
    /// A reply that parses as an envelope is returned as-is, whatever its
    /// HTTP status. Anything else becomes a failure envelope whose error is
    /// tagged with `origin: "transport"`.
    pub async fn call<T, R>(
        &self,
        op: &OperationName,
        envelope: &RequestEnvelope<T>,
    ) -> ResponseEnvelope<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        match self.round_trip(op, envelope).await {
            Ok(res) => {
                if let ResponseEnvelope::Failure(e) = &res {
                    log::debug!("{op} rejected by backend: {e}");
                }
                res
            }
            Err(e) => {
                log::warn!("{op} failed: {e}");
                ResponseEnvelope::Failure(e.into())
            }
        }
    }

    /// Typed form of [`call`][RpcClient::call] for a known operation.
    pub async fn invoke<O: Operation>(
        &self,
        token: Option<&str>,
        body: Option<O::Body>,
    ) -> ResponseEnvelope<O::Data> {
        let op = match O::name() {
            Ok(op) => op,
            Err(e) => return ResponseEnvelope::Failure(TransportError::from(e).into()),
        };
        self.call(&op, &RequestEnvelope::new(token, body)).await
    }

    async fn round_trip<T, R>(
        &self,
        op: &OperationName,
        envelope: &RequestEnvelope<T>,
    ) -> std::result::Result<ResponseEnvelope<R>, TransportError>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let body = match serde_json::to_vec(envelope) {
            Ok(body) => body,
            Err(e) => return Err(TransportError::Encode(format!("{e}"))),
        };
        let reply = self.transport.send(op, body).await?;
        match serde_json::from_slice::<ResponseEnvelope<R>>(&reply.body) {
            Ok(res) => Ok(res),
            Err(e) if reply.is_success() => Err(TransportError::Decode(format!("{e}"))),
            Err(_) => Err(TransportError::Status(reply.status, snippet(&reply.body))),
        }
    }
}

/// The start of a body, for error messages.
fn snippet(body: &[u8]) -> String {
    const MAX: usize = 120;
    let s = String::from_utf8_lossy(body);
    let s = s.trim();
    if s.is_empty() {
        return "(empty body)".to_owned();
    }
    match s.char_indices().nth(MAX) {
        Some((i, _)) => format!("{}...", &s[..i]),
        None => s.to_owned(),
    }
}
