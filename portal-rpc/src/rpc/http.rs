use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::{Url, header::CONTENT_TYPE};

use crate::{
    config::ClientConfig,
    error::{Error, Result},
    operation::OperationName,
    rpc::{Reply, Transport, TransportError},
};

/// Sends envelopes as `POST {endpoint}/{operation}` JSON requests.
///
/// Cloning shares the connection pool.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
    timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new(cf: &ClientConfig) -> Result<HttpTransport> {
        let client = reqwest::Client::builder().build()?;
        HttpTransport::with_client(client, cf)
    }

    pub fn with_client(client: reqwest::Client, cf: &ClientConfig) -> Result<HttpTransport> {
        let endpoint = match Url::parse(&cf.endpoint) {
            Ok(u) => u,
            Err(e) => return Err(Error::Config(format!("bad endpoint {}: {e}", cf.endpoint))),
        };
        if endpoint.cannot_be_a_base() {
            return Err(Error::Config(format!("bad endpoint {}: not a base url", cf.endpoint)));
        }
        log::debug!("rpc endpoint is {endpoint}");
        Ok(HttpTransport {
            client,
            endpoint,
            timeout: cf.timeout(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The operation name becomes one path segment, percent-encoded if
    /// needed. `.` and `..` would be swallowed by URL normalization, so
    /// they cannot be addressed over HTTP.
    pub fn url_for(&self, op: &OperationName) -> std::result::Result<Url, TransportError> {
        if matches!(op.as_str(), "." | "..") {
            return Err(TransportError::Other(format!(
                "operation {op:?} cannot be used as a path segment"
            )));
        }
        let mut url = self.endpoint.clone();
        match url.path_segments_mut() {
            Ok(mut segs) => {
                segs.pop_if_empty().push(op.as_str());
            }
            Err(()) => {
                return Err(TransportError::Other(format!(
                    "endpoint {} cannot take a path",
                    self.endpoint
                )));
            }
        }
        Ok(url)
    }
}

impl Transport for HttpTransport {
    fn send<'t, 'o, 'f>(
        &'t self,
        op: &'o OperationName,
        body: Vec<u8>,
    ) -> BoxFuture<'f, std::result::Result<Reply, TransportError>>
    where
        't: 'f,
        'o: 'f,
    {
        Box::pin(async move {
            let url = self.url_for(op)?;
            log::debug!("outgoing RPC: {} -> {}", op, url);
            let mut req = self
                .client
                .post(url)
                .header(CONTENT_TYPE, "application/json")
                .body(body);
            if let Some(t) = self.timeout {
                req = req.timeout(t);
            }
            let resp = req.send().await?;
            let status = resp.status().as_u16();
            let body = resp.bytes().await?;
            Ok(Reply::new(status, body.to_vec()))
        })
    }
}
