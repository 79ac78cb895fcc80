use futures::future::BoxFuture;

use crate::{operation::OperationName, rpc::TransportError};

/// A raw reply from the transport: status code and unparsed body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn new<B: Into<Vec<u8>>>(status: u16, body: B) -> Reply {
        Reply {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves a serialized request envelope to the backend and brings back
/// whatever the backend answered.
///
/// Implementations do not look at the envelope. Interpreting the reply is
/// [`RpcClient`][crate::RpcClient]'s job.
pub trait Transport: Send + Sync + 'static {
    fn send<'t, 'o, 'f>(
        &'t self,
        op: &'o OperationName,
        body: Vec<u8>,
    ) -> BoxFuture<'f, Result<Reply, TransportError>>
    where
        't: 'f,
        'o: 'f;
}
