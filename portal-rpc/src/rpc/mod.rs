//! Calling backend operations.
//!
//! [`RpcClient`] is the entry point. It hands serialized envelopes to a
//! [`Transport`] (normally [`HttpTransport`]) and folds every transport
//! problem into a failure envelope.

mod client;
mod error;
mod http;
mod transport;

pub use client::RpcClient;
pub use error::TransportError;
pub use http::HttpTransport;
pub use transport::{Reply, Transport};
