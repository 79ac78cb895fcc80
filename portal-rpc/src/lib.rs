//! Client for the exam portal's RPC backend.
//!
//! ```ignore
//! let client = RpcClient::new(&ClientConfig::new("http://localhost:3000/api/rpc"))?;
//! let res = client.invoke::<portal::ExamsList>(Some(token), None).await;
//! match res {
//!     ResponseEnvelope::Success(exams) => show(exams),
//!     ResponseEnvelope::Failure(e) => show_error(&e.message),
//! }
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod operation;
pub mod portal;
pub mod retry;
pub mod rpc;
pub mod sequence;

mod macros;

pub use config::{ClientConfig, PortalToml};
pub use envelope::{Auth, ErrorBody, RequestEnvelope, ResponseEnvelope};
pub use error::{Error, Result};
pub use operation::{Operation, OperationName};
pub use rpc::{HttpTransport, Reply, RpcClient, Transport, TransportError};
pub use sequence::{Sequencer, Ticket};
