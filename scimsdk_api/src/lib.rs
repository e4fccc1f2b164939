//! Wire-level client for SCIM provisioning endpoints (Users and Groups).
//!
//! Builds request envelopes, sends them through a swappable [`transport::Transport`],
//! classifies responses, and pages through listings with [`ResourceIterator`].

mod client;
mod context;
mod envelope;
mod errors;
mod iterator;
mod query;
mod service;
pub mod transport;
pub mod types;

pub use self::client::{classify, Client, ClientOptions, GROUPS_PATH, USERS_PATH};
pub use self::context::Context;
pub use self::envelope::{resolve_base_url, Operation, RequestEnvelope, DEFAULT_API_URL};
pub use self::errors::{Error, TransportError};
pub use self::iterator::{PageSource, ResourceIterator};
pub use self::query::{PaginationCursor, DEFAULT_OFFSET, DEFAULT_PAGE_SIZE};
pub use self::service::{ResourcePage, ResourceService};
pub use tokio_util::sync::CancellationToken;
