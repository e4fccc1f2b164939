//! Library layer for the SCIM provisioning API: public user and group types,
//! input validation, and per-resource modules.
//!
//! Wraps the wire-level `scimsdk_api` crate. Errors are re-exported from it
//! unchanged.

pub mod client;
pub mod groups;
pub mod types;
pub mod users;
pub mod validation;

pub use scimsdk_api;
pub use scimsdk_api::{
    CancellationToken, ClientOptions, Context, Error, ResourceIterator, TransportError,
    DEFAULT_API_URL,
};

pub use client::Client;
pub use groups::GroupModule;
pub use users::UserModule;
