//! Entry point of the library: a client exposing user and group modules.

use std::sync::Arc;

use scimsdk_api::transport::Transport;
use scimsdk_api::ClientOptions;

use crate::groups::GroupModule;
use crate::users::UserModule;

/// SCIM client working in terms of the public [`crate::types`].
///
/// Every operation validates its input first, so malformed bodies fail
/// without a network round trip.
#[derive(Clone)]
pub struct Client {
    inner: scimsdk_api::Client,
}

impl Client {
    /// Creates a client for `token`. `None` options target the production API.
    pub fn new(token: &str, options: Option<ClientOptions>) -> Self {
        Self {
            inner: scimsdk_api::Client::new(token, options.unwrap_or_default()),
        }
    }

    /// Creates a client that sends every request through `transport`.
    pub fn with_transport(
        token: &str,
        options: Option<ClientOptions>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            inner: scimsdk_api::Client::with_transport(
                token,
                options.unwrap_or_default(),
                transport,
            ),
        }
    }

    pub fn users(&self) -> UserModule {
        UserModule::new(self.inner.users())
    }

    pub fn groups(&self) -> GroupModule {
        GroupModule::new(self.inner.groups())
    }

    /// The underlying wire-level client.
    pub fn api(&self) -> &scimsdk_api::Client {
        &self.inner
    }
}
