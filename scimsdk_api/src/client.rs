//! HTTP client for SCIM provisioning endpoints.

use std::sync::Arc;

use crate::{
    envelope::{resolve_base_url, Operation, RequestEnvelope},
    service::ResourceService,
    transport::{execute_in_context, RawResponse, ReqwestTransport, Transport},
    types::{ErrorBody, GroupResource, UserResource},
    Context, Error,
};

/// Path segment of the user collection.
pub const USERS_PATH: &str = "Users";
/// Path segment of the group collection.
pub const GROUPS_PATH: &str = "Groups";

/// Client configuration.
#[derive(Clone, Debug, Default)]
pub struct ClientOptions {
    /// Overrides the production API origin when set and non-empty.
    pub api_url: Option<String>,
}

impl ClientOptions {
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = Some(api_url.to_string());
        self
    }
}

/// Authenticated client for the SCIM API.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct Client {
    token: String,
    api_url: Option<String>,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Creates a client using the default `reqwest` transport.
    ///
    /// The token is trimmed of surrounding whitespace and otherwise used as is.
    pub fn new(token: &str, options: ClientOptions) -> Self {
        Self::with_transport(token, options, Arc::new(ReqwestTransport::default()))
    }

    /// Creates a client pointed at a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(token: &str, base_url: &str) -> Self {
        Self::new(token, ClientOptions::default().with_api_url(base_url))
    }

    /// Creates a client that sends every request through `transport`.
    pub fn with_transport(
        token: &str,
        options: ClientOptions,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            token: token.trim().to_string(),
            api_url: options.api_url,
            transport,
        }
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        resolve_base_url(self.api_url.as_deref())
    }

    pub fn users(&self) -> ResourceService<UserResource> {
        ResourceService::new(self.clone(), USERS_PATH)
    }

    pub fn groups(&self) -> ResourceService<GroupResource> {
        ResourceService::new(self.clone(), GROUPS_PATH)
    }

    /// Builds, sends and classifies one request, returning the success body.
    pub(crate) async fn send(
        &self,
        ctx: &Context,
        resource_path: &str,
        operation: Operation<'_>,
    ) -> Result<String, Error> {
        let name = operation.name();
        let envelope = RequestEnvelope::build(self.base_url(), resource_path, &self.token, operation)?;
        tracing::debug!("{} {} ({} {})", envelope.method, envelope.url, name, resource_path);

        let resp = execute_in_context(ctx, self.transport.as_ref(), envelope)
            .await
            .map_err(|e| {
                tracing::error!("Failed to {} {}: {}", name, resource_path, e);
                e
            })?;
        classify(resp)
    }
}

/// Passes bodies of statuses below 400 through and turns the rest into
/// [`Error::Api`], using the body's `detail` when it parses.
pub fn classify(resp: RawResponse) -> Result<String, Error> {
    if resp.status < 400 {
        return Ok(resp.body);
    }
    let detail = match serde_json::from_str::<ErrorBody>(&resp.body) {
        Ok(body) => body.detail,
        Err(e) => e.to_string(),
    };
    tracing::error!(
        "Request failed with status {}: {}",
        resp.status,
        truncate_body(&resp.body)
    );
    Err(Error::Api {
        status: resp.status,
        detail,
    })
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
