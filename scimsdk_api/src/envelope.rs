//! Request envelopes: fully formed requests ready for a [`crate::transport::Transport`].

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use url::Url;

use crate::{query::PaginationCursor, Error};

/// Production API origin.
pub const DEFAULT_API_URL: &str = "https://app.strongdm.com/provisioning/generic/v2";

/// Picks the custom base URL when one is set and non-empty.
pub fn resolve_base_url(custom: Option<&str>) -> &str {
    match custom.map(str::trim) {
        Some(url) if !url.is_empty() => url,
        _ => DEFAULT_API_URL,
    }
}

/// Operation kind together with its operation-specific options.
#[derive(Debug, Clone)]
pub enum Operation<'a> {
    Create { body: String },
    List { cursor: &'a PaginationCursor },
    Find { id: &'a str },
    Replace { id: &'a str, body: String },
    Update { id: &'a str, body: String },
    Delete { id: &'a str },
}

impl Operation<'_> {
    pub fn method(&self) -> Method {
        match self {
            Operation::Create { .. } => Method::POST,
            Operation::List { .. } | Operation::Find { .. } => Method::GET,
            Operation::Replace { .. } => Method::PUT,
            Operation::Update { .. } => Method::PATCH,
            Operation::Delete { .. } => Method::DELETE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Create { .. } => "create",
            Operation::List { .. } => "list",
            Operation::Find { .. } => "find",
            Operation::Replace { .. } => "replace",
            Operation::Update { .. } => "update",
            Operation::Delete { .. } => "delete",
        }
    }

    fn id(&self) -> Option<&str> {
        match self {
            Operation::Find { id }
            | Operation::Replace { id, .. }
            | Operation::Update { id, .. }
            | Operation::Delete { id } => Some(id),
            Operation::Create { .. } | Operation::List { .. } => None,
        }
    }
}

/// Method, URL, headers and body of one request.
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl RequestEnvelope {
    /// Builds the request for `operation` against `{base_url}/{resource_path}`.
    ///
    /// The bearer header is set even when `token` is empty; authentication
    /// failures are left to the server.
    pub fn build(
        base_url: &str,
        resource_path: &str,
        token: &str,
        operation: Operation<'_>,
    ) -> Result<Self, Error> {
        let mut url = Url::parse(base_url).map_err(|e| {
            tracing::error!("Invalid API URL {}: {}", base_url, e);
            Error::validation("api_url", format!("invalid API URL {}: {}", base_url, e))
        })?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                Error::validation("api_url", format!("API URL {} cannot be a base", base_url))
            })?;
            segments.pop_if_empty().push(resource_path);
            if let Some(id) = operation.id() {
                segments.push(id);
            }
        }
        if let Operation::List { cursor } = &operation {
            url = cursor.add_to_url(&url);
        }

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| Error::validation("token", "token contains invalid header characters"))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let method = operation.method();
        let body = match operation {
            Operation::Create { body }
            | Operation::Replace { body, .. }
            | Operation::Update { body, .. } => Some(body),
            Operation::List { .. } | Operation::Find { .. } | Operation::Delete { .. } => None,
        };

        Ok(Self {
            method,
            url,
            headers,
            body,
        })
    }

    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
    }
}
