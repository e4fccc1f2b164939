//! Per-resource CRUD and single-page listing.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    envelope::Operation,
    iterator::PageSource,
    query::PaginationCursor,
    types::{ListResponse, PatchRequest},
    Client, Context, Error,
};

/// One fetched page plus the lookahead verdict on whether another exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourcePage<T> {
    pub resources: Vec<T>,
    pub has_more_pages: bool,
}

impl<T> ResourcePage<T> {
    /// Applies the lookahead rule: a page that fills the requested size is
    /// assumed to have a successor, even when the true count is an exact
    /// multiple of the page size.
    pub fn from_resources(resources: Vec<T>, page_size: u32) -> Self {
        let has_more_pages = resources.len() >= page_size as usize;
        Self {
            resources,
            has_more_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ResourcePage<U> {
        ResourcePage {
            resources: self.resources.into_iter().map(f).collect(),
            has_more_pages: self.has_more_pages,
        }
    }
}

/// Orchestrates the six SCIM operations against one resource collection.
///
/// `R` is the wire resource type the collection returns.
pub struct ResourceService<R> {
    client: Client,
    path: &'static str,
    resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            path: self.path,
            resource: PhantomData,
        }
    }
}

impl<R> ResourceService<R>
where
    R: DeserializeOwned,
{
    pub(crate) fn new(client: Client, path: &'static str) -> Self {
        Self {
            client,
            path,
            resource: PhantomData,
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub async fn create<B>(&self, ctx: &Context, body: &B) -> Result<R, Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        let body = serde_json::to_string(body)?;
        let resp = self
            .client
            .send(ctx, self.path, Operation::Create { body })
            .await?;
        decode(&resp)
    }

    /// Fetches one page at `cursor`.
    pub async fn list_page(
        &self,
        ctx: &Context,
        cursor: &PaginationCursor,
    ) -> Result<ResourcePage<R>, Error> {
        let resp = self
            .client
            .send(ctx, self.path, Operation::List { cursor })
            .await?;
        let page: ListResponse<R> = decode(&resp)?;
        tracing::debug!(
            "Fetched {} {} at startIndex {} (totalResults {})",
            page.resources.len(),
            self.path,
            cursor.effective_offset(),
            page.total_results
        );
        Ok(ResourcePage::from_resources(
            page.resources,
            cursor.effective_page_size(),
        ))
    }

    pub async fn find(&self, ctx: &Context, id: &str) -> Result<R, Error> {
        require_id(id)?;
        let resp = self.client.send(ctx, self.path, Operation::Find { id }).await?;
        decode(&resp)
    }

    pub async fn replace<B>(&self, ctx: &Context, id: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        require_id(id)?;
        let body = serde_json::to_string(body)?;
        let resp = self
            .client
            .send(ctx, self.path, Operation::Replace { id, body })
            .await?;
        decode(&resp)
    }

    /// Applies a PATCH. `Ok(true)` means the server accepted it.
    pub async fn update(&self, ctx: &Context, id: &str, patch: &PatchRequest) -> Result<bool, Error> {
        require_id(id)?;
        let body = serde_json::to_string(patch)?;
        self.client
            .send(ctx, self.path, Operation::Update { id, body })
            .await?;
        Ok(true)
    }

    pub async fn delete(&self, ctx: &Context, id: &str) -> Result<bool, Error> {
        require_id(id)?;
        self.client
            .send(ctx, self.path, Operation::Delete { id })
            .await?;
        Ok(true)
    }
}

#[async_trait]
impl<R> PageSource<R> for ResourceService<R>
where
    R: DeserializeOwned + Send,
{
    async fn fetch_page(
        &self,
        ctx: &Context,
        cursor: &PaginationCursor,
    ) -> Result<ResourcePage<R>, Error> {
        self.list_page(ctx, cursor).await
    }
}

fn require_id(id: &str) -> Result<(), Error> {
    if id.trim().is_empty() {
        return Err(Error::validation("id", "you must pass the resource id"));
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!(
            "Failed to parse resource: {} | body: {}",
            e,
            crate::client::truncate_body(body)
        );
        Error::Decode(e)
    })
}
