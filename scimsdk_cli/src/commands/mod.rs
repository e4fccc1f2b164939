//! CLI subcommand implementations.

pub mod groups;
pub mod users;

use anyhow::Result;
use clap::Args;
use scimsdk_lib::types::PaginationOptions;
use scimsdk_lib::ResourceIterator;

/// Listing flags shared by `users list` and `groups list`.
#[derive(Args)]
pub struct ListArgs {
    /// Results fetched per request
    #[arg(long, default_value = "5")]
    pub page_size: i64,

    /// 1-based index of the first result
    #[arg(long, default_value = "1")]
    pub offset: i64,

    /// SCIM filter expression, e.g. 'userName eq "alice@example.com"'
    #[arg(long)]
    pub filter: Option<String>,

    /// Stop after this many results
    #[arg(long)]
    pub limit: Option<usize>,
}

impl ListArgs {
    pub fn options(&self) -> PaginationOptions {
        let mut options = PaginationOptions::default()
            .with_page_size(self.page_size)
            .with_offset(self.offset);
        if let Some(filter) = &self.filter {
            options = options.with_filter(filter);
        }
        options
    }
}

/// Pulls up to `limit` items out of the iterator, failing on a fetch error.
pub async fn collect<T: Clone>(
    mut it: ResourceIterator<T>,
    limit: Option<usize>,
) -> Result<Vec<T>> {
    let mut items = Vec::new();
    while limit.map_or(true, |limit| items.len() < limit) && it.advance().await {
        if let Some(item) = it.current() {
            items.push(item.clone());
        }
    }
    if let Some(err) = it.take_error() {
        return Err(err.into());
    }
    Ok(items)
}
