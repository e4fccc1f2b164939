//! Lazy, pull-based iteration over an offset/page-size listing.
//!
//! [`ResourceIterator`] buffers one page at a time and only fetches when the
//! buffer is drained. The end of the listing is inferred from page fullness:
//! a page shorter than the requested size is the last one. When the total is
//! an exact multiple of the page size this costs one trailing request that
//! comes back empty.
//!
//! An iterator is owned by a single listing loop. `advance` takes
//! `&mut self`, and there is no internal locking; share results, not the
//! iterator.

use async_trait::async_trait;

use crate::{query::PaginationCursor, service::ResourcePage, Context, Error};

/// Anything that can fetch one page of `T` at a cursor.
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch_page(
        &self,
        ctx: &Context,
        cursor: &PaginationCursor,
    ) -> Result<ResourcePage<T>, Error>;
}

pub struct ResourceIterator<T> {
    source: Box<dyn PageSource<T>>,
    ctx: Context,
    cursor: PaginationCursor,
    buffer: Vec<T>,
    index: usize,
    has_more_pages: bool,
    last_error: Option<Error>,
    finished: bool,
}

impl<T> ResourceIterator<T> {
    /// Creates an iterator that has not fetched anything yet.
    ///
    /// Unset cursor fields are replaced by their defaults up front so that
    /// offset arithmetic starts from the effective offset.
    pub fn new(
        ctx: Context,
        cursor: PaginationCursor,
        source: impl PageSource<T> + 'static,
    ) -> Self {
        Self {
            source: Box::new(source),
            ctx,
            cursor: cursor.normalized(),
            buffer: Vec::new(),
            index: 0,
            has_more_pages: true,
            last_error: None,
            finished: false,
        }
    }

    /// Moves to the next resource, fetching a page when the buffer is drained.
    ///
    /// Returns `false` once the listing is exhausted or a fetch failed. From
    /// then on every call returns `false` without touching the network.
    pub async fn advance(&mut self) -> bool {
        if self.index + 1 < self.buffer.len() {
            self.index += 1;
            return true;
        }
        if !self.has_more_pages {
            self.finished = true;
            return false;
        }

        let next_offset = u32::try_from(self.buffer.len())
            .ok()
            .and_then(|consumed| self.cursor.offset.checked_add(consumed));
        let Some(next_offset) = next_offset else {
            self.fail(Error::validation(
                "offset",
                format!(
                    "the offset overflows past {} after {} results",
                    self.cursor.offset,
                    self.buffer.len()
                ),
            ));
            return false;
        };
        self.cursor.offset = next_offset;
        self.index = 0;
        match self.source.fetch_page(&self.ctx, &self.cursor).await {
            Ok(page) => {
                self.buffer = page.resources;
                self.has_more_pages = page.has_more_pages;
                self.last_error = None;
            }
            Err(err) => self.fail(err),
        }

        self.finished = self.buffer.is_empty();
        !self.finished
    }

    fn fail(&mut self, err: Error) {
        tracing::error!(
            "Failed to fetch page at startIndex {}: {}",
            self.cursor.offset,
            err
        );
        self.buffer.clear();
        self.has_more_pages = false;
        self.last_error = Some(err);
        self.finished = true;
    }

    /// The resource `advance` last moved to.
    pub fn current(&self) -> Option<&T> {
        if self.finished {
            return None;
        }
        self.buffer.get(self.index)
    }

    /// Outcome of the most recent fetch.
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<Error> {
        self.last_error.take()
    }

    /// True while no page is buffered: before the first fetch, or after a
    /// fetch that returned nothing.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn has_more_pages(&self) -> bool {
        self.has_more_pages
    }

    pub fn cursor(&self) -> &PaginationCursor {
        &self.cursor
    }
}

impl<T: Clone> ResourceIterator<T> {
    /// Drains the iterator into a vector, stopping at the first failed fetch.
    pub async fn try_collect(mut self) -> Result<Vec<T>, Error> {
        let mut items = Vec::new();
        while self.advance().await {
            if let Some(item) = self.current() {
                items.push(item.clone());
            }
        }
        match self.last_error.take() {
            Some(err) => Err(err),
            None => Ok(items),
        }
    }
}
