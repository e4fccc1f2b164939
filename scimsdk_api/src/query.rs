//! Pagination cursor for list requests: offset, page size and filter.

use url::Url;

/// Page size used when the cursor does not carry a positive one.
pub const DEFAULT_PAGE_SIZE: u32 = 5;
/// 1-based offset used when the cursor does not carry a positive one.
pub const DEFAULT_OFFSET: u32 = 1;

/// Offset/page-size/filter state driving the next list request.
///
/// A value of `0` for `page_size` or `offset` means "not set"; the
/// effective defaults are applied when the cursor is written to a URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaginationCursor {
    /// Results per page (`count`).
    pub page_size: u32,
    /// 1-based index of the first result (`startIndex`).
    pub offset: u32,
    /// SCIM filter expression, e.g. `userName eq "alice"`.
    pub filter: Option<String>,
}

impl PaginationCursor {
    /// A cursor with the defaults already resolved.
    pub fn new() -> Self {
        Self::default().normalized()
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_filter(mut self, filter: &str) -> Self {
        self.filter = Some(filter.to_string());
        self
    }

    pub fn effective_page_size(&self) -> u32 {
        if self.page_size > 0 {
            self.page_size
        } else {
            DEFAULT_PAGE_SIZE
        }
    }

    pub fn effective_offset(&self) -> u32 {
        if self.offset > 0 {
            self.offset
        } else {
            DEFAULT_OFFSET
        }
    }

    /// Replaces unset fields with their defaults.
    pub fn normalized(mut self) -> Self {
        self.page_size = self.effective_page_size();
        self.offset = self.effective_offset();
        self
    }

    /// Appends `startIndex`, `count` and the optional `filter` to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("startIndex", &self.effective_offset().to_string());
        url.query_pairs_mut()
            .append_pair("count", &self.effective_page_size().to_string());
        if let Some(filter) = self.filter.as_deref().filter(|f| !f.is_empty()) {
            url.query_pairs_mut().append_pair("filter", filter);
        };
        url
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::PaginationCursor;

    #[test]
    fn test_cursor_defaults() {
        let url = Url::parse("https://example.com/Users").unwrap();

        insta::assert_snapshot!(
            PaginationCursor::default().add_to_url(&url).to_string(),
            @"https://example.com/Users?startIndex=1&count=5"
        );
    }

    #[test]
    fn test_cursor_with_filter() {
        let url = Url::parse("https://example.com/Users").unwrap();

        insta::assert_snapshot!(
            PaginationCursor::default()
                .with_page_size(10)
                .with_offset(21)
                .with_filter("userName eq \"alice\"")
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/Users?startIndex=21&count=10&filter=userName+eq+%22alice%22"
        );
    }

    #[test]
    fn empty_filter_is_omitted() {
        let url = Url::parse("https://example.com/Groups").unwrap();
        let url = PaginationCursor::new().with_filter("").add_to_url(&url);
        assert_eq!(url.query(), Some("startIndex=1&count=5"));
    }

    #[test]
    fn normalized_fills_defaults() {
        let cursor = PaginationCursor::default().with_page_size(3).normalized();
        assert_eq!(cursor.page_size, 3);
        assert_eq!(cursor.offset, 1);
    }
}
