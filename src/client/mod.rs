//! Remote list client
//!
//! Fetches server-paginated pages from a list endpoint. Callers keep a
//! 1-based page; the endpoint takes a 0-based one, so `page - 1` is sent.
//! The bearer token comes from the [`TokenSource`] inside the explicit
//! [`ApiContext`], never from shared global state.

use crate::core::error::RemoteError;
use crate::core::{
    Column, FetchSequencer, LabdeskError, LatestSlot, ListQuery, PageCursor, PageResponse, Record,
    SortDirection, TokenSource,
};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;

/// Everything an API call needs: where to go, how, and with which token
#[derive(Clone)]
pub struct ApiContext {
    pub base_url: String,
    pub http: reqwest::Client,
    pub tokens: Arc<dyn TokenSource>,
}

impl ApiContext {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            tokens,
        }
    }

    /// URL of a collection's list endpoint
    pub fn collection_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }
}

/// One list request as the caller sees it
#[derive(Debug, Clone, PartialEq)]
pub struct ListRequest {
    pub cursor: PageCursor,
    pub query: ListQuery,
    pub category: Option<String>,
}

impl ListRequest {
    /// First page of the unfiltered list
    pub fn new(size: usize) -> Self {
        Self {
            cursor: PageCursor::new(size),
            query: ListQuery::default(),
            category: None,
        }
    }

    /// Query-string pairs sent to the endpoint
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.cursor.page().saturating_sub(1).to_string()),
            ("size", self.cursor.size().to_string()),
            ("q", self.query.text.clone()),
            ("column", self.query.column.as_str().to_string()),
            ("order", self.query.direction.as_str().to_string()),
        ];
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        pairs
    }
}

/// Fetches list pages from a remote endpoint
pub struct ListClient;

impl ListClient {
    /// Fetch one page of `T`'s collection
    pub async fn fetch_page<T>(
        ctx: &ApiContext,
        request: &ListRequest,
    ) -> Result<PageResponse<T>, LabdeskError>
    where
        T: Record + DeserializeOwned,
    {
        let url = ctx.collection_url(T::resource_name());

        let token = ctx
            .tokens
            .bearer_token()
            .await
            .map_err(|e| RemoteError::Token {
                message: e.to_string(),
            })?;

        let mut builder = ctx.http.get(&url).query(&request.query_pairs());
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| RemoteError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                url,
                status: status.as_u16(),
            }
            .into());
        }

        let page = response
            .json::<PageResponse<T>>()
            .await
            .map_err(|e| RemoteError::Decode {
                url,
                message: e.to_string(),
            })?;

        Ok(page)
    }
}

/// A remotely paginated list with its query state
///
/// Every setter that changes what is listed puts the list back on page 1.
/// The caller decides when to [`refresh`](PagedList::refresh). If a fetch
/// fails, the last page received stays in place. When fetches overlap, the
/// one issued last wins regardless of which reply arrives first.
pub struct PagedList<T> {
    ctx: ApiContext,
    request: ListRequest,
    sequencer: FetchSequencer,
    current: LatestSlot<PageResponse<T>>,
    _record: PhantomData<fn() -> T>,
}

impl<T> PagedList<T>
where
    T: Record + DeserializeOwned,
{
    pub fn new(ctx: ApiContext, page_size: usize) -> Self {
        Self {
            ctx,
            request: ListRequest::new(page_size),
            sequencer: FetchSequencer::new(),
            current: LatestSlot::new(),
            _record: PhantomData,
        }
    }

    pub fn request(&self) -> &ListRequest {
        &self.request
    }

    /// 1-based page currently requested
    pub fn page(&self) -> usize {
        self.request.cursor.page()
    }

    /// Last page received, if any
    pub fn current(&self) -> Option<PageResponse<T>> {
        self.current.get()
    }

    /// Records of the last page received
    pub fn items(&self) -> Vec<T> {
        self.current().map(|page| page.data).unwrap_or_default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.request.query.text = text.into();
        self.request.cursor.rewind();
    }

    pub fn set_column(&mut self, column: Column) {
        self.request.query.column = column;
        self.request.cursor.rewind();
    }

    pub fn set_direction(&mut self, direction: SortDirection) {
        self.request.query.direction = direction;
        self.request.cursor.rewind();
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.request.category = category;
        self.request.cursor.rewind();
    }

    pub fn set_page(&mut self, page: usize) {
        self.request.cursor.set_page(page);
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.request.cursor.set_page_size(size);
    }

    /// Clear text, column and direction back to their defaults
    pub fn reset_query(&mut self) {
        self.request.query.reset();
        self.request.cursor.rewind();
    }

    /// Re-fetch the current request
    ///
    /// Returns whether the fetched page was applied; a page superseded by a
    /// newer fetch is dropped.
    pub async fn refresh(&self) -> Result<bool, LabdeskError> {
        self.fetch(self.request.clone()).await
    }

    /// Fetch `request` and apply the result unless a newer fetch was issued
    /// in the meantime, whether or not that fetch has answered
    pub async fn fetch(&self, request: ListRequest) -> Result<bool, LabdeskError> {
        let ticket = self.sequencer.begin();

        match ListClient::fetch_page::<T>(&self.ctx, &request).await {
            Ok(page) => {
                let applied = self.current.offer(&self.sequencer, ticket, page);
                if !applied {
                    tracing::debug!(
                        collection = T::resource_name(),
                        ticket = ticket.value(),
                        "fetch superseded by a newer request"
                    );
                }
                Ok(applied)
            }
            Err(e) => {
                tracing::warn!(
                    collection = T::resource_name(),
                    ticket = ticket.value(),
                    error = %e,
                    "list fetch failed, keeping previous page"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StaticToken;
    use crate::records::Paper;

    fn ctx() -> ApiContext {
        ApiContext::new("http://127.0.0.1:1/", Arc::new(StaticToken::none()))
    }

    #[test]
    fn test_context_trims_trailing_slash() {
        assert_eq!(ctx().collection_url("papers"), "http://127.0.0.1:1/papers");
    }

    #[test]
    fn test_query_pairs_send_zero_based_page() {
        let mut request = ListRequest::new(10);
        request.cursor.set_page(3);
        request.query = ListQuery::new("graph", Column::parse("title"), SortDirection::Asc);
        request.category = Some("first".to_string());

        let pairs = request.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("page", "2".to_string()),
                ("size", "10".to_string()),
                ("q", "graph".to_string()),
                ("column", "title".to_string()),
                ("order", "asc".to_string()),
                ("category", "first".to_string()),
            ]
        );
    }

    #[test]
    fn test_setters_return_to_first_page() {
        let mut list: PagedList<Paper> = PagedList::new(ctx(), 10);

        list.set_page(4);
        list.set_text("graph");
        assert_eq!(list.page(), 1);

        list.set_page(4);
        list.set_page_size(20);
        assert_eq!(list.page(), 1);
        assert_eq!(list.request().cursor.size(), 20);

        list.set_page(2);
        list.set_column(Column::parse("journal"));
        assert_eq!(list.page(), 1);

        list.set_page(2);
        list.set_direction(SortDirection::Asc);
        assert_eq!(list.page(), 1);

        list.set_page(2);
        list.set_category(Some("first".to_string()));
        assert_eq!(list.page(), 1);

        list.set_page(2);
        list.reset_query();
        assert_eq!(list.page(), 1);
        assert_eq!(list.request().query, ListQuery::default());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_nothing_and_errors() {
        let list: PagedList<Paper> = PagedList::new(ctx(), 10);
        let err = list.refresh().await.unwrap_err();
        assert_eq!(err.error_code(), "REMOTE_TRANSPORT_ERROR");
        assert!(list.current().is_none());
        assert!(list.items().is_empty());
    }
}
