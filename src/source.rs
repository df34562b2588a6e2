//! The data source seam and an in-memory implementation.
//!
//! A [`DataSource`] answers one question: given search text, a window
//! (`limit`/`skip`) and an optional server-side sort, which items are in the
//! window and how many items match in total? The list-state controller treats
//! it as a black box; timeouts and retries are the source's business.
//!
//! [`InMemorySource`] serves a local collection. It is what a view uses when
//! the backend returns everything at once (for example all comments of a
//! post) and filtering has to happen on the client.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::FetchParams;
use crate::sort::{sort_by_field, SortDirection, SortKey};

/// One window of items plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet<T> {
    /// Items in the requested window. Never longer than the requested limit.
    pub items: Vec<T>,
    /// Number of items matching the query, independent of limit and skip.
    pub total: usize,
}

impl<T> Default for ResultSet<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

impl<T: DeserializeOwned> ResultSet<T> {
    /// Decodes a REST response envelope such as `{"posts": [...], "total": 150}`.
    ///
    /// `key` names the array field. A bare JSON array is accepted too; its
    /// length becomes the total. A missing `total` also falls back to the
    /// number of items.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Decode`] when the array is missing or an item
    /// does not deserialize into `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_paged_list::source::ResultSet;
    /// use serde_json::json;
    ///
    /// let body = json!({ "users": [1, 2, 3], "total": 208 });
    /// let set: ResultSet<u32> = ResultSet::from_envelope(&body, "users").unwrap();
    /// assert_eq!(set.items, vec![1, 2, 3]);
    /// assert_eq!(set.total, 208);
    /// ```
    pub fn from_envelope(body: &serde_json::Value, key: &str) -> Result<Self, FetchError> {
        let array = if body.is_array() {
            body
        } else {
            body.get(key)
                .ok_or_else(|| FetchError::Decode(format!("missing `{}` array", key)))?
        };

        let items: Vec<T> = serde_json::from_value(array.clone())
            .map_err(|err| FetchError::Decode(err.to_string()))?;
        let total = body
            .get("total")
            .and_then(serde_json::Value::as_u64)
            .map(|total| total as usize)
            .unwrap_or(items.len());

        Ok(Self { items, total })
    }
}

/// Ways a data source request can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}")]
    Http {
        /// HTTP status code.
        status: u16,
    },
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),
    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// The request was abandoned before it finished.
    #[error("request cancelled")]
    Cancelled,
}

/// A paged, searchable, sortable collection behind some boundary.
///
/// Implementations must return at most `params.limit` items and a `total`
/// that counts every item matching `params.query`.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use bubbletea_paged_list::query::FetchParams;
/// use bubbletea_paged_list::source::{DataSource, FetchError, ResultSet};
///
/// struct Numbers;
///
/// #[async_trait]
/// impl DataSource<u32> for Numbers {
///     async fn fetch_page(&self, params: &FetchParams) -> Result<ResultSet<u32>, FetchError> {
///         let items = (0..100u32).skip(params.skip).take(params.limit).collect();
///         Ok(ResultSet { items, total: 100 })
///     }
/// }
/// ```
#[async_trait]
pub trait DataSource<T>: Send + Sync {
    /// Fetches one window of items.
    async fn fetch_page(&self, params: &FetchParams) -> Result<ResultSet<T>, FetchError>;
}

/// Items that can be matched against search text on the client.
pub trait Searchable {
    /// Returns true if the item matches `term`.
    ///
    /// `term` is already trimmed and lowercased.
    fn matches_query(&self, term: &str) -> bool;
}

/// A [`DataSource`] over a local collection.
///
/// Filters with [`Searchable`], orders with [`SortKey`] when the params ask
/// for a sort, then slices the requested window.
///
/// # Examples
///
/// ```rust
/// use bubbletea_paged_list::query::FetchParams;
/// use bubbletea_paged_list::source::{InMemorySource, Searchable};
/// use bubbletea_paged_list::sort::{SortKey, SortValue};
///
/// #[derive(Clone)]
/// struct Comment(String);
///
/// impl Searchable for Comment {
///     fn matches_query(&self, term: &str) -> bool {
///         self.0.to_lowercase().contains(term)
///     }
/// }
///
/// impl SortKey for Comment {
///     fn sort_value(&self, _field: &str) -> SortValue {
///         self.0.as_str().into()
///     }
/// }
///
/// let source = InMemorySource::new(vec![
///     Comment("Nice post".into()),
///     Comment("Great work".into()),
///     Comment("nice one".into()),
/// ]);
/// let params = FetchParams {
///     query: Some("nice".into()),
///     limit: 10,
///     ..Default::default()
/// };
/// let page = source.query(&params);
/// assert_eq!(page.total, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySource<T> {
    items: Vec<T>,
}

impl<T> InMemorySource<T> {
    /// Wraps `items`.
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Number of items in the collection, ignoring any query.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> InMemorySource<T>
where
    T: Searchable + SortKey + Clone,
{
    /// Runs a query synchronously.
    pub fn query(&self, params: &FetchParams) -> ResultSet<T> {
        let term = params
            .query
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());

        let mut matched: Vec<T> = match term {
            Some(term) => self
                .items
                .iter()
                .filter(|item| item.matches_query(&term))
                .cloned()
                .collect(),
            None => self.items.clone(),
        };

        if let Some(field) = params.sort_by.as_deref() {
            sort_by_field(
                &mut matched,
                field,
                params.order.unwrap_or(SortDirection::Asc),
            );
        }

        let total = matched.len();
        let items = matched
            .into_iter()
            .skip(params.skip)
            .take(params.limit)
            .collect();

        ResultSet { items, total }
    }
}

#[async_trait]
impl<T> DataSource<T> for InMemorySource<T>
where
    T: Searchable + SortKey + Clone + Send + Sync,
{
    async fn fetch_page(&self, params: &FetchParams) -> Result<ResultSet<T>, FetchError> {
        Ok(self.query(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortValue;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Comment {
        id: u64,
        body: String,
        likes: u64,
    }

    impl Searchable for Comment {
        fn matches_query(&self, term: &str) -> bool {
            self.body.to_lowercase().contains(term)
        }
    }

    impl SortKey for Comment {
        fn sort_value(&self, field: &str) -> SortValue {
            match field {
                "id" => self.id.into(),
                "likes" => self.likes.into(),
                _ => SortValue::Missing,
            }
        }
    }

    fn comments(count: u64) -> Vec<Comment> {
        (1..=count)
            .map(|id| Comment {
                id,
                body: if id % 2 == 0 {
                    format!("Even comment {}", id)
                } else {
                    format!("Odd comment {}", id)
                },
                likes: (id * 7) % 10,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_in_memory_window_and_total() {
        let source = InMemorySource::new(comments(47));
        let params = FetchParams {
            limit: 10,
            skip: 40,
            ..Default::default()
        };
        let page = source.fetch_page(&params).await.unwrap();
        assert_eq!(page.total, 47);
        assert_eq!(page.items.len(), 7);
        assert_eq!(page.items[0].id, 41);
    }

    #[tokio::test]
    async fn test_in_memory_search_is_case_insensitive() {
        let source = InMemorySource::new(comments(10));
        let params = FetchParams {
            query: Some("  EVEN ".to_string()),
            limit: 3,
            skip: 0,
            ..Default::default()
        };
        let page = source.fetch_page(&params).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(
            page.items.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![2, 4, 6]
        );
    }

    #[test]
    fn test_in_memory_server_side_sort() {
        let source = InMemorySource::new(comments(5));
        let params = FetchParams {
            limit: 5,
            sort_by: Some("likes".to_string()),
            order: Some(SortDirection::Desc),
            ..Default::default()
        };
        let page = source.query(&params);
        // likes: 1→7, 2→4, 3→1, 4→8, 5→5
        assert_eq!(
            page.items.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![4, 1, 5, 2, 3]
        );
    }

    #[test]
    fn test_skip_past_end_is_empty() {
        let source = InMemorySource::new(comments(5));
        let params = FetchParams {
            limit: 10,
            skip: 10,
            ..Default::default()
        };
        let page = source.query(&params);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
    }

    #[test]
    fn test_from_envelope() {
        let body = json!({
            "comments": [{ "id": 1, "body": "hi", "likes": 2 }],
            "total": 340,
            "skip": 0,
            "limit": 1
        });
        let set: ResultSet<Comment> = ResultSet::from_envelope(&body, "comments").unwrap();
        assert_eq!(set.items.len(), 1);
        assert_eq!(set.total, 340);
    }

    #[test]
    fn test_from_envelope_bare_array() {
        let body = json!([{ "id": 1, "body": "a", "likes": 0 }, { "id": 2, "body": "b", "likes": 0 }]);
        let set: ResultSet<Comment> = ResultSet::from_envelope(&body, "comments").unwrap();
        assert_eq!(set.total, 2);
    }

    #[test]
    fn test_from_envelope_errors() {
        let body = json!({ "total": 3 });
        let err = ResultSet::<Comment>::from_envelope(&body, "comments").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));

        let body = json!({ "comments": [{ "id": "x" }] });
        let err = ResultSet::<Comment>::from_envelope(&body, "comments").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(FetchError::Http { status: 404 }.to_string(), "HTTP 404");
        assert_eq!(FetchError::Cancelled.to_string(), "request cancelled");
    }
}
