//! Query position and the parameters sent to a data source.

use serde::Serialize;

use crate::sort::SortDirection;

/// Search text and position of a paged list.
///
/// `skip` always advances in whole pages of `base_size`; `extra` only widens
/// the current window and never moves it.
///
/// # Examples
///
/// ```rust
/// use bubbletea_paged_list::query::ListQuery;
///
/// let mut query = ListQuery::new(10);
/// query.page = 3;
/// query.extra = 5;
/// assert_eq!(query.skip(), 20);
/// assert_eq!(query.effective_limit(), 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Raw search text as typed by the user.
    pub search_text: String,
    /// Current page, starting at 1.
    pub page: usize,
    /// Items per page.
    pub base_size: usize,
    /// Additional items revealed by "show more".
    pub extra: usize,
}

impl ListQuery {
    /// Creates a query on page 1 with no search text and no extra items.
    pub fn new(base_size: usize) -> Self {
        Self {
            search_text: String::new(),
            page: 1,
            base_size: base_size.max(1),
            extra: 0,
        }
    }

    /// Number of items to request: `base_size + extra`.
    pub fn effective_limit(&self) -> usize {
        self.base_size + self.extra
    }

    /// Number of items to skip: `(page - 1) * base_size`.
    pub fn skip(&self) -> usize {
        self.page.saturating_sub(1) * self.base_size
    }

    /// Trimmed search text, or `None` when it is empty or whitespace only.
    pub fn normalized_search(&self) -> Option<String> {
        let trimmed = self.search_text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Parameters for one data source request.
///
/// Serializes to the query string understood by dummyjson-style REST APIs:
/// `q`, `limit`, `skip`, `sortBy` and `order`, with absent options omitted.
///
/// # Examples
///
/// ```rust
/// use bubbletea_paged_list::query::FetchParams;
/// use bubbletea_paged_list::sort::SortDirection;
///
/// let params = FetchParams {
///     query: Some("love".to_string()),
///     limit: 10,
///     skip: 20,
///     sort_by: Some("views".to_string()),
///     order: Some(SortDirection::Desc),
/// };
/// assert_eq!(
///     params.to_query_string().unwrap(),
///     "q=love&limit=10&skip=20&sortBy=views&order=desc"
/// );
/// assert_eq!(
///     params.request_path("posts").unwrap(),
///     "/posts/search?q=love&limit=10&skip=20&sortBy=views&order=desc"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchParams {
    /// Search filter.
    #[serde(rename = "q", skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Maximum number of items to return.
    pub limit: usize,
    /// Number of matching items to skip.
    pub skip: usize,
    /// Field to order by on the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Server-side order direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortDirection>,
}

impl FetchParams {
    /// Encodes the parameters as a URL query string.
    ///
    /// # Errors
    ///
    /// Returns the encoder error if serialization fails.
    pub fn to_query_string(&self) -> Result<String, serde_qs::Error> {
        serde_qs::to_string(self)
    }

    /// Builds the request path for `resource`.
    ///
    /// Searches go to `/{resource}/search`, everything else to `/{resource}`.
    ///
    /// # Errors
    ///
    /// Returns the encoder error if serialization fails.
    pub fn request_path(&self, resource: &str) -> Result<String, serde_qs::Error> {
        let qs = self.to_query_string()?;
        let base = if self.query.is_some() {
            format!("/{}/search", resource)
        } else {
            format!("/{}", resource)
        };
        if qs.is_empty() {
            Ok(base)
        } else {
            Ok(format!("{}?{}", base, qs))
        }
    }
}
