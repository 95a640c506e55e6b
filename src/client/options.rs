//! Per-request options: pagination, relation expansion and time ranges.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

/// Page size used when the caller does not pick one.
pub const DEFAULT_LIMIT: u32 = 25;

/// Page selection for collection endpoints.
///
/// Serializes as `limit=N&page=M`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pagination {
    /// Page number, starting at 1
    pub page: u32,
    /// Items per page
    pub limit: u32,
}

impl Pagination {
    /// Create a page selection.
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl fmt::Display for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "limit={}&page={}", self.limit, self.page)
    }
}

/// Relations the server should embed in the response.
///
/// Entries keep insertion order. Collection relations may carry their own
/// page selection, rendered as `name(limit:L,page:P)`.
///
/// ```
/// use cloudthing_rs::client::{Expansion, Pagination};
///
/// let expand = Expansion::new()
///     .with("directory")
///     .with_paged("devices", Pagination::new(2, 10));
/// assert_eq!(expand.to_string(), "directory,devices(limit:10,page:2)");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    entries: Vec<(String, Option<Pagination>)>,
}

impl Expansion {
    /// Create an empty expansion set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand a relation with the server's default paging.
    pub fn with(self, name: impl Into<String>) -> Self {
        self.insert(name.into(), None)
    }

    /// Expand a collection relation with explicit paging.
    pub fn with_paged(self, name: impl Into<String>, pagination: Pagination) -> Self {
        self.insert(name.into(), Some(pagination))
    }

    fn insert(mut self, name: String, pagination: Option<Pagination>) -> Self {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = pagination,
            None => self.entries.push((name, pagination)),
        }
        self
    }

    /// Whether no relation is requested.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Requested relation names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl fmt::Display for Expansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, pagination)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(name)?;
            if let Some(p) = pagination {
                write!(f, "(limit:{},page:{})", p.limit, p.page)?;
            }
        }
        Ok(())
    }
}

/// Time window for telemetry queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    /// Inclusive lower bound
    pub start: Option<DateTime<Utc>>,
    /// Upper bound
    pub end: Option<DateTime<Utc>>,
}

impl TimeRange {
    /// A closed window.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }
}

/// Optional settings attached to a single request.
///
/// # Example
///
/// ```
/// use cloudthing_rs::client::RequestOptions;
///
/// let options = RequestOptions::new()
///     .paginate(1, 50)
///     .expand("directory")
///     .expand_paged("devices", 1, 10);
///
/// assert_eq!(
///     options.query_string(),
///     "limit=50&page=1&expand=directory,devices(limit:10,page:1)"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Page selection for collection endpoints
    pub pagination: Option<Pagination>,
    /// Relations to embed
    pub expand: Expansion,
    /// Time window for telemetry endpoints
    pub time_range: Option<TimeRange>,
}

impl RequestOptions {
    /// Options with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a page.
    pub fn paginate(mut self, page: u32, limit: u32) -> Self {
        self.pagination = Some(Pagination::new(page, limit));
        self
    }

    /// Expand a relation.
    pub fn expand(mut self, name: impl Into<String>) -> Self {
        self.expand = self.expand.with(name);
        self
    }

    /// Expand a collection relation with explicit paging.
    pub fn expand_paged(mut self, name: impl Into<String>, page: u32, limit: u32) -> Self {
        self.expand = self.expand.with_paged(name, Pagination::new(page, limit));
        self
    }

    /// Restrict telemetry results to a time window.
    pub fn time_range(mut self, range: TimeRange) -> Self {
        self.time_range = Some(range);
        self
    }

    /// Same options without the page selection.
    pub(crate) fn without_pagination(&self) -> Self {
        Self {
            pagination: None,
            ..self.clone()
        }
    }

    /// Query parameters in the order they are sent.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(p) = self.pagination {
            pairs.push(("limit", p.limit.to_string()));
            pairs.push(("page", p.page.to_string()));
        }
        if !self.expand.is_empty() {
            pairs.push(("expand", self.expand.to_string()));
        }
        if let Some(range) = self.time_range {
            if let Some(start) = range.start {
                pairs.push(("start", start.to_rfc3339_opts(SecondsFormat::Secs, true)));
            }
            if let Some(end) = range.end {
                pairs.push(("end", end.to_rfc3339_opts(SecondsFormat::Secs, true)));
            }
        }
        pairs
    }

    /// Unencoded query string, for logging and diagnostics.
    pub fn query_string(&self) -> String {
        self.query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl From<Pagination> for RequestOptions {
    fn from(pagination: Pagination) -> Self {
        Self {
            pagination: Some(pagination),
            ..Self::default()
        }
    }
}

impl From<Expansion> for RequestOptions {
    fn from(expand: Expansion) -> Self {
        Self {
            expand,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_pagination_format() {
        assert_eq!(Pagination::new(3, 10).to_string(), "limit=10&page=3");
        assert_eq!(Pagination::default(), Pagination::new(1, DEFAULT_LIMIT));
    }

    #[test]
    fn test_expansion_keeps_order_and_replaces_duplicates() {
        let expand = Expansion::new()
            .with("tenant")
            .with("devices")
            .with_paged("tenant", Pagination::new(1, 5));

        assert_eq!(expand.to_string(), "tenant(limit:5,page:1),devices");
        assert_eq!(expand.names().collect::<Vec<_>>(), ["tenant", "devices"]);
    }

    #[test]
    fn test_empty_options_produce_no_query() {
        assert!(RequestOptions::new().query_pairs().is_empty());
        assert_eq!(RequestOptions::new().query_string(), "");
    }

    #[test]
    fn test_time_range_is_rfc3339_utc() {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        let options = RequestOptions::new().time_range(TimeRange::between(start, end));

        assert_eq!(
            options.query_string(),
            "start=2024-01-02T03:04:05Z&end=2024-01-03T00:00:00Z"
        );
    }

    #[test]
    fn test_without_pagination_keeps_expansion() {
        let options = RequestOptions::from(Pagination::new(2, 5)).expand("product");
        let next = options.without_pagination();
        assert!(next.pagination.is_none());
        assert_eq!(next.query_string(), "expand=product");
    }
}
