//! Shapes shared by every resource: base fields, links and collection envelopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Custom attributes attached to most resources.
pub type Custom = serde_json::Map<String, serde_json::Value>;

/// Fields every CloudThing resource carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelBase {
    /// Canonical URL of the resource
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub href: String,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ModelBase {
    /// Identifier: the last path segment of `href`.
    ///
    /// ```
    /// use cloudthing_rs::models::ModelBase;
    ///
    /// let base = ModelBase {
    ///     href: "https://acme.cloudthing.io/api/v1/devices/d42".into(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(base.id(), "d42");
    /// ```
    pub fn id(&self) -> &str {
        self.href.rsplit('/').next().unwrap_or_default()
    }
}

/// Unexpanded reference to another resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// URL of the referenced resource
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub href: String,
}

impl Link {
    /// Create a link.
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

impl From<&str> for Link {
    fn from(href: &str) -> Self {
        Self::new(href)
    }
}

impl From<String> for Link {
    fn from(href: String) -> Self {
        Self { href }
    }
}

/// Pagination envelope attached to every collection response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    /// URL of this page
    #[serde(default)]
    pub href: String,
    /// Total number of items in the collection
    #[serde(default)]
    pub size: u64,
    /// Items per page
    #[serde(default)]
    pub limit: u32,
    /// Page number
    #[serde(default)]
    pub page: u32,
    /// Previous page, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<Link>,
    /// Next page, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Link>,
}

/// Collection as sent on the wire: envelope plus raw items.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage<R> {
    /// Envelope fields
    #[serde(flatten)]
    pub params: ListParams,
    /// Items in their response shape
    #[serde(default = "Vec::new")]
    pub items: Vec<R>,
}

/// A decoded page of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Hydrated items, in server order
    pub items: Vec<T>,
    /// Pagination envelope
    pub params: ListParams,
}

impl<T> Page<T> {
    /// Link of the following page, if the server announced one.
    pub fn next_link(&self) -> Option<&str> {
        self.params
            .next
            .as_ref()
            .map(|l| l.href.as_str())
            .filter(|h| !h.is_empty())
    }

    /// Whether another page follows.
    pub fn has_next(&self) -> bool {
        self.next_link().is_some()
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// `key`/`value` pair used by device and product properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property name
    pub key: String,
    /// Arbitrary JSON value
    #[serde(default)]
    pub value: serde_json::Value,
}
