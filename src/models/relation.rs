//! Expand-or-link relations and the hydration algorithm behind them.
//!
//! Related resources arrive as JSON objects. An object holding nothing but
//! `href` is a plain link; anything richer means the server expanded the
//! relation, and the object is decoded into the related kind right away.
//! Hydration never performs I/O: expansion data is already embedded.

use serde_json::{Map, Value};

use super::primitives::{Link, Page, RawPage};
use super::resource::{Handle, Hydrate};
use crate::{Error, Result};

/// A relation as it appears in a response body.
pub type RawRelation = Map<String, Value>;

/// A named relation of a resource: absent, linked, or expanded.
///
/// The href is kept whenever the server sent one, expanded or not.
///
/// ```
/// use cloudthing_rs::models::Relation;
///
/// let rel: Relation<String> = Relation::from_href("https://acme.cloudthing.io/api/v1/tenants/T1");
/// assert_eq!(rel.link(), (false, "https://acme.cloudthing.io/api/v1/tenants/T1"));
/// assert!(rel.get().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Relation<T> {
    href: Option<String>,
    value: Option<Box<T>>,
}

impl<T> Default for Relation<T> {
    fn default() -> Self {
        Self::absent()
    }
}

impl<T> Relation<T> {
    /// A relation that does not apply to this resource.
    pub fn absent() -> Self {
        Self {
            href: None,
            value: None,
        }
    }

    /// An unexpanded relation.
    pub fn from_href(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            value: None,
        }
    }

    /// An expanded relation.
    pub fn expanded(href: impl Into<String>, value: T) -> Self {
        Self {
            href: Some(href.into()),
            value: Some(Box::new(value)),
        }
    }

    /// `(expanded, href)`; the href is empty when the relation is absent.
    pub fn link(&self) -> (bool, &str) {
        (self.value.is_some(), self.href.as_deref().unwrap_or_default())
    }

    /// The href, if the server sent one.
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// The hydrated value, if the relation was expanded.
    pub fn get(&self) -> Option<&T> {
        self.value.as_deref()
    }

    /// Mutable access to the hydrated value.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.value.as_deref_mut()
    }

    /// Take the hydrated value out, leaving the link.
    pub fn take(&mut self) -> Option<T> {
        self.value.take().map(|v| *v)
    }

    /// Whether the relation was expanded.
    pub fn is_expanded(&self) -> bool {
        self.value.is_some()
    }

    /// Whether the relation is missing entirely.
    pub fn is_absent(&self) -> bool {
        self.href.is_none() && self.value.is_none()
    }

    /// The relation as a request link.
    pub fn to_link(&self) -> Option<Link> {
        self.href.as_deref().map(Link::new)
    }

    /// Carry hydrated data from `previous` into a fresher, unexpanded copy.
    ///
    /// Used after an update: the response only holds scalars, while the
    /// caller may still hold expanded relations in memory.
    pub fn keep_expanded(&mut self, previous: Relation<T>) {
        if self.value.is_none() {
            self.value = previous.value;
            if self.href.is_none() {
                self.href = previous.href;
            }
        }
    }
}

impl<T: Hydrate> Relation<T> {
    /// Decode a relation field.
    ///
    /// - key absent or `null` → absent relation
    /// - `{"href": …}` only → unexpanded link
    /// - more than one key → decoded into `T::Raw` and hydrated
    pub fn hydrate(raw: Option<RawRelation>, handle: &Handle) -> Result<Self> {
        let Some(map) = raw else {
            return Ok(Self::absent());
        };

        let href = map.get("href").and_then(Value::as_str).map(str::to_owned);
        if map.len() <= 1 {
            return Ok(Self { href, value: None });
        }

        let raw: T::Raw = serde_json::from_value(Value::Object(map)).map_err(|e| {
            Error::Decode(format!(
                "expanded relation {} does not match its schema: {e}",
                href.as_deref().unwrap_or("<no href>")
            ))
        })?;
        let value = T::hydrate(raw, handle)?;

        Ok(Self {
            href,
            value: Some(Box::new(value)),
        })
    }
}

/// Hydrate every item of a collection, in order.
///
/// The first failing item fails the whole collection.
pub(crate) fn hydrate_items<T: Hydrate>(items: Vec<T::Raw>, handle: &Handle) -> Result<Vec<T>> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            T::hydrate(raw, handle).map_err(|e| Error::Decode(format!("collection item {i}: {e}")))
        })
        .collect()
}

impl<T: Hydrate> Hydrate for Vec<T> {
    type Raw = RawPage<T::Raw>;

    fn hydrate(raw: Self::Raw, handle: &Handle) -> Result<Self> {
        hydrate_items(raw.items, handle)
    }
}

impl<T: Hydrate> Hydrate for Page<T> {
    type Raw = RawPage<T::Raw>;

    fn hydrate(raw: Self::Raw, handle: &Handle) -> Result<Self> {
        Ok(Page {
            items: hydrate_items(raw.items, handle)?,
            params: raw.params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct Tag {
        name: String,
        parent: Relation<Tag>,
    }

    #[derive(Deserialize)]
    struct TagResponse {
        name: String,
        parent: Option<RawRelation>,
    }

    impl Hydrate for Tag {
        type Raw = TagResponse;

        fn hydrate(raw: Self::Raw, handle: &Handle) -> Result<Self> {
            Ok(Tag {
                name: raw.name,
                parent: Relation::hydrate(raw.parent, handle)?,
            })
        }
    }

    fn map(value: Value) -> Option<RawRelation> {
        match value {
            Value::Object(m) => Some(m),
            _ => None,
        }
    }

    #[test]
    fn test_href_only_is_a_link() {
        let handle = Handle::detached();
        let rel: Relation<Tag> =
            Relation::hydrate(map(json!({ "href": "http://x/tags/1" })), &handle).unwrap();

        assert_eq!(rel.link(), (false, "http://x/tags/1"));
        assert!(rel.get().is_none());
    }

    #[test]
    fn test_rich_object_is_expanded_recursively() {
        let handle = Handle::detached();
        let raw = map(json!({
            "href": "http://x/tags/1",
            "name": "outer",
            "parent": { "href": "http://x/tags/0", "name": "root" }
        }));
        let rel: Relation<Tag> = Relation::hydrate(raw, &handle).unwrap();

        assert_eq!(rel.link(), (true, "http://x/tags/1"));
        let tag = rel.get().unwrap();
        assert_eq!(tag.name, "outer");
        assert_eq!(tag.parent.link(), (true, "http://x/tags/0"));
        assert_eq!(tag.parent.get().unwrap().name, "root");
        assert!(tag.parent.get().unwrap().parent.is_absent());
    }

    #[test]
    fn test_absent_relation() {
        let handle = Handle::detached();
        let rel: Relation<Tag> = Relation::hydrate(None, &handle).unwrap();
        assert_eq!(rel.link(), (false, ""));
        assert!(rel.is_absent());
    }

    #[test]
    fn test_schema_mismatch_is_a_decode_error() {
        let handle = Handle::detached();
        let raw = map(json!({ "href": "http://x/tags/1", "name": 42 }));
        let result: Result<Relation<Tag>> = Relation::hydrate(raw, &handle);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_expanded_collection_relation() {
        let handle = Handle::detached();
        let raw = map(json!({
            "href": "http://x/tags",
            "size": 2,
            "items": [
                { "name": "a", "parent": { "href": "http://x/tags/0" } },
                { "name": "b" }
            ]
        }));
        let rel: Relation<Vec<Tag>> = Relation::hydrate(raw, &handle).unwrap();

        let items = rel.get().unwrap();
        assert_eq!(items.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(items[0].parent.link(), (false, "http://x/tags/0"));
    }

    #[test]
    fn test_bad_collection_item_fails_the_collection() {
        let handle = Handle::detached();
        let raw: RawPage<TagResponse> = serde_json::from_value(json!({
            "items": [
                { "name": "ok" },
                { "name": "bad", "parent": { "href": "http://x/tags/0", "name": [] } }
            ]
        }))
        .unwrap();

        let err = <Page<Tag>>::hydrate(raw, &handle).unwrap_err();
        assert!(err.to_string().contains("collection item 1"));
    }

    #[test]
    fn test_hydration_is_idempotent() {
        let handle = Handle::detached();
        let body = json!({ "href": "http://x/tags/1", "name": "n", "parent": { "href": "http://x/tags/0", "name": "p" } });

        let a: Relation<Tag> = Relation::hydrate(map(body.clone()), &handle).unwrap();
        let b: Relation<Tag> = Relation::hydrate(map(body), &handle).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_keep_expanded() {
        let tag = Tag {
            name: "cached".into(),
            parent: Relation::absent(),
        };
        let previous = Relation::expanded("http://x/tags/1", tag.clone());

        let mut fresh_absent: Relation<Tag> = Relation::absent();
        fresh_absent.keep_expanded(previous.clone());
        assert_eq!(fresh_absent, previous);

        let mut fresh_link: Relation<Tag> = Relation::from_href("http://x/tags/1");
        fresh_link.keep_expanded(previous.clone());
        assert_eq!(fresh_link.get(), Some(&tag));

        let newer = Tag {
            name: "new".into(),
            parent: Relation::absent(),
        };
        let mut fresh_expanded = Relation::expanded("http://x/tags/1", newer.clone());
        fresh_expanded.keep_expanded(previous);
        assert_eq!(fresh_expanded.get(), Some(&newer));
    }
}
