//! The generic CRUD engine every resource service is built from.

use std::marker::PhantomData;
use std::sync::Arc;

use reqwest::{Method, StatusCode};

use crate::client::paginated::PaginatedStream;
use crate::client::{decode, expect_status, ClientInner, RequestOptions, NO_BODY};
use crate::models::{Creatable, Handle, Hydrate, Page, RawPage, Relation, Resource, Updatable};
use crate::{Error, Result};

/// CRUD operations for resource kind `R`.
///
/// Each concrete service (`ClustersService`, `DevicesService`, ...) is an
/// alias of this type with a few endpoint helpers on top. The expected
/// status codes are fixed: 200 for reads and updates, 201 for creates and
/// 204 for deletes. Anything else becomes [`Error::Api`].
pub struct ResourceService<R> {
    inner: Arc<ClientInner>,
    _marker: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R: Resource> ResourceService<R> {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    pub(crate) fn inner(&self) -> &Arc<ClientInner> {
        &self.inner
    }

    fn handle(&self) -> Handle {
        Handle::new(self.inner.clone())
    }

    /// Retrieve a resource by id.
    pub async fn get_by_id(&self, id: &str, options: Option<RequestOptions>) -> Result<R> {
        self.get_by_link(&format!("{}/{}", R::COLLECTION, id), options)
            .await
    }

    /// Retrieve a resource by link.
    pub async fn get_by_link(&self, href: &str, options: Option<RequestOptions>) -> Result<R> {
        let response = self
            .inner
            .dispatch(Method::GET, href, NO_BODY, options.as_ref())
            .await?;
        let response = expect_status(response, StatusCode::OK).await?;
        self.hydrate(decode(response).await?)
    }

    /// `get_by_link` for `*/current` endpoints.
    ///
    /// These redirect to the canonical resource, possibly on another host,
    /// in which case the bearer header is dropped on the way. A 401 or 403
    /// from a URL other than the one requested is retried once there.
    pub(crate) async fn get_following_redirect(
        &self,
        endpoint: &str,
        options: Option<RequestOptions>,
    ) -> Result<R> {
        let response = self
            .inner
            .dispatch(Method::GET, endpoint, NO_BODY, options.as_ref())
            .await?;

        let denied = matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        );
        let mut landed = response.url().clone();
        landed.set_query(None);

        let response = if denied && landed != self.inner.resolve(endpoint)? {
            tracing::warn!(
                status = response.status().as_u16(),
                url = %landed,
                "request denied after redirect, retrying at final URL"
            );
            self.inner
                .dispatch(Method::GET, landed.as_str(), NO_BODY, options.as_ref())
                .await?
        } else {
            response
        };

        let response = expect_status(response, StatusCode::OK).await?;
        self.hydrate(decode(response).await?)
    }

    /// Retrieve one page of a collection by link.
    pub async fn list_by_link(
        &self,
        href: &str,
        options: Option<RequestOptions>,
    ) -> Result<Page<R>> {
        let response = self
            .inner
            .dispatch(Method::GET, href, NO_BODY, options.as_ref())
            .await?;
        let response = expect_status(response, StatusCode::OK).await?;
        let raw: RawPage<R::Raw> = decode(response).await?;
        Page::hydrate(raw, &self.handle())
    }

    /// Lazily iterate a whole collection, following `next` links.
    ///
    /// `options` apply in full to the first request; later pages keep the
    /// expansion but take their paging from the `next` link.
    pub fn stream_by_link(
        &self,
        href: &str,
        options: Option<RequestOptions>,
    ) -> PaginatedStream<R> {
        let service = self.clone();
        PaginatedStream::new(href, move |link: String, first: bool| {
            let service = service.clone();
            let options = match (&options, first) {
                (Some(o), false) => Some(o.without_pagination()),
                (o, _) => o.clone(),
            };
            Box::pin(async move { service.list_by_link(&link, options).await })
        })
    }

    /// Delete a resource.
    pub async fn delete(&self, resource: R) -> Result<()> {
        self.delete_by_link(resource.href()).await
    }

    /// Delete a resource by id.
    pub async fn delete_by_id(&self, id: &str) -> Result<()> {
        self.delete_by_link(&format!("{}/{}", R::COLLECTION, id))
            .await
    }

    /// Delete a resource by link.
    pub async fn delete_by_link(&self, href: &str) -> Result<()> {
        if href.is_empty() {
            return Err(Error::InvalidInput(format!(
                "cannot delete {} without href",
                R::COLLECTION
            )));
        }
        let response = self
            .inner
            .dispatch(Method::DELETE, href, NO_BODY, None)
            .await?;
        expect_status(response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }

    /// Follow a relation: the embedded value when expanded, a GET otherwise.
    pub async fn resolve(&self, relation: &Relation<R>) -> Result<R>
    where
        R: Clone,
    {
        if let Some(value) = relation.get() {
            return Ok(value.clone());
        }
        match relation.href() {
            Some(href) => self.get_by_link(href, None).await,
            None => Err(Error::InvalidInput(format!(
                "relation to {} does not apply to this resource",
                R::COLLECTION
            ))),
        }
    }

    /// Hydrate a decoded response shape.
    pub fn hydrate(&self, raw: R::Raw) -> Result<R> {
        R::hydrate(raw, &self.handle())
    }

    /// Decode and hydrate a JSON document, e.g. a cached response body.
    pub fn from_json(&self, value: serde_json::Value) -> Result<R> {
        self.hydrate(serde_json::from_value(value)?)
    }

    /// One page of the tenant-rooted collection `tenants/{tenant}/{collection}`.
    pub(crate) async fn list_in_tenant(&self, options: Option<RequestOptions>) -> Result<Page<R>> {
        let endpoint = self.tenant_collection().await?;
        self.list_by_link(&endpoint, options).await
    }

    /// Stream the whole tenant-rooted collection.
    pub(crate) async fn stream_in_tenant(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<PaginatedStream<R>> {
        let endpoint = self.tenant_collection().await?;
        Ok(self.stream_by_link(&endpoint, options))
    }

    pub(crate) async fn tenant_collection(&self) -> Result<String> {
        let tenant = self.inner.tenant_id().await?;
        Ok(format!("tenants/{}/{}", tenant, R::COLLECTION))
    }
}

impl<R: Creatable> ResourceService<R> {
    /// Create a resource in the collection at `href`.
    pub async fn create_by_link(&self, href: &str, request: &R::Create) -> Result<R> {
        let response = self
            .inner
            .dispatch(Method::POST, href, Some(request), None)
            .await?;
        let response = expect_status(response, StatusCode::CREATED).await?;
        self.hydrate(decode(response).await?)
    }

    /// Create a resource in the tenant-rooted collection.
    pub(crate) async fn create_in_tenant(&self, request: &R::Create) -> Result<R> {
        let endpoint = self.tenant_collection().await?;
        self.create_by_link(&endpoint, request).await
    }
}

impl<R: Updatable> ResourceService<R> {
    /// Update a resource by id.
    pub async fn update_by_id(&self, id: &str, request: &R::Update) -> Result<R> {
        self.update_by_link(&format!("{}/{}", R::COLLECTION, id), request)
            .await
    }

    /// Update a resource by link.
    pub async fn update_by_link(&self, href: &str, request: &R::Update) -> Result<R> {
        let response = self
            .inner
            .dispatch(Method::POST, href, Some(request), None)
            .await?;
        let response = expect_status(response, StatusCode::OK).await?;
        self.hydrate(decode(response).await?)
    }

    /// Push local changes and refresh `resource` from the response.
    ///
    /// Relations expanded in memory stay expanded even though the update
    /// response only carries links.
    pub async fn save(&self, resource: &mut R) -> Result<()> {
        if resource.href().is_empty() {
            return Err(Error::InvalidInput(format!(
                "cannot save {} without href",
                R::COLLECTION
            )));
        }
        let href = resource.href().to_owned();
        let updated = self.update_by_link(&href, &resource.to_update()).await?;
        let previous = std::mem::replace(resource, updated);
        resource.keep_expanded(previous);
        Ok(())
    }
}

/// Path of the `child` collection below the `P` resource `id`.
pub(crate) fn scoped<P: Resource>(id: &str, child: &str) -> String {
    format!("{}/{}/{}", P::COLLECTION, id, child)
}
