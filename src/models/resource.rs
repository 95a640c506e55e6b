//! Traits that plug a resource kind into the generic service engine.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use super::primitives::ModelBase;
use crate::api::ResourceService;
use crate::client::ClientInner;
use crate::Result;

/// Back-reference from a hydrated resource to the client that fetched it.
///
/// It lets `save()`/`delete()` on a resource dispatch without the caller
/// passing the client around. Handles never take part in equality.
#[derive(Clone)]
pub struct Handle {
    inner: Arc<ClientInner>,
}

impl Handle {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Service for resource kind `R`, bound to the same client.
    pub(crate) fn service<R: Resource>(&self) -> ResourceService<R> {
        ResourceService::new(self.inner.clone())
    }

    /// A handle on a throwaway client, for decoding tests.
    #[cfg(test)]
    pub(crate) fn detached() -> Self {
        let client = crate::CloudThingClient::new("http://localhost")
            .expect("static URL is valid");
        Self::new(client.inner)
    }
}

impl PartialEq for Handle {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl std::fmt::Debug for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Handle")
    }
}

/// Conversion from a flat response shape into a domain object.
///
/// Implementations copy scalars and run [`Relation::hydrate`](super::Relation::hydrate)
/// on every relation field. Hydration is pure: it never performs I/O.
pub trait Hydrate: Sized {
    /// Shape of the resource on the wire.
    type Raw: DeserializeOwned;

    /// Build the domain object from its wire shape.
    fn hydrate(raw: Self::Raw, handle: &Handle) -> Result<Self>;
}

/// A CloudThing resource kind.
pub trait Resource: Hydrate + Send + 'static {
    /// Collection path segment, e.g. `clusters`.
    const COLLECTION: &'static str;

    /// Base fields.
    fn base(&self) -> &ModelBase;

    /// Handle of the client that produced this resource.
    fn handle(&self) -> &Handle;

    /// Canonical URL.
    fn href(&self) -> &str {
        &self.base().href
    }

    /// Identifier (last path segment of the href).
    fn id(&self) -> &str {
        self.base().id()
    }
}

/// Resource kinds the API lets clients create.
pub trait Creatable: Resource {
    /// Create payload: client-settable fields only.
    type Create: Serialize + Sync;
}

/// Resource kinds the API lets clients update.
pub trait Updatable: Resource {
    /// Update payload: client-settable fields only.
    type Update: Serialize + Sync;

    /// Project the current state onto the update payload.
    fn to_update(&self) -> Self::Update;

    /// Restore expanded relations from `previous` after an update.
    fn keep_expanded(&mut self, previous: Self);
}
