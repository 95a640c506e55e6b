//! API key models.

use serde::{Deserialize, Serialize};

use super::primitives::{nullable, Custom, ModelBase};
use super::relation::{RawRelation, Relation};
use super::resource::{Creatable, Handle, Hydrate, Resource, Updatable};
use super::{Application, Tenant};
use crate::Result;

/// A tenant API key. `key` and `secret` are issued by the server.
#[derive(Clone, PartialEq)]
pub struct Apikey {
    /// Base fields
    pub base: ModelBase,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Public key id
    pub key: String,
    /// Key secret
    pub secret: String,
    /// Lifecycle status, e.g. `ENABLED`
    pub status: String,
    /// Custom attributes
    pub custom: Custom,
    /// Owning tenant
    pub tenant: Relation<Tenant>,
    /// Applications the key may act for
    pub applications: Relation<Vec<Application>>,
    handle: Handle,
}

impl std::fmt::Debug for Apikey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Apikey")
            .field("base", &self.base)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .field("status", &self.status)
            .field("custom", &self.custom)
            .field("tenant", &self.tenant)
            .field("applications", &self.applications)
            .finish()
    }
}

/// API key as sent by the API.
#[derive(Clone, Deserialize)]
pub struct ApikeyResponse {
    #[serde(flatten)]
    pub(crate) base: ModelBase,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) key: String,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) secret: String,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) status: String,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) custom: Custom,
    pub(crate) tenant: Option<RawRelation>,
    pub(crate) applications: Option<RawRelation>,
}

/// Client-settable API key fields, used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApikeyCreate {
    /// Display name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Free-form description
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Lifecycle status
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// Custom attributes
    #[serde(skip_serializing_if = "Custom::is_empty")]
    pub custom: Custom,
}

/// API key update payload.
pub type ApikeyUpdate = ApikeyCreate;

impl From<&Apikey> for ApikeyCreate {
    fn from(key: &Apikey) -> Self {
        Self {
            name: key.name.clone(),
            description: key.description.clone(),
            status: key.status.clone(),
            custom: key.custom.clone(),
        }
    }
}

impl Hydrate for Apikey {
    type Raw = ApikeyResponse;

    fn hydrate(raw: Self::Raw, handle: &Handle) -> Result<Self> {
        Ok(Self {
            base: raw.base,
            name: raw.name,
            description: raw.description,
            key: raw.key,
            secret: raw.secret,
            status: raw.status,
            custom: raw.custom,
            tenant: Relation::hydrate(raw.tenant, handle)?,
            applications: Relation::hydrate(raw.applications, handle)?,
            handle: handle.clone(),
        })
    }
}

impl Resource for Apikey {
    const COLLECTION: &'static str = "apikeys";

    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Creatable for Apikey {
    type Create = ApikeyCreate;
}

impl Updatable for Apikey {
    type Update = ApikeyUpdate;

    fn to_update(&self) -> Self::Update {
        self.into()
    }

    fn keep_expanded(&mut self, previous: Self) {
        self.tenant.keep_expanded(previous.tenant);
        self.applications.keep_expanded(previous.applications);
    }
}

impl Apikey {
    /// Push local changes to the API.
    pub async fn save(&mut self) -> Result<()> {
        self.handle.service::<Apikey>().save(self).await
    }

    /// Revoke and delete this key.
    pub async fn delete(self) -> Result<()> {
        self.handle.service::<Apikey>().delete(self).await
    }
}
