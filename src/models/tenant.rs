//! Tenant models.
//!
//! The tenant is the root of the resource tree. Clients never create or
//! delete tenants; they read the one their token belongs to and may rename
//! it or change its custom attributes.

use serde::{Deserialize, Serialize};

use super::primitives::{nullable, Custom, ModelBase};
use super::relation::{RawRelation, Relation};
use super::resource::{Handle, Hydrate, Resource, Updatable};
use super::{Application, Directory, Product};
use crate::Result;

/// A CloudThing tenant.
#[derive(Debug, Clone, PartialEq)]
pub struct Tenant {
    /// Base fields
    pub base: ModelBase,
    /// Short name, used as the tenant's subdomain
    pub short_name: String,
    /// Display name
    pub name: String,
    /// Custom attributes
    pub custom: Custom,
    /// Directories of this tenant
    pub directories: Relation<Vec<Directory>>,
    /// Applications of this tenant
    pub applications: Relation<Vec<Application>>,
    /// Products of this tenant
    pub products: Relation<Vec<Product>>,
    handle: Handle,
}

/// Tenant as sent by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantResponse {
    #[serde(flatten)]
    pub(crate) base: ModelBase,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) short_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) custom: Custom,
    pub(crate) directories: Option<RawRelation>,
    pub(crate) applications: Option<RawRelation>,
    pub(crate) products: Option<RawRelation>,
}

/// Client-settable tenant fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TenantUpdate {
    /// Display name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Custom attributes
    #[serde(skip_serializing_if = "Custom::is_empty")]
    pub custom: Custom,
}

impl From<&Tenant> for TenantUpdate {
    fn from(tenant: &Tenant) -> Self {
        Self {
            name: tenant.name.clone(),
            custom: tenant.custom.clone(),
        }
    }
}

impl Hydrate for Tenant {
    type Raw = TenantResponse;

    fn hydrate(raw: Self::Raw, handle: &Handle) -> Result<Self> {
        Ok(Self {
            base: raw.base,
            short_name: raw.short_name,
            name: raw.name,
            custom: raw.custom,
            directories: Relation::hydrate(raw.directories, handle)?,
            applications: Relation::hydrate(raw.applications, handle)?,
            products: Relation::hydrate(raw.products, handle)?,
            handle: handle.clone(),
        })
    }
}

impl Resource for Tenant {
    const COLLECTION: &'static str = "tenants";

    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Updatable for Tenant {
    type Update = TenantUpdate;

    fn to_update(&self) -> Self::Update {
        self.into()
    }

    fn keep_expanded(&mut self, previous: Self) {
        self.directories.keep_expanded(previous.directories);
        self.applications.keep_expanded(previous.applications);
        self.products.keep_expanded(previous.products);
    }
}

impl Tenant {
    /// Push name and custom attributes to the API.
    pub async fn save(&mut self) -> Result<()> {
        self.handle.service::<Tenant>().save(self).await
    }
}
