//! Group models.

use serde::{Deserialize, Serialize};

use super::primitives::{nullable, Custom, ModelBase};
use super::relation::{RawRelation, Relation};
use super::resource::{Creatable, Handle, Hydrate, Resource, Updatable};
use super::telemetry::TelemetryOwner;
use super::{Application, Cluster, Device, Tenant};
use crate::Result;

/// A group of devices inside a cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Base fields
    pub base: ModelBase,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Custom attributes
    pub custom: Custom,
    /// Owning tenant
    pub tenant: Relation<Tenant>,
    /// Owning application
    pub application: Relation<Application>,
    /// Cluster the group lives in
    pub cluster: Relation<Cluster>,
    /// Member devices
    pub devices: Relation<Vec<Device>>,
    handle: Handle,
}

/// Group as sent by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    #[serde(flatten)]
    pub(crate) base: ModelBase,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) custom: Custom,
    pub(crate) tenant: Option<RawRelation>,
    pub(crate) application: Option<RawRelation>,
    pub(crate) cluster: Option<RawRelation>,
    pub(crate) devices: Option<RawRelation>,
}

/// Client-settable group fields, used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupCreate {
    /// Display name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Free-form description
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Custom attributes
    #[serde(skip_serializing_if = "Custom::is_empty")]
    pub custom: Custom,
}

/// Group update payload.
pub type GroupUpdate = GroupCreate;

impl From<&Group> for GroupCreate {
    fn from(group: &Group) -> Self {
        Self {
            name: group.name.clone(),
            description: group.description.clone(),
            custom: group.custom.clone(),
        }
    }
}

impl Hydrate for Group {
    type Raw = GroupResponse;

    fn hydrate(raw: Self::Raw, handle: &Handle) -> Result<Self> {
        Ok(Self {
            base: raw.base,
            name: raw.name,
            description: raw.description,
            custom: raw.custom,
            tenant: Relation::hydrate(raw.tenant, handle)?,
            application: Relation::hydrate(raw.application, handle)?,
            cluster: Relation::hydrate(raw.cluster, handle)?,
            devices: Relation::hydrate(raw.devices, handle)?,
            handle: handle.clone(),
        })
    }
}

impl Resource for Group {
    const COLLECTION: &'static str = "groups";

    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Creatable for Group {
    type Create = GroupCreate;
}

impl Updatable for Group {
    type Update = GroupUpdate;

    fn to_update(&self) -> Self::Update {
        self.into()
    }

    fn keep_expanded(&mut self, previous: Self) {
        self.tenant.keep_expanded(previous.tenant);
        self.application.keep_expanded(previous.application);
        self.cluster.keep_expanded(previous.cluster);
        self.devices.keep_expanded(previous.devices);
    }
}

impl TelemetryOwner for Group {
    fn owner_href(&self) -> &str {
        &self.base.href
    }
}

impl Group {
    /// Push local changes to the API.
    pub async fn save(&mut self) -> Result<()> {
        self.handle.service::<Group>().save(self).await
    }

    /// Delete this group.
    pub async fn delete(self) -> Result<()> {
        self.handle.service::<Group>().delete(self).await
    }
}
