//! Cluster models.
//!
//! A cluster is a named set of devices inside an application. Clusters own
//! groups and expose the telemetry sub-API at `{href}/resources`.

use serde::{Deserialize, Serialize};

use super::primitives::{nullable, Custom, ModelBase};
use super::relation::{RawRelation, Relation};
use super::resource::{Creatable, Handle, Hydrate, Resource, Updatable};
use super::telemetry::TelemetryOwner;
use super::{Application, ClusterMembership, Device, Group, Tenant};
use crate::Result;

/// A CloudThing cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
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
    /// Groups inside this cluster
    pub groups: Relation<Vec<Group>>,
    /// Member devices
    pub devices: Relation<Vec<Device>>,
    /// Device memberships of this cluster
    pub memberships: Relation<Vec<ClusterMembership>>,
    handle: Handle,
}

/// Cluster as sent by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResponse {
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
    pub(crate) groups: Option<RawRelation>,
    pub(crate) devices: Option<RawRelation>,
    pub(crate) memberships: Option<RawRelation>,
}

/// Client-settable cluster fields, used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterCreate {
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

/// Cluster update payload.
pub type ClusterUpdate = ClusterCreate;

impl From<&Cluster> for ClusterCreate {
    fn from(cluster: &Cluster) -> Self {
        Self {
            name: cluster.name.clone(),
            description: cluster.description.clone(),
            custom: cluster.custom.clone(),
        }
    }
}

impl Hydrate for Cluster {
    type Raw = ClusterResponse;

    fn hydrate(raw: Self::Raw, handle: &Handle) -> Result<Self> {
        Ok(Self {
            base: raw.base,
            name: raw.name,
            description: raw.description,
            custom: raw.custom,
            tenant: Relation::hydrate(raw.tenant, handle)?,
            application: Relation::hydrate(raw.application, handle)?,
            groups: Relation::hydrate(raw.groups, handle)?,
            devices: Relation::hydrate(raw.devices, handle)?,
            memberships: Relation::hydrate(raw.memberships, handle)?,
            handle: handle.clone(),
        })
    }
}

impl Resource for Cluster {
    const COLLECTION: &'static str = "clusters";

    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Creatable for Cluster {
    type Create = ClusterCreate;
}

impl Updatable for Cluster {
    type Update = ClusterUpdate;

    fn to_update(&self) -> Self::Update {
        self.into()
    }

    fn keep_expanded(&mut self, previous: Self) {
        self.tenant.keep_expanded(previous.tenant);
        self.application.keep_expanded(previous.application);
        self.groups.keep_expanded(previous.groups);
        self.devices.keep_expanded(previous.devices);
        self.memberships.keep_expanded(previous.memberships);
    }
}

impl TelemetryOwner for Cluster {
    fn owner_href(&self) -> &str {
        &self.base.href
    }
}

impl Cluster {
    /// Push name, description and custom attributes to the API.
    ///
    /// Expanded relations survive the round trip.
    pub async fn save(&mut self) -> Result<()> {
        self.handle.service::<Cluster>().save(self).await
    }

    /// Delete this cluster.
    pub async fn delete(self) -> Result<()> {
        self.handle.service::<Cluster>().delete(self).await
    }
}
