//! Device models.

use serde::{Deserialize, Serialize};

use super::primitives::{nullable, Custom, ModelBase, Property};
use super::relation::{RawRelation, Relation};
use super::resource::{Creatable, Handle, Hydrate, Resource, Updatable};
use super::telemetry::TelemetryOwner;
use super::{Cluster, ClusterMembership, Group, GroupMembership, Product, Tenant};
use crate::Result;

/// A CloudThing device, an instance of a [`Product`].
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    /// Base fields
    pub base: ModelBase,
    /// Device token used by the device to authenticate itself
    pub token: String,
    /// Whether the device has been activated; unknown when absent
    pub activated: Option<bool>,
    /// Custom attributes
    pub custom: Custom,
    /// Device properties
    pub properties: Vec<Property>,
    /// Owning tenant
    pub tenant: Relation<Tenant>,
    /// Product this device was created from
    pub product: Relation<Product>,
    /// Clusters the device belongs to
    pub clusters: Relation<Vec<Cluster>>,
    /// Groups the device belongs to
    pub groups: Relation<Vec<Group>>,
    /// Cluster memberships
    pub cluster_memberships: Relation<Vec<ClusterMembership>>,
    /// Group memberships
    pub group_memberships: Relation<Vec<GroupMembership>>,
    handle: Handle,
}

/// Device as sent by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceResponse {
    #[serde(flatten)]
    pub(crate) base: ModelBase,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) token: String,
    #[serde(default)]
    pub(crate) activated: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) custom: Custom,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) properties: Vec<Property>,
    pub(crate) tenant: Option<RawRelation>,
    pub(crate) product: Option<RawRelation>,
    pub(crate) clusters: Option<RawRelation>,
    pub(crate) groups: Option<RawRelation>,
    pub(crate) cluster_memberships: Option<RawRelation>,
    pub(crate) group_memberships: Option<RawRelation>,
}

/// Client-settable device fields, used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceCreate {
    /// Custom attributes
    #[serde(skip_serializing_if = "Custom::is_empty")]
    pub custom: Custom,
    /// Device properties
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
}

/// Device update payload.
pub type DeviceUpdate = DeviceCreate;

impl From<&Device> for DeviceCreate {
    fn from(device: &Device) -> Self {
        Self {
            custom: device.custom.clone(),
            properties: device.properties.clone(),
        }
    }
}

impl Hydrate for Device {
    type Raw = DeviceResponse;

    fn hydrate(raw: Self::Raw, handle: &Handle) -> Result<Self> {
        Ok(Self {
            base: raw.base,
            token: raw.token,
            activated: raw.activated,
            custom: raw.custom,
            properties: raw.properties,
            tenant: Relation::hydrate(raw.tenant, handle)?,
            product: Relation::hydrate(raw.product, handle)?,
            clusters: Relation::hydrate(raw.clusters, handle)?,
            groups: Relation::hydrate(raw.groups, handle)?,
            cluster_memberships: Relation::hydrate(raw.cluster_memberships, handle)?,
            group_memberships: Relation::hydrate(raw.group_memberships, handle)?,
            handle: handle.clone(),
        })
    }
}

impl Resource for Device {
    const COLLECTION: &'static str = "devices";

    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Creatable for Device {
    type Create = DeviceCreate;
}

impl Updatable for Device {
    type Update = DeviceUpdate;

    fn to_update(&self) -> Self::Update {
        self.into()
    }

    fn keep_expanded(&mut self, previous: Self) {
        self.tenant.keep_expanded(previous.tenant);
        self.product.keep_expanded(previous.product);
        self.clusters.keep_expanded(previous.clusters);
        self.groups.keep_expanded(previous.groups);
        self.cluster_memberships
            .keep_expanded(previous.cluster_memberships);
        self.group_memberships.keep_expanded(previous.group_memberships);
    }
}

impl TelemetryOwner for Device {
    fn owner_href(&self) -> &str {
        &self.base.href
    }
}

impl Device {
    /// Look up a property by key.
    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties
            .iter()
            .find(|p| p.key == key)
            .map(|p| &p.value)
    }

    /// Push custom attributes and properties to the API.
    pub async fn save(&mut self) -> Result<()> {
        self.handle.service::<Device>().save(self).await
    }

    /// Delete this device.
    pub async fn delete(self) -> Result<()> {
        self.handle.service::<Device>().delete(self).await
    }
}
