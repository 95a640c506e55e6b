//! Product models.
//!
//! A product is the template devices are created from. Besides the usual
//! scalars it declares the telemetry catalogue its devices speak: the data
//! keys they report, the events they raise and the commands they accept.

use serde::{Deserialize, Serialize};

use super::primitives::{nullable, Custom, ModelBase, Property};
use super::relation::{RawRelation, Relation};
use super::resource::{Creatable, Handle, Hydrate, Resource, Updatable};
use super::{Device, Tenant};
use crate::Result;

/// A data key or event declared by a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// Key used on the wire
    #[serde(default)]
    pub id: String,
    /// Human readable name
    #[serde(default)]
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
}

/// One payload slot of a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandPayload {
    /// Slot name
    #[serde(default)]
    pub name: String,
    /// Serialization format of the slot, e.g. `json`
    #[serde(default)]
    pub serialization: String,
    /// Default value
    #[serde(default)]
    pub value: String,
}

/// A command declared by a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Key, name and description
    #[serde(flatten)]
    pub descriptor: ResourceDescriptor,
    /// Payload slots
    #[serde(default, deserialize_with = "nullable")]
    pub payloads: Vec<CommandPayload>,
}

/// Telemetry catalogue of a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductResources {
    /// Data keys
    #[serde(default, deserialize_with = "nullable")]
    pub data: Vec<ResourceDescriptor>,
    /// Events
    #[serde(default, deserialize_with = "nullable")]
    pub events: Vec<ResourceDescriptor>,
    /// Commands
    #[serde(default, deserialize_with = "nullable")]
    pub commands: Vec<CommandDescriptor>,
}

/// A CloudThing product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Base fields
    pub base: ModelBase,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Custom attributes
    pub custom: Custom,
    /// Default properties of new devices
    pub properties: Vec<Property>,
    /// Telemetry catalogue, when the product declares one
    pub resources: Option<ProductResources>,
    /// Owning tenant
    pub tenant: Relation<Tenant>,
    /// Devices built from this product
    pub devices: Relation<Vec<Device>>,
    handle: Handle,
}

/// Product as sent by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[serde(flatten)]
    pub(crate) base: ModelBase,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) custom: Custom,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) properties: Vec<Property>,
    #[serde(default)]
    pub(crate) resources: Option<ProductResources>,
    pub(crate) tenant: Option<RawRelation>,
    pub(crate) devices: Option<RawRelation>,
}

/// Client-settable product fields, used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductCreate {
    /// Display name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Free-form description
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Custom attributes
    #[serde(skip_serializing_if = "Custom::is_empty")]
    pub custom: Custom,
    /// Default properties of new devices
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
    /// Telemetry catalogue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ProductResources>,
}

/// Product update payload.
pub type ProductUpdate = ProductCreate;

impl From<&Product> for ProductCreate {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            custom: product.custom.clone(),
            properties: product.properties.clone(),
            resources: product.resources.clone(),
        }
    }
}

impl Hydrate for Product {
    type Raw = ProductResponse;

    fn hydrate(raw: Self::Raw, handle: &Handle) -> Result<Self> {
        Ok(Self {
            base: raw.base,
            name: raw.name,
            description: raw.description,
            custom: raw.custom,
            properties: raw.properties,
            resources: raw.resources,
            tenant: Relation::hydrate(raw.tenant, handle)?,
            devices: Relation::hydrate(raw.devices, handle)?,
            handle: handle.clone(),
        })
    }
}

impl Resource for Product {
    const COLLECTION: &'static str = "products";

    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Creatable for Product {
    type Create = ProductCreate;
}

impl Updatable for Product {
    type Update = ProductUpdate;

    fn to_update(&self) -> Self::Update {
        self.into()
    }

    fn keep_expanded(&mut self, previous: Self) {
        self.tenant.keep_expanded(previous.tenant);
        self.devices.keep_expanded(previous.devices);
    }
}

impl Product {
    /// Push local changes to the API.
    pub async fn save(&mut self) -> Result<()> {
        self.handle.service::<Product>().save(self).await
    }

    /// Delete this product.
    pub async fn delete(self) -> Result<()> {
        self.handle.service::<Product>().delete(self).await
    }
}
