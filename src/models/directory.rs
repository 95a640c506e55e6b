//! Directory models.

use serde::{Deserialize, Serialize};

use super::primitives::{nullable, Custom, ModelBase};
use super::relation::{RawRelation, Relation};
use super::resource::{Creatable, Handle, Hydrate, Resource, Updatable};
use super::{Application, Tenant, User, Usergroup};
use crate::Result;

/// A user directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    /// Base fields
    pub base: ModelBase,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Whether this is the tenant's built-in directory
    pub official: Option<bool>,
    /// Custom attributes
    pub custom: Custom,
    /// Owning tenant
    pub tenant: Relation<Tenant>,
    /// Applications using this directory
    pub applications: Relation<Vec<Application>>,
    /// Users stored here
    pub users: Relation<Vec<User>>,
    /// Usergroups stored here
    pub usergroups: Relation<Vec<Usergroup>>,
    handle: Handle,
}

/// Directory as sent by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryResponse {
    #[serde(flatten)]
    pub(crate) base: ModelBase,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) official: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) custom: Custom,
    pub(crate) tenant: Option<RawRelation>,
    pub(crate) applications: Option<RawRelation>,
    pub(crate) users: Option<RawRelation>,
    pub(crate) usergroups: Option<RawRelation>,
}

/// Client-settable directory fields, used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectoryCreate {
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

/// Directory update payload.
pub type DirectoryUpdate = DirectoryCreate;

impl From<&Directory> for DirectoryCreate {
    fn from(directory: &Directory) -> Self {
        Self {
            name: directory.name.clone(),
            description: directory.description.clone(),
            custom: directory.custom.clone(),
        }
    }
}

impl Hydrate for Directory {
    type Raw = DirectoryResponse;

    fn hydrate(raw: Self::Raw, handle: &Handle) -> Result<Self> {
        Ok(Self {
            base: raw.base,
            name: raw.name,
            description: raw.description,
            official: raw.official,
            custom: raw.custom,
            tenant: Relation::hydrate(raw.tenant, handle)?,
            applications: Relation::hydrate(raw.applications, handle)?,
            users: Relation::hydrate(raw.users, handle)?,
            usergroups: Relation::hydrate(raw.usergroups, handle)?,
            handle: handle.clone(),
        })
    }
}

impl Resource for Directory {
    const COLLECTION: &'static str = "directories";

    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Creatable for Directory {
    type Create = DirectoryCreate;
}

impl Updatable for Directory {
    type Update = DirectoryUpdate;

    fn to_update(&self) -> Self::Update {
        self.into()
    }

    fn keep_expanded(&mut self, previous: Self) {
        self.tenant.keep_expanded(previous.tenant);
        self.applications.keep_expanded(previous.applications);
        self.users.keep_expanded(previous.users);
        self.usergroups.keep_expanded(previous.usergroups);
    }
}

impl Directory {
    /// Push local changes to the API.
    pub async fn save(&mut self) -> Result<()> {
        self.handle.service::<Directory>().save(self).await
    }

    /// Delete this directory.
    pub async fn delete(self) -> Result<()> {
        self.handle.service::<Directory>().delete(self).await
    }
}
