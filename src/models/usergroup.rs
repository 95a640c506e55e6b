//! Usergroup models.

use serde::{Deserialize, Serialize};

use super::primitives::{nullable, Custom, ModelBase};
use super::relation::{RawRelation, Relation};
use super::resource::{Creatable, Handle, Hydrate, Resource, Updatable};
use super::{Directory, Membership, Tenant, User};
use crate::Result;

/// A named set of users within a directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Usergroup {
    /// Base fields
    pub base: ModelBase,
    /// Display name
    pub name: String,
    /// Custom attributes
    pub custom: Custom,
    /// Owning tenant
    pub tenant: Relation<Tenant>,
    /// Directory holding the group
    pub directory: Relation<Directory>,
    /// Member users
    pub users: Relation<Vec<User>>,
    /// User memberships
    pub memberships: Relation<Vec<Membership>>,
    handle: Handle,
}

/// Usergroup as sent by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct UsergroupResponse {
    #[serde(flatten)]
    pub(crate) base: ModelBase,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) custom: Custom,
    pub(crate) tenant: Option<RawRelation>,
    pub(crate) directory: Option<RawRelation>,
    pub(crate) users: Option<RawRelation>,
    pub(crate) memberships: Option<RawRelation>,
}

/// Client-settable usergroup fields, used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsergroupCreate {
    /// Display name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Custom attributes
    #[serde(skip_serializing_if = "Custom::is_empty")]
    pub custom: Custom,
}

/// Usergroup update payload.
pub type UsergroupUpdate = UsergroupCreate;

impl From<&Usergroup> for UsergroupCreate {
    fn from(group: &Usergroup) -> Self {
        Self {
            name: group.name.clone(),
            custom: group.custom.clone(),
        }
    }
}

impl Hydrate for Usergroup {
    type Raw = UsergroupResponse;

    fn hydrate(raw: Self::Raw, handle: &Handle) -> Result<Self> {
        Ok(Self {
            base: raw.base,
            name: raw.name,
            custom: raw.custom,
            tenant: Relation::hydrate(raw.tenant, handle)?,
            directory: Relation::hydrate(raw.directory, handle)?,
            users: Relation::hydrate(raw.users, handle)?,
            memberships: Relation::hydrate(raw.memberships, handle)?,
            handle: handle.clone(),
        })
    }
}

impl Resource for Usergroup {
    const COLLECTION: &'static str = "usergroups";

    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Creatable for Usergroup {
    type Create = UsergroupCreate;
}

impl Updatable for Usergroup {
    type Update = UsergroupUpdate;

    fn to_update(&self) -> Self::Update {
        self.into()
    }

    fn keep_expanded(&mut self, previous: Self) {
        self.tenant.keep_expanded(previous.tenant);
        self.directory.keep_expanded(previous.directory);
        self.users.keep_expanded(previous.users);
        self.memberships.keep_expanded(previous.memberships);
    }
}

impl Usergroup {
    /// Push local changes to the API.
    pub async fn save(&mut self) -> Result<()> {
        self.handle.service::<Usergroup>().save(self).await
    }

    /// Delete this usergroup.
    pub async fn delete(self) -> Result<()> {
        self.handle.service::<Usergroup>().delete(self).await
    }
}
