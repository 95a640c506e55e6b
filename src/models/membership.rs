//! Membership models: join resources between users and usergroups, and
//! between devices and clusters or groups.
//!
//! Memberships carry no scalars of their own and cannot be updated; they
//! are created from two links and deleted when the association ends.

use serde::{Deserialize, Serialize};

use super::primitives::{Link, ModelBase};
use super::relation::{RawRelation, Relation};
use super::resource::{Creatable, Handle, Hydrate, Resource};
use super::{Application, Cluster, Device, Group, User, Usergroup};
use crate::Result;

/// Membership of a user in a usergroup.
#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
    /// Base fields
    pub base: ModelBase,
    /// Member user
    pub user: Relation<User>,
    /// Usergroup joined
    pub usergroup: Relation<Usergroup>,
    handle: Handle,
}

/// Membership as sent by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct MembershipResponse {
    #[serde(flatten)]
    pub(crate) base: ModelBase,
    pub(crate) user: Option<RawRelation>,
    pub(crate) usergroup: Option<RawRelation>,
}

/// Payload for creating a user membership.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MembershipCreate {
    /// User to add
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Link>,
    /// Usergroup to join
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usergroup: Option<Link>,
}

impl MembershipCreate {
    /// Join `user` to `usergroup`.
    pub fn new(user: impl Into<Link>, usergroup: impl Into<Link>) -> Self {
        Self {
            user: Some(user.into()),
            usergroup: Some(usergroup.into()),
        }
    }
}

impl From<&Membership> for MembershipCreate {
    fn from(membership: &Membership) -> Self {
        Self {
            user: membership.user.to_link(),
            usergroup: membership.usergroup.to_link(),
        }
    }
}

impl Hydrate for Membership {
    type Raw = MembershipResponse;

    fn hydrate(raw: Self::Raw, handle: &Handle) -> Result<Self> {
        Ok(Self {
            base: raw.base,
            user: Relation::hydrate(raw.user, handle)?,
            usergroup: Relation::hydrate(raw.usergroup, handle)?,
            handle: handle.clone(),
        })
    }
}

impl Resource for Membership {
    const COLLECTION: &'static str = "memberships";

    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Creatable for Membership {
    type Create = MembershipCreate;
}

impl Membership {
    /// Remove the user from the usergroup.
    pub async fn delete(self) -> Result<()> {
        self.handle.service::<Membership>().delete(self).await
    }
}

/// Membership of a device in a cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterMembership {
    /// Base fields
    pub base: ModelBase,
    /// Member device
    pub device: Relation<Device>,
    /// Cluster joined
    pub cluster: Relation<Cluster>,
    /// Application owning the cluster
    pub application: Relation<Application>,
    handle: Handle,
}

/// Cluster membership as sent by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterMembershipResponse {
    #[serde(flatten)]
    pub(crate) base: ModelBase,
    pub(crate) device: Option<RawRelation>,
    pub(crate) cluster: Option<RawRelation>,
    pub(crate) application: Option<RawRelation>,
}

/// Payload for adding a device to a cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterMembershipCreate {
    /// Device to add
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Link>,
    /// Cluster to join
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<Link>,
}

impl ClusterMembershipCreate {
    /// Add `device` to `cluster`.
    pub fn new(device: impl Into<Link>, cluster: impl Into<Link>) -> Self {
        Self {
            device: Some(device.into()),
            cluster: Some(cluster.into()),
        }
    }
}

impl From<&ClusterMembership> for ClusterMembershipCreate {
    fn from(membership: &ClusterMembership) -> Self {
        Self {
            device: membership.device.to_link(),
            cluster: membership.cluster.to_link(),
        }
    }
}

impl Hydrate for ClusterMembership {
    type Raw = ClusterMembershipResponse;

    fn hydrate(raw: Self::Raw, handle: &Handle) -> Result<Self> {
        Ok(Self {
            base: raw.base,
            device: Relation::hydrate(raw.device, handle)?,
            cluster: Relation::hydrate(raw.cluster, handle)?,
            application: Relation::hydrate(raw.application, handle)?,
            handle: handle.clone(),
        })
    }
}

impl Resource for ClusterMembership {
    const COLLECTION: &'static str = "clusterMemberships";

    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Creatable for ClusterMembership {
    type Create = ClusterMembershipCreate;
}

impl ClusterMembership {
    /// Remove the device from the cluster.
    pub async fn delete(self) -> Result<()> {
        self.handle.service::<ClusterMembership>().delete(self).await
    }
}

/// Membership of a device in a group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMembership {
    /// Base fields
    pub base: ModelBase,
    /// Member device
    pub device: Relation<Device>,
    /// Group joined
    pub group: Relation<Group>,
    handle: Handle,
}

/// Group membership as sent by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupMembershipResponse {
    #[serde(flatten)]
    pub(crate) base: ModelBase,
    pub(crate) device: Option<RawRelation>,
    pub(crate) group: Option<RawRelation>,
}

/// Payload for adding a device to a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupMembershipCreate {
    /// Device to add
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Link>,
    /// Group to join
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Link>,
}

impl GroupMembershipCreate {
    /// Add `device` to `group`.
    pub fn new(device: impl Into<Link>, group: impl Into<Link>) -> Self {
        Self {
            device: Some(device.into()),
            group: Some(group.into()),
        }
    }
}

impl From<&GroupMembership> for GroupMembershipCreate {
    fn from(membership: &GroupMembership) -> Self {
        Self {
            device: membership.device.to_link(),
            group: membership.group.to_link(),
        }
    }
}

impl Hydrate for GroupMembership {
    type Raw = GroupMembershipResponse;

    fn hydrate(raw: Self::Raw, handle: &Handle) -> Result<Self> {
        Ok(Self {
            base: raw.base,
            device: Relation::hydrate(raw.device, handle)?,
            group: Relation::hydrate(raw.group, handle)?,
            handle: handle.clone(),
        })
    }
}

impl Resource for GroupMembership {
    const COLLECTION: &'static str = "groupMemberships";

    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Creatable for GroupMembership {
    type Create = GroupMembershipCreate;
}

impl GroupMembership {
    /// Remove the device from the group.
    pub async fn delete(self) -> Result<()> {
        self.handle.service::<GroupMembership>().delete(self).await
    }
}
