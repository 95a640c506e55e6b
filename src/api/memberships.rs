//! Membership services: user/usergroup, device/cluster and device/group.

use crate::client::RequestOptions;
use crate::models::{
    Cluster, ClusterMembership, ClusterMembershipCreate, Device, Group, GroupMembership,
    GroupMembershipCreate, Membership, MembershipCreate, Page, Resource, User, Usergroup,
};
use crate::Result;

use super::resource::scoped;
use super::ResourceService;

/// Service for user-to-usergroup memberships.
pub type MembershipsService = ResourceService<Membership>;

/// Service for device-to-cluster memberships.
///
/// # Example
///
/// ```no_run
/// use cloudthing_rs::models::ClusterMembershipCreate;
///
/// # async fn example(client: cloudthing_rs::CloudThingClient) -> cloudthing_rs::Result<()> {
/// let request = ClusterMembershipCreate::new(
///     "https://acme.cloudthing.io/api/v1/devices/d1",
///     "https://acme.cloudthing.io/api/v1/clusters/c1",
/// );
/// let membership = client.cluster_memberships().create_by_cluster("c1", &request).await?;
///
/// // Removing the device again
/// membership.delete().await?;
/// # Ok(())
/// # }
/// ```
pub type ClusterMembershipsService = ResourceService<ClusterMembership>;

/// Service for device-to-group memberships.
pub type GroupMembershipsService = ResourceService<GroupMembership>;

const USER_MEMBERSHIPS: &str = "memberships";
const CLUSTER_MEMBERSHIPS: &str = "memberships";

impl MembershipsService {
    /// List usergroup memberships of a user.
    pub async fn list_by_user(
        &self,
        user_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<Page<Membership>> {
        self.list_by_link(&scoped::<User>(user_id, USER_MEMBERSHIPS), options)
            .await
    }

    /// List memberships of a usergroup.
    pub async fn list_by_usergroup(
        &self,
        usergroup_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<Page<Membership>> {
        self.list_by_link(&scoped::<Usergroup>(usergroup_id, USER_MEMBERSHIPS), options)
            .await
    }

    /// Add a user to a usergroup, through the user.
    pub async fn create_by_user(
        &self,
        user_id: &str,
        request: &MembershipCreate,
    ) -> Result<Membership> {
        self.create_by_link(&scoped::<User>(user_id, USER_MEMBERSHIPS), request)
            .await
    }

    /// Add a user to a usergroup, through the usergroup.
    pub async fn create_by_usergroup(
        &self,
        usergroup_id: &str,
        request: &MembershipCreate,
    ) -> Result<Membership> {
        self.create_by_link(&scoped::<Usergroup>(usergroup_id, USER_MEMBERSHIPS), request)
            .await
    }
}

impl ClusterMembershipsService {
    /// List cluster memberships of a device.
    pub async fn list_by_device(
        &self,
        device_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<Page<ClusterMembership>> {
        self.list_by_link(
            &scoped::<Device>(device_id, ClusterMembership::COLLECTION),
            options,
        )
        .await
    }

    /// List device memberships of a cluster.
    pub async fn list_by_cluster(
        &self,
        cluster_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<Page<ClusterMembership>> {
        self.list_by_link(&scoped::<Cluster>(cluster_id, CLUSTER_MEMBERSHIPS), options)
            .await
    }

    /// Add a device to a cluster, through the device.
    pub async fn create_by_device(
        &self,
        device_id: &str,
        request: &ClusterMembershipCreate,
    ) -> Result<ClusterMembership> {
        self.create_by_link(
            &scoped::<Device>(device_id, ClusterMembership::COLLECTION),
            request,
        )
        .await
    }

    /// Add a device to a cluster, through the cluster.
    pub async fn create_by_cluster(
        &self,
        cluster_id: &str,
        request: &ClusterMembershipCreate,
    ) -> Result<ClusterMembership> {
        self.create_by_link(&scoped::<Cluster>(cluster_id, CLUSTER_MEMBERSHIPS), request)
            .await
    }
}

impl GroupMembershipsService {
    /// List group memberships of a device.
    pub async fn list_by_device(
        &self,
        device_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<Page<GroupMembership>> {
        self.list_by_link(
            &scoped::<Device>(device_id, GroupMembership::COLLECTION),
            options,
        )
        .await
    }

    /// List device memberships of a group.
    pub async fn list_by_group(
        &self,
        group_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<Page<GroupMembership>> {
        self.list_by_link(
            &scoped::<Group>(group_id, GroupMembership::COLLECTION),
            options,
        )
        .await
    }

    /// Add a device to a group, through the device.
    pub async fn create_by_device(
        &self,
        device_id: &str,
        request: &GroupMembershipCreate,
    ) -> Result<GroupMembership> {
        self.create_by_link(
            &scoped::<Device>(device_id, GroupMembership::COLLECTION),
            request,
        )
        .await
    }

    /// Add a device to a group, through the group.
    pub async fn create_by_group(
        &self,
        group_id: &str,
        request: &GroupMembershipCreate,
    ) -> Result<GroupMembership> {
        self.create_by_link(
            &scoped::<Group>(group_id, GroupMembership::COLLECTION),
            request,
        )
        .await
    }
}
