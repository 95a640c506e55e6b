//! Groups service.

use crate::client::RequestOptions;
use crate::models::{Cluster, Group, GroupCreate, Page, Resource};
use crate::Result;

use super::resource::scoped;
use super::ResourceService;

/// Service for device groups.
pub type GroupsService = ResourceService<Group>;

impl GroupsService {
    /// List groups of a cluster.
    pub async fn list_by_cluster(
        &self,
        cluster_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<Page<Group>> {
        self.list_by_link(&scoped::<Cluster>(cluster_id, Group::COLLECTION), options)
            .await
    }

    /// Create a group in the top-level `groups` collection.
    pub async fn create(&self, request: &GroupCreate) -> Result<Group> {
        self.create_by_link(Group::COLLECTION, request).await
    }
}
