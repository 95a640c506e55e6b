//! Usergroups service.

use crate::client::RequestOptions;
use crate::models::{Directory, Page, Resource, Usergroup, UsergroupCreate};
use crate::Result;

use super::resource::scoped;
use super::ResourceService;

/// Service for usergroups.
pub type UsergroupsService = ResourceService<Usergroup>;

impl UsergroupsService {
    /// List usergroups of a directory.
    pub async fn list_by_directory(
        &self,
        directory_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<Page<Usergroup>> {
        self.list_by_link(
            &scoped::<Directory>(directory_id, Usergroup::COLLECTION),
            options,
        )
        .await
    }

    /// Create a usergroup in a directory.
    pub async fn create_by_directory(
        &self,
        directory_id: &str,
        request: &UsergroupCreate,
    ) -> Result<Usergroup> {
        self.create_by_link(
            &scoped::<Directory>(directory_id, Usergroup::COLLECTION),
            request,
        )
        .await
    }
}
