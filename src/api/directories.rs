//! Directories service.

use crate::client::{PaginatedStream, RequestOptions};
use crate::models::{Directory, DirectoryCreate, Page};
use crate::Result;

use super::ResourceService;

/// Service for the tenant's user directories.
pub type DirectoriesService = ResourceService<Directory>;

impl DirectoriesService {
    /// List directories of the current tenant.
    pub async fn list(&self, options: Option<RequestOptions>) -> Result<Page<Directory>> {
        self.list_in_tenant(options).await
    }

    /// Stream every directory of the current tenant.
    pub async fn stream(&self, options: Option<RequestOptions>) -> Result<PaginatedStream<Directory>> {
        self.stream_in_tenant(options).await
    }

    /// Create a directory in the current tenant.
    pub async fn create(&self, request: &DirectoryCreate) -> Result<Directory> {
        self.create_in_tenant(request).await
    }
}
