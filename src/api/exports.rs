//! Exports service.

use crate::client::{PaginatedStream, RequestOptions};
use crate::models::{Application, Export, ExportCreate, Page, Resource};
use crate::Result;

use super::resource::scoped;
use super::ResourceService;

/// Service for model exports between tenants.
pub type ExportsService = ResourceService<Export>;

impl ExportsService {
    /// List exports of the current tenant.
    pub async fn list(&self, options: Option<RequestOptions>) -> Result<Page<Export>> {
        self.list_in_tenant(options).await
    }

    /// Stream every export of the current tenant.
    pub async fn stream(&self, options: Option<RequestOptions>) -> Result<PaginatedStream<Export>> {
        self.stream_in_tenant(options).await
    }

    /// List exports of an application.
    pub async fn list_by_application(
        &self,
        application_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<Page<Export>> {
        self.list_by_link(&by_application(application_id), options)
            .await
    }

    /// Create an export in the current tenant.
    pub async fn create(&self, request: &ExportCreate) -> Result<Export> {
        self.create_in_tenant(request).await
    }

    /// Create an export under an application.
    pub async fn create_by_application(
        &self,
        application_id: &str,
        request: &ExportCreate,
    ) -> Result<Export> {
        self.create_by_link(&by_application(application_id), request)
            .await
    }
}

fn by_application(id: &str) -> String {
    scoped::<Application>(id, Export::COLLECTION)
}
