//! Applications service.

use crate::client::{PaginatedStream, RequestOptions};
use crate::models::{Application, ApplicationCreate, Page};
use crate::Result;

use super::ResourceService;

/// Service for the tenant's applications.
///
/// # Example
///
/// ```no_run
/// use cloudthing_rs::RequestOptions;
///
/// # async fn example(client: cloudthing_rs::CloudThingClient) -> cloudthing_rs::Result<()> {
/// let app = client
///     .applications()
///     .get_by_id("abc", Some(RequestOptions::new().expand("directory")))
///     .await?;
///
/// if let Some(directory) = app.directory.get() {
///     println!("{} signs in through {}", app.name, directory.name);
/// }
/// # Ok(())
/// # }
/// ```
pub type ApplicationsService = ResourceService<Application>;

impl ApplicationsService {
    /// List applications of the current tenant.
    pub async fn list(&self, options: Option<RequestOptions>) -> Result<Page<Application>> {
        self.list_in_tenant(options).await
    }

    /// Stream every application of the current tenant.
    pub async fn stream(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<PaginatedStream<Application>> {
        self.stream_in_tenant(options).await
    }

    /// Create an application in the current tenant.
    pub async fn create(&self, request: &ApplicationCreate) -> Result<Application> {
        self.create_in_tenant(request).await
    }
}
