//! Clusters service.

use crate::client::RequestOptions;
use crate::models::{Application, Cluster, ClusterCreate, Device, Page, Resource};
use crate::Result;

use super::resource::scoped;
use super::ResourceService;

/// Service for clusters.
///
/// # Example
///
/// ```no_run
/// use cloudthing_rs::RequestOptions;
///
/// # async fn example(client: cloudthing_rs::CloudThingClient) -> cloudthing_rs::Result<()> {
/// let page = client
///     .clusters()
///     .list_by_application("app-1", Some(RequestOptions::new().paginate(1, 50)))
///     .await?;
/// for cluster in &page {
///     println!("{}: {}", cluster.name, cluster.description);
/// }
/// # Ok(())
/// # }
/// ```
pub type ClustersService = ResourceService<Cluster>;

impl ClustersService {
    /// List clusters of an application.
    pub async fn list_by_application(
        &self,
        application_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<Page<Cluster>> {
        self.list_by_link(
            &scoped::<Application>(application_id, Cluster::COLLECTION),
            options,
        )
        .await
    }

    /// List clusters a device belongs to.
    pub async fn list_by_device(
        &self,
        device_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<Page<Cluster>> {
        self.list_by_link(&scoped::<Device>(device_id, Cluster::COLLECTION), options)
            .await
    }

    /// Create a cluster under an application.
    pub async fn create_by_application(
        &self,
        application_id: &str,
        request: &ClusterCreate,
    ) -> Result<Cluster> {
        self.create_by_link(
            &scoped::<Application>(application_id, Cluster::COLLECTION),
            request,
        )
        .await
    }
}
