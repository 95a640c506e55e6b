//! Devices service.

use crate::client::RequestOptions;
use crate::models::{Application, Cluster, Device, DeviceCreate, Group, Page, Product, Resource};
use crate::Result;

use super::resource::scoped;
use super::ResourceService;

/// Service for devices.
///
/// Devices are always listed through a parent: a cluster, application,
/// group or product. New devices are created from a product.
///
/// # Example
///
/// ```no_run
/// use cloudthing_rs::models::DeviceCreate;
///
/// # async fn example(client: cloudthing_rs::CloudThingClient) -> cloudthing_rs::Result<()> {
/// let device = client
///     .devices()
///     .create_by_product("p1", &DeviceCreate::default())
///     .await?;
/// println!("new device token: {}", device.token);
/// # Ok(())
/// # }
/// ```
pub type DevicesService = ResourceService<Device>;

impl DevicesService {
    /// List devices of a cluster.
    pub async fn list_by_cluster(
        &self,
        cluster_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<Page<Device>> {
        self.list_by_link(&scoped::<Cluster>(cluster_id, Device::COLLECTION), options)
            .await
    }

    /// List devices of an application.
    pub async fn list_by_application(
        &self,
        application_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<Page<Device>> {
        self.list_by_link(
            &scoped::<Application>(application_id, Device::COLLECTION),
            options,
        )
        .await
    }

    /// List devices of a group.
    pub async fn list_by_group(
        &self,
        group_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<Page<Device>> {
        self.list_by_link(&scoped::<Group>(group_id, Device::COLLECTION), options)
            .await
    }

    /// List devices built from a product.
    pub async fn list_by_product(
        &self,
        product_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<Page<Device>> {
        self.list_by_link(&scoped::<Product>(product_id, Device::COLLECTION), options)
            .await
    }

    /// Create a device from a product.
    pub async fn create_by_product(
        &self,
        product_id: &str,
        request: &DeviceCreate,
    ) -> Result<Device> {
        self.create_by_link(&scoped::<Product>(product_id, Device::COLLECTION), request)
            .await
    }
}
