//! Products service.

use crate::client::{PaginatedStream, RequestOptions};
use crate::models::{Page, Product, ProductCreate};
use crate::Result;

use super::ResourceService;

/// Service for the tenant's products.
pub type ProductsService = ResourceService<Product>;

impl ProductsService {
    /// List products of the current tenant.
    pub async fn list(&self, options: Option<RequestOptions>) -> Result<Page<Product>> {
        self.list_in_tenant(options).await
    }

    /// Stream every product of the current tenant.
    pub async fn stream(&self, options: Option<RequestOptions>) -> Result<PaginatedStream<Product>> {
        self.stream_in_tenant(options).await
    }

    /// Create a product in the current tenant.
    pub async fn create(&self, request: &ProductCreate) -> Result<Product> {
        self.create_in_tenant(request).await
    }
}
