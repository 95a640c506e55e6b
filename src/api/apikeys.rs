//! API keys service.

use crate::client::{PaginatedStream, RequestOptions};
use crate::models::{Apikey, ApikeyCreate, Page};
use crate::Result;

use super::ResourceService;

/// Service for the tenant's API keys.
pub type ApikeysService = ResourceService<Apikey>;

impl ApikeysService {
    /// List API keys of the current tenant.
    pub async fn list(&self, options: Option<RequestOptions>) -> Result<Page<Apikey>> {
        self.list_in_tenant(options).await
    }

    /// Stream every API key of the current tenant.
    pub async fn stream(&self, options: Option<RequestOptions>) -> Result<PaginatedStream<Apikey>> {
        self.stream_in_tenant(options).await
    }

    /// Issue a new API key. The response carries the generated key and secret.
    pub async fn create(&self, request: &ApikeyCreate) -> Result<Apikey> {
        self.create_in_tenant(request).await
    }
}
