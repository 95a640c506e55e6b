//! Tenant service.

use crate::client::RequestOptions;
use crate::models::Tenant;
use crate::Result;

use super::ResourceService;

/// Service for the tenant the session belongs to.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: cloudthing_rs::CloudThingClient) -> cloudthing_rs::Result<()> {
/// let mut tenant = client.tenant().get(None).await?;
/// tenant.name = "Acme Industries".into();
/// tenant.save().await?;
/// # Ok(())
/// # }
/// ```
pub type TenantService = ResourceService<Tenant>;

impl TenantService {
    /// Get the current tenant.
    ///
    /// Uses `tenants/{id}` when the session knows its tenant and
    /// `tenants/current` otherwise.
    pub async fn get(&self, options: Option<RequestOptions>) -> Result<Tenant> {
        let endpoint = match self.inner().session.tenant_id().await {
            Some(id) if !id.is_empty() => format!("tenants/{id}"),
            _ => "tenants/current".to_string(),
        };
        self.get_following_redirect(&endpoint, options).await
    }
}
