//! Export models.
//!
//! An export shares part of one tenant's model with another tenant. The
//! exported model is described by `model_type`; device exports additionally
//! name the [`Product`] they apply to. Exports may be narrowed by a limits
//! resource whose kind is given by `limits_type`.

use serde::{Deserialize, Serialize};

use super::primitives::{Link, ModelBase};
use super::relation::{RawRelation, Relation};
use super::resource::{Creatable, Handle, Hydrate, Resource, Updatable};
use super::{Application, Cluster, Device, Group, Product, Tenant};
use crate::{Error, Result};

/// `model_type` of exports that carry a product.
pub const DEVICE_MODEL: &str = "DEVICE";

/// One permission line of an export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEntry {
    /// Kind of the exported item
    #[serde(rename = "type", default)]
    pub entry_type: String,
    /// Name of the exported item
    #[serde(default)]
    pub name: String,
    /// Importer may read
    #[serde(default)]
    pub read: bool,
    /// Importer may write
    #[serde(default)]
    pub write: bool,
    /// Importer may grant read further
    #[serde(default)]
    pub grant_read: bool,
    /// Importer may grant write further
    #[serde(default)]
    pub grant_write: bool,
}

/// Resource an export is limited to, by `limits_type`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportLimits {
    /// `DEVICE` limits
    Device(Device),
    /// `GROUP` limits
    Group(Group),
    /// `CLUSTER` limits
    Cluster(Cluster),
}

/// A CloudThing export.
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    /// Base fields
    pub base: ModelBase,
    /// Exported model kind, e.g. `DEVICE`
    pub model_type: String,
    /// Kind of the limits resource: `DEVICE`, `GROUP`, `CLUSTER` or empty
    pub limits_type: String,
    /// Permission lines
    pub export: Vec<ExportEntry>,
    /// Permission granted to the exporting tenant
    pub tenant_exporting_permission: String,
    /// Limits resource; never expanded, see [`Export::fetch_limits`]
    pub limits: Option<Link>,
    /// Exported product, for device exports
    pub product: Relation<Product>,
    /// Exporting tenant
    pub tenant_exp: Relation<Tenant>,
    /// Importing tenant
    pub tenant_imp: Relation<Tenant>,
    /// Application the export belongs to
    pub application: Relation<Application>,
    /// Export granting the exporting tenant its permission
    pub tenant_exporting_permission_export: Relation<Export>,
    handle: Handle,
}

/// Export as sent by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    #[serde(flatten)]
    pub(crate) base: ModelBase,
    #[serde(default)]
    pub(crate) model_type: Option<String>,
    #[serde(default)]
    pub(crate) limits_type: Option<String>,
    #[serde(default)]
    pub(crate) export: Option<Vec<ExportEntry>>,
    #[serde(default)]
    pub(crate) tenant_exporting_permission: Option<String>,
    #[serde(default)]
    pub(crate) limits: Option<Link>,
    pub(crate) product: Option<RawRelation>,
    pub(crate) tenant_exp: Option<RawRelation>,
    pub(crate) tenant_imp: Option<RawRelation>,
    pub(crate) application: Option<RawRelation>,
    pub(crate) tenant_exporting_permission_export: Option<RawRelation>,
}

/// Client-settable export fields, used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportCreate {
    /// Exported model kind
    #[serde(skip_serializing_if = "String::is_empty")]
    pub model_type: String,
    /// Kind of the limits resource
    #[serde(skip_serializing_if = "String::is_empty")]
    pub limits_type: String,
    /// Permission lines
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub export: Vec<ExportEntry>,
    /// Permission granted to the exporting tenant
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tenant_exporting_permission: String,
    /// Limits resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<Link>,
    /// Exported product
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Link>,
    /// Importing tenant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_imp: Option<Link>,
    /// Owning application
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<Link>,
}

/// Export update payload.
pub type ExportUpdate = ExportCreate;

impl From<&Export> for ExportCreate {
    fn from(export: &Export) -> Self {
        Self {
            model_type: export.model_type.clone(),
            limits_type: export.limits_type.clone(),
            export: export.export.clone(),
            tenant_exporting_permission: export.tenant_exporting_permission.clone(),
            limits: export.limits.clone(),
            product: export.product.to_link(),
            tenant_imp: export.tenant_imp.to_link(),
            application: export.application.to_link(),
        }
    }
}

impl Hydrate for Export {
    type Raw = ExportResponse;

    fn hydrate(raw: Self::Raw, handle: &Handle) -> Result<Self> {
        Ok(Self {
            base: raw.base,
            model_type: raw.model_type.unwrap_or_default(),
            limits_type: raw.limits_type.unwrap_or_default(),
            export: raw.export.unwrap_or_default(),
            tenant_exporting_permission: raw.tenant_exporting_permission.unwrap_or_default(),
            limits: raw.limits.filter(|l| !l.href.is_empty()),
            product: Relation::hydrate(raw.product, handle)?,
            tenant_exp: Relation::hydrate(raw.tenant_exp, handle)?,
            tenant_imp: Relation::hydrate(raw.tenant_imp, handle)?,
            application: Relation::hydrate(raw.application, handle)?,
            tenant_exporting_permission_export: Relation::hydrate(
                raw.tenant_exporting_permission_export,
                handle,
            )?,
            handle: handle.clone(),
        })
    }
}

impl Resource for Export {
    const COLLECTION: &'static str = "exports";

    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Creatable for Export {
    type Create = ExportCreate;
}

impl Updatable for Export {
    type Update = ExportUpdate;

    fn to_update(&self) -> Self::Update {
        self.into()
    }

    fn keep_expanded(&mut self, previous: Self) {
        self.product.keep_expanded(previous.product);
        self.tenant_exp.keep_expanded(previous.tenant_exp);
        self.tenant_imp.keep_expanded(previous.tenant_imp);
        self.application.keep_expanded(previous.application);
        self.tenant_exporting_permission_export
            .keep_expanded(previous.tenant_exporting_permission_export);
    }
}

impl Export {
    /// Whether this export shares devices.
    pub fn is_device_export(&self) -> bool {
        self.model_type == DEVICE_MODEL
    }

    /// Point a device export at `product`. Takes effect on [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] unless `model_type` is `DEVICE`.
    pub fn set_product(&mut self, product: &Product) -> Result<()> {
        if !self.is_device_export() {
            return Err(Error::InvalidInput(format!(
                "export model is {:?}, products only apply to {DEVICE_MODEL} exports",
                self.model_type
            )));
        }
        self.product = Relation::from_href(product.href());
        Ok(())
    }

    /// Fetch the resource this export is limited to.
    ///
    /// Returns `None` when the export has no limits or declares a kind this
    /// client does not know.
    pub async fn fetch_limits(&self) -> Result<Option<ExportLimits>> {
        if !matches!(self.limits_type.as_str(), "DEVICE" | "GROUP" | "CLUSTER") {
            return Ok(None);
        }
        let Some(href) = self.limits.as_ref().map(|l| l.href.as_str()) else {
            return Err(Error::InvalidInput(format!(
                "export declares {} limits without a limits link",
                self.limits_type
            )));
        };

        let limits = match self.limits_type.as_str() {
            "DEVICE" => ExportLimits::Device(
                self.handle.service::<Device>().get_by_link(href, None).await?,
            ),
            "GROUP" => ExportLimits::Group(
                self.handle.service::<Group>().get_by_link(href, None).await?,
            ),
            _ => ExportLimits::Cluster(
                self.handle.service::<Cluster>().get_by_link(href, None).await?,
            ),
        };
        Ok(Some(limits))
    }

    /// Push local changes to the API.
    pub async fn save(&mut self) -> Result<()> {
        self.handle.service::<Export>().save(self).await
    }

    /// Delete this export.
    pub async fn delete(self) -> Result<()> {
        self.handle.service::<Export>().delete(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn export(model_type: &str) -> Export {
        let raw: ExportResponse = serde_json::from_value(json!({
            "href": "https://acme.cloudthing.io/api/v1/exports/e1",
            "modelType": model_type,
            "export": [{
                "type": "DATA", "name": "temp",
                "read": true, "write": false, "grantRead": false, "grantWrite": false
            }],
            "tenantImp": { "href": "https://acme.cloudthing.io/api/v1/tenants/T2" }
        }))
        .unwrap();
        Export::hydrate(raw, &Handle::detached()).unwrap()
    }

    fn product() -> Product {
        let raw = serde_json::from_value(json!({
            "href": "https://acme.cloudthing.io/api/v1/products/p1",
            "name": "Thermostat"
        }))
        .unwrap();
        Product::hydrate(raw, &Handle::detached()).unwrap()
    }

    #[test]
    fn test_set_product_on_device_export() {
        let mut export = export("DEVICE");
        export.set_product(&product()).unwrap();

        let payload = serde_json::to_value(export.to_update()).unwrap();
        assert_eq!(
            payload["product"],
            json!({ "href": "https://acme.cloudthing.io/api/v1/products/p1" })
        );
        assert_eq!(payload["export"][0]["grantRead"], false);
        assert_eq!(payload["export"][0]["type"], "DATA");
        assert!(payload.get("href").is_none());
    }

    #[test]
    fn test_set_product_rejected_for_other_models() {
        let mut export = export("APPLICATION");
        let err = export.set_product(&product()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(export.product.is_absent());
    }

    #[tokio::test]
    async fn test_fetch_limits_without_limits() {
        let export = export("DEVICE");
        assert!(export.fetch_limits().await.unwrap().is_none());
    }
}
