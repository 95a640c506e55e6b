//! Application models.

use serde::{Deserialize, Serialize};

use super::primitives::{nullable, Custom, Link, ModelBase};
use super::relation::{RawRelation, Relation};
use super::resource::{Creatable, Handle, Hydrate, Resource, Updatable};
use super::{Cluster, Device, Directory, Tenant};
use crate::Result;

/// A CloudThing application.
///
/// Applications tie a user [`Directory`] to the devices and clusters they
/// manage.
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    /// Base fields
    pub base: ModelBase,
    /// Display name
    pub name: String,
    /// Whether this is the tenant's built-in application
    pub official: Option<bool>,
    /// Free-form description
    pub description: String,
    /// Lifecycle status, e.g. `ENABLED`
    pub status: String,
    /// Custom attributes
    pub custom: Custom,
    /// Owning tenant
    pub tenant: Relation<Tenant>,
    /// Directory whose users may sign in to the application
    pub directory: Relation<Directory>,
    /// Devices of the application
    pub devices: Relation<Vec<Device>>,
    /// Clusters of the application
    pub clusters: Relation<Vec<Cluster>>,
    handle: Handle,
}

/// Application as sent by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    #[serde(flatten)]
    pub(crate) base: ModelBase,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) official: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) status: String,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) custom: Custom,
    pub(crate) tenant: Option<RawRelation>,
    pub(crate) directory: Option<RawRelation>,
    pub(crate) devices: Option<RawRelation>,
    pub(crate) clusters: Option<RawRelation>,
}

/// Payload for creating an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplicationCreate {
    /// Display name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Free-form description
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Lifecycle status
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// Custom attributes
    #[serde(skip_serializing_if = "Custom::is_empty")]
    pub custom: Custom,
    /// Directory to bind; fixed after creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<Link>,
}

/// Payload for updating an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplicationUpdate {
    /// Display name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Free-form description
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Lifecycle status
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// Custom attributes
    #[serde(skip_serializing_if = "Custom::is_empty")]
    pub custom: Custom,
}

impl From<&Application> for ApplicationCreate {
    fn from(app: &Application) -> Self {
        Self {
            name: app.name.clone(),
            description: app.description.clone(),
            status: app.status.clone(),
            custom: app.custom.clone(),
            directory: app.directory.to_link(),
        }
    }
}

impl From<&Application> for ApplicationUpdate {
    fn from(app: &Application) -> Self {
        Self {
            name: app.name.clone(),
            description: app.description.clone(),
            status: app.status.clone(),
            custom: app.custom.clone(),
        }
    }
}

impl Hydrate for Application {
    type Raw = ApplicationResponse;

    fn hydrate(raw: Self::Raw, handle: &Handle) -> Result<Self> {
        Ok(Self {
            base: raw.base,
            name: raw.name,
            official: raw.official,
            description: raw.description,
            status: raw.status,
            custom: raw.custom,
            tenant: Relation::hydrate(raw.tenant, handle)?,
            directory: Relation::hydrate(raw.directory, handle)?,
            devices: Relation::hydrate(raw.devices, handle)?,
            clusters: Relation::hydrate(raw.clusters, handle)?,
            handle: handle.clone(),
        })
    }
}

impl Resource for Application {
    const COLLECTION: &'static str = "applications";

    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Creatable for Application {
    type Create = ApplicationCreate;
}

impl Updatable for Application {
    type Update = ApplicationUpdate;

    fn to_update(&self) -> Self::Update {
        self.into()
    }

    fn keep_expanded(&mut self, previous: Self) {
        self.tenant.keep_expanded(previous.tenant);
        self.directory.keep_expanded(previous.directory);
        self.devices.keep_expanded(previous.devices);
        self.clusters.keep_expanded(previous.clusters);
    }
}

impl Application {
    /// Push local changes to the API. The directory binding is not sent.
    pub async fn save(&mut self) -> Result<()> {
        self.handle.service::<Application>().save(self).await
    }

    /// Delete this application.
    pub async fn delete(self) -> Result<()> {
        self.handle.service::<Application>().delete(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Application {
        let raw: ApplicationResponse = serde_json::from_value(json!({
            "href": "https://acme.cloudthing.io/api/v1/applications/abc",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z",
            "name": "Fleet",
            "status": "ENABLED",
            "official": false,
            "directory": {
                "href": "https://acme.cloudthing.io/api/v1/directories/dir1",
                "name": "Staff"
            }
        }))
        .unwrap();
        Application::hydrate(raw, &Handle::detached()).unwrap()
    }

    #[test]
    fn test_expanded_directory() {
        let app = sample();
        assert_eq!(
            app.directory.link(),
            (true, "https://acme.cloudthing.io/api/v1/directories/dir1")
        );
        let dir = app.directory.get().unwrap();
        assert_eq!(dir.href(), "https://acme.cloudthing.io/api/v1/directories/dir1");
        assert_eq!(dir.name, "Staff");
        assert_eq!(app.official, Some(false));
    }

    #[test]
    fn test_create_carries_directory_link_update_does_not() {
        let app = sample();

        let create = serde_json::to_value(ApplicationCreate::from(&app)).unwrap();
        assert_eq!(
            create,
            json!({
                "name": "Fleet",
                "status": "ENABLED",
                "directory": { "href": "https://acme.cloudthing.io/api/v1/directories/dir1" }
            })
        );

        let update = serde_json::to_value(app.to_update()).unwrap();
        assert_eq!(update, json!({ "name": "Fleet", "status": "ENABLED" }));
    }
}
