//! # cloudthing-rs
//!
//! An async Rust client for the CloudThing IoT device-management API.
//!
//! This crate provides typed access to every resource of a CloudThing
//! tenant: directories, applications, products, devices, clusters, groups,
//! users, usergroups, memberships, API keys, exports and device telemetry.
//!
//! ## Features
//!
//! - **Authentication**: basic-credential exchange or a pre-issued bearer
//!   token, with the tenant derived from the token itself
//! - **Expand-or-link relations**: related resources requested with
//!   `expand` arrive hydrated; the rest stay as links you can resolve later
//! - **Typed CRUD**: one generic [`ResourceService`](api::ResourceService)
//!   behind every resource kind, with fixed status-code contracts
//! - **Pagination**: single pages or a lazy stream following `next` links
//! - **Telemetry**: data, events and commands of devices, clusters and groups
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cloudthing_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> cloudthing_rs::Result<()> {
//!     let client = CloudThingClient::new("https://acme.cloudthing.io")?;
//!     client.set_basic_auth("admin", "secret").await?;
//!
//!     let app = client
//!         .applications()
//!         .get_by_id("abc", Some(RequestOptions::new().expand("directory")))
//!         .await?;
//!     println!("{} uses directory {}", app.name, app.directory.link().1);
//!
//!     let clusters = client.clusters().list_by_application(app.id(), None).await?;
//!     println!("{} clusters", clusters.params.size);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Saving with expanded relations
//!
//! ```rust,no_run
//! use cloudthing_rs::prelude::*;
//!
//! # async fn example(client: CloudThingClient) -> cloudthing_rs::Result<()> {
//! let mut cluster = client
//!     .clusters()
//!     .get_by_id("c1", Some(RequestOptions::new().expand_paged("devices", 1, 100)))
//!     .await?;
//!
//! cluster.description = "second floor".into();
//! cluster.save().await?;
//!
//! // The update response only carries links, the devices stay hydrated.
//! assert!(cluster.devices.is_expanded());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use auth::{Session, Token};
pub use client::{
    ClientConfig, CloudThingClient, Expansion, PaginatedStream, Pagination, RequestOptions,
    TimeRange,
};
pub use error::{Error, Result};

/// Prelude module for convenient imports.
///
/// ```rust
/// use cloudthing_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::{Session, Token};
    pub use crate::client::{
        ClientConfig, CloudThingClient, Expansion, PaginatedStream, Pagination, RequestOptions,
        TimeRange,
    };
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Traits
        Creatable, Hydrate, Resource, TelemetryOwner, Updatable,
        // Building blocks
        Link, ListParams, ModelBase, Page, Relation,
        // Resources
        Apikey, Application, Cluster, ClusterMembership, Device, Directory, Export, Group,
        GroupMembership, Membership, Product, Tenant, User, Usergroup,
        // Telemetry
        CommandPoint, DataPoint, EventPoint,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_construction() {
        let client = CloudThingClient::new("https://acme.cloudthing.io/").unwrap();
        assert_eq!(
            client.base_url().as_str(),
            "https://acme.cloudthing.io/api/v1/"
        );
    }

    #[tokio::test]
    async fn test_services_share_the_session() {
        let client = CloudThingClient::new("https://acme.cloudthing.io").unwrap();
        let devices = client.devices();
        let applications = client.clone().applications();

        assert!(matches!(
            devices.tenant_collection().await,
            Err(Error::NotAuthenticated)
        ));

        let token = Token::new(
            auth::jwt(serde_json::json!({
                "iss": "https://acme.cloudthing.io/api/v1/tenants/T1",
                "exp": chrono::Utc::now().timestamp() + 60,
            })),
            "Bearer",
            60,
        );
        client.session().commit(token).await.unwrap();

        // Services handed out before the session changed see it too.
        assert_eq!(
            devices.tenant_collection().await.unwrap(),
            "tenants/T1/devices"
        );
        assert_eq!(
            applications.tenant_collection().await.unwrap(),
            "tenants/T1/applications"
        );
    }

    #[tokio::test]
    async fn test_fresh_client_is_unauthenticated() {
        let client = CloudThingClient::new("https://acme.cloudthing.io").unwrap();
        assert!(!client.is_authenticated().await);
        assert!(client.token().await.is_none());

        let err = client.clusters().get_by_id("c1", None).await.unwrap_err();
        assert!(matches!(err, Error::NotAuthenticated));
    }
}
