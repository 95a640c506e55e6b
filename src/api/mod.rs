//! API service modules for CloudThing endpoints.
//!
//! Resource services are aliases of the generic [`ResourceService`], which
//! provides get/list/stream/create/update/delete for every kind. Each
//! alias adds the parent-scoped endpoints of its resource, such as
//! [`ClustersService::list_by_application`]. [`TelemetryService`] covers the
//! time-series sub-API.

mod resource;

mod apikeys;
mod applications;
mod clusters;
mod devices;
mod directories;
mod exports;
mod groups;
mod memberships;
mod products;
mod telemetry;
mod tenant;
mod usergroups;
mod users;

pub use resource::ResourceService;

pub use apikeys::ApikeysService;
pub use applications::ApplicationsService;
pub use clusters::ClustersService;
pub use devices::DevicesService;
pub use directories::DirectoriesService;
pub use exports::ExportsService;
pub use groups::GroupsService;
pub use memberships::{ClusterMembershipsService, GroupMembershipsService, MembershipsService};
pub use products::ProductsService;
pub use telemetry::TelemetryService;
pub use tenant::TenantService;
pub use usergroups::UsergroupsService;
pub use users::UsersService;
