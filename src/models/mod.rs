//! Data models for the CloudThing API.
//!
//! Every resource kind comes in three shapes:
//!
//! - the domain type (`Cluster`), with relations decoded into [`Relation`]s
//! - the wire shape it is hydrated from (`ClusterResponse`)
//! - the client-settable payloads (`ClusterCreate`, `ClusterUpdate`)
//!
//! Shared building blocks live in [`primitives`], [`relation`] and
//! [`resource`]; [`telemetry`] holds the time-series points served under a
//! device's, cluster's or group's `resources` link.

pub mod primitives;
pub mod relation;
pub mod resource;
pub mod telemetry;

mod apikey;
mod application;
mod cluster;
mod device;
mod directory;
mod export;
mod group;
mod membership;
mod product;
mod tenant;
mod user;
mod usergroup;

pub use primitives::{Custom, Link, ListParams, ModelBase, Page, Property, RawPage};
pub use relation::{RawRelation, Relation};
pub use resource::{Creatable, Handle, Hydrate, Resource, Updatable};
pub use telemetry::{CommandPoint, DataPoint, EventPoint, TelemetryOwner};

pub use apikey::{Apikey, ApikeyCreate, ApikeyResponse, ApikeyUpdate};
pub use application::{Application, ApplicationCreate, ApplicationResponse, ApplicationUpdate};
pub use cluster::{Cluster, ClusterCreate, ClusterResponse, ClusterUpdate};
pub use device::{Device, DeviceCreate, DeviceResponse, DeviceUpdate};
pub use directory::{Directory, DirectoryCreate, DirectoryResponse, DirectoryUpdate};
pub use export::{
    Export, ExportCreate, ExportEntry, ExportLimits, ExportResponse, ExportUpdate, DEVICE_MODEL,
};
pub use group::{Group, GroupCreate, GroupResponse, GroupUpdate};
pub use membership::{
    ClusterMembership, ClusterMembershipCreate, ClusterMembershipResponse, GroupMembership,
    GroupMembershipCreate, GroupMembershipResponse, Membership, MembershipCreate,
    MembershipResponse,
};
pub use product::{
    CommandDescriptor, CommandPayload, Product, ProductCreate, ProductResources, ProductResponse,
    ProductUpdate, ResourceDescriptor,
};
pub use tenant::{Tenant, TenantResponse, TenantUpdate};
pub use user::{User, UserCreate, UserResponse, UserUpdate};
pub use usergroup::{Usergroup, UsergroupCreate, UsergroupResponse, UsergroupUpdate};
