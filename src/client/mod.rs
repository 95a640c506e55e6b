//! HTTP client, request options and pagination for the CloudThing API.
//!
//! This module provides the main entry point [`CloudThingClient`]. Every
//! resource operation funnels through one dispatcher that checks the
//! session, attaches headers and query parameters, and returns the raw
//! response for the calling service to interpret.
//!
//! # Example
//!
//! ```no_run
//! use cloudthing_rs::{CloudThingClient, RequestOptions};
//!
//! # async fn example() -> cloudthing_rs::Result<()> {
//! let client = CloudThingClient::new("https://acme.cloudthing.io")?;
//! client.set_basic_auth("admin", "secret").await?;
//!
//! let clusters = client
//!     .clusters()
//!     .list_by_application("app-1", Some(RequestOptions::new().paginate(1, 50)))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
mod options;
pub mod paginated;

pub use config::ClientConfig;
pub use http::CloudThingClient;
pub use options::{Expansion, Pagination, RequestOptions, TimeRange, DEFAULT_LIMIT};
pub use paginated::PaginatedStream;
pub(crate) use http::{decode, expect_status, expect_success, ClientInner, NO_BODY};
