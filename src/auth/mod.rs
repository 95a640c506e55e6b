//! Authentication and session management for the CloudThing API.
//!
//! Two ways lead to an authenticated client:
//!
//! 1. **Basic credentials** - username/password are exchanged for a JWT at
//!    `auth/token`, optionally scoped to one application.
//! 2. **Token adoption** - a token obtained elsewhere is probed against the
//!    API and kept if it is still accepted.
//!
//! Either way, the tenant is derived from the token's issuer claim when the
//! token is committed. There is no refresh flow: once the token expires the
//! client has to authenticate again.
//!
//! ```no_run
//! use cloudthing_rs::CloudThingClient;
//!
//! # async fn example() -> cloudthing_rs::Result<()> {
//! let client = CloudThingClient::new("https://acme.cloudthing.io")?;
//! client.set_basic_auth("admin", "secret").await?;
//! assert!(client.is_authenticated().await);
//! # Ok(())
//! # }
//! ```

mod session;
mod token;

pub use session::Session;
pub use token::{Claims, Token};

#[cfg(test)]
pub(crate) use token::tests::jwt;
