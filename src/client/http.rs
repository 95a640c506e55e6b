//! HTTP client implementation for the CloudThing API.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use url::Url;

use crate::api::{
    ApikeysService, ApplicationsService, ClusterMembershipsService, ClustersService,
    DevicesService, DirectoriesService, ExportsService, GroupMembershipsService, GroupsService,
    MembershipsService, ProductsService, TelemetryService, TenantService, UsergroupsService,
    UsersService,
};
use crate::auth::{Session, Token};
use crate::{Error, Result};

use super::config::ClientConfig;
use super::options::RequestOptions;

/// Path of the v1 API below the tenant host.
pub(crate) const API_PREFIX: &str = "/api/v1/";

const MEDIA_TYPE: &str = "application/json";

/// Placeholder body for requests that send none.
pub(crate) const NO_BODY: Option<&()> = None;

/// The main client for interacting with the CloudThing API.
///
/// The client owns the authentication [`Session`] and hands out one service
/// per resource kind. Services are cheap handles sharing the same HTTP
/// connection pool and session.
///
/// # Example
///
/// ```no_run
/// use cloudthing_rs::models::Resource;
/// use cloudthing_rs::{CloudThingClient, RequestOptions};
///
/// # async fn example() -> cloudthing_rs::Result<()> {
/// let client = CloudThingClient::new("https://acme.cloudthing.io")?;
/// client.set_basic_auth("admin", "secret").await?;
///
/// let page = client.applications().list(None).await?;
/// for app in &page.items {
///     println!("{} ({})", app.name, app.id());
/// }
///
/// let app = client
///     .applications()
///     .get_by_id("abc", Some(RequestOptions::new().expand("directory")))
///     .await?;
/// let (expanded, href) = app.directory.link();
/// println!("directory expanded={expanded} href={href}");
/// # Ok(())
/// # }
/// ```
pub struct CloudThingClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: Url,
    pub(crate) session: Session,
    pub(crate) config: ClientConfig,
}

impl CloudThingClient {
    /// Create an unauthenticated client for a tenant host such as
    /// `https://acme.cloudthing.io`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, ClientConfig::default())
    }

    /// Create an unauthenticated client with custom configuration.
    pub fn with_config(base_url: &str, config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&format!(
            "{}{}",
            base_url.trim_end_matches('/'),
            API_PREFIX
        ))?;
        let http = config.build_http()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                session: Session::new(),
                config,
            }),
        })
    }

    /// Resolved API base, e.g. `https://acme.cloudthing.io/api/v1/`.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Exchange username/password for a token and keep it for further requests.
    pub async fn set_basic_auth(&self, username: &str, password: &str) -> Result<()> {
        let token = self.get_auth_token(username, password, None).await?;
        self.commit(token).await
    }

    /// Like [`set_basic_auth`](Self::set_basic_auth), with the token scoped
    /// to one application.
    pub async fn set_basic_auth_for_application(
        &self,
        username: &str,
        password: &str,
        application: &str,
    ) -> Result<()> {
        let token = self
            .get_auth_token(username, password, Some(application))
            .await?;
        self.commit(token).await
    }

    /// Exchange username/password for a token without storing it.
    pub async fn get_auth_token(
        &self,
        username: &str,
        password: &str,
        application: Option<&str>,
    ) -> Result<Token> {
        Session::exchange_credentials(
            &self.inner.http,
            &self.inner.base_url,
            username,
            password,
            application,
        )
        .await
    }

    /// Adopt a token obtained elsewhere.
    ///
    /// The token is probed against the API first; on any failure the current
    /// session stays as it was.
    pub async fn set_token_auth(&self, token: Token) -> Result<()> {
        Session::probe(&self.inner.http, &self.inner.base_url, &token).await?;
        self.commit(token).await
    }

    /// Revoke the current token at the API and clear the session.
    pub async fn revoke_token(&self) -> Result<()> {
        self.inner
            .session
            .revoke(&self.inner.http, &self.inner.base_url)
            .await
    }

    /// Whether the client holds an unexpired token.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.session.is_authenticated().await
    }

    /// Snapshot of the current token.
    pub async fn token(&self) -> Option<Token> {
        self.inner.session.token().await
    }

    /// Tenant derived from the current token.
    pub async fn tenant_id(&self) -> Option<String> {
        self.inner.session.tenant_id().await
    }

    async fn commit(&self, token: Token) -> Result<()> {
        let tenant = self.inner.session.commit(token).await?;
        tracing::info!(tenant = %tenant, "session established");
        Ok(())
    }

    /// Get the tenant service.
    pub fn tenant(&self) -> TenantService {
        TenantService::new(self.inner.clone())
    }

    /// Get the directories service.
    pub fn directories(&self) -> DirectoriesService {
        DirectoriesService::new(self.inner.clone())
    }

    /// Get the applications service.
    pub fn applications(&self) -> ApplicationsService {
        ApplicationsService::new(self.inner.clone())
    }

    /// Get the products service.
    pub fn products(&self) -> ProductsService {
        ProductsService::new(self.inner.clone())
    }

    /// Get the devices service.
    pub fn devices(&self) -> DevicesService {
        DevicesService::new(self.inner.clone())
    }

    /// Get the clusters service.
    pub fn clusters(&self) -> ClustersService {
        ClustersService::new(self.inner.clone())
    }

    /// Get the groups service.
    pub fn groups(&self) -> GroupsService {
        GroupsService::new(self.inner.clone())
    }

    /// Get the users service.
    pub fn users(&self) -> UsersService {
        UsersService::new(self.inner.clone())
    }

    /// Get the usergroups service.
    pub fn usergroups(&self) -> UsergroupsService {
        UsergroupsService::new(self.inner.clone())
    }

    /// Get the user-to-usergroup memberships service.
    pub fn memberships(&self) -> MembershipsService {
        MembershipsService::new(self.inner.clone())
    }

    /// Get the device-to-cluster memberships service.
    pub fn cluster_memberships(&self) -> ClusterMembershipsService {
        ClusterMembershipsService::new(self.inner.clone())
    }

    /// Get the device-to-group memberships service.
    pub fn group_memberships(&self) -> GroupMembershipsService {
        GroupMembershipsService::new(self.inner.clone())
    }

    /// Get the API keys service.
    pub fn apikeys(&self) -> ApikeysService {
        ApikeysService::new(self.inner.clone())
    }

    /// Get the exports service.
    pub fn exports(&self) -> ExportsService {
        ExportsService::new(self.inner.clone())
    }

    /// Get the telemetry (data, events, commands) service.
    pub fn telemetry(&self) -> TelemetryService {
        TelemetryService::new(self.inner.clone())
    }
}

impl ClientInner {
    /// Resolve an endpoint: absolute URLs are kept, anything else is joined
    /// onto the API base.
    pub(crate) fn resolve(&self, endpoint: &str) -> Result<Url> {
        match Url::parse(endpoint) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(self.base_url.join(endpoint)?),
            Err(e) => Err(e.into()),
        }
    }

    /// Tenant of the current session, or [`Error::NotAuthenticated`].
    pub(crate) async fn tenant_id(&self) -> Result<String> {
        let (_, tenant_id) = self.session.credentials().await?;
        Ok(tenant_id)
    }

    /// Build request headers with authentication.
    fn build_headers(&self, token: &Token) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token.expose()))
                .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE));

        Ok(headers)
    }

    /// Send one authenticated request and hand back the raw response.
    ///
    /// Fails with [`Error::NotAuthenticated`] before any I/O when the session
    /// is missing or expired. Status codes are left to the caller.
    pub(crate) async fn dispatch<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        options: Option<&RequestOptions>,
    ) -> Result<reqwest::Response> {
        let (token, _) = self.session.credentials().await?;

        let mut url = self.resolve(endpoint)?;
        if let Some(options) = options {
            let pairs = options.query_pairs();
            if !pairs.is_empty() {
                url.query_pairs_mut().extend_pairs(pairs);
            }
        }

        let headers = self.build_headers(&token)?;
        tracing::debug!(method = %method, url = %url, "dispatching request");

        let mut request = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        tracing::debug!(status = response.status().as_u16(), url = %response.url(), "response received");
        Ok(response)
    }
}

/// Pass the response through if it carries `expected`, otherwise turn it
/// into an [`Error::Api`].
pub(crate) async fn expect_status(
    response: reqwest::Response,
    expected: StatusCode,
) -> Result<reqwest::Response> {
    if response.status() == expected {
        return Ok(response);
    }
    Err(api_error(response).await)
}

/// Like [`expect_status`], accepting any 2xx code.
pub(crate) async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    Err(api_error(response).await)
}

async fn api_error(response: reqwest::Response) -> Error {
    let status = response.status().as_u16();
    let bytes = response.bytes().await.unwrap_or_default();
    let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        }
    });
    Error::from_api_response(status, body)
}

/// Decode a JSON body.
pub(crate) async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl Clone for CloudThingClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for CloudThingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudThingClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("config", &self.inner.config)
            .finish()
    }
}
