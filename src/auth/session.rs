//! Session management for CloudThing API authentication.

use chrono::Utc;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;

use super::token::{Token, TokenResponse};
use crate::{Error, Result};

const AUTH_ENDPOINT: &str = "auth/token";

/// Authentication state of a client.
///
/// A session starts empty, is filled by a successful credential exchange or
/// token adoption, and is emptied again on revocation. Readers always get a
/// snapshot; the write lock is only held while a new state is committed.
///
/// # Thread Safety
///
/// `Session` is cheap to clone and safe to share across tasks. Concurrent
/// authentication changes are serialized by the lock, but the last writer
/// wins.
#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<Option<SessionInner>>>,
}

#[derive(Clone)]
struct SessionInner {
    token: Token,
    tenant_id: String,
}

impl Session {
    /// Create an unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a token is present and its `exp` claim lies in the future.
    pub async fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .await
            .as_ref()
            .is_some_and(|s| s.token.is_valid_at(Utc::now()))
    }

    /// Snapshot of the current token.
    pub async fn token(&self) -> Option<Token> {
        self.inner.read().await.as_ref().map(|s| s.token.clone())
    }

    /// Tenant identifier derived from the current token.
    pub async fn tenant_id(&self) -> Option<String> {
        self.inner.read().await.as_ref().map(|s| s.tenant_id.clone())
    }

    /// Token and tenant of a valid session, or [`Error::NotAuthenticated`].
    pub(crate) async fn credentials(&self) -> Result<(Token, String)> {
        let guard = self.inner.read().await;
        match guard.as_ref() {
            Some(s) if s.token.is_valid_at(Utc::now()) => Ok((s.token.clone(), s.tenant_id.clone())),
            _ => Err(Error::NotAuthenticated),
        }
    }

    /// Commit a token, deriving the tenant from its issuer.
    ///
    /// The session is left untouched when the issuer cannot be decoded.
    pub(crate) async fn commit(&self, token: Token) -> Result<String> {
        let tenant_id = token.tenant_id()?;
        *self.inner.write().await = Some(SessionInner {
            token,
            tenant_id: tenant_id.clone(),
        });
        Ok(tenant_id)
    }

    /// Forget the current token.
    pub(crate) async fn clear(&self) {
        self.inner.write().await.take();
    }

    /// Exchange basic credentials for a token at `auth/token`.
    ///
    /// `application` scopes the token to a single application.
    pub(crate) async fn exchange_credentials(
        http: &reqwest::Client,
        base: &Url,
        username: &str,
        password: &str,
        application: Option<&str>,
    ) -> Result<Token> {
        let mut url = base.join(AUTH_ENDPOINT)?;
        if let Some(application) = application.filter(|a| !a.is_empty()) {
            url.query_pairs_mut().append_pair("application", application);
        }
        tracing::debug!(url = %url, "requesting token");

        let response = http
            .post(url)
            .basic_auth(username, Some(password))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            let status = response.status().as_u16();
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            tracing::debug!(status, "token exchange rejected");
            return Err(Error::from_auth_response(status, &body));
        }

        let token_response: TokenResponse = response.json().await?;
        Ok(token_response.into())
    }

    /// Check that the API still accepts `token`.
    pub(crate) async fn probe(http: &reqwest::Client, base: &Url, token: &Token) -> Result<()> {
        let response = http
            .get(base.clone())
            .header(AUTHORIZATION, format!("Bearer {}", token.expose()))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            let status = response.status().as_u16();
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            tracing::debug!(status, "token probe rejected");
            return Err(Error::from_auth_response(status, &body));
        }
        Ok(())
    }

    /// Revoke the current token and clear the session.
    pub(crate) async fn revoke(&self, http: &reqwest::Client, base: &Url) -> Result<()> {
        let (token, tenant_id) = self.credentials().await?;
        let url = base.join(AUTH_ENDPOINT)?;

        let response = http
            .delete(url)
            .header(AUTHORIZATION, format!("Bearer {}", token.expose()))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if response.status() != StatusCode::NO_CONTENT {
            let status = response.status().as_u16();
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            return Err(Error::from_api_response(status, body));
        }

        self.clear().await;
        tracing::info!(tenant = %tenant_id, "token revoked");
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .finish()
    }
}
