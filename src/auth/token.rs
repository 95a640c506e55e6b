//! Bearer tokens issued by the `auth/token` endpoint.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, TimeZone, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use crate::{Error, Result};

const TENANTS_SEGMENT: &str = "tenants";

/// A JSON Web Token used as the bearer credential for every request.
///
/// The token string is kept in a [`SecretString`] and never shows up in
/// `Debug` output. The client only reads the unverified payload claims
/// (`exp`, `iss`); signature checks are the API's business.
///
/// # Example
///
/// ```
/// use cloudthing_rs::Token;
///
/// let token = Token::new("header.payload.signature", "Bearer", 3600);
/// assert_eq!(token.token_type(), "Bearer");
/// assert!(!format!("{:?}", token).contains("payload"));
/// ```
pub struct Token {
    value: SecretString,
    token_type: String,
    expires_in: i64,
}

impl Token {
    /// Create a token from its raw parts.
    pub fn new(value: impl Into<String>, token_type: impl Into<String>, expires_in: i64) -> Self {
        Self {
            value: SecretString::from(value.into()),
            token_type: token_type.into(),
            expires_in,
        }
    }

    /// The raw JWT string.
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }

    /// Token type as reported by the API (normally `Bearer`).
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Lifetime in seconds as reported at issue time.
    pub fn expires_in(&self) -> i64 {
        self.expires_in
    }

    /// Decode the (unverified) payload claims.
    pub fn claims(&self) -> Result<Claims> {
        Claims::decode(self.expose())
    }

    /// Expiration time from the `exp` claim, if present and well formed.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims().ok()?.expires_at()
    }

    /// Whether the `exp` claim lies strictly after `now`.
    ///
    /// A token without a readable `exp` claim is never valid.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|exp| exp > now)
    }

    /// Tenant identifier: the last path segment of the `iss` claim.
    pub fn tenant_id(&self) -> Result<String> {
        self.claims()?.tenant_id()
    }
}

impl Clone for Token {
    fn clone(&self) -> Self {
        Self {
            value: SecretString::from(self.expose().to_owned()),
            token_type: self.token_type.clone(),
            expires_in: self.expires_in,
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
            && self.token_type == other.token_type
            && self.expires_in == other.expires_in
    }
}

impl Eq for Token {}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("token", &"[REDACTED]")
            .field("type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Wire shape of the `auth/token` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenResponse {
    token: String,
    #[serde(rename = "type", default)]
    token_type: String,
    #[serde(default)]
    expires_in: i64,
}

impl From<TokenResponse> for Token {
    fn from(r: TokenResponse) -> Self {
        Token::new(r.token, r.token_type, r.expires_in)
    }
}

/// The subset of JWT claims the client relies on.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Claims {
    /// Issuer, e.g. `https://acme.cloudthing.io/api/v1/tenants/T123`.
    #[serde(default)]
    pub iss: Option<String>,
    /// Expiration as seconds since the epoch. Integer or float.
    #[serde(default)]
    pub exp: Option<serde_json::Number>,
}

impl Claims {
    /// Decode the payload segment of a compact JWT without verifying it.
    pub fn decode(jwt: &str) -> Result<Self> {
        let mut segments = jwt.split('.');
        let payload = match (segments.next(), segments.next()) {
            (Some(_), Some(payload)) if !payload.is_empty() => payload,
            _ => return Err(Error::Decode("token is not a compact JWT".to_string())),
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| Error::Decode(format!("token payload is not base64url: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| Error::Decode(format!("token payload is not a claims object: {e}")))
    }

    /// `exp` as a timestamp, accepting both integer and float encodings.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let exp = self.exp.as_ref()?;
        let secs = exp.as_i64().or_else(|| exp.as_f64().map(|f| f as i64))?;
        Utc.timestamp_opt(secs, 0).single()
    }

    /// Last path segment of the issuer URL.
    ///
    /// A trailing slash is tolerated. An issuer that is not a URL, has no
    /// path, or ends in the bare `tenants` collection yields
    /// [`Error::Decode`].
    pub fn tenant_id(&self) -> Result<String> {
        let iss = self
            .iss
            .as_deref()
            .ok_or_else(|| Error::Decode("token has no iss claim".to_string()))?;
        let undecodable = || Error::Decode(format!("cannot derive tenant from issuer {iss:?}"));

        let url = Url::parse(iss).map_err(|_| undecodable())?;
        let id = url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .ok_or_else(undecodable)?;

        if id == TENANTS_SEGMENT {
            return Err(undecodable());
        }
        Ok(id.to_string())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// Build an unsigned compact JWT around the given claims.
    pub(crate) fn jwt(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.c2lnbmF0dXJl")
    }

    #[test]
    fn test_tenant_id_from_issuer() {
        let token = Token::new(
            jwt(json!({ "iss": "https://host/tenants/T123", "exp": 4102444800u64 })),
            "Bearer",
            3600,
        );
        assert_eq!(token.tenant_id().unwrap(), "T123");
    }

    #[test]
    fn test_tenant_id_requires_separator() {
        let claims = Claims {
            iss: Some("T123".into()),
            exp: None,
        };
        assert!(matches!(claims.tenant_id(), Err(Error::Decode(_))));

        let missing = Claims::default();
        assert!(matches!(missing.tenant_id(), Err(Error::Decode(_))));

        let trailing = Claims {
            iss: Some("https://host/tenants/T9/".into()),
            exp: None,
        };
        assert_eq!(trailing.tenant_id().unwrap(), "T9");
    }

    #[test]
    fn test_tenant_id_rejects_issuers_without_tenant() {
        for iss in [
            "https://host",
            "https://host/",
            "https://host/tenants",
            "https://host/tenants/",
            "https://host/api/v1/tenants//",
            "mailto:tenants",
        ] {
            let claims = Claims {
                iss: Some(iss.into()),
                exp: None,
            };
            assert!(
                matches!(claims.tenant_id(), Err(Error::Decode(_))),
                "issuer {iss:?} should not yield a tenant"
            );
        }

        let nested = Claims {
            iss: Some("https://acme.cloudthing.io/api/v1/tenants/abc123?x=1".into()),
            exp: None,
        };
        assert_eq!(nested.tenant_id().unwrap(), "abc123");
    }

    #[test]
    fn test_expiry_accepts_int_and_float() {
        let now = Utc::now();
        let future = now.timestamp() + 600;

        let int = Token::new(jwt(json!({ "exp": future })), "Bearer", 600);
        let float = Token::new(jwt(json!({ "exp": future as f64 + 0.5 })), "Bearer", 600);
        let past = Token::new(jwt(json!({ "exp": now.timestamp() - 1 })), "Bearer", 600);
        let absent = Token::new(jwt(json!({ "iss": "x/y" })), "Bearer", 600);

        assert!(int.is_valid_at(now));
        assert!(float.is_valid_at(now));
        assert!(!past.is_valid_at(now));
        assert!(!absent.is_valid_at(now));
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(Claims::decode("no-dots-here").is_err());
        assert!(Claims::decode("a.!!!.c").is_err());
        let not_json = format!("a.{}.c", URL_SAFE_NO_PAD.encode("plain text"));
        assert!(Claims::decode(&not_json).is_err());
        assert!(!Token::new("garbage", "Bearer", 0).is_valid_at(Utc::now()));
    }

    #[test]
    fn test_padded_payload_is_tolerated() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"iss":"https://host/tenants/b"}"#);
        let claims = Claims::decode(&format!("h.{payload}.s")).unwrap();
        assert_eq!(claims.tenant_id().unwrap(), "b");
    }

    #[test]
    fn test_token_debug_redacts_value() {
        let token = Token::new("super-secret-token", "Bearer", 10);
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("REDACTED"));
        assert_eq!(token.clone(), token);
    }

    #[test]
    fn test_token_response_shape() {
        let wire: TokenResponse =
            serde_json::from_value(json!({ "token": "abc", "type": "Bearer", "expiresIn": 900 }))
                .unwrap();
        let token = Token::from(wire);
        assert_eq!(token.expose(), "abc");
        assert_eq!(token.expires_in(), 900);
    }
}
