//! Integration tests for cloudthing-rs
//!
//! Every test runs against a local `httpmock` server standing in for a
//! CloudThing tenant host, so no credentials or network access are needed.
//! Tokens are unsigned JWTs whose issuer points at the mock server.
//!
//! Run with: cargo test --test api_tests
//!
//! Set RUST_LOG=cloudthing_rs=debug to see every dispatched request.

use std::sync::Once;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use futures_util::StreamExt;
use httpmock::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use cloudthing_rs::models::{ClusterCreate, DataPoint, EventPoint};
use cloudthing_rs::prelude::*;

static INIT: Once = Once::new();

/// Initialize logging for tests
fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

const TENANT: &str = "T1";

/// Unsigned compact JWT issued by `server` for tenant `T1`.
fn jwt(server: &MockServer, exp_offset: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = json!({
        "iss": server.url(format!("/api/v1/tenants/{TENANT}")),
        "exp": Utc::now().timestamp() + exp_offset,
    });
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

/// Client authenticated with a fresh token; returns the bearer header too.
async fn authenticated(server: &MockServer) -> (CloudThingClient, String) {
    init_logging();
    let raw = jwt(server, 3600);
    let bearer = format!("Bearer {raw}");

    server.mock(|when, then| {
        when.method(GET).path("/api/v1/").header("authorization", &bearer);
        then.status(200).json_body(json!({ "href": server.url("/api/v1/") }));
    });

    let client = CloudThingClient::new(&server.base_url()).unwrap();
    client
        .set_token_auth(Token::new(raw, "Bearer", 3600))
        .await
        .unwrap();
    (client, bearer)
}

mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_basic_auth_establishes_session() {
        init_logging();
        let server = MockServer::start();
        let token = jwt(&server, 3600);

        let exchange = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v1/auth/token")
                .header("authorization", "Basic YWRtaW46c2VjcmV0");
            then.status(200)
                .json_body(json!({ "token": token, "type": "Bearer", "expiresIn": 3600 }));
        });

        let client = CloudThingClient::new(&server.base_url()).unwrap();
        client.set_basic_auth("admin", "secret").await.unwrap();

        exchange.assert_calls(1);
        assert!(client.is_authenticated().await);
        assert_eq!(client.tenant_id().await.as_deref(), Some(TENANT));
        assert_eq!(client.token().await.unwrap().expires_in(), 3600);
    }

    #[tokio::test]
    async fn test_basic_auth_scoped_to_application() {
        init_logging();
        let server = MockServer::start();
        let token = jwt(&server, 3600);

        let exchange = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v1/auth/token")
                .query_param("application", "app-1");
            then.status(200)
                .json_body(json!({ "token": token, "type": "Bearer", "expiresIn": 600 }));
        });

        let client = CloudThingClient::new(&server.base_url()).unwrap();
        client
            .set_basic_auth_for_application("admin", "secret", "app-1")
            .await
            .unwrap();

        exchange.assert_calls(1);
        assert!(client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        init_logging();
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/auth/token");
            then.status(401).json_body(json!({ "message": "bad credentials" }));
        });

        let client = CloudThingClient::new(&server.base_url()).unwrap();
        let err = client.set_basic_auth("admin", "wrong").await.unwrap_err();

        match &err {
            Error::Authentication { status, message } => {
                assert_eq!(*status, 401);
                assert_eq!(message, "bad credentials");
            }
            other => panic!("Expected Authentication error, got {other:?}"),
        }
        assert_eq!(err.status(), Some(401));
        assert!(err.is_auth_error());
        assert!(err.is_client_error());
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_unavailable_token_endpoint_keeps_status() {
        init_logging();
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/auth/token");
            then.status(503);
        });

        let client = CloudThingClient::new(&server.base_url()).unwrap();
        let err = client.set_basic_auth("admin", "secret").await.unwrap_err();

        assert_eq!(err.status(), Some(503));
        assert!(err.is_server_error());
        assert!(!err.is_client_error());
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_rejected_token_keeps_previous_session() {
        let server = MockServer::start();
        let (client, _) = authenticated(&server).await;
        let before = client.token().await;

        server.mock(|when, then| {
            when.method(GET)
                .path("/api/v1/")
                .header("authorization", "Bearer revoked.token.value");
            then.status(401);
        });

        let err = client
            .set_token_auth(Token::new("revoked.token.value", "Bearer", 60))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Authentication { status: 401, .. }));
        assert_eq!(err.status(), Some(401));
        assert_eq!(client.token().await, before);
        assert_eq!(client.tenant_id().await.as_deref(), Some(TENANT));
    }

    #[tokio::test]
    async fn test_token_without_tenant_is_refused() {
        init_logging();
        let server = MockServer::start();
        let claims = URL_SAFE_NO_PAD.encode(
            json!({ "iss": "no-separator", "exp": Utc::now().timestamp() + 60 }).to_string(),
        );
        let raw = format!("h.{claims}.s");

        server.mock(|when, then| {
            when.method(GET).path("/api/v1/");
            then.status(200).json_body(json!({}));
        });

        let client = CloudThingClient::new(&server.base_url()).unwrap();
        let err = client
            .set_token_auth(Token::new(raw, "Bearer", 60))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Decode(_)));
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_revoke_clears_session() {
        let server = MockServer::start();
        let (client, bearer) = authenticated(&server).await;

        let revoke = server.mock(|when, then| {
            when.method(DELETE)
                .path("/api/v1/auth/token")
                .header("authorization", &bearer);
            then.status(204);
        });

        client.revoke_token().await.unwrap();
        revoke.assert_calls(1);
        assert!(!client.is_authenticated().await);
        assert!(client.token().await.is_none());

        let err = client.revoke_token().await.unwrap_err();
        assert!(matches!(err, Error::NotAuthenticated));
        revoke.assert_calls(1);
    }

    #[tokio::test]
    async fn test_unauthenticated_calls_never_hit_the_network() {
        init_logging();
        let server = MockServer::start();
        let mocks = [
            "/api/v1/tenants/T1/applications",
            "/api/v1/devices/d1",
            "/api/v1/devices/d1/resources/data",
        ]
        .map(|path| {
            server.mock(|when, then| {
                when.path(path);
                then.status(200).json_body(json!({}));
            })
        });

        let client = CloudThingClient::new(&server.base_url()).unwrap();

        let err = client.applications().list(None).await.unwrap_err();
        assert!(matches!(err, Error::NotAuthenticated));
        let err = client.devices().get_by_id("d1", None).await.unwrap_err();
        assert!(matches!(err, Error::NotAuthenticated));
        let err = client
            .telemetry()
            .data("devices/d1", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotAuthenticated));

        for mock in &mocks {
            assert_eq!(mock.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_expired_token_counts_as_unauthenticated() {
        init_logging();
        let server = MockServer::start();
        let raw = jwt(&server, -10);

        server.mock(|when, then| {
            when.method(GET).path("/api/v1/");
            then.status(200).json_body(json!({}));
        });
        let clusters = server.mock(|when, then| {
            when.method(GET).path("/api/v1/clusters/c1");
            then.status(200).json_body(json!({}));
        });

        let client = CloudThingClient::new(&server.base_url()).unwrap();
        client
            .set_token_auth(Token::new(raw, "Bearer", 0))
            .await
            .unwrap();

        assert!(!client.is_authenticated().await);
        let err = client.clusters().get_by_id("c1", None).await.unwrap_err();
        assert!(matches!(err, Error::NotAuthenticated));
        assert_eq!(clusters.calls(), 0);
    }
}

mod resource_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_application_with_expanded_directory() {
        let server = MockServer::start();
        let (client, bearer) = authenticated(&server).await;
        let directory_href = server.url("/api/v1/directories/dir-1");

        let get = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v1/applications/a1")
                .query_param("expand", "directory")
                .header("authorization", &bearer)
                .header("accept", "application/json");
            then.status(200).json_body(json!({
                "href": server.url("/api/v1/applications/a1"),
                "name": "Telemetry",
                "tenant": { "href": server.url("/api/v1/tenants/T1") },
                "directory": { "href": directory_href, "name": "Main" }
            }));
        });

        let app = client
            .applications()
            .get_by_id("a1", Some(RequestOptions::new().expand("directory")))
            .await
            .unwrap();

        get.assert_calls(1);
        assert_eq!(app.id(), "a1");
        assert_eq!(app.name, "Telemetry");
        assert_eq!(app.directory.link(), (true, directory_href.as_str()));
        assert_eq!(app.directory.get().unwrap().name, "Main");
        assert!(!app.tenant.is_expanded());
        assert!(app.clusters.is_absent());
    }

    #[tokio::test]
    async fn test_relation_resolves_through_the_api() {
        let server = MockServer::start();
        let (client, _) = authenticated(&server).await;
        let directory_href = server.url("/api/v1/directories/dir-1");

        server.mock(|when, then| {
            when.method(GET).path("/api/v1/applications/a1");
            then.status(200).json_body(json!({
                "href": server.url("/api/v1/applications/a1"),
                "directory": { "href": directory_href }
            }));
        });
        let directory = server.mock(|when, then| {
            when.method(GET).path("/api/v1/directories/dir-1");
            then.status(200)
                .json_body(json!({ "href": directory_href, "name": "Main" }));
        });

        let app = client.applications().get_by_id("a1", None).await.unwrap();
        assert_eq!(app.directory.link(), (false, directory_href.as_str()));

        let resolved = client.directories().resolve(&app.directory).await.unwrap();
        directory.assert_calls(1);
        assert_eq!(resolved.name, "Main");
    }

    #[tokio::test]
    async fn test_list_sends_pagination() {
        let server = MockServer::start();
        let (client, _) = authenticated(&server).await;

        let list = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v1/applications/a1/clusters")
                .query_param("limit", "2")
                .query_param("page", "3");
            then.status(200).json_body(json!({
                "href": server.url("/api/v1/applications/a1/clusters"),
                "size": 5,
                "limit": 2,
                "page": 3,
                "items": [
                    { "href": server.url("/api/v1/clusters/c5"), "name": "five" }
                ]
            }));
        });

        let page = client
            .clusters()
            .list_by_application("a1", Some(RequestOptions::new().paginate(3, 2)))
            .await
            .unwrap();

        list.assert_calls(1);
        assert_eq!(page.params.size, 5);
        assert_eq!(page.params.page, 3);
        assert!(!page.has_next());
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id(), "c5");
    }

    #[tokio::test]
    async fn test_stream_follows_next_links() {
        let server = MockServer::start();
        let (client, _) = authenticated(&server).await;
        let collection = format!("/api/v1/tenants/{TENANT}/applications");

        let first = server.mock(|when, then| {
            when.method(GET)
                .path(&collection)
                .query_param("limit", "2")
                .query_param("page", "1");
            then.status(200).json_body(json!({
                "size": 3,
                "limit": 2,
                "page": 1,
                "next": { "href": server.url(format!("{collection}?limit=2&page=2")) },
                "items": [
                    { "href": server.url("/api/v1/applications/a1"), "name": "one" },
                    { "href": server.url("/api/v1/applications/a2"), "name": "two" }
                ]
            }));
        });
        let second = server.mock(|when, then| {
            when.method(GET)
                .path(&collection)
                .query_param("limit", "2")
                .query_param("page", "2");
            then.status(200).json_body(json!({
                "size": 3,
                "limit": 2,
                "page": 2,
                "items": [
                    { "href": server.url("/api/v1/applications/a3"), "name": "three" }
                ]
            }));
        });

        let stream = client
            .applications()
            .stream(Some(RequestOptions::new().paginate(1, 2)))
            .await
            .unwrap();
        let names: Vec<String> = stream.map(|app| app.unwrap().name).collect().await;

        assert_eq!(names, ["one", "two", "three"]);
        first.assert_calls(1);
        second.assert_calls(1);
    }

    #[tokio::test]
    async fn test_create_expects_201_and_omits_server_fields() {
        let server = MockServer::start();
        let (client, _) = authenticated(&server).await;

        let create = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v1/applications/a1/clusters")
                .json_body(json!({ "name": "floor-2", "description": "east wing" }));
            then.status(201).json_body(json!({
                "href": server.url("/api/v1/clusters/c2"),
                "createdAt": "2024-03-01T10:00:00Z",
                "name": "floor-2",
                "description": "east wing",
                "application": { "href": server.url("/api/v1/applications/a1") }
            }));
        });

        let request = ClusterCreate {
            name: "floor-2".into(),
            description: "east wing".into(),
            ..ClusterCreate::default()
        };
        let cluster = client
            .clusters()
            .create_by_application("a1", &request)
            .await
            .unwrap();

        create.assert_calls(1);
        assert_eq!(cluster.id(), "c2");
        assert!(cluster.base.created_at.is_some());
    }

    #[tokio::test]
    async fn test_unexpected_status_is_an_api_error() {
        let server = MockServer::start();
        let (client, _) = authenticated(&server).await;

        server.mock(|when, then| {
            when.method(POST).path("/api/v1/applications/a1/clusters");
            then.status(200)
                .json_body(json!({ "href": server.url("/api/v1/clusters/c2") }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/clusters/missing");
            then.status(404)
                .json_body(json!({ "code": 404, "message": "Cluster not found" }));
        });

        let err = client
            .clusters()
            .create_by_application("a1", &ClusterCreate::default())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(200));

        let err = client
            .clusters()
            .get_by_id("missing", None)
            .await
            .unwrap_err();
        match err {
            Error::Api { status, message, .. } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Cluster not found");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_expects_204() {
        let server = MockServer::start();
        let (client, _) = authenticated(&server).await;

        let delete = server.mock(|when, then| {
            when.method(DELETE).path("/api/v1/devices/d1");
            then.status(204);
        });
        let wrong = server.mock(|when, then| {
            when.method(DELETE).path("/api/v1/devices/d2");
            then.status(200).json_body(json!({}));
        });

        client.devices().delete_by_id("d1").await.unwrap();
        delete.assert_calls(1);

        let err = client.devices().delete_by_id("d2").await.unwrap_err();
        assert_eq!(err.status(), Some(200));
        wrong.assert_calls(1);
    }

    #[tokio::test]
    async fn test_save_keeps_expanded_relations() {
        let server = MockServer::start();
        let (client, _) = authenticated(&server).await;
        let cluster_href = server.url("/api/v1/clusters/c1");
        let devices_href = server.url("/api/v1/clusters/c1/devices");

        server.mock(|when, then| {
            when.method(GET)
                .path("/api/v1/clusters/c1")
                .query_param("expand", "devices(limit:100,page:1)");
            then.status(200).json_body(json!({
                "href": cluster_href,
                "name": "floor-1",
                "devices": {
                    "href": devices_href,
                    "size": 1,
                    "items": [
                        { "href": server.url("/api/v1/devices/d1"), "token": "tok-1" }
                    ]
                }
            }));
        });
        let update = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v1/clusters/c1")
                .json_body(json!({ "name": "floor-1", "description": "second floor" }));
            then.status(200).json_body(json!({
                "href": cluster_href,
                "updatedAt": "2024-03-02T08:30:00Z",
                "name": "floor-1",
                "description": "second floor",
                "devices": { "href": devices_href }
            }));
        });

        let mut cluster = client
            .clusters()
            .get_by_id("c1", Some(RequestOptions::new().expand_paged("devices", 1, 100)))
            .await
            .unwrap();
        cluster.description = "second floor".into();
        cluster.save().await.unwrap();

        update.assert_calls(1);
        assert_eq!(cluster.description, "second floor");
        assert!(cluster.base.updated_at.is_some());
        assert!(cluster.devices.is_expanded());
        assert_eq!(cluster.devices.get().unwrap()[0].token, "tok-1");
    }

    #[tokio::test]
    async fn test_instance_delete_uses_href() {
        let server = MockServer::start();
        let (client, _) = authenticated(&server).await;

        server.mock(|when, then| {
            when.method(GET).path("/api/v1/groups/g1");
            then.status(200)
                .json_body(json!({ "href": server.url("/api/v1/groups/g1"), "name": "g" }));
        });
        let delete = server.mock(|when, then| {
            when.method(DELETE).path("/api/v1/groups/g1");
            then.status(204);
        });

        let group = client.groups().get_by_id("g1", None).await.unwrap();
        group.delete().await.unwrap();
        delete.assert_calls(1);
    }

    #[tokio::test]
    async fn test_tenant_get_uses_session_tenant() {
        let server = MockServer::start();
        let (client, _) = authenticated(&server).await;

        let get = server.mock(|when, then| {
            when.method(GET).path(format!("/api/v1/tenants/{TENANT}"));
            then.status(200).json_body(json!({
                "href": server.url(format!("/api/v1/tenants/{TENANT}")),
                "shortName": "acme",
                "name": "Acme"
            }));
        });

        let tenant = client.tenant().get(None).await.unwrap();
        get.assert_calls(1);
        assert_eq!(tenant.id(), TENANT);
        assert_eq!(tenant.short_name, "acme");
    }

    #[tokio::test]
    async fn test_denied_without_redirect_is_not_retried() {
        let server = MockServer::start();
        let (client, _) = authenticated(&server).await;

        let current = server.mock(|when, then| {
            when.method(GET).path("/api/v1/users/current");
            then.status(403).json_body(json!({ "message": "forbidden" }));
        });

        let err = client.users().get_current(None).await.unwrap_err();
        assert_eq!(err.status(), Some(403));
        current.assert_calls(1);
    }
}

mod redirect_tests {
    use super::*;

    #[tokio::test]
    async fn test_denied_after_redirect_is_retried_at_final_url() {
        let server = MockServer::start();
        let (client, bearer) = authenticated(&server).await;
        let canonical = MockServer::start();
        let user_href = canonical.url("/api/v1/users/u1");

        let current = server.mock(|when, then| {
            when.method(GET).path("/api/v1/users/current");
            then.status(302).header("location", &user_href);
        });
        // The bearer header does not survive a redirect to another origin.
        let stripped = canonical.mock(|when, then| {
            when.method(GET)
                .path("/api/v1/users/u1")
                .header_missing("authorization");
            then.status(401).json_body(json!({ "message": "missing token" }));
        });
        let retried = canonical.mock(|when, then| {
            when.method(GET)
                .path("/api/v1/users/u1")
                .header("authorization", &bearer);
            then.status(200).json_body(json!({
                "href": user_href,
                "username": "jdoe",
                "firstName": "Jane",
                "surname": "Doe"
            }));
        });

        let user = client.users().get_current(None).await.unwrap();

        current.assert_calls(1);
        stripped.assert_calls(1);
        retried.assert_calls(1);
        assert_eq!(user.id(), "u1");
        assert_eq!(user.username, "jdoe");
        assert_eq!(user.full_name(), "Jane Doe");
    }

    #[tokio::test]
    async fn test_retry_is_attempted_only_once() {
        let server = MockServer::start();
        let (client, _) = authenticated(&server).await;
        let canonical = MockServer::start();
        let tenant_href = canonical.url(format!("/api/v1/tenants/{TENANT}"));

        server.mock(|when, then| {
            when.method(GET).path(format!("/api/v1/tenants/{TENANT}"));
            then.status(302).header("location", &tenant_href);
        });
        let denied = canonical.mock(|when, then| {
            when.method(GET).path(format!("/api/v1/tenants/{TENANT}"));
            then.status(403).json_body(json!({ "message": "forbidden" }));
        });

        let err = client.tenant().get(None).await.unwrap_err();

        assert_eq!(err.status(), Some(403));
        denied.assert_calls(2);
    }
}

mod telemetry_tests {
    use super::*;

    #[tokio::test]
    async fn test_read_data_page() {
        let server = MockServer::start();
        let (client, _) = authenticated(&server).await;
        let device = server.url("/api/v1/devices/d1");

        let read = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v1/devices/d1/resources/data")
                .query_param("limit", "10")
                .query_param("page", "1");
            then.status(200).json_body(json!({
                "size": 2,
                "limit": 10,
                "page": 1,
                "items": [
                    { "time": "2024-03-01T10:00:00Z", "key": "temp", "value": 21.5 },
                    { "time": "2024-03-01T10:01:00Z", "key": "temp", "value": 21.7 }
                ]
            }));
        });

        let page = client
            .telemetry()
            .data(device.as_str(), Some(RequestOptions::new().paginate(1, 10)))
            .await
            .unwrap();

        read.assert_calls(1);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].key.as_deref(), Some("temp"));
        assert_eq!(page.items[1].value, json!(21.7));
    }

    #[tokio::test]
    async fn test_write_data_accepts_empty_body() {
        let server = MockServer::start();
        let (client, _) = authenticated(&server).await;
        let device = server.url("/api/v1/devices/d1");

        let write = server.mock(|when, then| {
            when.method(POST).path("/api/v1/devices/d1/resources/data");
            then.status(204);
        });

        let written = client
            .telemetry()
            .write_data(device.as_str(), &[DataPoint::new("temp", Utc::now(), 22.0)])
            .await
            .unwrap();

        write.assert_calls(1);
        assert!(written.is_empty());
    }

    #[tokio::test]
    async fn test_write_events_returns_echo() {
        let server = MockServer::start();
        let (client, _) = authenticated(&server).await;
        let cluster = server.url("/api/v1/clusters/c1");

        let write = server.mock(|when, then| {
            when.method(POST).path("/api/v1/clusters/c1/resources/events");
            then.status(201).json_body(json!([
                { "time": "2024-03-01T10:00:00Z", "key": "door", "payload": { "open": true } }
            ]));
        });

        let echoed = client
            .telemetry()
            .write_events(
                cluster.as_str(),
                &[EventPoint::new("door", Utc::now(), json!({ "open": true }))],
            )
            .await
            .unwrap();

        write.assert_calls(1);
        assert_eq!(echoed.len(), 1);
        assert_eq!(echoed[0].payload, json!({ "open": true }));
    }

    #[tokio::test]
    async fn test_write_failure_is_an_api_error() {
        let server = MockServer::start();
        let (client, _) = authenticated(&server).await;

        server.mock(|when, then| {
            when.method(POST).path("/api/v1/groups/g1/resources/commands");
            then.status(400).json_body(json!({ "message": "unknown command" }));
        });

        let err = client
            .telemetry()
            .write_commands(
                server.url("/api/v1/groups/g1").as_str(),
                &[EventPoint::new("reboot", Utc::now(), json!(null))],
            )
            .await
            .unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(err.status(), Some(400));
    }
}
