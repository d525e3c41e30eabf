//! Unit tests for access token handling

use super::*;
use base64::Engine as _;
use crate::apa::http::GraphqlEndpoint;
use std::sync::Arc;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Unsigned JWT carrying only an `exp` claim
fn fake_jwt(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp));
    format!("{}.{}.signature", header, claims)
}

fn token_response(token: &str) -> serde_json::Value {
    json!({
        "data": {
            "generateAccessToken": {
                "accessToken": token,
                "__typename": "AccessTokenPayload"
            }
        }
    })
}

fn client_for(server: &MockServer) -> GraphqlClient {
    let host = server.uri().trim_start_matches("http://").to_string();
    GraphqlClient::new(GraphqlEndpoint::new("http", host)).unwrap()
}

/// Mount a refresh endpoint that must be hit exactly `times` times
async fn mount_refresh(server: &MockServer, token: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "variables": { "refreshToken": "refresh-xyz" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response(token)))
        .expect(times)
        .mount(server)
        .await;
}

#[cfg(test)]
mod credentials_tests {
    use super::*;

    #[test]
    fn test_jwt_expiry_reads_exp_claim() {
        let token = fake_jwt(1_900_000_000);
        let expiry = jwt_expiry(&token).unwrap();
        assert_eq!(expiry.timestamp(), 1_900_000_000);
    }

    #[test]
    fn test_jwt_expiry_opaque_token() {
        assert!(jwt_expiry("test-token-123").is_none());
        assert!(jwt_expiry("a.not-base64!.c").is_none());
    }

    #[test]
    fn test_issued_now_uses_default_lifetime_for_opaque_tokens() {
        let before = Utc::now();
        let credentials = Credentials::issued_now("opaque");
        let lifetime = credentials.expires_at - before;

        assert!(lifetime <= TimeDelta::seconds(DEFAULT_TOKEN_LIFETIME_SECS + 1));
        assert!(lifetime >= TimeDelta::seconds(DEFAULT_TOKEN_LIFETIME_SECS - 5));
        assert!(credentials.is_valid());
    }

    #[test]
    fn test_issued_now_uses_jwt_expiry() {
        let exp = (Utc::now() + TimeDelta::seconds(600)).timestamp();
        let credentials = Credentials::issued_now(fake_jwt(exp));
        assert_eq!(credentials.expires_at.timestamp(), exp);
    }

    #[test]
    fn test_validity_respects_refresh_margin() {
        let now = Utc::now();
        let almost_expired =
            Credentials::new("t", now + TimeDelta::seconds(REFRESH_MARGIN_SECS - 1));
        let comfortable = Credentials::new("t", now + TimeDelta::seconds(REFRESH_MARGIN_SECS + 60));

        assert!(!almost_expired.is_valid_at(now));
        assert!(comfortable.is_valid_at(now));
    }

    #[test]
    fn test_expired_credentials_invalid() {
        let credentials = Credentials::new("t", Utc::now() - TimeDelta::seconds(10));
        assert!(!credentials.is_valid());
    }
}

#[cfg(test)]
mod refresh_tests {
    use super::*;

    #[tokio::test]
    async fn test_access_token_refreshes_when_empty() {
        let mock_server = MockServer::start().await;
        mount_refresh(&mock_server, "test-token-123", 1).await;

        let session = Session::new(client_for(&mock_server), "refresh-xyz");
        let token = session.access_token().await.unwrap();

        assert_eq!(token, "test-token-123");
        assert!(session.credentials().await.is_some());
    }

    #[tokio::test]
    async fn test_access_token_cached_between_calls() {
        let mock_server = MockServer::start().await;
        mount_refresh(&mock_server, "test-token-123", 1).await;

        let session = Session::new(client_for(&mock_server), "refresh-xyz");
        let first = session.access_token().await.unwrap();
        let second = session.access_token().await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_seed_token_used_without_refresh() {
        let mock_server = MockServer::start().await;
        mount_refresh(&mock_server, "unused", 0).await;

        let session = Session::new(client_for(&mock_server), "refresh-xyz")
            .with_access_token(Some("seeded".to_string()));

        assert_eq!(session.access_token().await.unwrap(), "seeded");
    }

    #[tokio::test]
    async fn test_expired_seed_triggers_exactly_one_refresh() {
        let mock_server = MockServer::start().await;
        mount_refresh(&mock_server, "fresh", 1).await;

        let expired = fake_jwt((Utc::now() - TimeDelta::seconds(60)).timestamp());
        let session = Session::new(client_for(&mock_server), "refresh-xyz")
            .with_access_token(Some(expired));

        assert_eq!(session.access_token().await.unwrap(), "fresh");
        assert_eq!(session.access_token().await.unwrap(), "fresh");
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_refresh() {
        let mock_server = MockServer::start().await;
        mount_refresh(&mock_server, "shared", 1).await;

        let session = Arc::new(
            Session::new(client_for(&mock_server), "refresh-xyz")
                .with_credentials(Credentials::new("old", Utc::now() - TimeDelta::seconds(1))),
        );

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let session = Arc::clone(&session);
                tokio::spawn(async move { session.access_token().await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "shared");
        }
    }

    #[tokio::test]
    async fn test_invalidate_forces_refresh() {
        let mock_server = MockServer::start().await;
        mount_refresh(&mock_server, "after-invalidate", 1).await;

        let session = Session::new(client_for(&mock_server), "refresh-xyz")
            .with_access_token(Some("seeded".to_string()));
        assert_eq!(session.access_token().await.unwrap(), "seeded");

        session.invalidate("seeded").await;
        assert!(session.credentials().await.is_none());
        assert_eq!(session.access_token().await.unwrap(), "after-invalidate");
    }

    #[tokio::test]
    async fn test_late_invalidate_keeps_newer_token() {
        let mock_server = MockServer::start().await;
        mount_refresh(&mock_server, "fresh", 1).await;

        let session = Session::new(client_for(&mock_server), "refresh-xyz")
            .with_access_token(Some("seeded".to_string()));
        let stale = session.access_token().await.unwrap();

        // Two requests were both rejected with the seeded token.
        session.invalidate(&stale).await;
        assert_eq!(session.access_token().await.unwrap(), "fresh");
        session.invalidate(&stale).await;

        assert_eq!(
            session.credentials().await.map(|c| c.access_token).as_deref(),
            Some("fresh")
        );
        assert_eq!(session.access_token().await.unwrap(), "fresh");
    }

    #[tokio::test]
    async fn test_invalidate_on_empty_cache() {
        let mock_server = MockServer::start().await;
        let session = Session::new(client_for(&mock_server), "refresh-xyz");

        session.invalidate("anything").await;
        assert!(session.credentials().await.is_none());
    }

    #[tokio::test]
    async fn test_rejected_refresh_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "message": "Invalid refresh token" }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let session = Session::new(client_for(&mock_server), "refresh-xyz");
        match session.access_token().await {
            Err(ApaError::Authentication { message }) => {
                assert!(message.contains("Invalid refresh token"));
            }
            other => panic!("Expected Authentication error, got {:?}", other),
        }
        assert!(session.credentials().await.is_none());
    }

    #[tokio::test]
    async fn test_refresh_http_status_is_authentication_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let session = Session::new(client_for(&mock_server), "refresh-xyz");
        assert!(matches!(
            session.access_token().await,
            Err(ApaError::Authentication { .. })
        ));
    }

    #[tokio::test]
    async fn test_refresh_without_token_in_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "generateAccessToken": { "accessToken": null } }
            })))
            .mount(&mock_server)
            .await;

        let session = Session::new(client_for(&mock_server), "refresh-xyz");
        match session.access_token().await {
            Err(ApaError::Authentication { message }) => {
                assert_eq!(message, "no access token found in response");
            }
            other => panic!("Expected Authentication error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refresh_transport_failure_stays_http_error() {
        let client = GraphqlClient::new(GraphqlEndpoint::new("http", "127.0.0.1:9")).unwrap();
        let session = Session::new(client, "refresh-xyz");

        assert!(matches!(
            session.access_token().await,
            Err(ApaError::Http(_))
        ));
    }
}
