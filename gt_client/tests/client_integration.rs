//! Integration tests for gt_client network functionality.
//!
//! Tests network error handling and client state without a running
//! server: every request here fails at the transport layer or before it.

use gt_client::api_client::{ApiClient, ApiError, AuthApi};
use std::time::Duration;
use tokio::time::timeout;

/// Generate a unique email for tests
fn unique_email(prefix: &str) -> String {
    let rand_id: u32 = rand::random();
    format!("{}_{}@example.com", prefix, rand_id % 100000)
}

// ============================================================================
// Network Error Scenario Tests
// ============================================================================

#[tokio::test]
async fn test_connection_refused() {
    let client = ApiClient::new("http://localhost:19999".to_string());

    let result = client.login("user@example.com", "password", None).await;

    assert!(result.is_err(), "Should fail when server is not available");
    assert!(
        matches!(result.unwrap_err(), ApiError::Transport(_)),
        "Connection failure should be a transport error"
    );
}

#[tokio::test]
async fn test_timeout_handling() {
    // Non-routable IP, will hang until the outer timeout fires.
    let client = ApiClient::new("http://192.0.2.1:80".to_string());

    let result = timeout(
        Duration::from_secs(3),
        client.login("user@example.com", "password", None),
    )
    .await;

    assert!(
        result.is_err() || result.unwrap().is_err(),
        "Should fail when connecting to unreachable host"
    );
}

#[tokio::test]
async fn test_invalid_hostname() {
    let client =
        ApiClient::new("http://invalid-hostname-that-does-not-exist.local".to_string());

    let result = client
        .request_recovery("user@example.com")
        .await;

    assert!(result.is_err(), "Should fail with invalid hostname");
}

#[tokio::test]
async fn test_transport_errors_surface_the_generic_message() {
    let client = ApiClient::new("http://localhost:19999".to_string());

    let err = client
        .login("user@example.com", "password", None)
        .await
        .unwrap_err();

    // Transport details never reach the user verbatim.
    assert_eq!(err.user_message(), "Ha ocurrido un error inesperado");
}

// ============================================================================
// Authentication State Tests
// ============================================================================

#[tokio::test]
async fn test_authenticated_endpoints_require_a_token() {
    // No token set: the call is rejected before any request is issued,
    // even though no server is listening on this port.
    let client = ApiClient::new("http://localhost:19999".to_string());

    for result in [
        client.sessions().await.map(|_| ()),
        client.logout_all().await,
        client.two_factor_setup().await.map(|_| ()),
        client.change_password("old", "new-password", None).await,
        client.achievements().await.map(|_| ()),
    ] {
        assert!(
            matches!(result.unwrap_err(), ApiError::NotAuthenticated),
            "Authenticated endpoint must short-circuit without a token"
        );
    }
}

#[tokio::test]
async fn test_token_survives_failed_requests() {
    let client = ApiClient::new("http://localhost:19999".to_string());
    client.set_token(Some("tok-1".to_string()));

    // The request fails at the transport layer, not at the token check.
    let result = client.sessions().await;
    assert!(matches!(result.unwrap_err(), ApiError::Transport(_)));

    // A second call still gets past the token check.
    let result = client.logout_all().await;
    assert!(matches!(result.unwrap_err(), ApiError::Transport(_)));
}

#[tokio::test]
async fn test_clearing_the_token_logs_the_client_out() {
    let client = ApiClient::new("http://localhost:19999".to_string());
    client.set_token(Some("tok-1".to_string()));
    client.set_token(None);

    let result = client.sessions().await;
    assert!(matches!(result.unwrap_err(), ApiError::NotAuthenticated));
}

// ============================================================================
// Connection State Tests
// ============================================================================

#[tokio::test]
async fn test_multiple_clients_are_independent() {
    let client1 = ApiClient::new("http://localhost:19999".to_string());
    let client2 = ApiClient::new("http://localhost:19999".to_string());

    client1.set_token(Some("tok-1".to_string()));

    // client2 never saw the token.
    assert!(matches!(
        client2.sessions().await.unwrap_err(),
        ApiError::NotAuthenticated
    ));
    assert!(matches!(
        client1.sessions().await.unwrap_err(),
        ApiError::Transport(_)
    ));
}

// ============================================================================
// URL Construction Tests
// ============================================================================

#[tokio::test]
async fn test_url_with_trailing_slash() {
    let client = ApiClient::new("http://localhost:19999/".to_string());

    // URL construction must not produce a double slash; the request still
    // fails at the transport layer.
    let result = client.login("user@example.com", "password", None).await;
    assert!(matches!(result.unwrap_err(), ApiError::Transport(_)));
}

#[tokio::test]
async fn test_https_url() {
    let client = ApiClient::new("https://localhost:3443".to_string());

    let result = client.login("user@example.com", "password", None).await;
    assert!(result.is_err());
}

// ============================================================================
// Retry Behavior Tests
// ============================================================================

#[tokio::test]
async fn test_no_automatic_retry_on_failure() {
    let client = ApiClient::new("http://localhost:19999".to_string());

    let start = std::time::Instant::now();
    let result = client.login("user@example.com", "password", None).await;
    let elapsed = start.elapsed();

    // Should fail quickly without retries (< 5 seconds)
    assert!(result.is_err());
    assert!(
        elapsed < Duration::from_secs(5),
        "Should not retry automatically"
    );
}

// ============================================================================
// Concurrent Request Tests
// ============================================================================

#[tokio::test]
async fn test_concurrent_api_calls() {
    let mut handles = vec![];

    for _ in 0..5 {
        let client = ApiClient::new("http://localhost:19999".to_string());
        let handle = tokio::spawn(async move {
            client.request_recovery("user@example.com").await
        });
        handles.push(handle);
    }

    let mut error_count = 0;
    for handle in handles {
        let result = handle.await.expect("Task should complete");
        if result.is_err() {
            error_count += 1;
        }
    }

    assert_eq!(
        error_count, 5,
        "All concurrent requests should fail without server"
    );
}

// ============================================================================
// Edge Case Tests
// ============================================================================

#[tokio::test]
async fn test_empty_base_url() {
    let client = ApiClient::new("".to_string());

    let result = client.login("user@example.com", "password", None).await;
    assert!(result.is_err(), "Should fail with empty base URL");
}

#[tokio::test]
async fn test_special_characters_in_credentials() {
    let client = ApiClient::new("http://localhost:19999".to_string());

    let result = client
        .login(&unique_email("user@#$"), "pass!@#$%^&*()", None)
        .await;

    // Serialization must handle special characters; the failure is the
    // missing server, nothing else.
    assert!(matches!(result.unwrap_err(), ApiError::Transport(_)));
}
