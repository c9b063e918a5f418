//! Final connection check against live HTTP servers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use httpmock::prelude::*;
use httpmock::Method::HEAD;
use services::{
    BackplaneConfiguration, BackplaneError, ConnectionChecker, HttpHealthProbe, ProxySelector,
};

#[tokio::test]
async fn test_reachable_url_without_proxy() {
    let server = MockServer::start_async().await;
    let head = server
        .mock_async(|when, then| {
            when.method(HEAD).path("/");
            then.status(204);
        })
        .await;

    let config = BackplaneConfiguration {
        url: server.base_url(),
        ..Default::default()
    };

    ConnectionChecker::new()
        .check_connection(&config)
        .await
        .unwrap();

    head.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_any_status_counts_as_reachable() {
    let server = MockServer::start_async().await;
    let _head = server
        .mock_async(|when, then| {
            when.method(HEAD);
            then.status(500);
        })
        .await;

    let config = BackplaneConfiguration {
        url: server.base_url(),
        ..Default::default()
    };

    assert!(ConnectionChecker::new()
        .check_connection(&config)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_unreachable_url_is_a_transport_error() {
    let config = BackplaneConfiguration {
        url: "http://127.0.0.1:1".to_string(),
        ..Default::default()
    };

    let err = ConnectionChecker::new()
        .check_connection(&config)
        .await
        .unwrap_err();

    match err {
        BackplaneError::Connection { url, .. } => assert_eq!(url, "http://127.0.0.1:1"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_server_fails_after_timeout() {
    let server = MockServer::start_async().await;
    let _head = server
        .mock_async(|when, then| {
            when.method(HEAD);
            then.status(200).delay(Duration::from_secs(10));
        })
        .await;

    let config = BackplaneConfiguration {
        url: server.base_url(),
        ..Default::default()
    };

    let started = Instant::now();
    let err = ConnectionChecker::new()
        .check_connection(&config)
        .await
        .unwrap_err();
    let elapsed = started.elapsed();

    match err {
        BackplaneError::Connection { source, .. } => assert!(source.is_timeout()),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(
        elapsed >= Duration::from_secs(4) && elapsed < Duration::from_secs(8),
        "check took {elapsed:?}, expected the 5s timeout to apply"
    );
}

#[tokio::test]
async fn test_check_routes_through_selected_proxy() {
    let proxy = MockServer::start_async().await;
    let health = proxy
        .mock_async(|when, then| {
            when.method(GET).path_contains("/healthz");
            then.status(200);
        })
        .await;
    let head = proxy
        .mock_async(|when, then| {
            when.method(HEAD);
            then.status(200);
        })
        .await;

    let service_url = "http://backplane.invalid";
    let selected = ProxySelector::new(Arc::new(HttpHealthProbe::new()))
        .select_proxy(service_url, &[proxy.base_url()])
        .await;
    assert!(selected.is_some());

    let config = BackplaneConfiguration {
        url: service_url.to_string(),
        proxy_url: selected,
        ..Default::default()
    };

    ConnectionChecker::new()
        .check_connection(&config)
        .await
        .unwrap();

    health.assert_hits_async(1).await;
    head.assert_hits_async(1).await;
}
