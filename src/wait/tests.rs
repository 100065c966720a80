//! Tests for status polling

use super::*;
use crate::client::{ServiceClient, ServiceClientConfig};
use crate::error::Error;
use futures::FutureExt;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast(pending: &[&str], target: &[&str]) -> StateChangeConf {
    StateChangeConf::new(pending.iter().copied(), target.iter().copied())
        .delay(Duration::from_millis(1))
        .poll_interval(Duration::from_millis(5))
        .timeout(Duration::from_secs(5))
}

/// Refresh replaying a fixed list of states, repeating the last one
fn scripted(states: &'static [&'static str]) -> (impl StateRefresh, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let refresh = FnRefresh::new(move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        let state = states[n.min(states.len() - 1)];
        async move { Ok::<_, Error>(RefreshResult::state(state)) }.boxed()
    });
    (refresh, calls)
}

// ============================================================================
// StateChangeConf Tests
// ============================================================================

#[test]
fn test_defaults() {
    let conf = StateChangeConf::default();
    assert_eq!(conf.pending, vec![STATE_PENDING]);
    assert_eq!(conf.target, vec![STATE_COMPLETED]);
    assert_eq!(conf.delay, Duration::from_secs(10));
    assert_eq!(conf.poll_interval, Duration::from_secs(5));
}

#[tokio::test]
async fn test_reaches_target() {
    let (refresh, calls) = scripted(&["PENDING", "PENDING", "COMPLETED"]);
    let result = assert_ok!(fast(&["PENDING"], &["COMPLETED"]).wait_for_state(&refresh).await);

    assert_eq!(result.state, "COMPLETED");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_unexpected_state() {
    let (refresh, _) = scripted(&["PENDING", "Failed"]);
    let err = assert_err!(fast(&["PENDING"], &["COMPLETED"]).wait_for_state(&refresh).await);

    match err {
        Error::UnexpectedState { state, target } => {
            assert_eq!(state, "Failed");
            assert_eq!(target, "COMPLETED");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_timeout_reports_last_state() {
    let (refresh, _) = scripted(&["PENDING"]);
    let conf = fast(&["PENDING"], &["COMPLETED"]).timeout(Duration::from_millis(30));
    let err = assert_err!(conf.wait_for_state(&refresh).await);

    match err {
        Error::WaitTimeout { last_state, .. } => assert_eq!(last_state, "PENDING"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_refresh_error_ends_wait() {
    let refresh = FnRefresh::new(|| {
        async { Err::<RefreshResult, _>(Error::Other("boom".to_string())) }.boxed()
    });
    let err = assert_err!(fast(&["PENDING"], &["COMPLETED"]).wait_for_state(&refresh).await);
    assert_eq!(err.to_string(), "boom");
}

// ============================================================================
// StatusFieldRefresh Tests
// ============================================================================

fn client(server: &MockServer) -> ServiceClient {
    ServiceClient::new(
        ServiceClientConfig::builder()
            .endpoint(server.uri())
            .project_id("p1")
            .build(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_status_field_refresh_job_completes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/autopilot/v3/projects/p1/jobs/job-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": {"phase": "Running"}})),
        )
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/autopilot/v3/projects/p1/jobs/job-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": {"phase": "Success"}})),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let refresh = StatusFieldRefresh::new(
        &client,
        "autopilot/v3/projects/{project_id}/jobs/{job_id}",
        "status.phase",
    )
    .path_param("job_id", "job-1")
    .success(["Success"])
    .failure(["Failed"]);

    let result = assert_ok!(StateChangeConf::default()
        .delay(Duration::ZERO)
        .poll_interval(Duration::from_millis(5))
        .wait_for_state(&refresh)
        .await);

    assert_eq!(result.state, STATE_COMPLETED);
    assert_eq!(result.value, Some(json!({"status": {"phase": "Success"}})));
}

#[tokio::test]
async fn test_status_field_refresh_failure_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/jobs"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": {"phase": "Failed"}})),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let refresh = StatusFieldRefresh::new(&client, "v1/jobs", "status.phase")
        .success(["Success"])
        .failure(["Failed"]);

    let polled = assert_ok!(refresh.refresh().await);
    assert_eq!(polled.state, "Failed");
}

#[tokio::test]
async fn test_status_field_refresh_missing_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": {}})))
        .mount(&server)
        .await;

    let client = client(&server);
    let refresh = StatusFieldRefresh::new(&client, "v1/jobs", "status.phase");
    let err = assert_err!(refresh.refresh().await);
    assert!(matches!(err, Error::JsonPath { .. }));
}

#[tokio::test]
async fn test_status_field_refresh_not_found_as_deleted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/clusters/c1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
        .mount(&server)
        .await;

    let client = client(&server);
    let refresh = StatusFieldRefresh::new(&client, "v1/clusters/c1", "status.phase")
        .missing_as(STATE_DELETED);
    let polled = assert_ok!(refresh.refresh().await);
    assert_eq!(polled, RefreshResult::state(STATE_DELETED));

    let strict = StatusFieldRefresh::new(&client, "v1/clusters/c1", "status.phase");
    let err = assert_err!(strict.refresh().await);
    assert!(err.is_not_found());
}
